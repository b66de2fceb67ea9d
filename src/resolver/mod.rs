//! Commit graph walk selecting the nearest version tag

pub mod tag_resolver;

pub use tag_resolver::{Candidate, Resolution, TagResolver};
