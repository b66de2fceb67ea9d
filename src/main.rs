use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use minver::cli::orchestration::{self, VersionWorkflowArgs};
use minver::ui::{self, Verbosity};

#[derive(clap::Parser)]
#[command(
    name = "minver",
    version,
    about = "Calculate a semantic version for a git working directory from its tags"
)]
struct Args {
    #[arg(default_value = ".", help = "Working directory inside the repository")]
    work_dir: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, env = "MINVER_TAG_PREFIX", help = "Only consider tags with this prefix, e.g. 'v'")]
    tag_prefix: Option<String>,

    #[arg(
        short = 'm',
        long,
        env = "MINVER_MAJOR_MINOR",
        help = "Force the major and minor components, e.g. '2.1'"
    )]
    major_minor: Option<String>,

    #[arg(short, long, env = "MINVER_BUILD_METADATA", help = "Build metadata to append, e.g. 'ci.42'")]
    build_metadata: Option<String>,

    #[arg(
        short = 'p',
        long,
        env = "MINVER_DEFAULT_PRE_RELEASE_IDENTIFIERS",
        help = "Pre-release identifiers used for untagged versions [default: alpha.0]"
    )]
    default_pre_release_identifiers: Option<String>,

    #[arg(
        short,
        long,
        env = "MINVER_AUTO_INCREMENT",
        help = "Component bumped after a release tag: major, minor, patch or build [default: build]"
    )]
    auto_increment: Option<String>,

    #[arg(long, env = "MINVER_VERSION_OVERRIDE", help = "Print this version without reading the repository")]
    version_override: Option<String>,

    #[arg(long, help = "Append 'dirty' to the build metadata when the working tree has changes")]
    mark_dirty: bool,

    #[arg(
        short,
        long,
        env = "MINVER_VERBOSITY",
        default_value = "warn",
        help = "Diagnostic output on stderr: error, warn, info, debug or trace"
    )]
    verbosity: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let verbosity = match args.verbosity.parse::<Verbosity>() {
        Ok(verbosity) => verbosity,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(2);
        }
    };

    let workflow_args = VersionWorkflowArgs {
        work_dir: args.work_dir,
        config_path: args.config,
        tag_prefix: args.tag_prefix,
        major_minor: args.major_minor,
        build_metadata: args.build_metadata,
        default_pre_release_identifiers: args.default_pre_release_identifiers,
        auto_increment: args.auto_increment,
        version_override: args.version_override,
        mark_dirty: args.mark_dirty,
        debug_log: verbosity.logs_walk(),
    };

    let result = orchestration::resolve_options(&workflow_args).and_then(|options| {
        // walk logging from the config file needs debug output to be visible
        let verbosity = if options.debug_log {
            verbosity.max(Verbosity::Debug)
        } else {
            verbosity
        };
        ui::init_logging(verbosity);
        orchestration::run_with_options(&workflow_args.work_dir, options)
            .map(|result| (verbosity, result))
    });

    let (verbosity, result) = match result {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(if e.is_config() { 2 } else { 1 });
        }
    };

    if verbosity >= Verbosity::Debug {
        for warning in &result.warnings {
            ui::display_boundary_warning(warning);
        }
    }

    if verbosity >= Verbosity::Info {
        ui::display_status(&format!(
            "Version {} from {}",
            result.version,
            ui::describe_origin(result.tag.as_deref(), result.height)
        ));
    }

    ui::display_version(&result.version);
    Ok(())
}
