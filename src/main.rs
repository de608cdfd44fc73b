use cproject_inject::cli::commands::{CliArgs, Commands, PatchArgs};
use cproject_inject::cli::handlers::{handle_check, handle_config, handle_list, handle_patch};
use cproject_inject::util::logging::parse_level;
use cproject_inject::util::{init_logging, LoggingConfig};
use cproject_inject::{InjectConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("cproject-inject v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let config = InjectConfig::default();

    let exit_code = match &args.command {
        None => handle_patch(&PatchArgs::default(), config),
        Some(Commands::Patch(patch_args)) => handle_patch(patch_args, config),
        Some(Commands::List(list_args)) => handle_list(list_args, config),
        Some(Commands::Check(check_args)) => handle_check(check_args, config),
        Some(Commands::Config(config_args)) => handle_config(config_args, config),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}
