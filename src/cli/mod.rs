pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CheckArgs, CliArgs, Commands, ConfigArgs, ListArgs, PatchArgs};
pub use output::{OutputFormat, OutputFormatter};
