use crate::config::InjectConfig;
use crate::patch::DuplicatePolicy;
use crate::scan::EntryNaming;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Injects manual test sources into an Eclipse CDT project file
#[derive(Parser, Debug)]
#[command(
    name = "cproject-inject",
    about = "Injects manual test sources into an Eclipse CDT .cproject as source-path entries",
    version,
    long_about = "cproject-inject walks a directory of manual test sources and declares every \
                  file it finds as a source path in a .cproject file, right after the existing \
                  \"Src\" source-path entry. Run without a subcommand to patch with the defaults."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Insert source-path entries for every discovered file",
        long_about = "Scans the search root and inserts one source-path entry per file after \
                      every anchor line of the project file. The file is replaced atomically.\n\n\
                      Examples:\n  \
                      cproject-inject patch\n  \
                      cproject-inject patch --dry-run --format json\n  \
                      cproject-inject patch --search-root Manual_Tests/stm32 --skip-existing"
    )]
    Patch(PatchArgs),

    #[command(
        about = "List the files that would be declared",
        long_about = "Prints every file under the search root as the name it would be \
                      declared under, without touching the project file."
    )]
    List(ListArgs),

    #[command(
        about = "Inspect the source paths a project file declares",
        long_about = "Parses the project file as XML and lists its source-path entries, \
                      flagging names declared more than once. Exits with status 1 when \
                      duplicates are found."
    )]
    Check(CheckArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(long, value_name = "DIR", help = "Directory scanned for test sources")]
    pub search_root: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        help = "Declare paths relative to the workspace or to the search root"
    )]
    pub naming: Option<NamingArg>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    #[arg(short = 'p', long, value_name = "FILE", help = "Project file to patch")]
    pub project: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub project: ProjectArgs,

    #[arg(long, value_name = "TEXT", help = "Line fragment to insert entries after")]
    pub anchor: Option<String>,

    #[arg(
        long,
        value_name = "TEXT",
        help = "Generated line, with {name} replaced by the file path"
    )]
    pub template: Option<String>,

    #[arg(long, help = "Do not insert entries that already exist in the project file")]
    pub skip_existing: bool,

    #[arg(long, help = "Report what would change without writing")]
    pub dry_run: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

impl Default for PatchArgs {
    fn default() -> Self {
        Self {
            source: SourceArgs::default(),
            project: ProjectArgs::default(),
            anchor: None,
            template: None,
            skip_existing: false,
            dry_run: false,
            format: OutputFormatArg::Human,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingArg {
    Workspace,
    Root,
}

impl From<NamingArg> for EntryNaming {
    fn from(arg: NamingArg) -> Self {
        match arg {
            NamingArg::Workspace => EntryNaming::Workspace,
            NamingArg::Root => EntryNaming::RootRelative,
        }
    }
}

impl SourceArgs {
    pub fn apply(&self, config: &mut InjectConfig) {
        if let Some(root) = &self.search_root {
            config.search_root = root.clone();
        }
        if let Some(naming) = self.naming {
            config.naming = naming.into();
        }
    }
}

impl ProjectArgs {
    pub fn apply(&self, config: &mut InjectConfig) {
        if let Some(project) = &self.project {
            config.project_file = project.clone();
        }
    }
}

impl PatchArgs {
    /// Layers command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut InjectConfig) {
        self.source.apply(config);
        self.project.apply(config);
        if let Some(anchor) = &self.anchor {
            config.anchor = anchor.clone();
        }
        if let Some(template) = &self.template {
            config.entry_template = template.clone();
        }
        if self.skip_existing {
            config.duplicates = DuplicatePolicy::SkipExisting;
        }
    }
}
