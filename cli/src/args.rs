//! Command line argument parsing.
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AvailableLanguage {
    C,
    Cxx,
    Cython,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AvailableStyle {
    Type,
    Tag,
    Both,
}

#[derive(clap::Parser)]
#[command(
    version,
    about,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true,
    name = "headshare"
)]
pub struct Args {
    #[command(subcommand)]
    pub subcommand: Option<Command>,

    /// Enable verbose logging; repeat for trace output
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Report errors only, overriding any verbosity options
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file to use instead of searching the input roots
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,

    /// Language of the generated declarations
    #[arg(short, long = "lang")]
    pub language: Option<AvailableLanguage>,

    /// Declaration style used for C structs and enums
    #[arg(short, long)]
    pub style: Option<AvailableStyle>,

    /// Wrap generated C functions in extern "C" guards for C++ consumers
    #[arg(long)]
    pub cpp_compat: bool,

    /// File to write output to; defaults to stdout. mtime will be preserved
    /// if the file contents don't change
    #[arg(short, long = "output")]
    pub output: Option<PathBuf>,

    /// Generate, compare against the existing output file and fail if they
    /// are different
    #[arg(long)]
    pub verify: bool,

    /// Write a template configuration file and exit. The file will be
    /// written to headshare.toml by default or to the path given with
    /// --config-file
    #[arg(short, long)]
    pub generate_config: bool,

    /// Follow symbolic links to directories instead of ignoring them
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// Rust files or crate directories to generate declarations for
    #[arg(required_unless_present = "generate_config", num_args = 1..)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::Subcommand)]
pub enum Command {
    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        shell: clap_complete::Shell,
    },
}
