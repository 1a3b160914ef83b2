use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Format C++ source files in a directory with clang-format"
)]
pub struct Cli {
    /// The source directory to format. If omitted, format all default source trees
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Formatter executable to invoke (default: clang-format)
    #[arg(long)]
    pub formatter: Option<String>,

    /// Value passed to the formatter as -style=<STYLE> (default: file)
    #[arg(long)]
    pub style: Option<String>,

    /// Per-file timeout in seconds (default: 15)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Additional file extensions to format, without the dot (e.g., 'cpp' 'hpp')
    #[arg(long, num_args = 1..)]
    pub ext: Option<Vec<String>>,

    /// Patterns for files to skip, relative to the target directory
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Print the files that would be formatted without touching them
    #[arg(long)]
    pub list: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
