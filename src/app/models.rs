use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DIRS: &[&str] = &["./include", "./src", "./tests"];
pub const DEFAULT_EXTENSIONS: &[&str] = &["cc", "h"];
pub const DEFAULT_FORMATTER: &str = "clang-format";
pub const DEFAULT_STYLE: &str = "file";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// The directories a run will visit, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSet {
    /// A single directory given with `--dir`.
    Explicit(PathBuf),
    /// The built-in (or preset) sequence of source trees.
    Defaults(Vec<PathBuf>),
}

impl TargetSet {
    pub fn builtin() -> Self {
        TargetSet::Defaults(DEFAULT_DIRS.iter().map(PathBuf::from).collect())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        match self {
            TargetSet::Explicit(dir) => std::slice::from_ref(dir),
            TargetSet::Defaults(dirs) => dirs,
        }
    }
}

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub targets: TargetSet,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub formatter: String,
    pub style: String,
    pub timeout: Duration,
    pub list_only: bool,
}

/// A single file picked up for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub path: PathBuf,
    pub relative_path: String,
}
