//! Command line of the tree-search program

use std::path::{Path, PathBuf};

/// Selects the tree-search mode.
pub const SEARCH_MODE_FLAG: &str = "-P";
/// Output directory.
pub const OUTPUT_FLAG: &str = "-o";
/// Number of sampled topologies; enables the two sampling directories.
pub const SAMPLING_FLAG: &str = "-s";
/// Input sequence file.
pub const INPUT_FLAG: &str = "--inseq";

/// Written under the output directory only when sampling is requested.
pub const BEST_TOPOLOGIES_DIR: &str = "bestTopos";
/// Written under the output directory only when sampling is requested.
pub const BETTER_TREES_DIR: &str = "betterTrees";

/// One run of the search program.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchInvocation {
    pub executable: String,
    /// Arguments placed before the search flags, e.g. an interpreter's script path.
    pub leading_args: Vec<String>,
    pub output_dir: PathBuf,
    pub input: PathBuf,
    pub sampling: Option<u32>,
}

impl SearchInvocation {
    pub fn new(
        executable: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executable: executable.into(),
            leading_args: Vec::new(),
            output_dir: output_dir.into(),
            input: input.into(),
            sampling: None,
        }
    }

    pub fn leading_arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    pub fn sampling(mut self, count: u32) -> Self {
        self.sampling = Some(count);
        self
    }

    /// Full argument list, without the executable.
    pub fn args(&self) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.push(SEARCH_MODE_FLAG.to_string());
        args.push(OUTPUT_FLAG.to_string());
        args.push(path_arg(&self.output_dir));
        if let Some(count) = self.sampling {
            args.push(SAMPLING_FLAG.to_string());
            args.push(count.to_string());
        }
        args.push(INPUT_FLAG.to_string());
        args.push(path_arg(&self.input));
        args
    }

    pub fn best_topologies_dir(&self) -> PathBuf {
        self.output_dir.join(BEST_TOPOLOGIES_DIR)
    }

    pub fn better_trees_dir(&self) -> PathBuf {
        self.output_dir.join(BETTER_TREES_DIR)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
