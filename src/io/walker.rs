//! Discovery of Python files under an analysis root.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::core::Error;

pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Every Python file under the root, gitignore rules applied, sorted
    /// for deterministic report order. A file root is returned as-is.
    pub fn walk(&self) -> Result<Vec<PathBuf>, Error> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| Error::Io(std::io::Error::other(e)))?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let is_python = path
            .extension()
            .map(|ext| ext == "py")
            .unwrap_or(false);
        if !is_python {
            return false;
        }

        let path_str = path.to_string_lossy();
        for pattern in &self.ignore_patterns {
            if glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
            {
                return false;
            }
        }

        true
    }
}

pub fn find_python_files(root: &Path) -> Result<Vec<PathBuf>, Error> {
    FileWalker::new(root.to_path_buf()).walk()
}
