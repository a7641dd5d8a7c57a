//! Synthetic layout trees for benchmarks and smoke tests.
//!
//! A dataset is `num_dirs` independent chains of directories, each
//! `nesting_depth` levels deep. Every directory receives [`FILES_PER_DIR`] files
//! cycling through [`FILE_TYPES`]; every fifth file is named `layout` instead of
//! `file{n}`, so each directory holds one `layout.html` and one `layout.go` plus
//! two html content files.

use crate::error::{LayoutError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions cycled through in each generated directory.
pub const FILE_TYPES: [&str; 4] = ["html", "go", "ts", "css"];

/// Files written into every generated directory.
pub const FILES_PER_DIR: usize = 10;

/// Shape of a generated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSpec {
    pub num_dirs: usize,
    pub nesting_depth: usize,
}

impl DatasetSpec {
    pub const SMALL: Self = Self::new(3, 2);
    pub const MEDIUM: Self = Self::new(30, 4);
    pub const LARGE: Self = Self::new(100, 5);

    pub const fn new(num_dirs: usize, nesting_depth: usize) -> Self {
        Self {
            num_dirs,
            nesting_depth,
        }
    }

    /// Number of non-layout html files a dataset of this shape contains.
    pub fn html_content_files(&self) -> usize {
        let per_dir = (0..FILES_PER_DIR)
            .filter(|&f| FILE_TYPES[f % FILE_TYPES.len()] == "html" && !is_layout(f))
            .count();
        self.num_dirs * self.nesting_depth * per_dir
    }
}

fn is_layout(index: usize) -> bool {
    index % 5 == 0
}

/// Write a dataset under `dir` and return how many html content files it wrote.
///
/// Directories are created as needed and existing files with the same names
/// are overwritten; nothing is removed.
pub fn generate_dataset(dir: &Path, spec: DatasetSpec) -> Result<usize> {
    tracing::debug!(
        "Generating dataset at {} ({} dirs, depth {})",
        dir.display(),
        spec.num_dirs,
        spec.nesting_depth
    );

    let mut html_count = 0;

    for i in 0..spec.num_dirs {
        let mut current = dir.to_path_buf();

        for d in 0..spec.nesting_depth {
            current = current.join(format!("dir{i}_{d}"));
            fs::create_dir_all(&current)
                .map_err(|e| LayoutError::directory_creation(&current, e))?;

            for f in 0..FILES_PER_DIR {
                let ext = FILE_TYPES[f % FILE_TYPES.len()];
                let path = generated_file(&current, f, ext);

                let content = format!("// dummy content for {}\n", path.display());
                fs::write(&path, content).map_err(|e| LayoutError::file_write(&path, e))?;

                if ext == "html" && !is_layout(f) {
                    html_count += 1;
                }
            }
        }
    }

    tracing::debug!("Wrote {} html content files to {}", html_count, dir.display());
    Ok(html_count)
}

fn generated_file(dir: &Path, index: usize, ext: &str) -> PathBuf {
    if is_layout(index) {
        dir.join(format!("layout.{ext}"))
    } else {
        dir.join(format!("file{index}.{ext}"))
    }
}
