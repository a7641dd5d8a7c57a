//! Recursive enumeration of the files under a root directory.
//!
//! A [`TreeWalker`] visits every non-directory entry below a root and hands its
//! full path to a callback. Directories are descended into but never reported.
//! Visit order carries no meaning for layout resolution; the two walkers here
//! differ only in the order they produce and in how they read the filesystem.

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Exhaustive file enumeration below a root directory.
///
/// Any filesystem failure aborts the walk and is returned as an error; callers
/// never observe a partial enumeration as success.
pub trait TreeWalker {
    /// Call `visit` once for every non-directory entry under `root`.
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path)) -> Result<()>;
}

/// Depth-first walker backed by `walkdir`, siblings in file-name order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstWalker;

impl TreeWalker for DepthFirstWalker {
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path)) -> Result<()> {
        let mut visited = 0usize;

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| LayoutError::walk(root, e))?;
            if entry.file_type().is_dir() {
                continue;
            }
            visit(entry.path());
            visited += 1;
        }

        tracing::trace!(
            "Depth-first walk of {} visited {} files",
            root.display(),
            visited
        );
        Ok(())
    }
}

/// Level-order walker.
///
/// Each directory is listed and sorted by file name; its files are reported
/// immediately and its subdirectories are queued behind every directory already
/// waiting, so all files at depth `n` are seen before any file at depth `n + 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstWalker;

impl TreeWalker for BreadthFirstWalker {
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path)) -> Result<()> {
        let metadata = fs::metadata(root).map_err(|e| LayoutError::read_dir(root, e))?;
        if !metadata.is_dir() {
            visit(root);
            return Ok(());
        }

        let mut visited = 0usize;
        let mut queue = VecDeque::from([root.to_path_buf()]);

        while let Some(dir) = queue.pop_front() {
            let mut entries = fs::read_dir(&dir)
                .and_then(|listing| listing.collect::<std::io::Result<Vec<_>>>())
                .map_err(|e| LayoutError::read_dir(&dir, e))?;
            entries.sort_by_key(|entry| entry.file_name());

            for entry in entries {
                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .map_err(|e| LayoutError::read_dir(&path, e))?;

                if file_type.is_dir() {
                    queue.push_back(path);
                } else {
                    visit(&path);
                    visited += 1;
                }
            }
        }

        tracing::trace!(
            "Breadth-first walk of {} visited {} files",
            root.display(),
            visited
        );
        Ok(())
    }
}

/// Traversal order, selectable from configuration.
///
/// `Traversal` is itself a [`TreeWalker`] that dispatches to the matching
/// walker, so a resolver can be built from configuration without boxing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// Recursive descent via [`DepthFirstWalker`].
    #[default]
    DepthFirst,
    /// Level order via [`BreadthFirstWalker`].
    BreadthFirst,
}

impl TreeWalker for Traversal {
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path)) -> Result<()> {
        match self {
            Self::DepthFirst => DepthFirstWalker.walk(root, visit),
            Self::BreadthFirst => BreadthFirstWalker.walk(root, visit),
        }
    }
}

impl std::fmt::Display for Traversal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepthFirst => write!(f, "depth-first"),
            Self::BreadthFirst => write!(f, "breadth-first"),
        }
    }
}
