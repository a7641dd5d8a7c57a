//! CLI definition for the layoutchain command-line interface.
//!
//! Only depends on `clap`, `std` and the library's option types.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use layoutchain::{ResolveStrategy, ResolverOverrides, Traversal};

/// Chain-building algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Sort layouts by path length and scan them per file
    LengthOrdered,
    /// Descend a trie of directory segments per file
    DirectoryTrie,
}

impl From<StrategyArg> for ResolveStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::LengthOrdered => ResolveStrategy::LengthOrdered,
            StrategyArg::DirectoryTrie => ResolveStrategy::DirectoryTrie,
        }
    }
}

/// Directory traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TraversalArg {
    /// Recursive descent, siblings in name order
    DepthFirst,
    /// Level by level, shallow files first
    BreadthFirst,
}

impl From<TraversalArg> for Traversal {
    fn from(arg: TraversalArg) -> Self {
        match arg {
            TraversalArg::DepthFirst => Traversal::DepthFirst,
            TraversalArg::BreadthFirst => Traversal::BreadthFirst,
        }
    }
}

/// layoutchain - resolve nested layout chains
///
/// Walks a directory tree and prints, for every content file, the layouts that
/// wrap it from the outermost to the innermost, followed by the file itself.
#[derive(Parser, Debug)]
#[command(name = "layoutchain")]
#[command(version)]
#[command(about = "Resolve nested template layout chains from directory structure")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the layout chain of every content file under a directory
    Resolve {
        /// Directory to walk
        #[arg(default_value = ".")]
        root: PathBuf,
        /// File extension to match, without the dot
        #[arg(short, long)]
        ext: Option<String>,
        /// Base name identifying layout files
        #[arg(short, long)]
        layout: Option<String>,
        /// Only report content files under this prefix of the root
        #[arg(short, long)]
        scope: Option<String>,
        /// Chain-building algorithm
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Directory traversal order
        #[arg(long, value_enum)]
        traversal: Option<TraversalArg>,
        /// Configuration file (defaults to ./layoutchain.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print identifiers relative to the root
        #[arg(short, long)]
        relative: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a synthetic nested dataset for benchmarking
    Generate {
        /// Directory to write into
        dir: PathBuf,
        /// Number of independent directory chains
        #[arg(long, default_value_t = 3)]
        dirs: usize,
        /// Nesting depth of each chain
        #[arg(long, default_value_t = 2)]
        depth: usize,
    },
}

impl Commands {
    /// Configuration overrides carried by the `resolve` flags.
    pub fn overrides(&self) -> ResolverOverrides {
        match self {
            Commands::Resolve {
                ext,
                layout,
                scope,
                strategy,
                traversal,
                ..
            } => ResolverOverrides {
                extension: ext.clone(),
                layout_marker: layout.clone(),
                scope: scope.clone(),
                strategy: strategy.map(Into::into),
                traversal: traversal.map(Into::into),
            },
            Commands::Generate { .. } => ResolverOverrides::default(),
        }
    }
}
