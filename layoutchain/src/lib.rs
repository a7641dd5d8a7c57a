//! Layout chain resolution for nested template directories.
//!
//! Static-site style trees let any directory carry a layout file that wraps every
//! page below it. This crate walks such a tree once and computes, for every content
//! file, the ordered chain of layouts that apply to it, outermost first, ending with
//! the file itself. Nothing is rendered; only the chains are computed.
//!
//! # Overview
//!
//! - [`TreeWalker`] - exhaustive file enumeration ([`DepthFirstWalker`], [`BreadthFirstWalker`])
//! - [`ResolveRules`] - extension filter and layout marker, classifying files as [`FileKind`]
//! - [`LayoutResolver`] - drives the walk and builds a [`LayoutMap`] of [`LayoutChain`]s
//! - [`ResolverConfig`] - figment-layered settings for building a resolver
//!
//! # Example
//!
//! ```no_run
//! use layoutchain::resolve;
//!
//! // site/layout.html, site/blog/layout.html, site/blog/post1.html
//! let layouts = resolve("site", "html", "layout", ".")?;
//! let chain = layouts.get("site/blog/post1").unwrap();
//! assert_eq!(
//!     chain.as_slice(),
//!     ["site/layout", "site/blog/layout", "site/blog/post1"]
//! );
//! # Ok::<(), layoutchain::LayoutError>(())
//! ```

mod chain;
mod config;
mod error;
pub mod generate;
mod resolver;
mod walker;

pub use chain::{LayoutChain, LayoutMap};
pub use config::{ResolverConfig, ResolverOverrides, CONFIG_FILE_NAME, ENV_PREFIX};
pub use error::{LayoutError, Result};
pub use resolver::{
    resolve, FileKind, LayoutResolver, ResolveRules, ResolveStrategy, Scope, UNRESTRICTED_SCOPE,
};
pub use walker::{BreadthFirstWalker, DepthFirstWalker, Traversal, TreeWalker};
