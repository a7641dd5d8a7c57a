//! Layout chain resolution.
//!
//! A resolution run walks the whole tree once, classifies every file with a
//! matching extension as either a layout or a content file, and then builds,
//! for each content file, the chain of layouts that wrap it.
//!
//! # Identifiers
//!
//! Files are identified by their path with the extension removed, components
//! joined by `/` and `.` components dropped: walking `site` yields
//! `site/app/index` for `site/app/index.html`, walking `.` yields `app/index`.
//!
//! # Ordering
//!
//! The default [`ResolveStrategy::LengthOrdered`] sorts layouts by identifier
//! length and tests ancestry with a plain string prefix on owning directories,
//! so a layout in `app/blog` also wraps content in `app/blog2`.
//! [`ResolveStrategy::DirectoryTrie`] descends a trie of path segments instead and
//! only ever attaches layouts from true ancestor directories. The two agree on
//! trees where no directory name is a string prefix of a sibling's.

use crate::chain::{LayoutChain, LayoutMap};
use crate::error::Result;
use crate::walker::{DepthFirstWalker, TreeWalker};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path};

/// Scope value meaning "no restriction".
pub const UNRESTRICTED_SCOPE: &str = ".";

/// How a matching file participates in resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// A layout file; the identifier's base name is the layout marker.
    Layout(String),
    /// Any other file with the configured extension.
    Content(String),
}

impl FileKind {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Layout(id) | Self::Content(id) => id,
        }
    }
}

/// Which content files end up in the result.
///
/// Layout discovery is never scoped; only content entries are filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scope {
    /// Every content file under the root.
    #[default]
    All,
    /// Only content files whose identifier starts with `root` joined with this prefix.
    Prefix(String),
}

impl Scope {
    /// Parse a scope prefix; `"."` and the empty string mean no restriction.
    pub fn parse(prefix: &str) -> Self {
        if prefix.is_empty() || prefix == UNRESTRICTED_SCOPE {
            Self::All
        } else {
            Self::Prefix(prefix.to_string())
        }
    }

    /// The identifier prefix a content file must carry, or `None` for [`Scope::All`].
    ///
    /// A trailing separator on the scope survives, so `app/` does not admit `application`.
    fn prefix_under(&self, root: &Path) -> Option<String> {
        match self {
            Self::All => None,
            Self::Prefix(prefix) => {
                let mut joined = identifier(&root.join(prefix));
                if prefix.ends_with(['/', std::path::MAIN_SEPARATOR]) && !joined.ends_with('/') {
                    joined.push('/');
                }
                Some(joined)
            }
        }
    }
}

impl From<&str> for Scope {
    fn from(prefix: &str) -> Self {
        Self::parse(prefix)
    }
}

impl From<Option<&str>> for Scope {
    fn from(prefix: Option<&str>) -> Self {
        prefix.map(Self::parse).unwrap_or_default()
    }
}

/// Naming conventions that decide which files take part and which are layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRules {
    extension: String,
    layout_marker: String,
}

impl ResolveRules {
    /// `extension` has no leading dot.
    ///
    /// An empty extension lets every file through with its full name as the
    /// identifier, rather than only matching names that end in a bare `.`.
    pub fn new(extension: impl Into<String>, layout_marker: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            layout_marker: layout_marker.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn layout_marker(&self) -> &str {
        &self.layout_marker
    }

    /// Classify a visited path.
    ///
    /// Returns `None` for files without the configured extension. This is the
    /// only place the layout naming convention is interpreted.
    pub fn classify(&self, path: &Path) -> Option<FileKind> {
        let full = identifier(path);
        let id = if self.extension.is_empty() {
            full
        } else {
            full.strip_suffix(&format!(".{}", self.extension))?
                .to_string()
        };

        if base_name(&id) == self.layout_marker {
            Some(FileKind::Layout(id))
        } else {
            Some(FileKind::Content(id))
        }
    }
}

impl Default for ResolveRules {
    fn default() -> Self {
        Self::new("html", "layout")
    }
}

/// Algorithm used to attach layouts to content files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveStrategy {
    /// Sort layouts by identifier length, then scan them for each content file.
    #[default]
    LengthOrdered,
    /// Index layouts by directory segments and descend once per content file.
    ///
    /// Ancestry is segment-aware: `app/blog` never wraps content in `app/blog2`.
    DirectoryTrie,
}

impl std::fmt::Display for ResolveStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthOrdered => write!(f, "length-ordered"),
            Self::DirectoryTrie => write!(f, "directory-trie"),
        }
    }
}

/// Resolves layout chains for every content file under a root.
///
/// # Example
///
/// ```no_run
/// use layoutchain::{BreadthFirstWalker, LayoutResolver, ResolveRules};
/// use std::path::Path;
///
/// let resolver = LayoutResolver::new(ResolveRules::new("html", "layout"))
///     .with_scope("app")
///     .with_walker(BreadthFirstWalker);
///
/// let layouts = resolver.resolve(Path::new("site"))?;
/// for (file, chain) in layouts.sorted() {
///     println!("{file} -> {chain}");
/// }
/// # Ok::<(), layoutchain::LayoutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LayoutResolver<W: TreeWalker = DepthFirstWalker> {
    rules: ResolveRules,
    scope: Scope,
    strategy: ResolveStrategy,
    walker: W,
}

impl LayoutResolver<DepthFirstWalker> {
    /// Resolver with an unrestricted scope, the default strategy and a depth-first walk.
    pub fn new(rules: ResolveRules) -> Self {
        Self {
            rules,
            scope: Scope::All,
            strategy: ResolveStrategy::default(),
            walker: DepthFirstWalker,
        }
    }
}

impl<W: TreeWalker> LayoutResolver<W> {
    /// Replace the walker.
    pub fn with_walker<V: TreeWalker>(self, walker: V) -> LayoutResolver<V> {
        LayoutResolver {
            rules: self.rules,
            scope: self.scope,
            strategy: self.strategy,
            walker,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn rules(&self) -> &ResolveRules {
        &self.rules
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn strategy(&self) -> ResolveStrategy {
        self.strategy
    }

    /// Walk `root` and resolve a chain for every in-scope content file.
    ///
    /// # Errors
    ///
    /// Any walk failure aborts the run; no partial mapping is returned.
    pub fn resolve(&self, root: &Path) -> Result<LayoutMap> {
        let scope_prefix = self.scope.prefix_under(root);
        let mut layouts: Vec<String> = Vec::new();
        let mut contents: Vec<String> = Vec::new();

        self.walker.walk(root, &mut |path: &Path| match self.rules.classify(path) {
            Some(FileKind::Layout(id)) => {
                tracing::trace!("layout: {}", id);
                layouts.push(id);
            }
            Some(FileKind::Content(id)) => {
                let in_scope = match &scope_prefix {
                    Some(prefix) => id.starts_with(prefix.as_str()),
                    None => true,
                };
                if in_scope {
                    tracing::trace!("content: {}", id);
                    contents.push(id);
                }
            }
            None => {}
        })?;

        tracing::debug!(
            root = %root.display(),
            layouts = layouts.len(),
            contents = contents.len(),
            strategy = %self.strategy,
            "Classified files"
        );

        let chains = match self.strategy {
            ResolveStrategy::LengthOrdered => length_ordered_chains(layouts, contents),
            ResolveStrategy::DirectoryTrie => directory_trie_chains(layouts, contents),
        };
        Ok(LayoutMap::from(chains))
    }
}

/// Resolve with a depth-first walk and the default strategy.
///
/// A `scope` of `"."` includes every content file under `root`.
pub fn resolve(
    root: impl AsRef<Path>,
    extension: &str,
    layout_marker: &str,
    scope: impl Into<Scope>,
) -> Result<LayoutMap> {
    LayoutResolver::new(ResolveRules::new(extension, layout_marker))
        .with_scope(scope)
        .resolve(root.as_ref())
}

fn length_ordered_chains(
    mut layouts: Vec<String>,
    contents: Vec<String>,
) -> HashMap<String, LayoutChain> {
    if layouts.is_empty() {
        return contents
            .into_iter()
            .map(|id| (id.clone(), LayoutChain::single(id)))
            .collect();
    }

    // Shorter identifiers sit closer to the root.
    layouts.sort_by_key(|layout| layout.chars().count());

    contents
        .into_iter()
        .map(|id| {
            let file_dir = owning_dir(&id);
            let mut applied = Vec::new();

            for layout in &layouts {
                let layout_dir = owning_dir(layout);
                if file_dir.starts_with(layout_dir) {
                    applied.push(layout.clone());
                }
                // Nothing deeper can apply once the file's own directory is reached.
                if layout_dir == file_dir {
                    break;
                }
            }

            let chain = LayoutChain::new(applied, id.clone());
            (id, chain)
        })
        .collect()
}

#[derive(Debug, Default)]
struct DirectoryNode<'a> {
    children: HashMap<&'a str, DirectoryNode<'a>>,
    layout: Option<&'a str>,
}

fn dir_segments(dir: &str) -> impl Iterator<Item = &str> {
    dir.split('/').filter(|segment| !segment.is_empty())
}

fn directory_trie_chains(
    layouts: Vec<String>,
    contents: Vec<String>,
) -> HashMap<String, LayoutChain> {
    let mut root = DirectoryNode::default();
    for layout in &layouts {
        let mut node = &mut root;
        for segment in dir_segments(owning_dir(layout)) {
            node = node.children.entry(segment).or_default();
        }
        node.layout.get_or_insert(layout.as_str());
    }

    contents
        .into_iter()
        .map(|id| {
            let mut applied: Vec<String> = root.layout.map(str::to_string).into_iter().collect();
            let mut node = &root;
            for segment in dir_segments(owning_dir(&id)) {
                match node.children.get(segment) {
                    Some(child) => node = child,
                    None => break,
                }
                if let Some(layout) = node.layout {
                    applied.push(layout.to_string());
                }
            }

            let chain = LayoutChain::new(applied, id.clone());
            (id, chain)
        })
        .collect()
}

/// Identifier string for a path: components joined by `/`, `.` components dropped.
pub(crate) fn identifier(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        let segment = match component {
            Component::CurDir => continue,
            Component::RootDir => {
                out.push('/');
                continue;
            }
            Component::Prefix(prefix) => {
                out.push_str(&prefix.as_os_str().to_string_lossy());
                continue;
            }
            Component::ParentDir => "..".into(),
            Component::Normal(name) => name.to_string_lossy(),
        };
        if !out.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(&segment);
    }
    out
}

/// Identifier with its final `/segment` removed; empty at the top level.
fn owning_dir(id: &str) -> &str {
    match id.rfind('/') {
        Some(idx) => &id[..idx],
        None => "",
    }
}

fn base_name(id: &str) -> &str {
    match id.rfind('/') {
        Some(idx) => &id[idx + 1..],
        None => id,
    }
}
