//! Resolver configuration.
//!
//! Settings are layered with figment, later sources overriding earlier ones:
//!
//! 1. Built-in defaults (`html`, `layout`, unrestricted scope)
//! 2. A TOML file: an explicit path, or `layoutchain.toml` in the working directory
//! 3. Environment variables prefixed `LAYOUTCHAIN_` (e.g. `LAYOUTCHAIN_LAYOUT_MARKER`)
//! 4. Explicit overrides, typically from command-line flags

use crate::error::{LayoutError, Result};
use crate::resolver::{LayoutResolver, ResolveRules, ResolveStrategy, Scope, UNRESTRICTED_SCOPE};
use crate::walker::Traversal;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "layoutchain.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "LAYOUTCHAIN_";

/// Everything needed to build a [`LayoutResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// File extension without the leading dot; empty means every file.
    pub extension: String,
    /// Base name that marks a file as a layout.
    pub layout_marker: String,
    /// Content scope prefix relative to the root; `"."` means everything.
    pub scope: String,
    pub strategy: ResolveStrategy,
    pub traversal: Traversal,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extension: "html".to_string(),
            layout_marker: "layout".to_string(),
            scope: UNRESTRICTED_SCOPE.to_string(),
            strategy: ResolveStrategy::default(),
            traversal: Traversal::default(),
        }
    }
}

/// Per-field overrides applied on top of every other source.
///
/// Unset fields leave the lower layers untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolverOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ResolveStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traversal: Option<Traversal>,
}

impl ResolverConfig {
    /// Load configuration from defaults, file and environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with(config_file, ResolverOverrides::default())
    }

    /// Load configuration and apply `overrides` last.
    ///
    /// # Errors
    ///
    /// An explicit `config_file` that does not exist is an error; the implicit
    /// `layoutchain.toml` is optional. Extraction and validation failures are
    /// reported as [`LayoutError::Config`] and [`LayoutError::InvalidConfig`].
    pub fn load_with(config_file: Option<&Path>, overrides: ResolverOverrides) -> Result<Self> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(LayoutError::invalid_config(format!(
                    "config file '{}' does not exist",
                    path.display()
                )));
            }
        }

        let config: Self = Self::figment(config_file)
            .merge(Serialized::defaults(overrides))
            .extract()?;
        config.validate()?;

        debug!(
            extension = %config.extension,
            layout_marker = %config.layout_marker,
            scope = %config.scope,
            strategy = %config.strategy,
            traversal = %config.traversal,
            "Loaded resolver configuration"
        );
        Ok(config)
    }

    /// Defaults, then the TOML file, then `LAYOUTCHAIN_` environment variables.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let file = config_file.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));
        trace!("Reading configuration file: {}", file.display());

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Reject values no resolution could work with.
    pub fn validate(&self) -> Result<()> {
        if self.layout_marker.is_empty() {
            return Err(LayoutError::invalid_config("layout marker must not be empty"));
        }
        if self.layout_marker.contains('/') {
            return Err(LayoutError::invalid_config(format!(
                "layout marker '{}' must be a base name, not a path",
                self.layout_marker
            )));
        }
        if self.extension.starts_with('.') {
            return Err(LayoutError::invalid_config(format!(
                "extension '{}' must not start with a dot",
                self.extension
            )));
        }
        Ok(())
    }

    pub fn rules(&self) -> ResolveRules {
        ResolveRules::new(&self.extension, &self.layout_marker)
    }

    pub fn scope(&self) -> Scope {
        Scope::parse(&self.scope)
    }

    /// Build a resolver that walks in the configured traversal order.
    pub fn resolver(&self) -> LayoutResolver<Traversal> {
        LayoutResolver::new(self.rules())
            .with_scope(self.scope())
            .with_strategy(self.strategy)
            .with_walker(self.traversal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let missing_default = temp.path().join(CONFIG_FILE_NAME);

        let config: ResolverConfig = ResolverConfig::figment(Some(&missing_default))
            .extract()
            .unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.scope(), Scope::All);
    }

    #[test]
    #[serial]
    fn test_toml_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(
            &path,
            "extension = \"md\"\nscope = \"docs\"\nstrategy = \"directory-trie\"\ntraversal = \"breadth-first\"\n",
        )
        .unwrap();

        let config = ResolverConfig::load(Some(&path)).unwrap();
        assert_eq!(config.extension, "md");
        assert_eq!(config.layout_marker, "layout");
        assert_eq!(config.scope(), Scope::Prefix("docs".to_string()));
        assert_eq!(config.strategy, ResolveStrategy::DirectoryTrie);
        assert_eq!(config.traversal, Traversal::BreadthFirst);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_and_overrides_win() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "layout_marker = \"base\"\nextension = \"md\"\n").unwrap();

        std::env::set_var("LAYOUTCHAIN_LAYOUT_MARKER", "frame");
        let overrides = ResolverOverrides {
            extension: Some("tmpl".to_string()),
            ..Default::default()
        };
        let result = ResolverConfig::load_with(Some(&path), overrides);
        std::env::remove_var("LAYOUTCHAIN_LAYOUT_MARKER");

        let config = result.unwrap();
        assert_eq!(config.layout_marker, "frame");
        assert_eq!(config.extension, "tmpl");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = ResolverConfig::load(Some(&temp.path().join("absent.toml")));
        assert!(matches!(result, Err(LayoutError::InvalidConfig { .. })));
    }

    #[test]
    fn test_validate() {
        let mut config = ResolverConfig::default();
        assert!(config.validate().is_ok());

        config.layout_marker = String::new();
        assert!(config.validate().is_err());

        config.layout_marker = "a/layout".to_string();
        assert!(config.validate().is_err());

        config.layout_marker = "layout".to_string();
        config.extension = ".html".to_string();
        assert!(config.validate().is_err());

        config.extension = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolver_from_config() {
        let config = ResolverConfig {
            scope: "app".to_string(),
            strategy: ResolveStrategy::DirectoryTrie,
            ..Default::default()
        };
        let resolver = config.resolver();
        assert_eq!(resolver.scope(), &Scope::Prefix("app".to_string()));
        assert_eq!(resolver.strategy(), ResolveStrategy::DirectoryTrie);
        assert_eq!(resolver.rules(), &ResolveRules::new("html", "layout"));
    }
}
