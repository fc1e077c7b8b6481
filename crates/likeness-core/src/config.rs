//! Registry configuration loaded from TOML.
//!
//! Lets test suites name types by stable dotted paths without registering
//! each alias in code:
//!
//! ```toml
//! modules = ["fixtures"]
//! functions = ["fixtures.make_client"]
//!
//! [aliases]
//! "fixtures.Client" = "my_crate::client::Client"
//! ```
//!
//! Alias targets must already be registered when the configuration is applied.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{LikenessError, Result};
use crate::registry::{self, TypeRegistry};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Extra module paths
    #[serde(default)]
    pub modules: Vec<String>,
    /// Function paths
    #[serde(default)]
    pub functions: Vec<String>,
    /// Alias path to the registered path it stands for
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl RegistryConfig {
    /// Parse a configuration document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the document is not valid TOML or has
    /// unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns `Io` when the file cannot be read, otherwise as
    /// [`RegistryConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Register modules, then functions, then aliases
    ///
    /// Stops at the first failing entry; entries applied before it stay
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the failing entry, wrapping the
    /// registration error.
    pub fn apply(&self, registry: &mut TypeRegistry) -> Result<()> {
        for module in &self.modules {
            registry
                .register_module(module)
                .map_err(|e| invalid("module", module, &e))?;
        }
        for function in &self.functions {
            registry
                .register_function(function)
                .map_err(|e| invalid("function", function, &e))?;
        }
        for (alias, target) in &self.aliases {
            registry
                .alias(alias, target)
                .map_err(|e| invalid("alias", alias, &e))?;
        }
        Ok(())
    }

    /// [`RegistryConfig::apply`] to the global registry
    ///
    /// # Errors
    ///
    /// See [`RegistryConfig::apply`].
    pub fn apply_global(&self) -> Result<()> {
        registry::with_global_mut(|registry| self.apply(registry))
    }
}

fn invalid(what: &str, path: &str, err: &LikenessError) -> LikenessError {
    LikenessError::InvalidConfig {
        reason: format!("{what} {path:?}: {err}"),
    }
}
