//! vaulter configuration.
//!
//! The configuration is a YAML document. Host, role id and secret id may be
//! left out and read from the environment instead: first from the variable
//! named by `hostEnv` / `roleIdEnv` / `secretIdEnv`, then from `VAULT_HOST` /
//! `VAULT_ROLE_ID` / `VAULT_SECRET_ID`.

use crate::error::{ConfigError, ConfigResult};
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use vaulter_vault::{AppRole, VaultConfig};

/// Fallback variable for the Vault address.
pub const DEFAULT_HOST_ENV: &str = "VAULT_HOST";
/// Fallback variable for the AppRole role id.
pub const DEFAULT_ROLE_ID_ENV: &str = "VAULT_ROLE_ID";
/// Fallback variable for the AppRole secret id.
pub const DEFAULT_SECRET_ID_ENV: &str = "VAULT_SECRET_ID";

/// Secret name to field name to environment variable name.
pub type SecretPaths = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    command: Option<Vec<String>>,
    host: Option<String>,
    host_env: Option<String>,
    token: Option<String>,
    role_id: Option<String>,
    role_id_env: Option<String>,
    secret_id: Option<String>,
    secret_id_env: Option<String>,
    secret_mount: Option<String>,
    #[serde(rename = "secrets")]
    secret_paths: Option<BTreeMap<String, Option<BTreeMap<String, Option<String>>>>>,
}

/// Resolved configuration.
#[derive(Debug)]
pub struct Config {
    /// Command line to execute; may be overridden on the command line
    pub command: Vec<String>,
    /// Vault address
    pub host: String,
    /// Pre-issued Vault token, empty when not configured
    pub token: SecretString,
    /// AppRole role id
    pub role_id: String,
    /// AppRole secret id
    pub secret_id: SecretString,
    /// Secrets path prefix, `None` for the default
    pub secret_mount: Option<String>,
    /// Environment variable renames
    pub secret_paths: SecretPaths,
}

impl Config {
    /// Read and decode a configuration file against the process environment.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&document)
    }

    /// Decode a configuration document against the process environment.
    pub fn from_yaml(document: &str) -> ConfigResult<Self> {
        Self::from_yaml_with(document, |name| std::env::var(name).ok())
    }

    /// Decode a configuration document, reading fallbacks through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] for a document with no YAML content
    /// (blank, comments only or a bare `---`) and [`ConfigError::Parse`] for
    /// anything serde_yaml rejects.
    pub fn from_yaml_with<F>(document: &str, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if document.trim().is_empty() {
            return Err(ConfigError::Empty);
        }

        let value: serde_yaml::Value = serde_yaml::from_str(document)?;
        if value.is_null() {
            return Err(ConfigError::Empty);
        }
        let raw: RawConfig = serde_yaml::from_value(value)?;

        let host = resolve(
            raw.host,
            raw.host_env.as_deref(),
            DEFAULT_HOST_ENV,
            &lookup,
        );
        let role_id = resolve(
            raw.role_id,
            raw.role_id_env.as_deref(),
            DEFAULT_ROLE_ID_ENV,
            &lookup,
        );
        let secret_id = resolve(
            raw.secret_id,
            raw.secret_id_env.as_deref(),
            DEFAULT_SECRET_ID_ENV,
            &lookup,
        );

        let secret_paths = raw
            .secret_paths
            .unwrap_or_default()
            .into_iter()
            .map(|(secret, fields)| {
                let fields = fields
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|(field, name)| Some((field, name.filter(|n| !n.is_empty())?)))
                    .collect();
                (secret, fields)
            })
            .collect();

        Ok(Self {
            command: raw.command.unwrap_or_default(),
            host,
            token: SecretString::from(raw.token.unwrap_or_default()),
            role_id,
            secret_id: SecretString::from(secret_id),
            secret_mount: raw.secret_mount.filter(|m| !m.is_empty()),
            secret_paths,
        })
    }

    /// Configured environment variable name for a secret field.
    #[must_use]
    pub fn rename_for(&self, secret: &str, field: &str) -> Option<&str> {
        self.secret_paths
            .get(secret)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Vault client settings derived from this configuration.
    #[must_use]
    pub fn vault_config(&self) -> VaultConfig {
        let config = VaultConfig::new(&self.host);
        match &self.secret_mount {
            Some(mount) => config.with_secret_mount(mount),
            None => config,
        }
    }

    /// AppRole credentials from this configuration.
    #[must_use]
    pub fn approle(&self) -> AppRole {
        AppRole::new(&self.role_id, self.secret_id.clone())
    }
}

/// Apply the fallback rule to one field.
///
/// A named variable that is set, even to an empty string, wins over the
/// default variable.
fn resolve<F>(
    direct: Option<String>,
    env_name: Option<&str>,
    default_env: &str,
    lookup: &F,
) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = direct.filter(|v| !v.is_empty()) {
        return value;
    }

    env_name
        .filter(|name| !name.is_empty())
        .and_then(lookup)
        .or_else(|| lookup(default_env))
        .unwrap_or_default()
}
