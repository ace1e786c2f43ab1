//! Vault client configuration.

use vaulter_common::HttpConfig;

/// Path prefix secrets are read from when none is configured.
pub const DEFAULT_SECRET_MOUNT: &str = "secret/service";

/// Vault client configuration.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server address, e.g. `https://vault.example.com:8200`
    pub addr: String,
    /// Path prefix under `/v1/` the role's secrets live in
    pub secret_mount: String,
    /// HTTP client settings
    pub http: HttpConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            addr: String::new(),
            secret_mount: DEFAULT_SECRET_MOUNT.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl VaultConfig {
    /// Create a new configuration for the given address.
    ///
    /// A trailing `/` is dropped so paths can be appended directly.
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        let addr = addr.into();
        Self {
            addr: addr.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set the secrets mount. Surrounding slashes are ignored; an empty
    /// mount keeps the default.
    #[must_use]
    pub fn with_secret_mount(mut self, mount: impl AsRef<str>) -> Self {
        let mount = mount.as_ref().trim_matches('/');
        if !mount.is_empty() {
            self.secret_mount = mount.to_string();
        }
        self
    }

    /// URL for a path relative to `/v1/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.addr, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert_eq!(config.secret_mount, "secret/service");
        assert_eq!(config.http.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = VaultConfig::new("http://vault:8200/");
        assert_eq!(config.addr, "http://vault:8200");
        assert_eq!(
            config.url("auth/approle/login"),
            "http://vault:8200/v1/auth/approle/login"
        );
    }

    #[test]
    fn test_secret_mount() {
        let config = VaultConfig::new("http://vault").with_secret_mount("/kv/apps/");
        assert_eq!(config.secret_mount, "kv/apps");

        let config = VaultConfig::new("http://vault").with_secret_mount("");
        assert_eq!(config.secret_mount, DEFAULT_SECRET_MOUNT);
    }
}
