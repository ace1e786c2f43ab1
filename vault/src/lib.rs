//! AppRole client for HashiCorp Vault compatible servers.
//!
//! Logs in with a role id / secret id pair, lists the secrets stored under
//! the role's path and reads each of them as a flat map of strings.

pub mod client;
pub mod config;
pub mod error;
pub mod secrets;

pub use client::VaultClient;
pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use secrets::{AppRole, SecretData, Secrets, unwrap_value};
