//! Vault HTTP client for the AppRole login / list / read sequence.

use crate::{
    config::VaultConfig,
    error::{VaultError, VaultResult},
    secrets::{AppRole, SecretData, VaultResponse, unwrap_data},
};
use reqwest::{Client, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use vaulter_common::build_http_client;

const LOGIN_PATH: &str = "auth/approle/login";
const TOKEN_HEADER: &str = "X-Vault-Token";

/// Vault client authenticating with an AppRole.
pub struct VaultClient {
    config: VaultConfig,
    http: Client,
    approle: AppRole,
    token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("config", &self.config)
            .field("approle", &self.approle)
            .finish_non_exhaustive()
    }
}

impl VaultClient {
    /// Create a new Vault client.
    pub fn new(config: VaultConfig, approle: AppRole) -> VaultResult<Self> {
        if config.addr.is_empty() {
            return Err(VaultError::InvalidConfig("Vault address is empty".to_string()));
        }

        let http = build_http_client(&config.http)?;

        Ok(Self {
            config,
            http,
            approle,
            token: RwLock::new(None),
        })
    }

    /// Seed a pre-issued token. It is sent with every request, login included,
    /// until `login` replaces it.
    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        if !token.expose_secret().is_empty() {
            self.token = RwLock::new(Some(token));
        }
        self
    }

    #[cfg(test)]
    async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Log in with the AppRole and keep the returned client token.
    #[instrument(skip(self), fields(role_id = %self.approle.role_id))]
    pub async fn login(&self) -> VaultResult<()> {
        let body = self.approle.login_body();
        let response = self.request(Method::POST, LOGIN_PATH, Some(&body)).await?;

        let auth = response
            .auth
            .ok_or_else(|| VaultError::auth_failed("response has no auth block"))?;

        if auth.client_token.is_empty() {
            return Err(VaultError::auth_failed("response has an empty client token"));
        }

        *self.token.write().await = Some(SecretString::from(auth.client_token));

        info!(policies = ?auth.policies, "Authenticated with Vault");
        Ok(())
    }

    /// List the names of the secrets stored under the role's path.
    #[instrument(skip(self))]
    pub async fn list_secrets(&self) -> VaultResult<Vec<String>> {
        let path = self.role_path();
        let method = Method::from_bytes(b"LIST")
            .map_err(|e| VaultError::InvalidConfig(e.to_string()))?;

        let response = self.request(method, &path, None).await?;

        let keys = response
            .data
            .and_then(|mut data| data.remove("keys"))
            .ok_or_else(|| VaultError::malformed(&path, "missing data.keys"))?;

        let names: Vec<String> = serde_json::from_value(keys)
            .map_err(|e| VaultError::malformed(&path, format!("data.keys: {e}")))?;

        debug!(count = names.len(), "Listed secrets");
        Ok(names)
    }

    /// Read one secret and unwrap its fields to strings.
    #[instrument(skip(self))]
    pub async fn get_secret(&self, name: &str) -> VaultResult<SecretData> {
        let path = format!("{}/{name}", self.role_path());

        let response = self.request(Method::GET, &path, None).await?;

        let data = response
            .data
            .ok_or_else(|| VaultError::malformed(&path, "missing data"))?;

        debug!(fields = data.len(), "Read secret");
        Ok(unwrap_data(&data))
    }

    fn role_path(&self) -> String {
        format!("{}/{}", self.config.secret_mount, self.approle.role_id)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> VaultResult<VaultResponse> {
        let url = self.config.url(path);

        let mut request = self.http.request(method, &url);

        if let Some(token) = self.token.read().await.as_ref() {
            request = request.header(TOKEN_HEADER, token.expose_secret());
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;

        let status = response.status();
        match status {
            StatusCode::OK => {}
            StatusCode::FORBIDDEN => return Err(VaultError::PermissionDenied(path.to_string())),
            StatusCode::NOT_FOUND => return Err(VaultError::not_found(path)),
            _ => {
                let text = response.text().await.unwrap_or_default();
                return Err(VaultError::UnexpectedStatus {
                    status: status.as_u16(),
                    path: path.to_string(),
                    body: text,
                });
            }
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(VaultError::from)
    }
}
