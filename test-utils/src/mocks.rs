//! Mock Vault server for testing.
//!
//! Serves the AppRole login, the role's LIST and one GET per configured
//! secret on a local wiremock server. Requests other than login must carry
//! the token handed out by login.

use crate::fixtures::{list_response, login_response, secret_response};
use serde_json::Value;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token the mock Vault issues on a successful login.
pub const MOCK_TOKEN: &str = "mock-client-token";

/// Builder for [`MockVault`].
#[derive(Debug, Clone)]
pub struct MockVaultBuilder {
    role_id: String,
    secret_id: String,
    mount: String,
    secrets: Vec<(String, Value)>,
}

impl MockVaultBuilder {
    /// Serve secrets under `mount` instead of `secret/service`.
    #[must_use]
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    /// Add a secret. `data` becomes the `data` block of its read response.
    #[must_use]
    pub fn with_secret(mut self, name: impl Into<String>, data: Value) -> Self {
        self.secrets.push((name.into(), data));
        self
    }

    /// Start the server and mount every endpoint.
    pub async fn start(self) -> MockVault {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/auth/approle/login"))
            .and(body_json(serde_json::json!({
                "role_id": self.role_id,
                "secret_id": self.secret_id,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(login_response(MOCK_TOKEN)))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/auth/approle/login"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"errors":["invalid role or secret ID"]}"#,
            ))
            .with_priority(10)
            .mount(&server)
            .await;

        let role_path = format!("/v1/{}/{}", self.mount, self.role_id);
        let names: Vec<&str> = self.secrets.iter().map(|(name, _)| name.as_str()).collect();

        Mock::given(method("LIST"))
            .and(path(role_path.as_str()))
            .and(header("X-Vault-Token", MOCK_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_string(list_response(&names)))
            .mount(&server)
            .await;

        for (name, data) in &self.secrets {
            Mock::given(method("GET"))
                .and(path(format!("{role_path}/{name}")))
                .and(header("X-Vault-Token", MOCK_TOKEN))
                .respond_with(ResponseTemplate::new(200).set_body_string(secret_response(data)))
                .mount(&server)
                .await;
        }

        MockVault { server }
    }
}

/// A running mock Vault.
#[derive(Debug)]
pub struct MockVault {
    server: MockServer,
}

impl MockVault {
    /// Start describing a mock Vault accepting the given AppRole.
    #[must_use]
    pub fn builder(role_id: impl Into<String>, secret_id: impl Into<String>) -> MockVaultBuilder {
        MockVaultBuilder {
            role_id: role_id.into(),
            secret_id: secret_id.into(),
            mount: "secret/service".to_string(),
            secrets: Vec::new(),
        }
    }

    /// Base URL of the server.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}
