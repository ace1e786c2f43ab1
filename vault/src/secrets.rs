//! Secret types and Vault response structures.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Fields of one secret, unwrapped to strings.
pub type SecretData = BTreeMap<String, String>;

/// All secrets readable by a role, by name.
pub type Secrets = BTreeMap<String, SecretData>;

/// AppRole credential pair.
#[derive(Clone)]
pub struct AppRole {
    /// Role id, also the last path segment of the role's secrets
    pub role_id: String,
    /// Secret id
    pub secret_id: SecretString,
}

impl fmt::Debug for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRole")
            .field("role_id", &self.role_id)
            .field("secret_id", &"[REDACTED]")
            .finish()
    }
}

impl AppRole {
    /// Create a credential pair.
    #[must_use]
    pub fn new(role_id: impl Into<String>, secret_id: SecretString) -> Self {
        Self {
            role_id: role_id.into(),
            secret_id,
        }
    }

    /// JSON body for `auth/approle/login`.
    #[must_use]
    pub fn login_body(&self) -> Value {
        serde_json::json!({
            "role_id": self.role_id,
            "secret_id": self.secret_id.expose_secret(),
        })
    }
}

/// Generic Vault response envelope.
///
/// Login responses fill `auth`; list and read responses fill `data`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VaultResponse {
    /// Request identifier assigned by Vault
    pub request_id: String,
    /// Lease identifier, empty for unleased secrets
    pub lease_id: String,
    /// Whether the lease can be renewed
    pub renewable: bool,
    /// Lease duration in seconds
    pub lease_duration: u64,
    /// Authentication result of a login
    pub auth: Option<AuthData>,
    /// Payload of a list or read
    pub data: Option<Map<String, Value>>,
}

/// `auth` block of a login response.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct AuthData {
    /// Token to send with subsequent requests
    pub client_token: String,
    /// Token accessor
    pub accessor: String,
    /// Policies attached to the token
    pub policies: Vec<String>,
}

impl fmt::Debug for AuthData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthData")
            .field("client_token", &"[REDACTED]")
            .field("accessor", &self.accessor)
            .field("policies", &self.policies)
            .finish()
    }
}

/// Turn a secret field into the string exported to the environment.
///
/// Strings are taken as-is. Anything else is rendered as compact JSON, so
/// `{"a": 1}` becomes `{"a":1}` and `["1", 2]` becomes `["1",2]`.
#[must_use]
pub fn unwrap_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Unwrap every field of a `data` block.
#[must_use]
pub fn unwrap_data(data: &Map<String, Value>) -> SecretData {
    data.iter()
        .map(|(key, value)| (key.clone(), unwrap_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_plain_string() {
        assert_eq!(unwrap_value(&json!("secretValue1")), "secretValue1");
        assert_eq!(unwrap_value(&json!("")), "");
    }

    #[test]
    fn test_unwrap_nested_values() {
        assert_eq!(
            unwrap_value(&json!({"secretKey2Sub1": "secret2Sub1Value"})),
            r#"{"secretKey2Sub1":"secret2Sub1Value"}"#
        );
        assert_eq!(unwrap_value(&json!(["1", 2])), r#"["1",2]"#);
    }

    #[test]
    fn test_unwrap_scalars() {
        assert_eq!(unwrap_value(&json!(42)), "42");
        assert_eq!(unwrap_value(&json!(true)), "true");
        assert_eq!(unwrap_value(&Value::Null), "null");
    }

    #[test]
    fn test_nested_key_order_preserved() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        assert_eq!(unwrap_value(&value), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn test_login_body() {
        let approle = AppRole::new("roleId", SecretString::from("secretId"));
        assert_eq!(
            approle.login_body(),
            json!({"role_id": "roleId", "secret_id": "secretId"})
        );
    }

    #[test]
    fn test_approle_debug_redacts_secret_id() {
        let approle = AppRole::new("roleId", SecretString::from("super-secret"));
        let debug = format!("{approle:?}");
        assert!(debug.contains("roleId"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_response_defaults() {
        let response: VaultResponse = serde_json::from_str("{}").unwrap();
        assert!(response.auth.is_none());
        assert!(response.data.is_none());
        assert!(!response.renewable);

        let response: VaultResponse =
            serde_json::from_str(r#"{"auth": {"client_token": "accessToken"}}"#).unwrap();
        assert_eq!(response.auth.unwrap().client_token, "accessToken");
    }
}
