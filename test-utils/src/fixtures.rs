//! Test fixtures with sample data.
//!
//! Configuration documents and Vault response bodies shared by the unit and
//! integration tests.

/// Configuration with every field set directly.
pub const FULL_CONFIG: &str = r#"
command: ["env", "-0"]
host: "http://vault.example.com:8200"
token: "preIssuedToken"
roleId: "testRole"
secretId: "testSecret"
secretMount: "secret/service"
secrets:
  testSecret1:
    testKey1: TEST_VAL1
  database:
    user: DB_USER
    password: DB_PASS
"#;

/// Configuration relying on environment fallbacks for every credential.
pub const ENV_ONLY_CONFIG: &str = r#"
hostEnv: "MY_VAULT_HOST"
roleIdEnv: "MY_ROLE_ID"
secretIdEnv: "MY_SECRET_ID"
"#;

/// Configuration with keys vaulter does not know about.
pub const UNKNOWN_KEYS_CONFIG: &str = r#"
host: "testHost"
some: "nonsensfield"
secretId: "testSecret"
"#;

/// Login response carrying a client token.
#[must_use]
pub fn login_response(token: &str) -> String {
    serde_json::json!({
        "request_id": "8f7e6d5c-0000-0000-0000-000000000000",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "auth": {
            "client_token": token,
            "accessor": "accessor-123",
            "policies": ["default", "service"],
            "lease_duration": 2764800,
            "renewable": true
        }
    })
    .to_string()
}

/// LIST response with the given secret names.
#[must_use]
pub fn list_response(names: &[&str]) -> String {
    serde_json::json!({ "data": { "keys": names } }).to_string()
}

/// Read response wrapping the given `data` block.
#[must_use]
pub fn secret_response(data: &serde_json::Value) -> String {
    serde_json::json!({
        "request_id": "1a2b3c4d-0000-0000-0000-000000000000",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 2764800,
        "data": data
    })
    .to_string()
}
