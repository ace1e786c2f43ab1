//! Shared proptest generators.
//!
//! This module provides reusable generators for the values that flow
//! between Vault and the exported environment.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Generate secret names as Vault lists them.
pub fn secret_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,20}"
}

/// Generate secret field names.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,20}"
}

/// Generate secret values.
pub fn secret_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!@#$%^&*]{8,64}"
}

/// Generate environment variable names.
pub fn env_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,30}"
}

/// Generate arbitrary JSON values without floats, nested up to three levels.
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 \"\\\\]{0,16}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,8}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Generate a secret's `data` block: field names mapped to JSON values.
pub fn secret_data_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec((field_name_strategy(), json_value_strategy()), 1..6)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Generate HTTP status codes other than 200.
pub fn non_ok_status_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![
        Just(201u16),
        Just(204u16),
        Just(400u16),
        Just(401u16),
        Just(403u16),
        Just(404u16),
        Just(429u16),
        Just(500u16),
        Just(502u16),
        Just(503u16),
    ]
}
