//! Property-based tests for configuration and environment construction.

use proptest::prelude::*;
use secrecy::ExposeSecret;
use std::collections::HashMap;
use test_utils::generators::{
    env_name_strategy, field_name_strategy, secret_name_strategy, secret_value_strategy,
};
use vaulter::environment::env_name;
use vaulter::{Config, Environment, build_environment};
use vaulter_vault::{SecretData, Secrets};

fn lookup(vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
    move |name| vars.get(name).cloned()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Without a rename, every field lands under `SECRET_FIELD` upper-cased.
    #[test]
    fn prop_derived_names(
        secret in secret_name_strategy(),
        field in field_name_strategy(),
        value in secret_value_strategy(),
    ) {
        let config = Config::from_yaml_with("host: x", |_| None).unwrap();
        let secrets = Secrets::from([(
            secret.clone(),
            SecretData::from([(field.clone(), value.clone())]),
        )]);

        let env = build_environment(Environment::default(), &secrets, &config);
        let expected_name = format!("{secret}_{field}").to_uppercase();

        prop_assert_eq!(env.entries(), vec![format!("{expected_name}={value}")]);
    }

    /// A configured rename always wins over the derived name.
    #[test]
    fn prop_rename_wins(
        secret in secret_name_strategy(),
        field in field_name_strategy(),
        rename in env_name_strategy(),
    ) {
        let doc = format!("secrets:\n  \"{secret}\":\n    \"{field}\": \"{rename}\"\n");
        let config = Config::from_yaml_with(&doc, |_| None).unwrap();

        prop_assert_eq!(env_name(&config, &secret, &field), rename);
    }

    /// The base environment is kept, in order, ahead of every secret.
    #[test]
    fn prop_base_environment_preserved(
        base in prop::collection::vec((env_name_strategy(), "[a-z0-9]{0,10}"), 0..8),
        fields in prop::collection::btree_map(field_name_strategy(), secret_value_strategy(), 0..6),
    ) {
        let config = Config::from_yaml_with("host: x", |_| None).unwrap();
        let secrets = Secrets::from([("svc".to_string(), fields.clone())]);

        let env = build_environment(Environment::from_vars(base.clone()), &secrets, &config);
        let entries = env.entries();

        prop_assert_eq!(entries.len(), base.len() + fields.len());
        for (i, (name, value)) in base.iter().enumerate() {
            prop_assert_eq!(&entries[i], &format!("{name}={value}"));
        }
    }

    /// Direct value, then the named variable, then the default variable.
    #[test]
    fn prop_fallback_order(
        direct in prop::option::of("[a-z]{1,10}"),
        named in prop::option::of("[a-z]{0,10}"),
        default in prop::option::of("[a-z]{1,10}"),
    ) {
        let mut doc = String::from("roleIdEnv: MY_ROLE\n");
        if let Some(direct) = &direct {
            doc.push_str(&format!("roleId: \"{direct}\"\n"));
        }

        let mut vars = HashMap::new();
        if let Some(named) = &named {
            vars.insert("MY_ROLE".to_string(), named.clone());
        }
        if let Some(default) = &default {
            vars.insert("VAULT_ROLE_ID".to_string(), default.clone());
        }

        let config = Config::from_yaml_with(&doc, lookup(vars)).unwrap();
        let expected = direct.or(named).or(default).unwrap_or_default();

        prop_assert_eq!(config.role_id, expected);
    }

    /// Secret ids read from the environment never leak through Debug.
    #[test]
    fn prop_secret_id_redacted(secret_id in secret_value_strategy()) {
        let vars = HashMap::from([("VAULT_SECRET_ID".to_string(), secret_id.clone())]);
        let config = Config::from_yaml_with("host: x", lookup(vars)).unwrap();

        prop_assert_eq!(config.secret_id.expose_secret(), secret_id.as_str());
        let debug = format!("{config:?}");
        prop_assert!(!debug.contains(&secret_id));
    }
}
