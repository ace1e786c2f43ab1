//! Environment handed to the executed command.

use crate::config::Config;
use std::ffi::{OsStr, OsString};
use std::fmt;
use tracing::{debug, warn};
use vaulter_vault::Secrets;

/// Ordered list of environment variables.
///
/// Entries are applied in order, so a later entry replaces an earlier one
/// with the same name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(OsString, OsString)>,
}

// Values are secrets; only names are printed.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.vars.iter().map(|(name, _)| name))
            .finish()
    }
}

impl Environment {
    /// Snapshot of the current process environment.
    #[must_use]
    pub fn inherit() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Environment made of the given variables, in order.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Append a variable.
    pub fn push(&mut self, name: impl Into<OsString>, value: impl Into<OsString>) {
        self.vars.push((name.into(), value.into()));
    }

    /// Effective value of a variable: the last entry with that name.
    #[must_use]
    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&OsStr> {
        let name = name.as_ref();
        self.vars
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_os_str())
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(n, v)| (n.as_os_str(), v.as_os_str()))
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Entries as `NAME=value` strings. Non-UTF-8 data is replaced lossily.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.vars
            .iter()
            .map(|(name, value)| format!("{}={}", name.to_string_lossy(), value.to_string_lossy()))
            .collect()
    }
}

/// Environment variable name for a secret field.
///
/// The configured rename wins; otherwise `SECRET_FIELD`, upper-cased.
#[must_use]
pub fn env_name(config: &Config, secret: &str, field: &str) -> String {
    config
        .rename_for(secret, field)
        .map_or_else(|| format!("{secret}_{field}").to_uppercase(), str::to_string)
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

/// Append every secret field to `base`.
pub fn build_environment(mut base: Environment, secrets: &Secrets, config: &Config) -> Environment {
    for (secret, data) in secrets {
        for (field, value) in data {
            let name = env_name(config, secret, field);
            if !is_valid_name(&name) {
                warn!(
                    secret = %secret,
                    field = %field,
                    name = %name,
                    "Skipping field with an unusable variable name"
                );
                continue;
            }
            debug!(secret = %secret, field = %field, name = %name, "Exporting secret field");
            base.push(name, value);
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use vaulter_vault::SecretData;

    fn config(doc: &str) -> Config {
        Config::from_yaml_with(doc, |_| None).unwrap()
    }

    fn secrets(entries: &[(&str, &[(&str, &str)])]) -> Secrets {
        entries
            .iter()
            .map(|(name, fields)| {
                let data: SecretData = fields
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect();
                ((*name).to_string(), data)
            })
            .collect::<BTreeMap<_, _>>()
    }

    #[test]
    fn test_renamed_and_derived_names() {
        let config = config(
            r#"
secrets:
  testSecret1:
    testKey1: TEST_VAL1
"#,
        );
        let secrets = secrets(&[(
            "testSecret1",
            &[("testKey1", "TestValue1"), ("testKey2", "TestValue2")],
        )]);
        let base = Environment::from_vars([("TESTENV", "TESTVAL")]);

        let env = build_environment(base, &secrets, &config);
        let entries = env.entries();

        assert!(entries.contains(&"TEST_VAL1=TestValue1".to_string()));
        assert!(entries.contains(&"TESTSECRET1_TESTKEY2=TestValue2".to_string()));
        assert!(entries.contains(&"TESTENV=TESTVAL".to_string()));
        assert_eq!(entries.first().map(String::as_str), Some("TESTENV=TESTVAL"));
    }

    #[test]
    fn test_secret_overrides_inherited_variable() {
        let config = config("secrets:\n  db:\n    url: DATABASE_URL\n");
        let secrets = secrets(&[("db", &[("url", "postgres://secret")])]);
        let base = Environment::from_vars([("DATABASE_URL", "postgres://local")]);

        let env = build_environment(base, &secrets, &config);

        assert_eq!(env.len(), 2);
        assert_eq!(
            env.get("DATABASE_URL"),
            Some(OsStr::new("postgres://secret"))
        );
    }

    #[test]
    fn test_empty_rename_uses_derived_name() {
        let config = config("secrets:\n  api:\n    key: \"\"\n");
        assert_eq!(env_name(&config, "api", "key"), "API_KEY");
    }

    #[test]
    fn test_derived_name_keeps_other_characters() {
        let config = config("host: x");
        assert_eq!(env_name(&config, "my-app", "db.user"), "MY-APP_DB.USER");
    }

    #[test]
    fn test_unusable_names_skipped() {
        let config = config("secrets:\n  s:\n    a: \"BAD=NAME\"\n");
        let secrets = secrets(&[("s", &[("a", "1"), ("b", "2")])]);

        let env = build_environment(Environment::default(), &secrets, &config);

        assert_eq!(env.entries(), vec!["S_B=2".to_string()]);
    }

    #[test]
    fn test_no_secrets_keeps_base() {
        let base = Environment::from_vars([("A", "1"), ("B", "2")]);
        let env = build_environment(base.clone(), &Secrets::new(), &config("host: x"));
        assert_eq!(env, base);
    }

    #[test]
    fn test_inherit_contains_process_environment() {
        let env = Environment::inherit();
        for (name, value) in std::env::vars_os() {
            assert_eq!(env.get(&name), Some(value.as_os_str()));
        }
    }

    #[test]
    fn test_debug_hides_values() {
        let env = Environment::from_vars([("API_KEY", "hunter2")]);
        let debug = format!("{env:?}");
        assert!(debug.contains("API_KEY"));
        assert!(!debug.contains("hunter2"));
    }
}
