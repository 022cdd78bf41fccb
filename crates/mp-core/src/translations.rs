//! Translation dictionary used by the `L.Ts()` template helper

use std::collections::BTreeMap;

/// Key to display-string dictionary with identity fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    strings: BTreeMap<String, String>,
}

impl Translations {
    /// Create a dictionary from `key -> string` pairs
    pub fn new(strings: BTreeMap<String, String>) -> Self {
        Self { strings }
    }

    /// Look up a key, returning the key itself when it has no translation
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}

impl From<&BTreeMap<String, String>> for Translations {
    fn from(strings: &BTreeMap<String, String>) -> Self {
        Self::new(strings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_key() {
        let t = Translations::new(BTreeMap::from([(
            "email.optin.confirmSub".to_string(),
            "Confirm subscription".to_string(),
        )]));
        assert_eq!(t.lookup("email.optin.confirmSub"), "Confirm subscription");
    }

    #[test]
    fn test_lookup_identity_fallback() {
        let t = Translations::default();
        assert_eq!(t.lookup("email.unknown"), "email.unknown");
    }
}
