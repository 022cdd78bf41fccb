//! Alias resolution from request identifiers to internal template names

use std::collections::BTreeMap;

/// Maps externally visible identifiers to internal template names.
///
/// Built once from configuration and shared read-only. Lookups never fail:
/// an identifier without an alias resolves to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    /// Create an alias table from `external -> internal` pairs
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Resolve an external identifier to an internal template name.
    ///
    /// Exact match only; no case folding and no partial matching.
    pub fn resolve<'a>(&'a self, external: &'a str) -> &'a str {
        match self.entries.get(external) {
            Some(internal) => internal.as_str(),
            None => external,
        }
    }

    /// Reverse lookup: external identifiers aliased to `internal`
    pub fn aliases_of<'a>(&'a self, internal: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(_, to)| to.as_str() == internal)
            .map(|(from, _)| from.as_str())
    }
}

impl From<&BTreeMap<String, String>> for AliasTable {
    fn from(entries: &BTreeMap<String, String>) -> Self {
        Self::new(entries.clone())
    }
}

/// Derive the external identifier from a request path.
///
/// Strips `prefix`, surrounding slashes, and a trailing `.{extension}`.
/// `/email-templates/welcome.html` becomes `welcome`; the bare prefix
/// yields an empty identifier.
pub fn external_id_from_path(path: &str, prefix: &str, extension: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    let rest = rest.trim_matches('/');
    let suffix = format!(".{}", extension);
    rest.strip_suffix(suffix.as_str()).unwrap_or(rest).to_string()
}

#[cfg(test)]
#[path = "alias_test.rs"]
mod tests;
