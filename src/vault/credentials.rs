//! The plaintext credential payload protected by the vault.
//!
//! A `CredentialSet` is a flat map of field name -> string value.  The
//! well-known Zoho fields have constants in [`fields`]; any other key is
//! kept verbatim so newer fields survive an `update` from an older build.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Result, VaultError};

/// Field names used by the remote accounting service.
pub mod fields {
    pub const ORGANIZATION_ID: &str = "organization_id";
    pub const CLIENT_ID: &str = "client_id";
    pub const CLIENT_SECRET: &str = "client_secret";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const DEFAULT_CUSTOMER_ID: &str = "default_customer_id";

    /// Fields that must be present before the API client can authenticate.
    pub const REQUIRED: [&str; 4] = [ORGANIZATION_ID, CLIENT_ID, CLIENT_SECRET, REFRESH_TOKEN];
}

/// Named credential fields.
///
/// Backed by a `BTreeMap` so the JSON form has sorted keys and the same
/// set always serializes to the same bytes.  Values are wiped on drop.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSet {
    fields: BTreeMap<String, String>,
}

/// Borrowed view of the four fields the API client needs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ApiCredentials<'a> {
    pub organization_id: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub refresh_token: &'a str,
}

impl fmt::Debug for ApiCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("organization_id", &self.organization_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` onto this set.
    ///
    /// Keys present in `other` overwrite ours; keys only we have are kept.
    pub fn merge(&mut self, other: &CredentialSet) {
        for (name, value) in &other.fields {
            if let Some(mut old) = self.fields.insert(name.clone(), value.clone()) {
                old.zeroize();
            }
        }
    }

    /// Required fields that are absent or empty, in declaration order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        fields::REQUIRED
            .iter()
            .copied()
            .filter(|name| self.get(name).map_or(true, str::is_empty))
            .collect()
    }

    /// Build the view consumed by the remote API client.
    pub fn api_credentials(&self) -> Result<ApiCredentials<'_>> {
        if let Some(missing) = self.missing_required().first() {
            return Err(VaultError::MissingField((*missing).to_string()));
        }

        let field = |name: &str| self.get(name).unwrap_or_default();
        Ok(ApiCredentials {
            organization_id: field(fields::ORGANIZATION_ID),
            client_id: field(fields::CLIENT_ID),
            client_secret: field(fields::CLIENT_SECRET),
            refresh_token: field(fields::REFRESH_TOKEN),
        })
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.get(fields::ORGANIZATION_ID)
    }

    pub fn default_customer_id(&self) -> Option<&str> {
        self.get(fields::DEFAULT_CUSTOMER_ID)
    }

    /// Serialize to canonical JSON (sorted keys, no whitespace).
    pub fn to_json(&self) -> Result<Zeroizing<Vec<u8>>> {
        serde_json::to_vec(self)
            .map(Zeroizing::new)
            .map_err(|e| VaultError::Serialization(format!("credentials: {e}")))
    }

    /// Parse a JSON object of string values.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            VaultError::Serialization(format!("stored credentials are not a string map: {e}"))
        })
    }
}

impl Drop for CredentialSet {
    fn drop(&mut self) {
        for value in self.fields.values_mut() {
            value.zeroize();
        }
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.keys().map(|k| (k, "<redacted>")))
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CredentialSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_set() -> CredentialSet {
        CredentialSet::from_iter([
            (fields::ORGANIZATION_ID, "60012345"),
            (fields::CLIENT_ID, "1000.ABCDEF"),
            (fields::CLIENT_SECRET, "s3cr3t"),
            (fields::REFRESH_TOKEN, "1000.refresh"),
        ])
    }

    #[test]
    fn json_has_sorted_keys() {
        let set = CredentialSet::from_iter([("b", "2"), ("a", "1")]);
        let json = set.to_json().unwrap();
        assert_eq!(json.as_slice(), br#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn from_json_accepts_extension_fields() {
        let set = CredentialSet::from_json(br#"{"client_id":"x","region":"eu"}"#).unwrap();
        assert_eq!(set.get("region"), Some("eu"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn from_json_rejects_non_string_values() {
        let result = CredentialSet::from_json(br#"{"client_id":42}"#);
        assert!(matches!(result, Err(VaultError::Serialization(_))));
    }

    #[test]
    fn merge_overwrites_and_preserves() {
        let mut current = CredentialSet::from_iter([("a", "1"), ("b", "2")]);
        let partial = CredentialSet::from_iter([("b", "3"), ("c", "4")]);
        current.merge(&partial);
        assert_eq!(
            current,
            CredentialSet::from_iter([("a", "1"), ("b", "3"), ("c", "4")])
        );
    }

    #[test]
    fn missing_required_lists_absent_and_empty_fields() {
        let mut set = full_set();
        set.insert(fields::CLIENT_SECRET, "");
        set.fields.remove(fields::REFRESH_TOKEN);
        assert_eq!(
            set.missing_required(),
            vec![fields::CLIENT_SECRET, fields::REFRESH_TOKEN]
        );
    }

    #[test]
    fn api_credentials_requires_all_four_fields() {
        let set = CredentialSet::from_iter([(fields::CLIENT_ID, "x")]);
        match set.api_credentials() {
            Err(VaultError::MissingField(name)) => assert_eq!(name, fields::ORGANIZATION_ID),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn api_credentials_borrows_values() {
        let set = full_set();
        let api = set.api_credentials().unwrap();
        assert_eq!(api.organization_id, "60012345");
        assert_eq!(api.refresh_token, "1000.refresh");
    }

    #[test]
    fn debug_output_hides_values() {
        let rendered = format!("{:?}", full_set());
        assert!(rendered.contains("client_secret"));
        assert!(!rendered.contains("s3cr3t"));
    }
}
