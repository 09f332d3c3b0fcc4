//! Data models for stored credentials

use serde::{Deserialize, Serialize};

/// One stored credential
///
/// Identity for merge/update/delete purposes is the `(url, username)`
/// pair - there is no synthetic ID. Duplicates of that pair may exist in
/// storage; mutating operations act on the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Display name
    pub name: String,
    /// Site URL as entered (also the source of the grouping domain)
    pub url: String,
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CredentialRecord {
    /// Create a record without a note
    pub fn new(name: &str, url: &str, username: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            note: None,
        }
    }

    /// Check whether this record is identified by the given `(url, username)` pair
    pub fn matches_key(&self, url: &str, username: &str) -> bool {
        self.url == url && self.username == username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_key() {
        let record = CredentialRecord::new("Example", "example.com", "alice", "pw1");
        assert!(record.matches_key("example.com", "alice"));
        assert!(!record.matches_key("example.com", "bob"));
        assert!(!record.matches_key("other.com", "alice"));
    }

    #[test]
    fn test_json_roundtrip() {
        let record = CredentialRecord {
            name: "Example".to_string(),
            url: "https://example.com".to_string(),
            username: "alice".to_string(),
            password: "pw1".to_string(),
            note: Some("personal".to_string()),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: CredentialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_json_missing_note() {
        // Records persisted without a note field deserialize with note = None
        let json = r#"{"name":"A","url":"a.com","username":"x","password":"p"}"#;
        let record: CredentialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.note, None);
    }

    #[test]
    fn test_json_omits_absent_note() {
        let record = CredentialRecord::new("A", "a.com", "x", "p");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("note"));
    }
}
