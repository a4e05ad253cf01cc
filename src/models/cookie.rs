use serde::{Deserialize, Serialize};

/// One entry of the persisted cookie file. The shape matches what
/// browser exports produce: only the WebDriver-compatible keys are
/// kept, everything else is ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default, rename = "httpOnly")]
    pub http_only: bool,
    /// Unix seconds; session cookies carry no expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
}

fn default_path() -> String {
    "/".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"{"name": "session-id", "value": "abc123"}"#;
        let cookie: CookieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(cookie.name, "session-id");
        assert_eq!(cookie.path, "/");
        assert!(!cookie.secure);
        assert!(!cookie.http_only);
        assert!(cookie.expiry.is_none());
    }

    #[test]
    fn test_ignores_unknown_export_keys() {
        let json = r#"{"name": "x", "value": "y", "sameSite": "Lax", "hostOnly": true}"#;
        let cookie: CookieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(cookie.name, "x");
    }
}
