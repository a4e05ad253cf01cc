use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::CookieRecord;

/// Read the persisted cookie file. A missing file is not an error; the
/// harvest simply proceeds without cookies.
pub fn load_cookies(path: &str) -> Result<Vec<CookieRecord>> {
    if !Path::new(path).exists() {
        info!("No cookie file at {}, proceeding without cookies", path);
        return Ok(Vec::new());
    }

    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let cookies: Vec<CookieRecord> =
        serde_json::from_str(&content).with_context(|| format!("Malformed cookie file {}", path))?;

    info!("Loaded {} cookies from {}", cookies.len(), path);
    Ok(cookies)
}

/// Persist the session's cookies, replacing the previous file.
pub fn save_cookies(path: &str, cookies: &[CookieRecord]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(cookies).context("Failed to serialize cookies")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;

    info!("Saved {} cookies to {}", cookies.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("review-pipeline-{}-{}", std::process::id(), name))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_missing_file_yields_no_cookies() {
        assert!(load_cookies("/nonexistent/cookies.json").unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("cookies.json");
        let cookies = vec![
            CookieRecord {
                name: "session-id".to_string(),
                value: "abc".to_string(),
                domain: Some(".example.com".to_string()),
                path: "/".to_string(),
                secure: true,
                http_only: false,
                expiry: Some(1_900_000_000),
            },
            CookieRecord {
                name: "pref".to_string(),
                value: "1".to_string(),
                domain: None,
                path: "/".to_string(),
                secure: false,
                http_only: false,
                expiry: None,
            },
        ];

        save_cookies(&path, &cookies).unwrap();
        assert_eq!(load_cookies(&path).unwrap(), cookies);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_path("broken-cookies.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_cookies(&path).is_err());
        std::fs::remove_file(&path).ok();
    }
}
