//! Serde helpers that normalize text input while deserializing request bodies.
//!
//! Pair with `#[serde(default)]` so absent fields stay `None`:
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct CreateUser {
//!     #[serde(default, deserialize_with = "axum_helpers::input::trimmed")]
//!     first_name: Option<String>,
//!     #[serde(default, deserialize_with = "axum_helpers::input::email")]
//!     email: Option<String>,
//! }
//! ```

use serde::{Deserialize, Deserializer};

/// Optional string with surrounding whitespace removed.
pub fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(trim)
}

/// Optional email, trimmed and lower-cased.
pub fn email<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = trimmed(deserializer)?;
    Ok(value.map(|s| normalize_email(&s)))
}

/// Same as [`trimmed`] for values built in code.
pub fn trim(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

/// Canonical form used for storage and uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "trimmed")]
        name: Option<String>,
        #[serde(default, deserialize_with = "email")]
        email: Option<String>,
    }

    #[test]
    fn test_trim_keeps_absent_values() {
        assert_eq!(trim(None), None);
        assert_eq!(trim(Some("  lamp \n".into())).as_deref(), Some("lamp"));
    }

    #[test]
    fn test_trims_and_normalizes() {
        let body: Body =
            serde_json::from_str(r#"{"name":"  Jane  ","email":" Jane.Smith@Example.COM "}"#)
                .unwrap();
        assert_eq!(body.name.as_deref(), Some("Jane"));
        assert_eq!(body.email.as_deref(), Some("jane.smith@example.com"));
    }

    #[test]
    fn test_absent_and_null_fields_are_none() {
        let body: Body = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert!(body.name.is_none());
        assert!(body.email.is_none());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(serde_json::from_str::<Body>(r#"{"name":42}"#).is_err());
    }
}
