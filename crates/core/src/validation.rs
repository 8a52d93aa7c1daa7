//! Field-level validation for content submitted by the admin panel.
//!
//! Create payloads use the `required_*` / `optional_*` helpers. Update
//! payloads use the `patch_*` helpers, where `None` means "leave the field
//! alone" and, for optional fields, `Some("")` means "clear it".

use crate::error::CoreError;
use crate::url::{ensure_https, is_valid_url};

/// Trim a required text field and reject it if nothing is left.
pub fn required_text(field: &str, value: String) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, collapsing blank input to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalize and validate a single URL.
pub fn url(field: &str, value: &str) -> Result<String, CoreError> {
    let normalized = ensure_https(value);
    if !is_valid_url(&normalized) {
        return Err(CoreError::Validation(format!(
            "{field} must be a valid http(s) URL"
        )));
    }
    Ok(normalized)
}

/// Normalize an optional URL field. Blank input becomes `None`.
pub fn optional_url(field: &str, value: Option<String>) -> Result<Option<String>, CoreError> {
    optional_text(value).map(|v| url(field, &v)).transpose()
}

/// Validate an optional email address. Blank input becomes `None`.
pub fn optional_email(field: &str, value: Option<String>) -> Result<Option<String>, CoreError> {
    optional_text(value).map(|v| email(field, v)).transpose()
}

/// Trim a list of tags, dropping blanks and repeats while keeping order.
pub fn tag_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !out.iter().any(|t| t.eq_ignore_ascii_case(trimmed)) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Patch a required text field: present values must be non-blank.
pub fn patch_required_text(
    field: &str,
    value: Option<String>,
) -> Result<Option<String>, CoreError> {
    value.map(|v| required_text(field, v)).transpose()
}

/// Patch an optional text field. `Some("")` is kept as the clear marker.
pub fn patch_optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Patch an optional URL field. `Some("")` is kept as the clear marker.
pub fn patch_url(field: &str, value: Option<String>) -> Result<Option<String>, CoreError> {
    match patch_optional_text(value) {
        Some(v) if v.is_empty() => Ok(Some(v)),
        Some(v) => url(field, &v).map(Some),
        None => Ok(None),
    }
}

/// Patch an optional email field. `Some("")` is kept as the clear marker.
pub fn patch_email(field: &str, value: Option<String>) -> Result<Option<String>, CoreError> {
    match patch_optional_text(value) {
        Some(v) if v.is_empty() => Ok(Some(v)),
        Some(v) => email(field, v).map(Some),
        None => Ok(None),
    }
}

/// Resolve a patched optional value against the current one.
///
/// `None` keeps `current`, `Some("")` clears it, anything else replaces it.
pub fn apply_optional(current: &mut Option<String>, patch: Option<String>) {
    if let Some(value) = patch {
        *current = if value.is_empty() { None } else { Some(value) };
    }
}

fn email(field: &str, value: String) -> Result<String, CoreError> {
    let mut parts = value.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace)
        }
        _ => false,
    };
    if !valid {
        return Err(CoreError::Validation(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("title", "  Demo Day ".into()).unwrap(), "Demo Day");
    }

    #[test]
    fn required_text_rejects_blank() {
        let err = required_text("title", "   ".into()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "title is required");
    }

    #[test]
    fn optional_text_collapses_blank() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" bio ".into())), Some("bio".into()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn optional_url_normalizes_bare_host() {
        let value = optional_url("github_url", Some("github.com/club".into())).unwrap();
        assert_eq!(value.as_deref(), Some("https://github.com/club"));
    }

    #[test]
    fn optional_url_rejects_garbage() {
        assert_matches!(
            optional_url("demo_url", Some("not a url".into())),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn optional_url_blank_is_none() {
        assert_eq!(optional_url("demo_url", Some(String::new())).unwrap(), None);
    }

    #[test]
    fn email_requires_single_at() {
        assert!(optional_email("email", Some("a@b.org".into())).is_ok());
        assert!(optional_email("email", Some("a@@b.org".into())).is_err());
        assert!(optional_email("email", Some("@b.org".into())).is_err());
        assert!(optional_email("email", Some("ab.org".into())).is_err());
        assert!(optional_email("email", Some("a b@c.org".into())).is_err());
    }

    #[test]
    fn tag_list_dedupes_case_insensitively() {
        let tags = tag_list(vec![
            "Rust".into(),
            " rust ".into(),
            "".into(),
            "Axum".into(),
        ]);
        assert_eq!(tags, vec!["Rust".to_string(), "Axum".to_string()]);
    }

    #[test]
    fn patch_url_keeps_clear_marker() {
        assert_eq!(patch_url("image_url", Some("  ".into())).unwrap(), Some(String::new()));
        assert_eq!(patch_url("image_url", None).unwrap(), None);
        assert_eq!(
            patch_url("image_url", Some("example.com/a.png".into())).unwrap(),
            Some("https://example.com/a.png".into())
        );
    }

    #[test]
    fn patch_required_text_rejects_blank() {
        assert!(patch_required_text("name", Some(" ".into())).is_err());
        assert_eq!(patch_required_text("name", None).unwrap(), None);
    }

    #[test]
    fn apply_optional_semantics() {
        let mut current = Some("old".to_string());
        apply_optional(&mut current, None);
        assert_eq!(current.as_deref(), Some("old"));
        apply_optional(&mut current, Some("new".into()));
        assert_eq!(current.as_deref(), Some("new"));
        apply_optional(&mut current, Some(String::new()));
        assert_eq!(current, None);
    }
}
