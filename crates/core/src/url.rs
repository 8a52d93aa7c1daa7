//! URL helpers for links entered through the admin forms.
//!
//! Operators routinely paste bare hosts (`github.com/club`) into link
//! fields. [`ensure_https`] turns those into absolute URLs and
//! [`is_valid_url`] decides whether the result is something a browser can
//! follow.

/// Returns `true` if `input` is an absolute `http`/`https` URL with a host.
///
/// # Examples
///
/// ```
/// use clubsite_core::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    match ::url::Url::parse(input.trim()) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Prefix `https://` onto a link that carries no scheme.
///
/// - Empty (or whitespace-only) input yields an empty string.
/// - Input that already starts with `http://` or `https://` (any case) is
///   returned trimmed but otherwise untouched. Every other scheme is treated
///   as part of the link and prefixed like a bare host.
/// - Protocol-relative input (`//cdn.example.com/x.png`) gets `https:`.
///
/// # Examples
///
/// ```
/// use clubsite_core::url::ensure_https;
///
/// assert_eq!(ensure_https("example.com"), "https://example.com");
/// assert_eq!(ensure_https("http://example.com"), "http://example.com");
/// ```
pub fn ensure_https(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if has_prefix_ignore_case(trimmed, "http://") || has_prefix_ignore_case(trimmed, "https://") {
        return trimmed.to_string();
    }
    if let Some(rest) = trimmed.strip_prefix("//") {
        return format!("https://{rest}");
    }
    format!("https://{trimmed}")
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_url() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn http_and_https_are_valid() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/events?id=3"));
        assert!(is_valid_url("  https://example.com/path  "));
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("mailto:club@example.com"));
    }

    #[test]
    fn missing_host_is_rejected() {
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("http://"));
    }

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(ensure_https("example.com"), "https://example.com");
        assert_eq!(
            ensure_https("  github.com/club/site  "),
            "https://github.com/club/site"
        );
    }

    #[test]
    fn existing_scheme_is_kept() {
        assert_eq!(ensure_https("http://example.com"), "http://example.com");
        assert_eq!(ensure_https("https://example.com"), "https://example.com");
        assert_eq!(ensure_https("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    #[test]
    fn non_http_scheme_is_prefixed() {
        assert_eq!(ensure_https("ftp://example.com"), "https://ftp://example.com");
        assert_eq!(ensure_https("é"), "https://é");
    }

    #[test]
    fn protocol_relative_gets_https() {
        assert_eq!(
            ensure_https("//cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(ensure_https(""), "");
        assert_eq!(ensure_https("   "), "");
    }

    #[test]
    fn normalized_bare_host_is_valid() {
        assert!(is_valid_url(&ensure_https("example.com")));
        assert!(!is_valid_url(&ensure_https("not a url")));
    }
}
