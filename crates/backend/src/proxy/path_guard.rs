use thiserror::Error;

/// Why a forwarded path was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathRejection {
    #[error("path is empty")]
    Empty,
    #[error("path traversal is not allowed")]
    Traversal,
    #[error("absolute URLs are not allowed")]
    AbsoluteUrl,
    #[error("path contains invalid characters")]
    InvalidCharacters,
    #[error("path is not in the allowed list")]
    NotAllowed,
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | '%')
}

fn looks_absolute(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    raw.starts_with("//")
        || lower.contains("://")
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("%2f%2f")
}

fn has_traversal(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    raw.contains("..") || lower.contains("%2e%2e") || lower.contains(".%2e") || lower.contains("%2e.")
}

/// Validates the part of the request path after the proxy prefix.
///
/// Returns the path without leading slashes, ready to be appended to the
/// internal base URL. `allowed_prefixes` is ignored when empty.
pub fn validate_path<'a>(raw: &'a str, allowed_prefixes: &[String]) -> Result<&'a str, PathRejection> {
    if looks_absolute(raw) {
        return Err(PathRejection::AbsoluteUrl);
    }

    let path = raw.trim_start_matches('/');
    if path.is_empty() {
        return Err(PathRejection::Empty);
    }
    if has_traversal(path) {
        return Err(PathRejection::Traversal);
    }
    if !path.chars().all(is_allowed_char) {
        return Err(PathRejection::InvalidCharacters);
    }

    if !allowed_prefixes.is_empty()
        && !allowed_prefixes
            .iter()
            .map(|p| p.trim_start_matches('/'))
            .any(|p| path.starts_with(p))
    {
        return Err(PathRejection::NotAllowed);
    }

    Ok(path)
}
