//! Request headers shared by every billing API call.

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;

/// A single `(name, value)` request header.
pub type Header = (String, String);

/// Build the headers for an API request.
///
/// The server reads the token as the second whitespace-separated field of
/// `Authorization`, hence the `Bearer` scheme.
#[must_use]
pub fn fetch_headers(token: &str) -> Vec<Header> {
    let mut headers = vec![
        ("Accept".to_owned(), "application/json".to_owned()),
        ("Content-Type".to_owned(), "application/json".to_owned()),
    ];
    if !token.is_empty() {
        headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
    }
    headers
}

/// Extract the bare token from an `authorization` header value.
///
/// Strips a `Bearer` scheme; any other value is kept whole (trimmed).
/// Returns `None` for blank values.
#[must_use]
pub fn token_from_header(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut parts = trimmed.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token.to_owned()),
        _ => Some(trimmed.to_owned()),
    }
}
