//! Helper utilities for request construction and diagnostics.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};

use super::types::Token;
use crate::CanvasError;

/// Maximum number of characters kept from a response body in logs, errors and
/// transcripts.
pub(crate) const BODY_SNIPPET_LEN: usize = 500;

/// Trim `text` to `max` characters, appending `...` when truncated.
///
/// Returns an empty string when `max` is zero.
pub(crate) fn snippet(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out = text.chars().take(max).collect::<String>();
        out.push_str("...");
        out
    }
}

/// Extract the operation name from a GraphQL query string.
///
/// Returns `None` when the input does not begin with a recognised operation
/// prefix or when no name is present.
pub(super) fn operation_name(query: &str) -> Option<&str> {
    let trimmed = query.trim_start();
    for prefix in ["query", "mutation", "subscription"] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            // "queryX" is not an operation keyword.
            let is_delim = matches!(
                rest.chars().next(),
                Some('{' | '(' | ' ' | '\n' | '\t' | '\r')
            );
            if !is_delim {
                continue;
            }
            let name = rest
                .trim_start()
                .split(|c: char| c.is_whitespace() || c == '(' || c == '{')
                .next()
                .filter(|s| !s.is_empty());
            if let Some(name) = name {
                return Some(name);
            }
        }
    }
    None
}

/// Build the fixed request headers for `token`.
pub(super) fn build_headers(token: &Token) -> Result<HeaderMap, CanvasError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("canvasgraphql"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|source| {
        CanvasError::Header {
            name: "Authorization",
            source,
        }
    })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}
