//! Types used by the Canvas GraphQL client.

use std::fmt;

use serde_json::{Value, json};
use url::Url;

use crate::CanvasError;

/// Endpoint used when neither the command line nor the environment names one.
pub const CANVAS_GRAPHQL_URL: &str = "https://sjsu.instructure.com/api/graphql";

/// A GraphQL query document.
#[derive(Debug, Clone)]
pub struct Query(String);

impl Query {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap the document in a `{"query": ...}` request envelope.
    #[must_use]
    pub fn to_payload(&self) -> Payload {
        Payload::new(json!({ "query": self.0 }))
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A complete JSON request body, ready to POST.
#[derive(Debug, Clone)]
pub struct Payload(Value);

impl Payload {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The GraphQL document carried by the envelope, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.0.get("query").and_then(Value::as_str)
    }
}

/// A Canvas API access token.
#[derive(Clone)]
pub struct Token(String);

impl Token {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A Canvas GraphQL endpoint URL, stored without surrounding whitespace.
#[derive(Debug, Clone)]
pub struct Endpoint(String);

impl Endpoint {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that the endpoint is an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidEndpoint`] when parsing fails.
    pub fn validate(&self) -> Result<Url, CanvasError> {
        Url::parse(&self.0).map_err(|source| CanvasError::InvalidEndpoint {
            endpoint: self.0.clone(),
            source,
        })
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}

impl From<String> for Endpoint {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn query_payload_wraps_document() {
        let payload = Query::from("query MyQuery { allCourses { name } }").to_payload();
        assert_eq!(
            payload.query(),
            Some("query MyQuery { allCourses { name } }")
        );
        assert!(payload.as_value().get("variables").is_none());
    }

    #[test]
    fn query_payload_escapes_quotes_and_newlines() {
        let payload = Query::from("query {\n  course(id: \"1\") { name }\n}").to_payload();
        let body = serde_json::to_string(payload.as_value()).expect("serialise");
        assert!(body.contains(r#"\"1\""#));
        assert!(body.contains(r"\n"));
    }

    #[rstest]
    #[case("", true)]
    #[case("   ", true)]
    #[case("abc", false)]
    fn token_blankness(#[case] raw: &str, #[case] blank: bool) {
        assert_eq!(Token::from(raw).is_blank(), blank);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = Token::from("secret-value");
        assert!(!format!("{token:?}").contains("secret-value"));
    }

    #[rstest]
    #[case(" https://example.instructure.com/api/graphql")]
    #[case("https://example.instructure.com/api/graphql\n")]
    fn endpoint_is_stored_trimmed(#[case] raw: &str) {
        let endpoint = Endpoint::from(raw);
        assert_eq!(endpoint.as_str(), "https://example.instructure.com/api/graphql");
        assert!(endpoint.validate().is_ok());
    }

    #[rstest]
    #[case("https://example.instructure.com/api/graphql", true)]
    #[case("http://127.0.0.1:8080", true)]
    #[case("not a url", false)]
    #[case("/api/graphql", false)]
    fn endpoint_validation(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(Endpoint::from(raw).validate().is_ok(), ok);
    }
}
