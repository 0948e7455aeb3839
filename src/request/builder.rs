use super::method::HttpMethod;
use crate::context::{ContextRecord, SessionContext};
use crate::error::{FetchError, Result};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::str::FromStr;
use url::Url;

pub const EMPTY_ENDPOINT_MESSAGE: &str = "Please enter an API endpoint URL";
pub const MALFORMED_ENDPOINT_MESSAGE: &str =
    "Please enter a valid URL (e.g., https://api.example.com/data)";

/// Fully specified outbound request. Built fresh for every trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub url: Url,
    pub method: HttpMethod,
    /// Header pairs in insertion order.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestSpec {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Parse an operator-supplied endpoint into an absolute HTTP(S) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<Url> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidEndpoint(EMPTY_ENDPOINT_MESSAGE.into()));
    }

    let url = Url::parse(trimmed)
        .map_err(|_| FetchError::InvalidEndpoint(MALFORMED_ENDPOINT_MESSAGE.into()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(FetchError::InvalidEndpoint(MALFORMED_ENDPOINT_MESSAGE.into())),
    }
}

/// Build the outbound request for one trigger.
///
/// Write verbs (POST/PUT/PATCH) get a JSON body with both records and a
/// timestamp; every other verb gets `conversation_id` and `contact_id`
/// appended to the query string instead. Never both.
pub fn build(
    endpoint: &str,
    method: &str,
    credential: Option<&str>,
    conversation: Option<&ContextRecord>,
    contact: Option<&ContextRecord>,
) -> Result<RequestSpec> {
    let mut url = validate_endpoint(endpoint)?;
    let method = HttpMethod::from_str(method.trim())
        .map_err(|_| FetchError::InvalidMethod(method.to_string()))?;

    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    if let Some(token) = credential.map(str::trim).filter(|t| !t.is_empty()) {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }

    let body = if method.carries_body() {
        let payload = json!({
            "conversation": conversation,
            "contact": contact,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        Some(payload.to_string())
    } else {
        let conversation_id = conversation.and_then(ContextRecord::id).unwrap_or_default();
        let contact_id = contact.and_then(ContextRecord::id).unwrap_or_default();
        url.query_pairs_mut()
            .append_pair("conversation_id", &conversation_id)
            .append_pair("contact_id", &contact_id);
        None
    };

    tracing::debug!(
        %method,
        host = url.host_str().unwrap_or_default(),
        has_body = body.is_some(),
        authenticated = headers.len() > 1,
        "request built"
    );

    Ok(RequestSpec {
        url,
        method,
        headers,
        body,
    })
}

/// [`build`] with both records taken from the session snapshot.
pub fn build_for_session(
    endpoint: &str,
    method: &str,
    credential: Option<&str>,
    session: &SessionContext,
) -> Result<RequestSpec> {
    build(
        endpoint,
        method,
        credential,
        session.conversation.as_ref(),
        session.contact.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn record(value: Value) -> ContextRecord {
        ContextRecord::from_value(value).unwrap()
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let err = build("", "GET", None, None, None).unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint(ref m) if m == EMPTY_ENDPOINT_MESSAGE));

        let err = build("   ", "GET", None, None, None).unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint(_)));
    }

    #[test]
    fn malformed_endpoint_is_rejected() {
        for bad in ["not a url", "/relative/path", "api.example.com/data", "mailto:a@b.c"] {
            let err = build(bad, "GET", None, None, None).unwrap_err();
            assert!(
                matches!(err, FetchError::InvalidEndpoint(ref m) if m == MALFORMED_ENDPOINT_MESSAGE),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = build("https://x.test/a", "TRACE", None, None, None).unwrap_err();
        assert!(matches!(err, FetchError::InvalidMethod(_)));
    }

    #[test]
    fn get_appends_context_after_existing_query() {
        let conv = record(serde_json::json!({"id": "c1"}));
        let contact = record(serde_json::json!({"id": "u1"}));
        let spec = build(
            "https://x.test/a?foo=1",
            "GET",
            None,
            Some(&conv),
            Some(&contact),
        )
        .unwrap();

        assert_eq!(spec.url.query(), Some("foo=1&conversation_id=c1&contact_id=u1"));
        assert!(spec.body.is_none());
        assert!(spec.header("authorization").is_none());
        assert_eq!(spec.header("content-type"), Some("application/json"));
    }

    #[test]
    fn get_without_context_sends_empty_ids() {
        let spec = build("https://x.test/a", "get", None, None, None).unwrap();
        assert_eq!(spec.url.query(), Some("conversation_id=&contact_id="));
    }

    #[test]
    fn record_without_id_sends_empty_id() {
        let conv = record(serde_json::json!({"subject": "hi"}));
        let spec = build("https://x.test/a", "DELETE", None, Some(&conv), None).unwrap();
        assert_eq!(spec.method, HttpMethod::Delete);
        assert_eq!(spec.url.query(), Some("conversation_id=&contact_id="));
        assert!(spec.body.is_none());
    }

    #[test]
    fn ids_are_percent_encoded() {
        let conv = record(serde_json::json!({"id": "a&b=c"}));
        let spec = build("https://x.test/a", "GET", None, Some(&conv), None).unwrap();
        assert_eq!(spec.url.query(), Some("conversation_id=a%26b%3Dc&contact_id="));
    }

    #[test]
    fn post_embeds_context_in_body() {
        let conv = record(serde_json::json!({"id": "c1", "state": "open"}));
        let spec = build("https://x.test/a", "POST", Some("secret"), Some(&conv), None).unwrap();

        assert_eq!(spec.header("Authorization"), Some("Bearer secret"));
        assert!(spec.url.query().is_none());

        let body: Value = serde_json::from_str(spec.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["conversation"]["id"], "c1");
        assert_eq!(body["conversation"]["state"], "open");
        assert!(body["contact"].is_null());
        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn put_and_patch_also_carry_body() {
        for verb in ["PUT", "patch"] {
            let spec = build("https://x.test/a?keep=1", verb, None, None, None).unwrap();
            assert!(spec.body.is_some());
            assert_eq!(spec.url.query(), Some("keep=1"));
        }
    }

    #[test]
    fn blank_credential_adds_no_authorization() {
        let spec = build("https://x.test/a", "GET", Some("  "), None, None).unwrap();
        assert!(spec.header("Authorization").is_none());
    }

    #[test]
    fn credential_is_trimmed() {
        let spec = build("https://x.test/a", "GET", Some(" tok \n"), None, None).unwrap();
        assert_eq!(spec.header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn session_form_matches_explicit_form() {
        let session = SessionContext::new(
            Some(record(serde_json::json!({"id": "c1"}))),
            Some(record(serde_json::json!({"id": 7}))),
        );
        let spec = build_for_session("https://x.test/a", "GET", None, &session).unwrap();
        assert_eq!(spec.url.query(), Some("conversation_id=c1&contact_id=7"));
    }
}
