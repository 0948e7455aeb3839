use std::borrow::Cow;

const MAX_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

const MARKERS: [&str; 8] = [
    "Bearer ",
    "bearer ",
    "BEARER ",
    "api_key=",
    "access_token=",
    "\"api_key\":\"",
    "\"access_token\":\"",
    "\"token\":\"",
];

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=' | '~')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_token_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

/// Replace the token following each `marker` occurrence, keeping the marker.
fn redact_after_marker(text: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(marker) {
        let token_start = search_from + rel + marker.len();
        let end = token_end(text, token_start);

        if end == token_start || text[token_start..end] == *REDACTED {
            search_from = token_start;
            continue;
        }

        text.replace_range(token_start..end, REDACTED);
        search_from = token_start + REDACTED.len();
    }
}

/// Redact the operator's credential and bearer-like tokens from upstream text.
pub fn scrub_secrets<'a>(input: &'a str, credential: Option<&str>) -> Cow<'a, str> {
    let credential = credential.map(str::trim).filter(|c| !c.is_empty());
    let has_credential = credential.is_some_and(|c| input.contains(c));
    if !has_credential && !MARKERS.iter().any(|m| input.contains(m)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = match credential {
        Some(secret) if has_credential => input.replace(secret, REDACTED),
        _ => input.to_string(),
    };
    for marker in MARKERS {
        redact_after_marker(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub and cap an error message before it reaches the error banner.
pub fn sanitize_error_text(input: &str, credential: Option<&str>) -> String {
    let scrubbed = scrub_secrets(input.trim(), credential);
    if scrubbed.chars().count() <= MAX_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let truncated: String = scrubbed.chars().take(MAX_ERROR_CHARS).collect();
    format!("{truncated}...")
}
