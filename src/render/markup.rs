use super::escape::escape_html;
use serde_json::Value;

const NULL: &str = r#"<span class="json-null">null</span>"#;
const UNDEFINED: &str = r#"<span class="json-undefined">undefined</span>"#;
const EMPTY_ARRAY: &str = r#"<span class="json-array">[]</span>"#;
const EMPTY_OBJECT: &str = r#"<span class="json-object">{}</span>"#;
const COMMA: &str = r#"<span class="json-comma">,</span>"#;

/// Render a JSON value as indented, class-tagged HTML markup.
///
/// Total and pure: the same `(value, indent)` always yields the same string.
/// Every string and key is HTML-escaped, so nothing in an upstream payload can
/// inject markup. Object keys keep their input order.
pub fn render(value: &Value, indent: usize) -> String {
    let mut out = String::new();
    render_into(&mut out, value, indent);
    out
}

/// Render a slot that may hold no value at all.
///
/// An absent slot is distinct from JSON `null` and gets its own marker.
pub fn render_optional(value: Option<&Value>, indent: usize) -> String {
    match value {
        Some(value) => render(value, indent),
        None => UNDEFINED.to_string(),
    }
}

fn render_into(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Null => out.push_str(NULL),
        Value::Bool(b) => push_literal(out, &b.to_string()),
        Value::Number(n) => push_literal(out, &n.to_string()),
        Value::String(s) => {
            out.push_str(r#"<span class="json-string">""#);
            out.push_str(&escape_html(s));
            out.push_str(r#""</span>"#);
        }
        Value::Array(items) if items.is_empty() => out.push_str(EMPTY_ARRAY),
        Value::Array(items) => {
            push_bracket(out, '[');
            let last = items.len() - 1;
            for (index, item) in items.iter().enumerate() {
                push_indent(out, indent + 1);
                render_into(out, item, indent + 1);
                if index < last {
                    out.push_str(COMMA);
                }
                out.push('\n');
            }
            push_indent(out, indent);
            push_bracket(out, ']');
        }
        Value::Object(fields) if fields.is_empty() => out.push_str(EMPTY_OBJECT),
        Value::Object(fields) => {
            push_bracket(out, '{');
            let last = fields.len() - 1;
            for (index, (key, item)) in fields.iter().enumerate() {
                push_indent(out, indent + 1);
                out.push_str(r#"<span class="json-key">""#);
                out.push_str(&escape_html(key));
                out.push_str(r#""</span>: "#);
                render_into(out, item, indent + 1);
                if index < last {
                    out.push_str(COMMA);
                }
                out.push('\n');
            }
            push_indent(out, indent);
            push_bracket(out, '}');
        }
    }
}

fn push_literal(out: &mut String, text: &str) {
    out.push_str(r#"<span class="json-number">"#);
    out.push_str(text);
    out.push_str("</span>");
}

fn push_bracket(out: &mut String, bracket: char) {
    out.push_str(r#"<span class="json-bracket">"#);
    out.push(bracket);
    out.push_str("</span>");
    if matches!(bracket, '[' | '{') {
        out.push('\n');
    }
}

fn push_indent(out: &mut String, level: usize) {
    out.extend(std::iter::repeat_n(' ', level * 2));
}
