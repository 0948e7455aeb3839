use super::escape::escape_html;

const STYLESHEET: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 16px; }
pre.json { background: #f6f8fa; border-radius: 6px; padding: 12px; font-size: 12px; overflow-x: auto; }
.json-key { color: #0550ae; }
.json-string { color: #0a3069; }
.json-number { color: #953800; }
.json-null, .json-undefined { color: #6e7781; font-style: italic; }
.json-bracket, .json-comma { color: #24292f; }
.json-array, .json-object { color: #6e7781; }";

/// Wrap rendered markup in a standalone HTML page.
///
/// `markup` must come from [`super::render`]; it is inserted as-is.
pub fn render_document(markup: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{STYLESHEET}\n</style>\n</head>\n<body>\n\
         <pre class=\"json\">{markup}</pre>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}
