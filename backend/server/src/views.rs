//! Server-rendered pages.

use terms::Entry;

pub fn render_entry(entry: &Entry) -> String {
    let name = escape_html(&entry.name);
    let description = escape_html(&entry.description);

    let mut html = String::with_capacity(1024 + name.len() * 2 + description.len());
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>");
    html.push_str(&name);
    html.push_str(" - Glossary</title>\n");
    html.push_str(ENTRY_CSS);
    html.push_str("</head>\n<body>\n<main class=\"entry\">\n");
    html.push_str("<h1>");
    html.push_str(&name);
    html.push_str("</h1>\n<p class=\"description\">");
    html.push_str(&description);
    html.push_str("</p>\n<a href=\"/\">Back to the glossary</a>\n</main>\n</body>\n</html>\n");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

const ENTRY_CSS: &str = r#"<style>
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
h1 { margin-bottom: 0.5rem; }
.description { white-space: pre-wrap; line-height: 1.5; }
a { color: #007bff; text-decoration: none; }
</style>
"#;
