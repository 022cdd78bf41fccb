//! HTML pages produced by the preview pipeline itself: the catalog
//! listing and the error diagnostics.

use crate::error::RenderError;
use mp_core::TemplateSource;
use std::fmt::Write;

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 20px; }
h1, h2 { color: #333; }
ul { list-style-type: none; padding: 0; }
li { margin: 10px 0; }
a { color: #0055d4; text-decoration: none; }
a:hover { text-decoration: underline; }
.names { color: #777; font-size: 0.9em; margin-left: 8px; }
pre { background: #f5f5f5; padding: 10px; white-space: pre-wrap; }";

/// Escape text for HTML element content and quoted attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a file name for use as one URL path segment.
///
/// Everything except unreserved characters (`A-Z`, `a-z`, `0-9`, `-`, `_`,
/// `.`, `~`) is encoded.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for b in segment.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(b as char);
            }
            _ => {
                let _ = write!(encoded, "%{:02X}", b);
            }
        }
    }
    encoded
}

fn open_page(out: &mut String, title: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n",
        escape(title),
        STYLE
    );
}

fn close_page(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

/// Render the catalog as a list of preview links.
///
/// Layout fragments are skipped. Each entry links to
/// `{route_prefix}/{file_name}` and shows the internal names it defines
/// when they differ from the file stem.
pub fn listing_page<'a>(
    entries: impl IntoIterator<Item = &'a TemplateSource>,
    route_prefix: &str,
) -> String {
    let prefix = route_prefix.trim_end_matches('/');
    let mut out = String::new();
    open_page(&mut out, prefix);
    let _ = writeln!(out, "<h1>{}</h1>\n<ul>", escape(prefix));

    for entry in entries.into_iter().filter(|e| !e.is_layout) {
        let _ = write!(
            out,
            "<li><a href=\"{}/{}\">{}</a>",
            escape(prefix),
            encode_path_segment(&entry.file_name),
            escape(&entry.file_name)
        );
        if entry.defined_names.len() != 1 || entry.defined_names[0] != entry.stem {
            let _ = write!(
                out,
                "<span class=\"names\">defines: {}</span>",
                escape(&entry.defined_names.join(", "))
            );
        }
        out.push_str("</li>\n");
    }

    out.push_str("</ul>\n");
    close_page(&mut out);
    out
}

/// Render a failed template execution: the requested name, every name the
/// set actually defines, and the engine message.
pub fn diagnostic_page(err: &RenderError) -> String {
    let mut out = String::new();
    open_page(&mut out, "Template error");
    let _ = write!(
        out,
        "<h1>Template error</h1>\n<p>Requested template: <code>{}</code> ({})</p>\n<h2>Error</h2>\n<pre>{}</pre>\n<h2>Available templates</h2>\n<ul>\n",
        escape(&err.requested),
        err.kind,
        escape(&err.message)
    );
    for name in &err.available {
        let _ = writeln!(out, "<li><code>{}</code></li>", escape(name));
    }
    out.push_str("</ul>\n");
    close_page(&mut out);
    out
}

/// Render a failure that has no template context, such as a compile error
/// or an unreadable template directory.
pub fn error_page(title: &str, message: &str) -> String {
    let mut out = String::new();
    open_page(&mut out, title);
    let _ = write!(
        out,
        "<h1>{}</h1>\n<pre>{}</pre>\n",
        escape(title),
        escape(message)
    );
    close_page(&mut out);
    out
}
