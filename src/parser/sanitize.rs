//! Reduce a paragraph or list item to the markup a calendar description can
//! carry: bold text and line breaks.

use scraper::{node::Node, ElementRef, Html};

/// Sanitize the contents of `element`.
///
/// `<strong>` and `<b>` become `<b>`, `<br>` becomes a newline, any other tag
/// is dropped while its text is kept. Non-breaking spaces turn into plain
/// spaces and `&amp;` is decoded; `<` and `>` in text stay escaped so the
/// result never grows markup of its own. The result is trimmed.
pub fn sanitize_element(element: ElementRef) -> String {
    let mut out = String::new();
    write_inline(element, &mut out);
    out.trim().to_string()
}

/// Sanitize an HTML fragment string.
pub fn sanitize_fragment(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    sanitize_element(fragment.root_element())
}

fn write_inline(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(text, out),
            Node::Element(el) => {
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                match el.name() {
                    "strong" | "b" => {
                        out.push_str("<b>");
                        write_inline(child_ref, out);
                        out.push_str("</b>");
                    }
                    "br" => out.push('\n'),
                    "script" | "style" => {}
                    _ => write_inline(child_ref, out),
                }
            }
            _ => {}
        }
    }
}

fn push_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '\u{a0}' => out.push(' '),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
