//! Basic-allowlist HTML sanitizer.
//!
//! Keeps simple inline and list formatting, drops everything else but its
//! text. Script-like elements are removed together with their contents.

use scraper::{ElementRef, Html, Node};

const ALLOWED_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "cite", "code", "dd", "dfn", "dl", "dt", "em", "i",
    "kbd", "li", "mark", "ol", "p", "pre", "q", "s", "samp", "small", "strike", "strong", "sub",
    "sup", "time", "u", "ul", "var",
];

const REMOVE_CONTENTS: &[&str] = &[
    "iframe", "math", "noembed", "noframes", "noscript", "plaintext", "script", "style", "svg",
    "template", "xmp",
];

const VOID_ELEMENTS: &[&str] = &["br"];

const ALLOWED_PROTOCOLS: &[&str] = &["http", "https", "mailto"];

fn allowed_attributes(element: &str) -> &'static [&'static str] {
    match element {
        "a" => &["href"],
        "abbr" | "dfn" => &["title"],
        "blockquote" | "q" => &["cite"],
        "time" => &["datetime", "pubdate"],
        _ => &[],
    }
}

fn is_url_attribute(attr: &str) -> bool {
    matches!(attr, "href" | "cite")
}

pub fn sanitize_basic(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_children(fragment.root_element(), &mut out);
    out
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => escape_into(text, false, out),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    write_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    if REMOVE_CONTENTS.contains(&name) {
        return;
    }
    if !ALLOWED_ELEMENTS.contains(&name) {
        write_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(name);
    let allowed = allowed_attributes(name);
    for (attr, value) in element.value().attrs() {
        if !allowed.contains(&attr) {
            continue;
        }
        if is_url_attribute(attr) && !has_allowed_protocol(value) {
            continue;
        }
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    if name == "a" {
        out.push_str(" rel=\"nofollow\"");
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    write_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Relative URLs pass; absolute ones need an allowlisted scheme.
fn has_allowed_protocol(url: &str) -> bool {
    let url = url.trim();
    let scheme_end = match url.find(':') {
        Some(pos) => pos,
        None => return true,
    };
    if url[..scheme_end].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = url[..scheme_end].to_ascii_lowercase();
    ALLOWED_PROTOCOLS.contains(&scheme.as_str())
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
