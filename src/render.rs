//! Assembling the final markup fragment.
//!
//! Two output variants: inline mode injects attributes into the sanitized
//! `<svg>` root tag; reference mode emits an `<img>` element pointing at
//! the static asset URL.  Every injected attribute key and value is
//! HTML-escaped, empty values are omitted, and caller-supplied extra
//! attributes pass through fixed allowlists only.

use std::fmt;

use crate::api::IconRequest;
use crate::sanitize::SanitizedContent;
use crate::util::escape_html;

/// Extra attributes accepted on reference-mode `<img>` output, besides any
/// key starting with `data-`.
const IMG_SAFE_ATTRS: [&str; 4] = ["loading", "decoding", "fetchpriority", "style"];

/// Extra attributes accepted on inline `<svg>` output.
const SVG_SAFE_ATTRS: [&str; 8] = [
    "viewBox",
    "preserveAspectRatio",
    "style",
    "fill-rule",
    "clip-rule",
    "stroke-width",
    "stroke-linecap",
    "stroke-linejoin",
];

/// Final output string, pre-escaped for direct embedding.
///
/// The embedding template must treat this as trusted output and not escape
/// it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment(String);

impl RenderedFragment {
    pub(crate) fn new(markup: impl Into<String>) -> RenderedFragment {
        RenderedFragment(markup.into())
    }

    /// The markup fragment.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the fragment, returning the markup.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability for mapping a relative asset path to a public URL.
///
/// Only used in reference mode; the browser fetches the raw asset itself,
/// so the sanitizer plays no part in that variant.
pub trait StaticUrls: Send + Sync {
    /// The URL under which `relative` is served.
    fn url_for(&self, relative: &str) -> String;
}

/// [`StaticUrls`] that joins a fixed URL prefix.
pub struct PrefixUrls {
    prefix: String,
}

impl PrefixUrls {
    /// Creates a mapper rooted at `prefix`, e.g. `/static`.
    pub fn new(prefix: impl Into<String>) -> PrefixUrls {
        let mut prefix = prefix.into();
        while prefix.ends_with('/') {
            prefix.pop();
        }
        PrefixUrls { prefix }
    }
}

impl StaticUrls for PrefixUrls {
    fn url_for(&self, relative: &str) -> String {
        format!("{}/{}", self.prefix, relative)
    }
}

/// Renders the reference-mode `<img>` element.
pub(crate) fn render_reference(request: &IconRequest, static_url: &str) -> RenderedFragment {
    let mut attrs: Vec<(String, String)> = Vec::new();

    push(&mut attrs, "src", Some(static_url));
    let alt = request.aria_label().or_else(|| request.title()).unwrap_or("");
    push(&mut attrs, "alt", Some(alt));
    push(&mut attrs, "class", Some(request.classes().trim()));
    push(&mut attrs, "width", request.width());
    push(&mut attrs, "height", request.height());
    if request.aria_label().is_none() && request.title().is_none() {
        push(&mut attrs, "aria-hidden", Some("true"));
    }

    for (key, value) in request.extra_attrs() {
        if key.starts_with("data-") || IMG_SAFE_ATTRS.contains(&key.as_str()) {
            push(&mut attrs, key, Some(value.as_str()));
        }
    }

    RenderedFragment(format!("<img {}>", assemble(&attrs)))
}

/// Renders the inline variant: sanitized markup with attributes merged into
/// the root element's opening tag.
pub(crate) fn render_inline(request: &IconRequest, content: &SanitizedContent) -> RenderedFragment {
    let mut markup = content.as_str().to_string();

    let mut attrs: Vec<(String, String)> = Vec::new();
    push(&mut attrs, "class", Some(request.classes().trim()));
    push(&mut attrs, "width", request.width());
    push(&mut attrs, "height", request.height());
    push(&mut attrs, "fill", request.fill());
    push(&mut attrs, "stroke", request.stroke());

    if let Some(label) = request.aria_label() {
        push(&mut attrs, "aria-label", Some(label));
        push(&mut attrs, "role", Some("img"));
        push(&mut attrs, "focusable", Some("false"));
    }

    for (key, value) in request.extra_attrs() {
        if SVG_SAFE_ATTRS.contains(&key.as_str()) {
            push(&mut attrs, key, Some(value.as_str()));
        }
    }

    // Title and aria-label are mutually exclusive accessibility strategies;
    // aria-label wins.
    if let Some(title) = request.title() {
        if request.aria_label().is_none() {
            markup = insert_title(&markup, title);
        }
    }

    if !attrs.is_empty() {
        // First occurrence only: a nested element starting with the same tag
        // name fragment is never touched.
        markup = markup.replacen("<svg", &format!("<svg {}", assemble(&attrs)), 1);
    }

    RenderedFragment(markup)
}

fn push(attrs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            attrs.push((key.to_string(), value.to_string()));
        }
    }
}

fn assemble(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(r#"{}="{}""#, escape_html(key), escape_html(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inserts a `<title>` child immediately after the root element's opening
/// tag closes, before any other children.
fn insert_title(markup: &str, title: &str) -> String {
    let Some(start) = markup.find("<svg") else {
        return markup.to_string();
    };
    let Some(close) = markup[start..].find('>') else {
        return markup.to_string();
    };
    let at = start + close + 1;
    format!(
        "{}<title>{}</title>{}",
        &markup[..at],
        escape_html(title),
        &markup[at..]
    )
}
