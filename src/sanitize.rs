//! Defense-in-depth sanitization of raw SVG content.
//!
//! This is explicitly a pattern filter, not an XML parser: it destroys the
//! syntax of executable content (`<script>` elements and inline event
//! handlers) without validating element nesting or canonicalizing the
//! document.  It sits behind identifier validation as a second layer and
//! must never panic on malformed input; a step that finds nothing to remove
//! returns its input unchanged.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::IconError;

/// The SVG namespace declaration used for the structural shape check.
pub(crate) const SVG_NAMESPACE: &str = r#"xmlns="http://www.w3.org/2000/svg""#;

static XML_PROLOGUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<\?xml[^>]*\?>\s*").unwrap());
static SCRIPT_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").unwrap());
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)on\w+\s*=").unwrap());

/// Sanitized SVG markup.
///
/// Guaranteed free of `<script>` elements and `on*=` event-handler
/// attributes, and known to have passed the structural shape check.  Cached
/// entries share the underlying text immutably across concurrent readers.
#[derive(Debug, Clone)]
pub struct SanitizedContent(Arc<str>);

impl SanitizedContent {
    pub(crate) fn from_trusted(markup: String) -> SanitizedContent {
        SanitizedContent(markup.into())
    }

    /// The sanitized markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Decodes and sanitizes the raw bytes of an icon file.
///
/// The transformation order is fixed: strip a leading XML declaration,
/// remove `<script>` elements, remove event-handler attributes, trim.  The
/// removal steps are intentionally aggressive; they may leave a dangling
/// fragment behind, which is acceptable since the goal is to destroy the
/// handler syntax, not to produce pretty output.
pub fn sanitize(raw: &[u8], path: &Path) -> Result<SanitizedContent, IconError> {
    let text = std::str::from_utf8(raw).map_err(|_| IconError::read(path, "not valid UTF-8"))?;

    let trimmed = text.trim();
    if !trimmed.starts_with("<svg") && !trimmed.contains(SVG_NAMESPACE) {
        return Err(IconError::InvalidStructure {
            path: path.to_path_buf(),
        });
    }

    let content = XML_PROLOGUE.replace(trimmed, "");
    let content = strip_to_fixed_point(&SCRIPT_ELEMENT, &content);
    let content = strip_to_fixed_point(&EVENT_HANDLER, &content);

    Ok(SanitizedContent(content.trim().into()))
}

/// Deletes every match of `pattern`, repeating until none remain.
///
/// A single `replace_all` pass is not enough: deleting a match can splice
/// the surrounding text into a fresh match (`o<script></script>nclick=` and
/// friends), so deletion runs to a fixed point.
fn strip_to_fixed_point(pattern: &Regex, input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = pattern.replace_all(&current, "");
        if next == current {
            return current;
        }
        current = next.into_owned();
    }
}
