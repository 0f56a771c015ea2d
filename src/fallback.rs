//! Fallback output for icons that cannot be rendered.

use crate::render::RenderedFragment;
use crate::util::escape_html;

/// Generic alert glyph emitted when an icon cannot be rendered and fallback
/// output is enabled.
pub const FALLBACK_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
<circle cx="12" cy="12" r="10"></circle>
<line x1="12" y1="8" x2="12" y2="12"></line>
<line x1="12" y1="16" x2="12.01" y2="16"></line>
</svg>"#;

/// Decides what to emit when the pipeline failed.
///
/// Production mode: the placeholder glyph when `enabled`, an empty string
/// otherwise.  Debug mode additionally turns the disabled-fallback case
/// into an HTML comment carrying the escaped diagnostic, so a missing icon
/// is visible in local development instead of silently absent.
pub(crate) fn fallback(debug: bool, enabled: bool, message: &str) -> RenderedFragment {
    if debug && !enabled {
        tracing::debug!(detail = message, "icon fallback diagnostic");
        return RenderedFragment::new(format!(
            "<!-- svg-icons error: {} -->",
            escape_html(message)
        ));
    }

    if !enabled {
        return RenderedFragment::new("");
    }

    RenderedFragment::new(FALLBACK_SVG)
}
