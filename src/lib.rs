//! Resolve named icons to sanitized SVG fragments ready for HTML embedding.
//!
//! This crate turns an untrusted icon identifier like `"heroicons:home"`
//! into a markup fragment that is safe to splice into an HTML document.  It
//! is the core behind a template tag or filter: the template binding
//! deserializes the caller's arguments into an [`IconRequest`], calls
//! [`IconRenderer::render`], and marks the result as pre-escaped output.
//!
//! # Basic usage
//!
//! * Create an [`IconRenderer`] over an [`AssetFinder`] (use
//!   [`DirectoryFinder`] if you do not have an asset pipeline).
//! * Configure it with the builder methods.
//! * Call [`IconRenderer::render`] with an [`IconRequest`] per icon.
//!
//! ```no_run
//! use svg_icons::{DirectoryFinder, IconRenderer, IconRequest};
//!
//! let renderer = IconRenderer::new(Box::new(DirectoryFinder::new(vec![
//!     "/srv/app/static".into(),
//! ])));
//!
//! let html = renderer.render(
//!     &IconRequest::new("home")
//!         .with_library("heroicons")
//!         .with_classes("w-6 h-6")
//!         .with_aria_label("Home"),
//! );
//! ```
//!
//! # Security model
//!
//! The pipeline layers its defenses; each layer assumes the previous one
//! may have a bug:
//!
//! 1. Icon and library names are validated against strict character
//!    allowlists before anything touches the filesystem.  Path separators,
//!    `..`, whitespace, and markup characters never pass.
//!
//! 2. The only path construction performed is a single join of a trusted
//!    search root with the relative path `icons/<library>/<name>.svg`, and
//!    a hit is accepted only if its canonical path is a descendant of its
//!    canonical root.
//!
//! 3. File content is sanitized before it is embedded: `<script>` elements
//!    and `on*=` event-handler attributes are destroyed, and an XML
//!    declaration prologue is stripped.  This is defense in depth over
//!    files you already control, not a boundary against arbitrary hostile
//!    SVG authors.
//!
//! 4. Every caller-supplied attribute key and value is HTML-escaped, and
//!    extra attributes pass fixed allowlists.
//!
//! Failures never propagate to the embedding template.  A missing or
//! invalid icon renders as a placeholder glyph, an empty string, or (in
//! debug mode) an HTML comment carrying the escaped diagnostic; see
//! [`FALLBACK_SVG`] and [`IconRenderer::with_debug`].
//!
//! # Caching
//!
//! Sanitized content is cached in a bounded in-process LRU tier and,
//! optionally, an [`ExternalCache`] shared across processes.  Keys include
//! the source file's modification time, so editing an icon invalidates
//! stale entries automatically.

#![warn(missing_docs)]

mod api;
mod cache;
mod error;
mod fallback;
mod presets;
mod render;
mod resolver;
mod sanitize;
mod util;
mod validation;

pub use api::{IconRenderer, IconRequest, RenderMode};
pub use cache::{ExternalCache, DEFAULT_CAPACITY, DEFAULT_TTL_SECONDS};
pub use error::IconError;
pub use fallback::FALLBACK_SVG;
pub use presets::{Flip, PresetOptions};
pub use render::{PrefixUrls, RenderedFragment, StaticUrls};
pub use resolver::{AssetFinder, DirectoryFinder, ResolvedAsset};
pub use sanitize::SanitizedContent;
pub use validation::{is_valid_icon_name, is_valid_library_name};
