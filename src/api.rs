//! Public API: requests, the renderer, and its configuration.

use std::fs;
use std::path::PathBuf;

use crate::cache::{CacheKey, CacheStack, ExternalCache};
use crate::error::IconError;
use crate::fallback;
use crate::presets::{self, PresetOptions};
use crate::render::{self, PrefixUrls, RenderedFragment, StaticUrls};
use crate::resolver::{AssetFinder, Resolver};
use crate::sanitize;
use crate::validation;

/// How an icon is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Inline the sanitized `<svg>` markup into the document.
    #[default]
    Inline,
    /// Emit an `<img>` element referencing the static asset URL.
    Reference,
}

/// One icon render call.
///
/// Constructed once per call with builder methods:
///
/// ```
/// use svg_icons::IconRequest;
///
/// let request = IconRequest::new("home")
///     .with_library("heroicons")
///     .with_classes("w-6 h-6")
///     .with_aria_label("Home");
/// ```
///
/// The name may carry the `library:name` shorthand (`"heroicons:home"`);
/// it is split and revalidated before resolution when no explicit library
/// was given.
#[derive(Debug, Clone)]
pub struct IconRequest {
    name: String,
    library: Option<String>,
    mode: RenderMode,
    classes: String,
    aria_label: Option<String>,
    title: Option<String>,
    width: Option<String>,
    height: Option<String>,
    fill: Option<String>,
    stroke: Option<String>,
    extra_attrs: Vec<(String, String)>,
    fallback: bool,
}

impl IconRequest {
    /// Creates a request for `name` with everything else at its default:
    /// inline mode, no presentation attributes, fallback enabled.
    pub fn new(name: impl Into<String>) -> IconRequest {
        IconRequest {
            name: name.into(),
            library: None,
            mode: RenderMode::default(),
            classes: String::new(),
            aria_label: None,
            title: None,
            width: None,
            height: None,
            fill: None,
            stroke: None,
            extra_attrs: Vec::new(),
            fallback: true,
        }
    }

    /// Sets the library namespace, e.g. `"bootstrap"`.
    pub fn with_library(mut self, library: impl Into<String>) -> IconRequest {
        self.library = Some(library.into());
        self
    }

    /// Selects inline or reference output.
    pub fn with_mode(mut self, mode: RenderMode) -> IconRequest {
        self.mode = mode;
        self
    }

    /// Sets the CSS class string.
    pub fn with_classes(mut self, classes: impl Into<String>) -> IconRequest {
        self.classes = classes.into();
        self
    }

    /// Sets the ARIA label.  Takes precedence over a title.
    pub fn with_aria_label(mut self, label: impl Into<String>) -> IconRequest {
        self.aria_label = Some(label.into());
        self
    }

    /// Sets the visual title.
    pub fn with_title(mut self, title: impl Into<String>) -> IconRequest {
        self.title = Some(title.into());
        self
    }

    /// Sets the `width` attribute.
    pub fn with_width(mut self, width: impl Into<String>) -> IconRequest {
        self.width = Some(width.into());
        self
    }

    /// Sets the `height` attribute.
    pub fn with_height(mut self, height: impl Into<String>) -> IconRequest {
        self.height = Some(height.into());
        self
    }

    /// Sets the fill color (inline mode only).
    pub fn with_fill(mut self, fill: impl Into<String>) -> IconRequest {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the stroke color (inline mode only).
    pub fn with_stroke(mut self, stroke: impl Into<String>) -> IconRequest {
        self.stroke = Some(stroke.into());
        self
    }

    /// Adds an extra attribute.  Keys pass a fixed allowlist at render time;
    /// anything else is silently dropped.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> IconRequest {
        self.extra_attrs.push((key.into(), value.into()));
        self
    }

    /// Enables or disables the placeholder glyph on failure.
    pub fn with_fallback(mut self, fallback: bool) -> IconRequest {
        self.fallback = fallback;
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    pub(crate) fn mode(&self) -> RenderMode {
        self.mode
    }

    pub(crate) fn classes(&self) -> &str {
        &self.classes
    }

    pub(crate) fn aria_label(&self) -> Option<&str> {
        self.aria_label.as_deref()
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    pub(crate) fn height(&self) -> Option<&str> {
        self.height.as_deref()
    }

    pub(crate) fn fill(&self) -> Option<&str> {
        self.fill.as_deref()
    }

    pub(crate) fn stroke(&self) -> Option<&str> {
        self.stroke.as_deref()
    }

    pub(crate) fn extra_attrs(&self) -> &[(String, String)] {
        &self.extra_attrs
    }

    pub(crate) fn fallback_enabled(&self) -> bool {
        self.fallback
    }
}

/// The resolution-sanitization-render pipeline.
///
/// This is the entry point for the crate.  Construct one over an
/// [`AssetFinder`], configure it with the builder methods, and call
/// [`render`](IconRenderer::render) per icon:
///
/// ```no_run
/// use svg_icons::{DirectoryFinder, IconRenderer, IconRequest};
///
/// let renderer = IconRenderer::new(Box::new(DirectoryFinder::new(vec![
///     "/srv/app/static".into(),
/// ])))
/// .with_debug(cfg!(debug_assertions));
///
/// let html = renderer.render(&IconRequest::new("home").with_classes("w-6 h-6"));
/// ```
///
/// `render` is total: every failure is logged and converted into a
/// fallback fragment, so the embedding template never handles errors.
pub struct IconRenderer {
    resolver: Resolver,
    urls: Box<dyn StaticUrls>,
    cache: CacheStack,
    debug: bool,
}

impl IconRenderer {
    /// Creates a renderer with default options: static URLs under
    /// `/static`, a 256-entry local cache, no external cache, production
    /// mode.
    pub fn new(finder: Box<dyn AssetFinder>) -> IconRenderer {
        IconRenderer {
            resolver: Resolver::new(finder),
            urls: Box::new(PrefixUrls::new("/static")),
            cache: CacheStack::new(),
            debug: false,
        }
    }

    /// Adds extra search roots, probed in order after the finder.
    pub fn with_search_roots(mut self, roots: Vec<PathBuf>) -> IconRenderer {
        self.resolver.set_extra_roots(roots);
        self
    }

    /// Replaces the static-URL capability used in reference mode.
    pub fn with_static_urls(mut self, urls: Box<dyn StaticUrls>) -> IconRenderer {
        self.urls = urls;
        self
    }

    /// Attaches an external shared cache (engaged only in production mode).
    pub fn with_external_cache(mut self, cache: Box<dyn ExternalCache>) -> IconRenderer {
        self.cache.set_external(cache);
        self
    }

    /// Sets the in-process cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> IconRenderer {
        self.cache.set_capacity(capacity);
        self
    }

    /// Sets the external cache time-to-live in seconds.
    pub fn with_cache_ttl(mut self, ttl_seconds: u64) -> IconRenderer {
        self.cache.set_ttl(ttl_seconds);
        self
    }

    /// Switches between debug and production behavior: debug mode disables
    /// the external cache tier and reports failures as HTML comments when
    /// fallback output is off.
    pub fn with_debug(mut self, debug: bool) -> IconRenderer {
        self.debug = debug;
        self.cache.set_debug(debug);
        self
    }

    /// Renders one icon to an embeddable fragment.
    pub fn render(&self, request: &IconRequest) -> RenderedFragment {
        match self.try_render(request) {
            Ok(fragment) => fragment,
            Err(err) => {
                match err {
                    IconError::Read { .. } => tracing::error!(error = %err, "icon render failed"),
                    _ => tracing::warn!(error = %err, "icon render failed"),
                }
                fallback::fallback(self.debug, request.fallback_enabled(), &err.to_string())
            }
        }
    }

    /// Renders one icon with Tailwind-style preset classes.
    pub fn render_with_presets(&self, name: &str, options: &PresetOptions) -> RenderedFragment {
        let mut request = IconRequest::new(name).with_classes(presets::class_string(options));
        if let Some(library) = &options.library {
            request = request.with_library(library.clone());
        }
        self.render(&request)
    }

    /// Renders one icon inline with `class="icon"` and everything else at
    /// its default.
    pub fn render_simple(&self, name: &str) -> RenderedFragment {
        self.render(&IconRequest::new(name).with_classes("icon"))
    }

    fn try_render(&self, request: &IconRequest) -> Result<RenderedFragment, IconError> {
        if request.name().is_empty() {
            return Err(IconError::InvalidIdentifier(String::new()));
        }

        // `library:name` shorthand: split and revalidate, never a separate
        // trust decision.  A token that fails the split is treated as an
        // unsplit icon name and will fail validation below.
        let (name, library) = match request.library() {
            Some(library) => (request.name(), Some(library)),
            None => match validation::split_shorthand(request.name()) {
                Some((library, name)) => (name, Some(library)),
                None => (request.name(), None),
            },
        };

        let asset = self.resolver.resolve(name, library)?;

        if request.mode() == RenderMode::Reference {
            // The browser fetches the raw asset itself; the sanitizer is
            // skipped entirely in this mode.
            let url = self.urls.url_for(&Resolver::search_path(name, library));
            return Ok(render::render_reference(request, &url));
        }

        let key = CacheKey::new(library, name, asset.modified);
        let path = asset.path;
        let content = self.cache.get_or_compute(&key, || {
            let raw = fs::read(&path).map_err(|e| IconError::read(&path, e))?;
            sanitize::sanitize(&raw, &path)
        })?;

        Ok(render::render_inline(request, &content))
    }
}
