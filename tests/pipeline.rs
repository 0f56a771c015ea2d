//! End-to-end tests for the resolve-sanitize-render pipeline, driven
//! through the public API against real files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use svg_icons::{
    AssetFinder, DirectoryFinder, IconRenderer, IconRequest, PresetOptions, RenderMode,
    FALLBACK_SVG,
};

const PLAIN_ICON: &str =
    r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M12 2L2 7l10 5 10-5-10-5z"/></svg>"#;

fn write_icon(root: &Path, library: Option<&str>, name: &str, content: &str) -> PathBuf {
    let mut dir = root.join("icons");
    if let Some(library) = library {
        dir = dir.join(library);
    }
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join(format!("{name}.svg"));
    fs::write(&file, content).unwrap();
    file
}

fn renderer_over(root: &Path) -> IconRenderer {
    IconRenderer::new(Box::new(DirectoryFinder::new(vec![root.to_path_buf()])))
}

#[test]
fn renders_a_plain_icon_inline() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "home", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(&IconRequest::new("home").with_library("test"));

    assert_eq!(out.as_str(), PLAIN_ICON);
}

#[test]
fn library_shorthand_resolves_like_the_two_argument_form() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "test-icon", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let shorthand = renderer.render(&IconRequest::new("test:test-icon"));
    let explicit = renderer.render(&IconRequest::new("test-icon").with_library("test"));

    assert_eq!(shorthand, explicit);
    assert!(shorthand.as_str().contains("<svg"));
}

#[test]
fn classes_and_aria_label_are_injected() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "home", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(
        &IconRequest::new("home")
            .with_library("test")
            .with_classes("w-6 h-6")
            .with_aria_label("Home"),
    );

    assert!(out.as_str().contains(r#"class="w-6 h-6""#));
    assert!(out.as_str().contains(r#"aria-label="Home""#));
    assert!(out.as_str().contains(r#"role="img""#));
    assert!(out.as_str().contains(r#"focusable="false""#));
}

#[test]
fn title_becomes_a_child_element() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "home", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(
        &IconRequest::new("home")
            .with_library("test")
            .with_title("Test Title"),
    );

    assert!(out.as_str().contains("<title>Test Title</title>"));
}

#[test]
fn dimensions_are_injected() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "home", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(
        &IconRequest::new("home")
            .with_library("test")
            .with_width("100")
            .with_height("50"),
    );

    assert!(out.as_str().contains(r#"width="100""#));
    assert!(out.as_str().contains(r#"height="50""#));
}

#[test]
fn missing_icon_renders_the_placeholder_glyph() {
    let tmp = tempfile::tempdir().unwrap();

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(&IconRequest::new("missing"));

    assert_eq!(out.as_str(), FALLBACK_SVG);
}

#[test]
fn missing_icon_with_fallback_disabled_renders_nothing() {
    let tmp = tempfile::tempdir().unwrap();

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(&IconRequest::new("missing").with_fallback(false));

    assert_eq!(out.as_str(), "");
}

#[test]
fn debug_mode_reports_disabled_fallback_as_a_comment() {
    let tmp = tempfile::tempdir().unwrap();

    let renderer = renderer_over(tmp.path()).with_debug(true);
    let out = renderer.render(&IconRequest::new("missing").with_fallback(false));

    assert!(out.as_str().starts_with("<!-- svg-icons error:"));
    assert!(out.as_str().ends_with("-->"));
}

#[test]
fn invalid_name_falls_back_without_touching_the_filesystem() {
    struct CountingFinder(Arc<AtomicUsize>);

    impl AssetFinder for CountingFinder {
        fn find(&self, _relative: &str) -> Option<PathBuf> {
            self.0.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    let probes = Arc::new(AtomicUsize::new(0));
    let renderer = IconRenderer::new(Box::new(CountingFinder(Arc::clone(&probes))));

    let out = renderer.render(&IconRequest::new("evil<script>"));

    assert_eq!(out.as_str(), FALLBACK_SVG);
    assert_eq!(probes.load(Ordering::SeqCst), 0);
}

#[test]
fn malicious_file_content_is_sanitized() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(
        tmp.path(),
        Some("test"),
        "malicious",
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" onclick=\"x()\">\n",
            "<script>alert(1)</script>\n",
            "<path d=\"M12 2L2 7\"/>\n",
            "</svg>",
        ),
    );

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(&IconRequest::new("malicious").with_library("test"));

    assert!(!out.as_str().contains("<script>alert(1)</script>"));
    assert!(!out.as_str().to_lowercase().contains("onclick=\"x()\""));
    assert!(out.as_str().contains("<path"));
}

#[test]
fn reference_mode_emits_an_img_element() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "home", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(
        &IconRequest::new("home")
            .with_library("test")
            .with_mode(RenderMode::Reference),
    );

    assert!(out.as_str().starts_with("<img "));
    assert!(out.as_str().contains(r#"src="/static/icons/test/home.svg""#));
    assert!(out.as_str().contains(r#"aria-hidden="true""#));
}

#[test]
fn reference_mode_title_feeds_alt_and_drops_aria_hidden() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "info", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(
        &IconRequest::new("info")
            .with_library("test")
            .with_mode(RenderMode::Reference)
            .with_title("Info"),
    );

    assert!(out.as_str().contains(r#"alt="Info""#));
    assert!(!out.as_str().contains("aria-hidden"));
}

#[test]
fn editing_the_file_refreshes_the_rendered_content() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_icon(tmp.path(), Some("test"), "home", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let before = renderer.render(&IconRequest::new("home").with_library("test"));
    assert!(before.as_str().contains("M12 2L2 7"));

    // Coarse-mtime filesystems need a visible timestamp change.
    std::thread::sleep(std::time::Duration::from_millis(20));
    fs::write(&file, r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="8"/></svg>"#).unwrap();

    let after = renderer.render(&IconRequest::new("home").with_library("test"));
    assert!(after.as_str().contains("<rect"));
}

#[test]
fn presets_compose_the_class_string() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "spinner", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render_with_presets(
        "spinner",
        &PresetOptions {
            library: Some("test".to_string()),
            size: Some("lg".to_string()),
            color: Some("primary".to_string()),
            spin: true,
            ..PresetOptions::default()
        },
    );

    assert!(out.as_str().contains("w-6"));
    assert!(out.as_str().contains("h-6"));
    assert!(out.as_str().contains("text-primary-600"));
    assert!(out.as_str().contains("animate-spin"));
}

#[test]
fn render_simple_applies_the_icon_class() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), None, "test-icon", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render_simple("test-icon");

    assert!(out.as_str().contains("<svg"));
    assert!(out.as_str().contains(r#"class="icon""#));
}

#[test]
fn hostile_attribute_values_are_escaped() {
    let tmp = tempfile::tempdir().unwrap();
    write_icon(tmp.path(), Some("test"), "valid-icon", PLAIN_ICON);

    let renderer = renderer_over(tmp.path());
    let out = renderer.render(
        &IconRequest::new("valid-icon")
            .with_library("test")
            .with_aria_label(r#""><script>alert(1)</script>"#),
    );

    assert!(!out.as_str().contains("<script>"));
    assert!(out.as_str().contains("&lt;script&gt;"));
}

#[test]
fn extra_search_roots_are_probed_after_the_finder() {
    let finder_root = tempfile::tempdir().unwrap();
    let extra_root = tempfile::tempdir().unwrap();
    write_icon(extra_root.path(), Some("test"), "home", PLAIN_ICON);

    let renderer = IconRenderer::new(Box::new(DirectoryFinder::new(vec![
        finder_root.path().to_path_buf(),
    ])))
    .with_search_roots(vec![extra_root.path().to_path_buf()]);

    let out = renderer.render(&IconRequest::new("home").with_library("test"));
    assert!(out.as_str().contains("<svg"));
}
