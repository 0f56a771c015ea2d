//! Tailwind-style class presets for icon sizing, color, and animation.
//!
//! Static lookup tables only; unknown presets fall back to the medium size
//! and the current text color.

/// Flip direction presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// Mirror across the vertical axis.
    Horizontal,
    /// Mirror across the horizontal axis.
    Vertical,
}

/// Options accepted by [`crate::IconRenderer::render_with_presets`].
#[derive(Debug, Clone, Default)]
pub struct PresetOptions {
    /// Size preset: `xs`, `sm`, `md`, `lg`, `xl`, `2xl`, `3xl`, `4xl`.
    pub size: Option<String>,
    /// Color preset, e.g. `primary`, `danger`, `gray`.
    pub color: Option<String>,
    /// Library namespace, as in [`crate::IconRequest::with_library`].
    pub library: Option<String>,
    /// Rotation angle suffix, e.g. `90`, `180`, `270`.
    pub rotate: Option<String>,
    /// Mirror the icon.
    pub flip: Option<Flip>,
    /// Spinning animation.
    pub spin: bool,
    /// Pulsing animation.
    pub pulse: bool,
}

fn size_classes(size: &str) -> &'static str {
    match size {
        "xs" => "w-3 h-3",
        "sm" => "w-4 h-4",
        "md" => "w-5 h-5",
        "lg" => "w-6 h-6",
        "xl" => "w-8 h-8",
        "2xl" => "w-10 h-10",
        "3xl" => "w-12 h-12",
        "4xl" => "w-16 h-16",
        _ => "w-5 h-5",
    }
}

fn color_class(color: &str) -> &'static str {
    match color {
        "current" => "text-current",
        "primary" => "text-primary-600",
        "secondary" => "text-secondary-600",
        "success" => "text-success-600",
        "danger" => "text-danger-600",
        "warning" => "text-warning-600",
        "info" => "text-info-600",
        "gray" => "text-gray-500",
        "light" => "text-gray-400",
        "dark" => "text-gray-800",
        "brand-blue" => "text-blue-600",
        "brand-green" => "text-green-600",
        _ => "text-current",
    }
}

/// Composes the full class string: size, color, then modifiers.
pub(crate) fn class_string(options: &PresetOptions) -> String {
    let mut classes = vec![
        size_classes(options.size.as_deref().unwrap_or("md")).to_string(),
        color_class(options.color.as_deref().unwrap_or("current")).to_string(),
    ];

    if let Some(rotate) = &options.rotate {
        classes.push(format!("rotate-{rotate}"));
    }

    match options.flip {
        Some(Flip::Horizontal) => classes.push("scale-x-[-1]".to_string()),
        Some(Flip::Vertical) => classes.push("scale-y-[-1]".to_string()),
        None => {}
    }

    if options.spin {
        classes.push("animate-spin".to_string());
    }
    if options.pulse {
        classes.push("animate-pulse".to_string());
    }

    classes.join(" ")
}
