// SVG rendering of badges in the shields.io look.

use std::fmt::Write;

use crate::model::{Badge, BadgeStyle};

const DEFAULT_COLOR: &str = "#4c1";
const DEFAULT_LABEL_COLOR: &str = "#555";
const FONT_FAMILY: &str = "Verdana,Geneva,DejaVu Sans,sans-serif";

/// Layout parameters of a style.
struct Metrics {
    height: u32,
    radius: u32,
    font_size: u32,
    char_width: f64,
    padding: f64,
    gradient: bool,
    uppercase: bool,
}

impl Metrics {
    fn of(style: BadgeStyle) -> Self {
        match style {
            BadgeStyle::FlatSquare => Self {
                height: 20,
                radius: 0,
                font_size: 11,
                char_width: 6.5,
                padding: 10.0,
                gradient: false,
                uppercase: false,
            },
            BadgeStyle::ForTheBadge => Self {
                height: 28,
                radius: 0,
                font_size: 10,
                char_width: 7.5,
                padding: 24.0,
                gradient: false,
                uppercase: true,
            },
            // plastic and social fall back to the flat geometry
            BadgeStyle::Flat | BadgeStyle::Plastic | BadgeStyle::Social => Self {
                height: 20,
                radius: 3,
                font_size: 11,
                char_width: 6.5,
                padding: 10.0,
                gradient: true,
                uppercase: false,
            },
        }
    }

    fn text_width(&self, text: &str) -> u32 {
        let chars = text.chars().count() as f64;
        (chars * self.char_width + self.padding).round() as u32
    }
}

/// Resolves a named or hex color into a CSS color value.
pub fn resolve_color(color: Option<&str>, default: &str) -> String {
    let Some(color) = color.map(str::trim).filter(|c| !c.is_empty()) else {
        return default.to_string();
    };

    let named = match color.to_ascii_lowercase().as_str() {
        "brightgreen" | "success" => Some("#4c1"),
        "green" => Some("#97ca00"),
        "yellow" => Some("#dfb317"),
        "yellowgreen" => Some("#a4a61d"),
        "orange" | "important" => Some("#fe7d37"),
        "red" | "critical" => Some("#e05d44"),
        "blue" | "informational" => Some("#007ec6"),
        "grey" | "gray" => Some("#555"),
        "lightgrey" | "lightgray" | "inactive" => Some("#9f9f9f"),
        "blueviolet" => Some("#8a2be2"),
        _ => None,
    };
    if let Some(named) = named {
        return named.to_string();
    }

    let hex = color.trim_start_matches('#');
    let is_hex = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if is_hex {
        return format!("#{}", hex.to_ascii_lowercase());
    }

    default.to_string()
}

/// Escapes text for use in SVG character data and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders a badge as a standalone SVG document.
pub fn render(badge: &Badge) -> String {
    let metrics = Metrics::of(badge.style.unwrap_or_default());

    let (label, message) = if metrics.uppercase {
        (badge.label.to_uppercase(), badge.message.to_uppercase())
    } else {
        (badge.label.clone(), badge.message.clone())
    };

    let label_width = if label.is_empty() { 0 } else { metrics.text_width(&label) };
    let message_width = metrics.text_width(&message);
    let width = label_width + message_width;
    let height = metrics.height;

    let color = resolve_color(badge.color.as_deref(), DEFAULT_COLOR);
    let label_color = resolve_color(badge.label_color.as_deref(), DEFAULT_LABEL_COLOR);

    let title = if label.is_empty() {
        escape_xml(&message)
    } else {
        escape_xml(&format!("{}: {}", badge.label, badge.message))
    };
    let label = escape_xml(&label);
    let message = escape_xml(&message);

    let text_y = height / 2 + metrics.font_size / 2 - 1;
    let label_x = label_width as f64 / 2.0;
    let message_x = label_width as f64 + message_width as f64 / 2.0;

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" role="img" aria-label="{title}">"#
    );
    let _ = write!(svg, "<title>{title}</title>");
    if metrics.gradient {
        svg.push_str(
            r##"<linearGradient id="s" x2="0" y2="100%"><stop offset="0" stop-color="#bbb" stop-opacity=".1"/><stop offset="1" stop-opacity=".1"/></linearGradient>"##,
        );
    }
    let _ = write!(
        svg,
        r##"<clipPath id="r"><rect width="{width}" height="{height}" rx="{}" fill="#fff"/></clipPath>"##,
        metrics.radius
    );
    if let Some(link) = badge.link.as_deref() {
        let _ = write!(
            svg,
            r#"<a target="_blank" xlink:href="{}">"#,
            escape_xml(link)
        );
    }
    svg.push_str(r#"<g clip-path="url(#r)">"#);
    if label_width > 0 {
        let _ = write!(
            svg,
            r#"<rect width="{label_width}" height="{height}" fill="{label_color}"/>"#
        );
    }
    let _ = write!(
        svg,
        r#"<rect x="{label_width}" width="{message_width}" height="{height}" fill="{color}"/>"#
    );
    if metrics.gradient {
        let _ = write!(
            svg,
            r#"<rect width="{width}" height="{height}" fill="url(#s)"/>"#
        );
    }
    svg.push_str("</g>");
    let _ = write!(
        svg,
        r##"<g fill="#fff" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{}">"##,
        metrics.font_size
    );
    if label_width > 0 {
        let _ = write!(svg, r#"<text x="{label_x}" y="{text_y}">{label}</text>"#);
    }
    let _ = write!(svg, r#"<text x="{message_x}" y="{text_y}">{message}</text>"#);
    svg.push_str("</g>");
    if badge.link.is_some() {
        svg.push_str("</a>");
    }
    svg.push_str("</svg>");

    svg
}
