//! Render tree to HTML serialization.
//!
//! Walks a [`RenderNode`] writing markup by hand. Semantic region tags become
//! prefixed class names, chrome tokens become additional classes, and
//! geometry/container tokens become inline styles. The output is
//! self-contained: the default presentation needs no script execution.

use std::fmt::Write;

use fresco_core::{BezelType, ColorScheme, DeviceType, MockupStyle, RenderNode, Style};

/// Screen background for the light scheme.
const LIGHT_BACKGROUND: &str = "#f5f5f7";
/// Screen background for the dark scheme.
const DARK_BACKGROUND: &str = "#111114";
/// Drop shadow shared by every frame that asks for one.
const FRAME_SHADOW: &str = "0 24px 48px rgba(0,0,0,0.25)";

/// Serialize a render tree to HTML.
#[must_use]
pub fn render_html(node: &RenderNode) -> String {
    let mut out = String::with_capacity(1024);
    render_node_html(&mut out, node);
    out
}

fn render_node_html(out: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Region {
            tag,
            styles,
            children,
        } => {
            let classes = class_list(tag, styles);
            match inline_style(styles) {
                Some(style) => {
                    let _ = write!(
                        out,
                        "<div class=\"{}\" style=\"{}\">",
                        escape_html(&classes),
                        escape_html(&style),
                    );
                }
                None => {
                    let _ = write!(out, "<div class=\"{}\">", escape_html(&classes));
                }
            }
            for child in children {
                render_node_html(out, child);
            }
            out.push_str("</div>");
        }
        RenderNode::Image { url, alt } => {
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                escape_html(url),
                escape_html(alt),
            );
        }
        RenderNode::Text { content } => out.push_str(&escape_html(content)),
    }
}

/// Class names for a region: the prefixed semantic tag plus chrome tokens.
fn class_list(tag: &str, styles: &[Style]) -> String {
    let mut classes = format!("fresco-{tag}");
    for style in styles {
        let extra = match style {
            Style::DeviceBody(device) => Some(format!("device-{}", device_slug(*device))),
            Style::DeviceStand(device) => Some(format!("stand-{}", device_slug(*device))),
            Style::MockupSkin(skin) => Some(format!("skin-{}", mockup_slug(*skin))),
            Style::BezelShape(bezel) => Some(format!("bezel-{}", bezel_slug(*bezel))),
            _ => None,
        };
        if let Some(extra) = extra {
            classes.push(' ');
            classes.push_str(&extra);
        }
    }
    classes
}

/// Inline style string for a region, or `None` when every token is
/// class-only. Transform functions collapse into a single property so scale
/// and translation compose instead of overriding each other.
fn inline_style(styles: &[Style]) -> Option<String> {
    let mut transforms: Vec<String> = Vec::new();
    let mut props: Vec<String> = Vec::new();

    for style in styles {
        match style {
            Style::Scale(scale) => transforms.push(format!("scale({scale})")),
            Style::TranslateXPct(pct) => transforms.push(format!("translateX({pct}%)")),
            Style::TranslateYPx(px) => transforms.push(format!("translateY({px}px)")),
            Style::TiltDeg(deg) => transforms.push(format!("rotate({deg}deg)")),
            Style::OverscaleX(scale) => transforms.push(format!("scaleX({scale})")),

            Style::ZIndex(z) => props.push(format!("z-index:{z}")),
            Style::Hidden => props.push("display:none".to_string()),
            Style::GridColumns(columns) => {
                props.push("display:grid".to_string());
                props.push(format!(
                    "grid-template-columns:repeat({columns},minmax(0,1fr))"
                ));
                props.push("gap:16px".to_string());
            }
            Style::ScrollX => props.push("overflow-x:auto".to_string()),
            Style::ScrollY => props.push("overflow-y:auto".to_string()),
            Style::OverflowVisible => props.push("overflow:visible".to_string()),
            Style::MinHeightPx(px) => props.push(format!("min-height:{px}px")),

            Style::HalfWidth => props.push("width:50%".to_string()),
            Style::FullWidth => props.push("width:100%".to_string()),
            Style::FloatLeft => props.push("float:left".to_string()),
            Style::FloatRight => props.push("float:right".to_string()),
            Style::ClearBoth => props.push("clear:both".to_string()),

            Style::CornerRadiusPx(px) => props.push(format!("border-radius:{px}px")),
            Style::AspectRatio(ratio) => {
                if let Some((w, h)) = ratio.ratio() {
                    props.push(format!("aspect-ratio:{w} / {h}"));
                }
            }
            Style::ClipContent => props.push("overflow:hidden".to_string()),
            Style::Shadow => props.push(format!("box-shadow:{FRAME_SHADOW}")),
            Style::SchemeBackground(scheme) => {
                props.push(format!("background:{}", scheme_background(*scheme)));
            }

            // Class-only tokens
            Style::DeviceBody(_)
            | Style::DeviceStand(_)
            | Style::MockupSkin(_)
            | Style::BezelShape(_) => {}
        }
    }

    if !transforms.is_empty() {
        props.insert(0, format!("transform:{}", transforms.join(" ")));
    }
    if props.is_empty() {
        None
    } else {
        Some(props.join(";"))
    }
}

const fn scheme_background(scheme: ColorScheme) -> &'static str {
    match scheme {
        ColorScheme::Light => LIGHT_BACKGROUND,
        ColorScheme::Dark => DARK_BACKGROUND,
    }
}

const fn device_slug(device: DeviceType) -> &'static str {
    match device {
        DeviceType::None => "none",
        DeviceType::Mobile => "mobile",
        DeviceType::Tablet => "tablet",
        DeviceType::Laptop => "laptop",
        DeviceType::Desktop => "desktop",
    }
}

const fn mockup_slug(skin: MockupStyle) -> &'static str {
    match skin {
        MockupStyle::Flat => "flat",
        MockupStyle::Shaded => "shaded",
        MockupStyle::Glass => "glass",
        MockupStyle::Browser => "browser",
        MockupStyle::BrowserDark => "browser-dark",
    }
}

const fn bezel_slug(bezel: BezelType) -> &'static str {
    match bezel {
        BezelType::DynamicIsland => "dynamic-island",
        BezelType::Notch => "notch",
        BezelType::TopBar => "top-bar",
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
