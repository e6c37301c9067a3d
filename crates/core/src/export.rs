//! Deterministic static-HTML exporter.
//!
//! Serializes the same visual tree the renderer produces, so the downloaded
//! document reproduces what the builder canvas showed: same stable sort, same
//! backdrop promotion, same per-type markup. The only rendering difference is
//! the product grid, which a static file cannot embed; it becomes a
//! placeholder block unless live markup is supplied.

use crate::component::Component;
use crate::render::{Node, NodeBody, RenderedPage, SECTION_MIN_HEIGHT, render_page};

/// Fixed filename of the downloaded artifact.
pub const EXPORT_FILENAME: &str = "jaki-global-site.html";

/// What to put in a product-grid slot.
#[derive(Debug, Clone, Copy)]
pub enum GridMarkup<'a> {
    /// Static placeholder text (export download).
    Placeholder,
    /// Pre-rendered live catalog markup (public site).
    Live(&'a str),
}

/// Export a component list as a complete standalone HTML document.
#[must_use]
pub fn export_page(components: &[Component]) -> String {
    document(&render_page(components), GridMarkup::Placeholder)
}

/// Serialize a rendered page into a full document, filling product-grid
/// slots with `grid`.
#[must_use]
pub fn document(page: &RenderedPage, grid: GridMarkup<'_>) -> String {
    let container_css = page
        .backdrop
        .as_ref()
        .map_or_else(|| "min-height: 100%".to_string(), |b| b.container_css());

    let body = if page.is_empty() {
        "<p style=\"text-align: center; padding: 64px 16px; color: #666\">This page is empty.</p>"
            .to_string()
    } else {
        page.nodes
            .iter()
            .map(|node| node_html(node, grid))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Jaki Global</title>
  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&family=Montserrat:wght@600;700;800&display=swap" rel="stylesheet">
  <style>
    body {{
      margin: 0;
      padding: 0;
      font-family: 'Inter', sans-serif;
    }}
  </style>
</head>
<body>
  <div style="{container_css}">
{body}
  </div>

  <footer style="background-color:#0d0d0d; color:#ffffff; text-align:center; padding:20px; font-family:Arial, sans-serif;">
    <p style="margin:6px 0; font-size:16px;">
      <strong>Contact:</strong>
      <a href="mailto:jakiinfo.global@gmail.com" style="color:#00aced; text-decoration:none;">
        jakiinfo.global@gmail.com
      </a>
    </p>
    <p style="margin:6px 0; font-size:16px;">
      <strong>Please donate:</strong>
      <span style="font-weight:bold; color:#ff4d4d;">$26KG1</span>
    </p>
    <p style="margin:6px 0; font-size:13px; opacity:0.7;">
      &copy; 2025 Jaki Global. All rights reserved.
    </p>
  </footer>
</body>
</html>"#
    )
}

/// Serialize one node. This consumes the renderer's dispatch output, so the
/// markup cannot drift from the live rendering rules.
#[must_use]
pub fn node_html(node: &Node, grid: GridMarkup<'_>) -> String {
    let style = escape_attr(&node.style.to_inline_css());
    match &node.body {
        NodeBody::Heading { text } => {
            format!(r#"<h1 style="{style}">{}</h1>"#, escape_text(text))
        }
        NodeBody::Paragraph { text } => {
            format!(r#"<p style="{style}">{}</p>"#, escape_text(text))
        }
        NodeBody::Image { url: Some(url) } => {
            format!(r#"<img src="{}" style="{style}" alt="Image" />"#, escape_attr(url))
        }
        NodeBody::Image { url: None } => String::new(),
        NodeBody::Section { text } => {
            let mut css = node.style.to_inline_css();
            if node.style.background_image.is_some() {
                css.push_str("; background-size: cover");
            }
            if node.style.height.is_none() {
                if !css.is_empty() {
                    css.push_str("; ");
                }
                css.push_str(&format!("min-height: {SECTION_MIN_HEIGHT}"));
            }
            format!(r#"<div style="{}">{}</div>"#, escape_attr(&css), escape_text(text))
        }
        NodeBody::Button { label } => {
            format!(r#"<button style="{style}">{}</button>"#, escape_text(label))
        }
        NodeBody::ProductGrid => match grid {
            GridMarkup::Placeholder => format!(
                r#"<div style="{style}"><p>Product grid will be populated from Printify</p></div>"#
            ),
            GridMarkup::Live(markup) => format!(r#"<div style="{style}">{markup}</div>"#),
        },
    }
}

/// Escape text for HTML element content.
#[must_use]
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for an HTML attribute value.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
