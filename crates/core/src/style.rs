//! Presentation attributes for page components.
//!
//! Every field is optional; absence means the renderer applies a type-specific
//! default at render time. The record stays an explicit struct (not a map) so
//! the inline-CSS serialization order is fixed.

use serde::{Deserialize, Serialize};

/// Horizontal text alignment, the only constrained style field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// CSS value for this alignment.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Optional presentation attributes of a component.
///
/// Field order here is the declaration order used when serializing to an
/// inline `style` attribute, so exports are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

impl ComponentStyle {
    /// Serialize the present fields as inline CSS declarations
    /// (`font-family: Inter; color: #000`), in declaration order.
    ///
    /// The `backgroundImage` field is emitted as a full
    /// `background-image: url(...)` declaration using the normalized URL.
    #[must_use]
    pub fn to_inline_css(&self) -> String {
        let mut decls: Vec<String> = Vec::new();
        let mut push = |prop: &str, value: &str| {
            decls.push(format!("{prop}: {value}"));
        };

        if let Some(v) = &self.font_family {
            push("font-family", v);
        }
        if let Some(v) = &self.font_size {
            push("font-size", v);
        }
        if let Some(v) = &self.font_weight {
            push("font-weight", v);
        }
        if let Some(v) = &self.color {
            push("color", v);
        }
        if let Some(v) = &self.background_color {
            push("background-color", v);
        }
        if let Some(v) = &self.padding {
            push("padding", v);
        }
        if let Some(v) = &self.margin {
            push("margin", v);
        }
        if let Some(v) = self.text_align {
            push("text-align", v.as_css());
        }
        if let Some(v) = &self.width {
            push("width", v);
        }
        if let Some(v) = &self.height {
            push("height", v);
        }
        if let Some(v) = &self.background_image {
            push("background-image", &format!("url({})", normalize_image_url(v)));
        }
        if let Some(v) = &self.border_radius {
            push("border-radius", v);
        }
        if let Some(v) = &self.border {
            push("border", v);
        }

        decls.join("; ")
    }

    /// Merge another style into this one, field by field.
    ///
    /// Only fields present in `patch` overwrite; the rest of the mapping is
    /// kept, never replaced wholesale.
    pub fn merge(&mut self, patch: &Self) {
        macro_rules! take {
            ($field:ident) => {
                if patch.$field.is_some() {
                    self.$field = patch.$field.clone();
                }
            };
        }
        take!(font_family);
        take!(font_size);
        take!(font_weight);
        take!(color);
        take!(background_color);
        take!(padding);
        take!(margin);
        take!(text_align);
        take!(width);
        take!(height);
        take!(background_image);
        take!(border_radius);
        take!(border);
    }
}

/// Normalize a background-image reference to a bare URL.
///
/// Users paste both `url("https://x/y.png")` and bare `https://x/y.png`;
/// strip a wrapping `url(...)` and surrounding quotes so both forms render
/// identically.
#[must_use]
pub fn normalize_image_url(value: &str) -> String {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix("url(")
        .or_else(|| trimmed.strip_prefix("URL("))
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    inner.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}
