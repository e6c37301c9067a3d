//! The typed page block model.
//!
//! A page is an ordered list of [`Component`]s. The type set is closed; any
//! other `type` string on the wire is rejected at deserialization, so the
//! renderer and exporter only ever see known variants.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::style::{ComponentStyle, TextAlign};

/// The closed set of block types a page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    Header,
    Text,
    Image,
    Background,
    Button,
    ProductGrid,
}

impl ComponentType {
    /// Wire name of the type, also used as the id prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Text => "text",
            Self::Image => "image",
            Self::Background => "background",
            Self::Button => "button",
            Self::ProductGrid => "productGrid",
        }
    }

    /// Default content applied once, when a component is created.
    #[must_use]
    pub const fn default_content(self) -> &'static str {
        match self {
            Self::Header => "Jaki Global",
            Self::Text => "Your text here...",
            Self::Button => "Click Here",
            Self::Image | Self::Background | Self::ProductGrid => "",
        }
    }

    /// Default style applied once, when a component is created.
    #[must_use]
    pub fn default_style(self) -> ComponentStyle {
        match self {
            Self::Header => ComponentStyle {
                font_family: Some("Montserrat, sans-serif".to_string()),
                font_size: Some("48px".to_string()),
                font_weight: Some("700".to_string()),
                color: Some("#000000".to_string()),
                background_color: Some("transparent".to_string()),
                padding: Some("32px 0".to_string()),
                text_align: Some(TextAlign::Center),
                ..ComponentStyle::default()
            },
            Self::Text => ComponentStyle {
                font_family: Some("Inter, sans-serif".to_string()),
                font_size: Some("16px".to_string()),
                font_weight: Some("400".to_string()),
                color: Some("#000000".to_string()),
                background_color: Some("transparent".to_string()),
                padding: Some("16px".to_string()),
                ..ComponentStyle::default()
            },
            Self::Image => ComponentStyle {
                width: Some("100%".to_string()),
                padding: Some("16px".to_string()),
                ..ComponentStyle::default()
            },
            Self::Background => ComponentStyle {
                background_color: Some("#f5f5f5".to_string()),
                padding: Some("64px 32px".to_string()),
                width: Some("100%".to_string()),
                ..ComponentStyle::default()
            },
            Self::Button => ComponentStyle {
                font_family: Some("Inter, sans-serif".to_string()),
                font_size: Some("16px".to_string()),
                font_weight: Some("600".to_string()),
                color: Some("#ffffff".to_string()),
                background_color: Some("#3b82f6".to_string()),
                padding: Some("12px 32px".to_string()),
                margin: Some("16px 0".to_string()),
                ..ComponentStyle::default()
            },
            Self::ProductGrid => ComponentStyle {
                padding: Some("32px 0".to_string()),
                width: Some("100%".to_string()),
                ..ComponentStyle::default()
            },
        }
    }
}

/// Canvas position, carried on the wire for forward compatibility.
///
/// No layout logic reads it; components flow in `order`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One typed content block on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Opaque unique id, stable for the component's lifetime.
    pub id: String,
    /// Block type; immutable after creation.
    #[serde(rename = "type")]
    pub kind: ComponentType,
    /// Free-form content; semantics depend on the type.
    #[serde(default)]
    pub content: String,
    /// Presentation attributes; defaults are filled at render time.
    #[serde(default)]
    pub style: ComponentStyle,
    /// Vestigial canvas position, kept for wire compatibility.
    #[serde(default)]
    pub position: Position,
    /// Sequence within the page; not required unique or contiguous.
    pub order: i64,
}

impl Component {
    /// Create a brand-new component with the type's default content and
    /// style. Defaults are applied here, once; afterwards they are ordinary
    /// mutable fields.
    #[must_use]
    pub fn new(kind: ComponentType, order: i64) -> Self {
        Self {
            id: format!("{}-{}", kind.as_str(), Uuid::new_v4()),
            kind,
            content: kind.default_content().to_string(),
            style: kind.default_style(),
            position: Position::default(),
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_type_defaults() {
        let header = Component::new(ComponentType::Header, 0);
        assert_eq!(header.content, "Jaki Global");
        assert_eq!(header.style.font_weight.as_deref(), Some("700"));
        assert_eq!(header.style.text_align, Some(TextAlign::Center));

        let button = Component::new(ComponentType::Button, 1);
        assert_eq!(button.style.background_color.as_deref(), Some("#3b82f6"));
        assert_eq!(button.style.color.as_deref(), Some("#ffffff"));

        let background = Component::new(ComponentType::Background, 2);
        assert_eq!(background.content, "");
        assert_eq!(background.style.background_color.as_deref(), Some("#f5f5f5"));
        assert_eq!(background.style.padding.as_deref(), Some("64px 32px"));
    }

    #[test]
    fn test_new_ids_are_unique_and_prefixed() {
        let a = Component::new(ComponentType::Text, 0);
        let b = Component::new(ComponentType::Text, 1);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("text-"));
    }

    #[test]
    fn test_wire_shape_round_trip() {
        let json = serde_json::json!({
            "id": "header-1",
            "type": "header",
            "content": "Hi",
            "style": { "fontSize": "48px" },
            "position": { "x": 0.0, "y": 0.0 },
            "order": 3
        });
        let component: Component = serde_json::from_value(json).expect("deserialize");
        assert_eq!(component.kind, ComponentType::Header);
        assert_eq!(component.order, 3);

        let back = serde_json::to_value(&component).expect("serialize");
        assert_eq!(back["type"], "header");
        assert_eq!(back["style"]["fontSize"], "48px");
    }

    #[test]
    fn test_product_grid_wire_name() {
        let component = Component::new(ComponentType::ProductGrid, 0);
        let json = serde_json::to_value(&component).expect("serialize");
        assert_eq!(json["type"], "productGrid");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = serde_json::json!({
            "id": "x-1",
            "type": "carousel",
            "content": "",
            "style": {},
            "order": 0
        });
        assert!(serde_json::from_value::<Component>(json).is_err());
    }
}
