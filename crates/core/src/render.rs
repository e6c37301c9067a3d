//! Pure renderer: ordered component list -> visual tree.
//!
//! Both the builder canvas and the public site consume [`RenderedPage`], and
//! the exporter serializes the same tree, so there is exactly one per-type
//! dispatch in the codebase and the export always matches what the admin saw.

use crate::component::{Component, ComponentType};
use crate::style::{ComponentStyle, normalize_image_url};

/// Minimum height for inline background sections without an explicit height.
pub const SECTION_MIN_HEIGHT: &str = "200px";

/// The page backdrop, promoted from the first background-typed component.
///
/// Its style drives the page container instead of rendering inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backdrop {
    /// Id of the promoted component, used by the selection affordance.
    pub id: String,
    pub selected: bool,
    pub background_color: Option<String>,
    /// Normalized bare URL, wrapper and quotes already stripped.
    pub background_image: Option<String>,
    pub padding: Option<String>,
}

impl Backdrop {
    /// Inline CSS for the page container driven by this backdrop.
    #[must_use]
    pub fn container_css(&self) -> String {
        let mut decls: Vec<String> = Vec::new();
        if let Some(color) = &self.background_color {
            decls.push(format!("background-color: {color}"));
        }
        if let Some(url) = &self.background_image {
            decls.push(format!("background-image: url({url})"));
            decls.push("background-size: cover".to_string());
            decls.push("background-position: center".to_string());
        }
        if let Some(padding) = &self.padding {
            decls.push(format!("padding: {padding}"));
        }
        decls.push("min-height: 100%".to_string());
        decls.join("; ")
    }
}

/// Type-specific payload of a rendered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    /// Emphasized heading; text falls back to a placeholder when empty.
    Heading { text: String },
    Paragraph { text: String },
    /// `url` is `None` when no image URL is set (empty-state placeholder).
    Image { url: Option<String> },
    /// An inline (non-backdrop) background section with its own fill.
    Section { text: String },
    /// Non-functional chrome; no navigation side effect.
    Button { label: String },
    /// Layout slot filled by the product-catalog collaborator.
    ProductGrid,
}

/// One rendered content component.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: ComponentType,
    pub style: ComponentStyle,
    /// Selection highlight (editable canvas only).
    pub selected: bool,
    pub body: NodeBody,
}

/// The visual tree for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Page-wide backdrop, absent when the page has no background component.
    pub backdrop: Option<Backdrop>,
    /// Content components in sorted order, backdrop excluded.
    pub nodes: Vec<Node>,
}

impl RenderedPage {
    /// True when the content flow is empty and an explicit empty-canvas
    /// placeholder should be shown instead of a blank area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Stable-sort components by `order` ascending.
///
/// Equal orders keep their input positions, so repeated sorts are idempotent.
#[must_use]
pub fn sort_components(components: &[Component]) -> Vec<Component> {
    let mut sorted = components.to_vec();
    sorted.sort_by_key(|c| c.order);
    sorted
}

/// Render a component list into the visual tree for the public site.
#[must_use]
pub fn render_page(components: &[Component]) -> RenderedPage {
    render_page_with_selection(components, None)
}

/// Render a component list for the editable canvas, highlighting `selected`.
#[must_use]
pub fn render_page_with_selection(
    components: &[Component],
    selected: Option<&str>,
) -> RenderedPage {
    let sorted = sort_components(components);

    // The first background by sort order becomes the page backdrop and
    // leaves the content flow; later backgrounds render inline.
    let backdrop_id = sorted
        .iter()
        .find(|c| c.kind == ComponentType::Background)
        .map(|c| c.id.clone());

    let backdrop = backdrop_id.as_ref().and_then(|id| {
        sorted.iter().find(|c| &c.id == id).map(|c| Backdrop {
            id: c.id.clone(),
            selected: selected == Some(c.id.as_str()),
            background_color: c.style.background_color.clone(),
            background_image: c
                .style
                .background_image
                .as_deref()
                .map(normalize_image_url),
            padding: c.style.padding.clone(),
        })
    });

    let nodes = sorted
        .iter()
        .filter(|c| Some(&c.id) != backdrop_id.as_ref())
        .map(|c| node_for(c, selected))
        .collect();

    RenderedPage { backdrop, nodes }
}

/// The single per-type render rule shared by canvas, site, and exporter.
fn node_for(component: &Component, selected: Option<&str>) -> Node {
    let body = match component.kind {
        ComponentType::Header => NodeBody::Heading {
            text: non_empty_or(&component.content, "Header Text"),
        },
        ComponentType::Text => NodeBody::Paragraph {
            text: non_empty_or(&component.content, "Text content goes here..."),
        },
        ComponentType::Image => NodeBody::Image {
            url: if component.content.trim().is_empty() {
                None
            } else {
                Some(component.content.trim().to_string())
            },
        },
        ComponentType::Background => NodeBody::Section {
            text: component.content.clone(),
        },
        ComponentType::Button => NodeBody::Button {
            label: non_empty_or(&component.content, "Button Text"),
        },
        ComponentType::ProductGrid => NodeBody::ProductGrid,
    };

    Node {
        id: component.id.clone(),
        kind: component.kind,
        style: component.style.clone(),
        selected: selected == Some(component.id.as_str()),
        body,
    }
}

fn non_empty_or(content: &str, fallback: &str) -> String {
    if content.trim().is_empty() {
        fallback.to_string()
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: &str, kind: ComponentType, order: i64) -> Component {
        Component {
            id: id.to_string(),
            ..Component::new(kind, order)
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let components = vec![
            component("a", ComponentType::Text, 1),
            component("b", ComponentType::Text, 0),
            component("c", ComponentType::Text, 1),
        ];
        let sorted = sort_components(&components);
        let ids: Vec<&str> = sorted.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);

        // Re-sorting the sorted list changes nothing.
        let resorted = sort_components(&sorted);
        assert_eq!(sorted, resorted);
    }

    #[test]
    fn test_first_background_becomes_backdrop() {
        let components = vec![
            component("bg-late", ComponentType::Background, 5),
            component("bg-first", ComponentType::Background, 1),
            component("head", ComponentType::Header, 0),
        ];
        let page = render_page(&components);

        let backdrop = page.backdrop.expect("backdrop");
        assert_eq!(backdrop.id, "bg-first");

        // The backdrop never appears in the content partition; the later
        // background renders inline as a section.
        let ids: Vec<&str> = page.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["head", "bg-late"]);
        assert!(matches!(
            page.nodes.last().map(|n| &n.body),
            Some(NodeBody::Section { .. })
        ));
    }

    #[test]
    fn test_no_background_means_no_backdrop() {
        let components = vec![component("head", ComponentType::Header, 0)];
        let page = render_page(&components);
        assert!(page.backdrop.is_none());
        assert_eq!(page.nodes.len(), 1);
    }

    #[test]
    fn test_out_of_order_backdrop_partitioning() {
        let mut header = component("h", ComponentType::Header, 1);
        header.content = "Hi".to_string();
        let mut background = component("bg", ComponentType::Background, 0);
        background.style.background_color = Some("#eee".to_string());
        let mut text = component("t", ComponentType::Text, 2);
        text.content = "Body".to_string();

        let page = render_page(&[header, background, text]);

        let backdrop = page.backdrop.expect("backdrop");
        assert_eq!(backdrop.id, "bg");
        assert_eq!(backdrop.background_color.as_deref(), Some("#eee"));
        assert!(backdrop.container_css().contains("background-color: #eee"));

        let ids: Vec<&str> = page.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["h", "t"]);
    }

    #[test]
    fn test_backdrop_image_normalized() {
        let mut bg = component("bg", ComponentType::Background, 0);
        bg.style.background_image = Some("url(\"http://x/y.png\")".to_string());
        let wrapped = render_page(&[bg.clone()]);

        bg.style.background_image = Some("http://x/y.png".to_string());
        let bare = render_page(&[bg]);

        assert_eq!(
            wrapped.backdrop.expect("backdrop").background_image,
            bare.backdrop.expect("backdrop").background_image,
        );
    }

    #[test]
    fn test_empty_content_after_backdrop_removal() {
        let components = vec![component("bg", ComponentType::Background, 0)];
        let page = render_page(&components);
        assert!(page.backdrop.is_some());
        assert!(page.is_empty());
    }

    #[test]
    fn test_zero_components_is_valid() {
        let page = render_page(&[]);
        assert!(page.backdrop.is_none());
        assert!(page.is_empty());
    }

    #[test]
    fn test_selection_highlights_matching_node() {
        let components = vec![
            component("a", ComponentType::Header, 0),
            component("b", ComponentType::Text, 1),
        ];
        let page = render_page_with_selection(&components, Some("b"));
        let selected: Vec<&str> = page
            .nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(selected, ["b"]);
    }

    #[test]
    fn test_backdrop_selectable() {
        let components = vec![component("bg", ComponentType::Background, 0)];
        let page = render_page_with_selection(&components, Some("bg"));
        assert!(page.backdrop.expect("backdrop").selected);
    }

    #[test]
    fn test_empty_content_falls_back_to_placeholders() {
        let header = component("h", ComponentType::Header, 0);
        let image = component("i", ComponentType::Image, 1);
        let page = render_page(&[header, image]);

        assert!(matches!(
            page.nodes.first().map(|n| &n.body),
            Some(NodeBody::Heading { text }) if text == "Header Text"
        ));
        assert!(matches!(
            page.nodes.get(1).map(|n| &n.body),
            Some(NodeBody::Image { url: None })
        ));
    }
}
