//! Jaki Core - Page component model and editing logic.
//!
//! This crate holds everything the page builder and the public shop agree on:
//!
//! - [`component`] - the typed block model (header/text/image/background/
//!   button/productGrid) with per-type creation defaults
//! - [`style`] - the optional-field style record and its inline-CSS form
//! - [`render`] - ordered component list -> visual tree, including the
//!   backdrop-compositing rule
//! - [`export`] - the same list -> standalone HTML document
//! - [`page`] - the page record and the repository contract
//! - [`cart`] - cart aggregation with server-confirmed integer totals
//! - [`catalog`] - read-only product/variant types from the print-on-demand
//!   catalog
//! - [`builder`] - the in-memory edit session over one page's components
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP.
//! The renderer and exporter share one per-type dispatch, so a saved page
//! exports to HTML that matches what the builder canvas showed.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod builder;
pub mod cart;
pub mod catalog;
pub mod component;
pub mod error;
pub mod export;
pub mod page;
pub mod render;
pub mod style;

pub use builder::{BuilderSession, ComponentUpdate};
pub use cart::{Cart, CartItem};
pub use catalog::{Product, Variant};
pub use component::{Component, ComponentType, Position};
pub use error::StoreError;
pub use export::{EXPORT_FILENAME, GridMarkup, export_page};
pub use page::{NewPage, Page, PageRepository, PageUpdate};
pub use render::{RenderedPage, render_page};
pub use style::{ComponentStyle, TextAlign};
