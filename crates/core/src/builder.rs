//! The builder session: in-memory edit state over one page's components.
//!
//! All edits are synchronous and local; persistence is an explicit `save`
//! that pushes the entire component array to the page repository. Failed
//! saves leave the in-memory state untouched so the admin can retry, and
//! `save` takes `&mut self`, so a session can never have two saves of the
//! same page in flight.

use crate::component::{Component, ComponentType, Position};
use crate::error::StoreError;
use crate::page::{NewPage, Page, PageRepository, PageUpdate};
use crate::render::{RenderedPage, render_page_with_selection};
use crate::style::ComponentStyle;

/// Default title for a session with no loaded page.
pub const UNTITLED: &str = "Untitled";

/// Partial edit applied to the selected component.
///
/// `style` merges into the existing mapping field by field; the other fields
/// replace wholesale when present.
#[derive(Debug, Clone, Default)]
pub struct ComponentUpdate {
    pub content: Option<String>,
    pub style: Option<ComponentStyle>,
    pub position: Option<Position>,
    pub order: Option<i64>,
}

/// Edit-state machine over one page's component list.
///
/// Starts idle (no page loaded); `load_page` or the first successful `save`
/// of a fresh page moves it to the loaded state.
#[derive(Debug, Clone)]
pub struct BuilderSession {
    page_id: Option<String>,
    name: String,
    components: Vec<Component>,
    selected: Option<String>,
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderSession {
    /// A fresh idle session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page_id: None,
            name: UNTITLED.to_string(),
            components: Vec::new(),
            selected: None,
        }
    }

    /// Id of the loaded page; `None` until the first successful save.
    #[must_use]
    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Component> {
        let id = self.selected.as_deref()?;
        self.components.iter().find(|c| c.id == id)
    }

    /// Replace the session state with a stored page, clearing the selection.
    pub fn load_page(&mut self, page: &Page) {
        self.page_id = Some(page.id.clone());
        self.name = page.name.clone();
        self.components = page.components.clone();
        self.selected = None;
    }

    /// Append a freshly created component (defaults applied once here) to the
    /// end of the list and select it. Its order is the list length before the
    /// append.
    pub fn add_component(&mut self, kind: ComponentType) -> &Component {
        let order = i64::try_from(self.components.len()).unwrap_or(i64::MAX);
        let component = Component::new(kind, order);
        self.selected = Some(component.id.clone());
        self.components.push(component);
        self.components.last().expect("just pushed")
    }

    /// Merge partial fields into the selected component in place.
    ///
    /// No-op when nothing is selected. Style patches merge into the existing
    /// mapping; content/position/order replace. Selection stays on the same
    /// id.
    pub fn update_selected(&mut self, update: &ComponentUpdate) {
        let Some(id) = self.selected.as_deref() else {
            return;
        };
        let Some(component) = self.components.iter_mut().find(|c| c.id == id) else {
            return;
        };
        if let Some(content) = &update.content {
            component.content = content.clone();
        }
        if let Some(style) = &update.style {
            component.style.merge(style);
        }
        if let Some(position) = update.position {
            component.position = position;
        }
        if let Some(order) = update.order {
            component.order = order;
        }
    }

    /// Remove a component by id. Clears the selection only when the deleted
    /// component was selected; remaining orders are not renumbered.
    pub fn delete_component(&mut self, id: &str) {
        self.components.retain(|c| c.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    /// Pure selection change; `None` clears (clicking empty canvas space).
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(ToString::to_string);
    }

    /// Render the editable canvas with the current selection highlighted.
    #[must_use]
    pub fn canvas(&self) -> RenderedPage {
        render_page_with_selection(&self.components, self.selected.as_deref())
    }

    /// Persist the entire current component array (plus page name).
    ///
    /// Creates the page when the session has no id yet and adopts the id the
    /// store assigned; updates otherwise.
    ///
    /// # Errors
    ///
    /// Propagates the store failure; the in-memory state is left untouched so
    /// pending edits are never dropped.
    pub async fn save(&mut self, repo: &impl PageRepository) -> Result<String, StoreError> {
        let saved = match &self.page_id {
            Some(id) => {
                repo.update(
                    id,
                    PageUpdate {
                        name: Some(self.name.clone()),
                        components: Some(self.components.clone()),
                    },
                )
                .await?
            }
            None => {
                repo.create(NewPage {
                    name: self.name.clone(),
                    components: self.components.clone(),
                })
                .await?
            }
        };
        self.page_id = Some(saved.id.clone());
        Ok(saved.id)
    }

    /// Save the current page, then load `target_id`.
    ///
    /// The save happens even when the component list is empty - a just-emptied
    /// page still needs its deletions persisted. If the save (or the target
    /// fetch) fails, the switch is aborted entirely and the current page
    /// stays active and editable.
    ///
    /// # Errors
    ///
    /// Returns the save or fetch failure without changing the loaded page.
    pub async fn switch_page(
        &mut self,
        repo: &impl PageRepository,
        target_id: &str,
    ) -> Result<(), StoreError> {
        if self.page_id.is_some() {
            self.save(repo).await?;
        }
        let target = repo.get(target_id).await?;
        self.load_page(&target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory repository double.
    #[derive(Default)]
    struct MemRepo {
        pages: Mutex<HashMap<String, Page>>,
        next_id: Mutex<u32>,
        fail_saves: std::sync::atomic::AtomicBool,
    }

    impl MemRepo {
        fn with_page(page: Page) -> Self {
            let repo = Self::default();
            repo.pages
                .lock()
                .expect("lock")
                .insert(page.id.clone(), page);
            repo
        }

        fn set_failing(&self, failing: bool) {
            self.fail_saves
                .store(failing, std::sync::atomic::Ordering::SeqCst);
        }

        fn failing(&self) -> bool {
            self.fail_saves.load(std::sync::atomic::Ordering::SeqCst)
        }

        fn stored(&self, id: &str) -> Option<Page> {
            self.pages.lock().expect("lock").get(id).cloned()
        }
    }

    impl PageRepository for MemRepo {
        async fn list(&self) -> Result<Vec<Page>, StoreError> {
            Ok(self.pages.lock().expect("lock").values().cloned().collect())
        }

        async fn get(&self, id: &str) -> Result<Page, StoreError> {
            self.pages
                .lock()
                .expect("lock")
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }

        async fn create(&self, new: NewPage) -> Result<Page, StoreError> {
            if self.failing() {
                return Err(StoreError::Unavailable("network down".to_string()));
            }
            let mut next = self.next_id.lock().expect("lock");
            *next += 1;
            let page = Page {
                id: format!("page-{}", *next),
                name: new.name,
                components: new.components,
            };
            self.pages
                .lock()
                .expect("lock")
                .insert(page.id.clone(), page.clone());
            Ok(page)
        }

        async fn update(&self, id: &str, update: PageUpdate) -> Result<Page, StoreError> {
            if self.failing() {
                return Err(StoreError::Unavailable("network down".to_string()));
            }
            let mut pages = self.pages.lock().expect("lock");
            let page = pages
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            if let Some(name) = update.name {
                page.name = name;
            }
            if let Some(components) = update.components {
                page.components = components;
            }
            Ok(page.clone())
        }

        async fn delete(&self, id: &str) -> Result<(), StoreError> {
            self.pages
                .lock()
                .expect("lock")
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }
    }

    #[test]
    fn test_add_component_selects_and_orders() {
        let mut session = BuilderSession::new();
        session.add_component(ComponentType::Header);
        let text_id = session.add_component(ComponentType::Text).id.clone();

        assert_eq!(session.components().len(), 2);
        assert_eq!(session.selected_id(), Some(text_id.as_str()));
        assert_eq!(session.components().first().map(|c| c.order), Some(0));
        assert_eq!(session.components().get(1).map(|c| c.order), Some(1));
    }

    #[test]
    fn test_update_selected_merges_style() {
        let mut session = BuilderSession::new();
        session.add_component(ComponentType::Header);

        session.update_selected(&ComponentUpdate {
            style: Some(ComponentStyle {
                color: Some("#ff0000".to_string()),
                ..ComponentStyle::default()
            }),
            ..ComponentUpdate::default()
        });

        let header = session.selected().expect("selected");
        assert_eq!(header.style.color.as_deref(), Some("#ff0000"));
        // Untouched style fields survive the merge.
        assert_eq!(header.style.font_size.as_deref(), Some("48px"));
    }

    #[test]
    fn test_update_without_selection_is_noop() {
        let mut session = BuilderSession::new();
        session.add_component(ComponentType::Text);
        session.select(None);

        session.update_selected(&ComponentUpdate {
            content: Some("changed".to_string()),
            ..ComponentUpdate::default()
        });

        assert_ne!(
            session.components().first().map(|c| c.content.as_str()),
            Some("changed")
        );
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = BuilderSession::new();
        let id = session.add_component(ComponentType::Text).id.clone();
        session.delete_component(&id);

        assert!(session.components().is_empty());
        assert_eq!(session.selected_id(), None);
    }

    #[test]
    fn test_delete_unselected_keeps_selection_and_orders() {
        let mut session = BuilderSession::new();
        let first = session.add_component(ComponentType::Text).id.clone();
        let second = session.add_component(ComponentType::Header).id.clone();

        session.delete_component(&first);

        assert_eq!(session.selected_id(), Some(second.as_str()));
        // No renumbering of remaining orders.
        assert_eq!(session.components().first().map(|c| c.order), Some(1));
    }

    #[tokio::test]
    async fn test_first_save_adopts_assigned_id() {
        let repo = MemRepo::default();
        let mut session = BuilderSession::new();
        session.set_name("Home");
        session.add_component(ComponentType::Header);

        assert_eq!(session.page_id(), None);
        let id = session.save(&repo).await.expect("save");
        assert_eq!(session.page_id(), Some(id.as_str()));
        assert_eq!(repo.stored(&id).expect("stored").name, "Home");
    }

    #[tokio::test]
    async fn test_save_twice_is_idempotent() {
        let repo = MemRepo::default();
        let mut session = BuilderSession::new();
        session.add_component(ComponentType::Header);
        session.add_component(ComponentType::Text);

        let id = session.save(&repo).await.expect("first save");
        let first = repo.stored(&id).expect("stored").components;
        session.save(&repo).await.expect("second save");
        let second = repo.stored(&id).expect("stored").components;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_state() {
        let repo = MemRepo::default();
        let mut session = BuilderSession::new();
        let id = session.save(&repo).await.expect("initial save");

        session.add_component(ComponentType::Button);
        repo.set_failing(true);
        assert!(session.save(&repo).await.is_err());

        // Pending edit still in memory, persisted copy unchanged.
        assert_eq!(session.components().len(), 1);
        assert_eq!(session.page_id(), Some(id.as_str()));
        assert!(repo.stored(&id).expect("stored").components.is_empty());
    }

    #[tokio::test]
    async fn test_switch_page_aborts_on_failed_save() {
        let repo = MemRepo::with_page(Page {
            id: "target".to_string(),
            name: "About".to_string(),
            components: vec![],
        });
        let mut session = BuilderSession::new();
        let current = session.save(&repo).await.expect("save");
        session.add_component(ComponentType::Text);

        repo.set_failing(true);
        let result = session.switch_page(&repo, "target").await;

        assert!(result.is_err());
        // Current page stays loaded and editable; target not loaded.
        assert_eq!(session.page_id(), Some(current.as_str()));
        assert_eq!(session.components().len(), 1);
    }

    #[tokio::test]
    async fn test_switch_page_persists_emptied_list_first() {
        let repo = MemRepo::with_page(Page {
            id: "target".to_string(),
            name: "About".to_string(),
            components: vec![Component::new(ComponentType::Text, 0)],
        });
        let mut session = BuilderSession::new();
        let id = session.add_component(ComponentType::Header).id.clone();
        let current = session.save(&repo).await.expect("save");
        session.delete_component(&id);

        session.switch_page(&repo, "target").await.expect("switch");

        // The emptied list was persisted before loading the target.
        assert!(repo.stored(&current).expect("stored").components.is_empty());
        assert_eq!(session.page_id(), Some("target"));
        assert_eq!(session.components().len(), 1);
        assert_eq!(session.selected_id(), None);
    }

    #[tokio::test]
    async fn test_switch_to_unknown_page_keeps_current() {
        let repo = MemRepo::default();
        let mut session = BuilderSession::new();
        let current = session.save(&repo).await.expect("save");

        let result = session.switch_page(&repo, "missing").await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(session.page_id(), Some(current.as_str()));
    }

    #[test]
    fn test_canvas_reflects_selection() {
        let mut session = BuilderSession::new();
        let id = session.add_component(ComponentType::Header).id.clone();
        let canvas = session.canvas();
        assert!(
            canvas
                .nodes
                .iter()
                .any(|node| node.id == id && node.selected)
        );
    }
}
