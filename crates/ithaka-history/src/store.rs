//! Element store contract and an in-memory implementation.

use std::collections::BTreeSet;

use crate::snapshot::Element;

/// The live element collection the snapshot engine reads and rewrites.
pub trait ElementStore {
    /// Elements in stacking order.
    fn elements(&self) -> &[Element];

    /// Identifier of the page being edited, if any.
    fn current_page_id(&self) -> Option<&str>;

    /// Replaces the whole collection.
    fn replace_elements(&mut self, elements: Vec<Element>);
}

/// Stores that track a selection.
pub trait Selectable {
    fn deselect_all(&mut self);
}

/// Elements of one page plus the ids of the selected ones.
///
/// Elements are identified by their `"id"` string field.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    page_id: Option<String>,
    elements: Vec<Element>,
    selected: BTreeSet<String>,
}

impl PageStore {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: Some(page_id.into()),
            ..Self::default()
        }
    }

    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    /// Switches to another page. Elements are left for the caller to load.
    pub fn set_page(&mut self, page_id: Option<String>) {
        self.page_id = page_id;
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Removes the element with `id`, dropping it from the selection too.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.position(id)?;
        self.selected.remove(id);
        Some(self.elements.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.position(id).map(|index| &self.elements[index])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        let index = self.position(id)?;
        self.elements.get_mut(index)
    }

    /// Marks `id` selected. Returns false when no element has that id.
    pub fn select(&mut self, id: &str) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.selected.insert(id.to_string());
        true
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.elements
            .iter()
            .position(|element| element.get("id").and_then(|v| v.as_str()) == Some(id))
    }
}

impl ElementStore for PageStore {
    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn current_page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    fn replace_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }
}

impl Selectable for PageStore {
    fn deselect_all(&mut self) {
        self.selected.clear();
    }
}
