//! Shared resource-name table.
//!
//! Operators reference fonts, XObjects, colorspaces and the like by name;
//! the names must resolve through the page's resource dictionary. Every
//! emission that introduces a name records it here. Several streams on
//! one page share a single table through [`SharedResources`], so a name
//! registered by one stream is visible to the others.
//!
//! Entries keep insertion order so the assembled dictionaries are stable
//! across runs.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::model::objects::ResourceObject;

/// Page resource dictionary categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    Font,
    XObject,
    ColorSpace,
    Pattern,
    Shading,
    ExtGState,
    Properties,
}

impl ResourceCategory {
    /// Key of this category in the page resource dictionary.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Font => "Font",
            Self::XObject => "XObject",
            Self::ColorSpace => "ColorSpace",
            Self::Pattern => "Pattern",
            Self::Shading => "Shading",
            Self::ExtGState => "ExtGState",
            Self::Properties => "Properties",
        }
    }
}

/// Mutable handle shared between the content streams of one page.
pub type SharedResources = Rc<RefCell<ResourceTable>>;

/// Name-to-object registrations grouped by category.
#[derive(Debug, Default)]
pub struct ResourceTable {
    entries: IndexMap<ResourceCategory, IndexMap<String, ResourceObject>>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh table behind a shared handle.
    pub fn shared() -> SharedResources {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Registers `name` unless the category already has it.
    ///
    /// Returns whether a new entry was created. An existing entry wins;
    /// re-registering a name is the common case, not a conflict.
    pub fn register(
        &mut self,
        category: ResourceCategory,
        name: &str,
        object: ResourceObject,
    ) -> bool {
        let slot = self.entries.entry(category).or_default();
        if slot.contains_key(name) {
            return false;
        }
        debug!(category = category.key(), name, "resource registered");
        slot.insert(name.to_string(), object);
        true
    }

    /// Registers `name`, replacing any existing entry.
    pub fn register_force(&mut self, category: ResourceCategory, name: &str, object: ResourceObject) {
        debug!(category = category.key(), name, "resource replaced");
        self.entries
            .entry(category)
            .or_default()
            .insert(name.to_string(), object);
    }

    pub fn get(&self, category: ResourceCategory, name: &str) -> Option<&ResourceObject> {
        self.entries.get(&category)?.get(name)
    }

    pub fn contains(&self, category: ResourceCategory, name: &str) -> bool {
        self.get(category, name).is_some()
    }

    /// Entries of one category in registration order.
    pub fn entries(
        &self,
        category: ResourceCategory,
    ) -> impl Iterator<Item = (&str, &ResourceObject)> {
        self.entries
            .get(&category)
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Categories that have at least one entry, in first-use order.
    pub fn categories(&self) -> impl Iterator<Item = ResourceCategory> + '_ {
        self.entries
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(c, _)| *c)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|m| m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::objects::ObjRef;

    fn obj(n: u32) -> ResourceObject {
        ResourceObject::Ref(ObjRef::new(n, 0))
    }

    #[test]
    fn test_register_keeps_first_entry() {
        let mut table = ResourceTable::new();
        assert!(table.register(ResourceCategory::Font, "F1", obj(1)));
        assert!(!table.register(ResourceCategory::Font, "F1", obj(2)));
        assert_eq!(table.get(ResourceCategory::Font, "F1"), Some(&obj(1)));
    }

    #[test]
    fn test_register_force_replaces() {
        let mut table = ResourceTable::new();
        table.register(ResourceCategory::XObject, "Im1", obj(1));
        table.register_force(ResourceCategory::XObject, "Im1", obj(9));
        assert_eq!(table.get(ResourceCategory::XObject, "Im1"), Some(&obj(9)));
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut table = ResourceTable::new();
        table.register(ResourceCategory::Font, "F2", obj(2));
        table.register(ResourceCategory::Font, "F1", obj(1));
        let names: Vec<&str> = table
            .entries(ResourceCategory::Font)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["F2", "F1"]);
    }

    #[test]
    fn test_shared_handle_sees_both_writers() {
        let shared = ResourceTable::shared();
        shared.borrow_mut().register(ResourceCategory::Font, "F1", obj(1));
        shared
            .borrow_mut()
            .register(ResourceCategory::Shading, "Sh1", obj(2));
        let table = shared.borrow();
        assert!(table.contains(ResourceCategory::Font, "F1"));
        assert!(table.contains(ResourceCategory::Shading, "Sh1"));
    }
}
