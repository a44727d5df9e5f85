//! Custom element contract
//!
//! A host drives an element through three hooks: attribute changes,
//! connection to the page, and rendering. `Attributes` is the element's
//! string attribute map; setting an attribute reports the old and new value
//! so the element can react.

use std::collections::BTreeMap;

/// Lifecycle hooks of a custom element
pub trait CustomElement {
    /// Tag the element is registered under
    const TAG_NAME: &'static str;

    /// Attributes whose changes are reported to `attribute_changed_callback`
    fn observed_attributes() -> &'static [&'static str];

    /// Called after an observed attribute was set or removed
    fn attribute_changed_callback(&mut self, name: &str, old: Option<&str>, new: Option<&str>);

    /// Called when the element becomes part of the page
    fn connected_callback(&mut self);

    /// Rebuild the element's markup from its current state
    fn render(&mut self);

    /// Upper-case tag name, the way a DOM reports it
    fn tag_name(&self) -> String {
        Self::TAG_NAME.to_ascii_uppercase()
    }
}

/// A change to one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub name: String,
    pub old: Option<String>,
    pub new: Option<String>,
}

/// String attributes of an element
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    values: BTreeMap<String, String>,
}

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Set a value, returning the change record
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> AttributeChange {
        let new = value.into();
        let old = self.values.insert(name.to_string(), new.clone());
        AttributeChange {
            name: name.to_string(),
            old,
            new: Some(new),
        }
    }

    /// Remove a value, returning the change record if it was present
    pub fn remove(&mut self, name: &str) -> Option<AttributeChange> {
        self.values.remove(name).map(|old| AttributeChange {
            name: name.to_string(),
            old: Some(old),
            new: None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
