//! Element Attributes
//!
//! Ordered attribute storage with by-name lookup.

use std::collections::HashMap;

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Named node map (attribute collection), kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .and_then(|&i| self.attributes.get(i))
            .map(|a| a.value.as_str())
    }

    /// Set attribute, returning the previous value
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Option<String> {
        if let Some(&index) = self.by_name.get(name) {
            let old = std::mem::replace(&mut self.attributes[index].value, value.to_string());
            Some(old)
        } else {
            self.by_name.insert(name.to_string(), self.attributes.len());
            self.attributes.push(Attr::new(name, value));
            None
        }
    }

    /// Remove attribute by name
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attr> {
        let index = self.by_name.remove(name)?;
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.attributes.remove(index))
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Toggle a boolean attribute, returning whether it is now present
    pub fn toggle_attribute(&mut self, name: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.has_attribute(name));
        if present {
            if !self.has_attribute(name) {
                self.set_attribute(name, "");
            }
        } else {
            self.remove_attribute(name);
        }
        present
    }

    /// Iterate over attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("tabindex", "2");
        attrs.set_attribute("id", "submit");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get_attribute("tabindex"), Some("2"));
        assert_eq!(attrs.set_attribute("tabindex", "-1"), Some("2".to_string()));
        assert_eq!(attrs.get_attribute("tabindex"), Some("-1"));
    }

    #[test]
    fn test_remove_keeps_lookup_consistent() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("a", "1");
        attrs.set_attribute("b", "2");
        attrs.set_attribute("c", "3");

        assert!(attrs.remove_attribute("a").is_some());
        assert_eq!(attrs.get_attribute("b"), Some("2"));
        assert_eq!(attrs.get_attribute("c"), Some("3"));
        assert!(attrs.remove_attribute("a").is_none());
    }

    #[test]
    fn test_toggle_attribute() {
        let mut attrs = NamedNodeMap::new();

        assert!(attrs.toggle_attribute("disabled", None));
        assert!(attrs.has_attribute("disabled"));

        assert!(!attrs.toggle_attribute("disabled", None));
        assert!(!attrs.has_attribute("disabled"));

        assert!(attrs.toggle_attribute("inert", Some(true)));
        assert!(attrs.toggle_attribute("inert", Some(true)));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_iteration_order() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("z", "");
        attrs.set_attribute("a", "");
        let names: Vec<_> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["z", "a"]);
    }
}
