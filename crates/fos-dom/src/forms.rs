//! Form controls
//!
//! Input types, checkedness and form ownership.

use crate::{DomError, DomResult, DomTree, NodeId};

/// HTML input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Url,
    Search,
    Date,
    Time,
    DatetimeLocal,
    Month,
    Week,
    Color,
    Range,
    File,
    Hidden,
    Checkbox,
    Radio,
    Submit,
    Reset,
    Button,
    Image,
}

impl InputType {
    /// Parse the `type` attribute; unknown values are text inputs
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "search" => Self::Search,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime-local" => Self::DatetimeLocal,
            "month" => Self::Month,
            "week" => Self::Week,
            "color" => Self::Color,
            "range" => Self::Range,
            "file" => Self::File,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "button" => Self::Button,
            "image" => Self::Image,
            _ => Self::Text,
        }
    }

    /// Check if this is a button type
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Submit | Self::Reset | Self::Button | Self::Image)
    }
}

/// Elements that take part in form ownership
const FORM_ASSOCIATED: &[&str] = &[
    "button", "fieldset", "input", "object", "output", "select", "textarea",
];

impl DomTree {
    /// Input type of an `<input>` element
    pub fn input_type(&self, id: NodeId) -> Option<InputType> {
        let elem = self.element(id).filter(|e| e.is_html("input"))?;
        Some(elem.get_attr("type").map(InputType::parse).unwrap_or_default())
    }

    /// Checkedness: the explicit state when one was set, else the attribute
    pub fn is_checked(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|e| e.checkedness.unwrap_or_else(|| e.has_attr("checked")))
    }

    /// Set checkedness without touching the `checked` attribute
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        elem.checkedness = Some(checked);
        Ok(())
    }

    /// Form owner of a form-associated element: the form named by its
    /// `form` attribute, else the nearest ancestor `<form>`
    pub fn form_owner(&self, id: NodeId) -> Option<NodeId> {
        let elem = self.element(id)?;
        if !FORM_ASSOCIATED.iter().any(|name| elem.is_html(name)) {
            return None;
        }
        if let Some(form_id) = elem.get_attr("form") {
            let scope = self.root_node(id);
            return self
                .get_element_by_id(scope, form_id)
                .filter(|&form| self.element(form).is_some_and(|e| e.is_html("form")));
        }
        let mut current = self.parent_element(id);
        while let Some(ancestor) = current {
            if self.element(ancestor).is_some_and(|e| e.is_html("form")) {
                return Some(ancestor);
            }
            current = self.parent_element(ancestor);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_parse() {
        assert_eq!(InputType::parse("RADIO"), InputType::Radio);
        assert_eq!(InputType::parse("hidden"), InputType::Hidden);
        assert_eq!(InputType::parse("bogus"), InputType::Text);
        assert!(InputType::parse("submit").is_button());
    }

    #[test]
    fn test_checkedness() {
        let mut tree = DomTree::new();
        let radio = tree.create_element("input");
        tree.set_attribute(radio, "type", "radio").unwrap();
        assert_eq!(tree.input_type(radio), Some(InputType::Radio));
        assert!(!tree.is_checked(radio));

        tree.set_attribute(radio, "checked", "").unwrap();
        assert!(tree.is_checked(radio));

        tree.set_checked(radio, false).unwrap();
        assert!(!tree.is_checked(radio));
    }

    #[test]
    fn test_form_owner() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let form = tree.create_element("form");
        tree.set_attribute(form, "id", "signup").unwrap();
        let inside = tree.create_element("input");
        let outside = tree.create_element("input");
        let by_attr = tree.create_element("input");
        tree.set_attribute(by_attr, "form", "signup").unwrap();
        let span = tree.create_element("span");

        tree.append_child(root, form).unwrap();
        tree.append_child(form, inside).unwrap();
        tree.append_child(form, span).unwrap();
        tree.append_child(root, outside).unwrap();
        tree.append_child(root, by_attr).unwrap();

        assert_eq!(tree.form_owner(inside), Some(form));
        assert_eq!(tree.form_owner(outside), None);
        assert_eq!(tree.form_owner(by_attr), Some(form));
        assert_eq!(tree.form_owner(span), None);
    }
}
