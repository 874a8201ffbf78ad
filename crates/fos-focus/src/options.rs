//! Query options
//!
//! `FocusConfig` is the serializable part (flags and the display check
//! mode). `FocusOptions` adds the caller hooks, which only exist at runtime.

use crate::FocusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How strictly rendering is verified before a node counts as visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayCheck {
    /// Walk the flat tree through slots, shadow hosts and frame owners.
    /// Elements outside a document count as hidden.
    #[default]
    Full,
    /// Like `Full` but stays inside the node's own document and does not
    /// treat detached elements as hidden
    LegacyFull,
    /// Hidden only when the node has zero width and zero height
    NonZeroArea,
    /// No rendering check beyond `visibility`
    None,
}

impl DisplayCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::LegacyFull => "legacy-full",
            Self::NonZeroArea => "non-zero-area",
            Self::None => "none",
        }
    }
}

impl fmt::Display for DisplayCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayCheck {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "legacy-full" => Ok(Self::LegacyFull),
            "non-zero-area" => Ok(Self::NonZeroArea),
            "none" => Ok(Self::None),
            other => Err(FocusError::InvalidDisplayCheck(other.to_string())),
        }
    }
}

/// Serializable query flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Consider the query root itself as a candidate
    pub include_container: bool,
    /// Descend into shadow roots, slots and same-origin frames
    pub deep: bool,
    pub display_check: DisplayCheck,
}

impl FocusConfig {
    /// Load from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, FocusError> {
        serde_json::from_str(json).map_err(|e| FocusError::InvalidConfig(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, FocusError> {
        serde_json::to_string(self).map_err(|e| FocusError::InvalidConfig(e.to_string()))
    }
}

/// Per-node override: `Some(answer)` replaces the built-in rule
pub type NodeOverride<N> = Arc<dyn Fn(N) -> Option<bool>>;

/// Per-node yes/no decision
pub type NodePredicate<N> = Arc<dyn Fn(N) -> bool>;

/// Flags plus caller hooks
pub struct FocusOptions<N> {
    pub config: FocusConfig,
    node_filter: Option<NodeOverride<N>>,
    display_check_override: Option<NodeOverride<N>>,
    shadow_root_filter: Option<NodePredicate<N>>,
    closed_shadow_opener: Option<NodePredicate<N>>,
}

impl<N> FocusOptions<N> {
    pub fn new() -> Self {
        Self::from_config(FocusConfig::default())
    }

    pub fn from_config(config: FocusConfig) -> Self {
        Self {
            config,
            node_filter: None,
            display_check_override: None,
            shadow_root_filter: None,
            closed_shadow_opener: None,
        }
    }

    pub fn include_container(mut self, include: bool) -> Self {
        self.config.include_container = include;
        self
    }

    pub fn deep(mut self, deep: bool) -> Self {
        self.config.deep = deep;
        self
    }

    pub fn display_check(mut self, check: DisplayCheck) -> Self {
        self.config.display_check = check;
        self
    }

    /// Force a node focusable (`Some(true)`) or excluded (`Some(false)`).
    /// A forced node is tabbable when its tab index is non-negative.
    pub fn node_filter(mut self, filter: impl Fn(N) -> Option<bool> + 'static) -> Self {
        self.node_filter = Some(Arc::new(filter));
        self
    }

    /// Decide hiddenness (`Some(true)` = hidden) in place of the display check
    pub fn display_check_override(mut self, check: impl Fn(N) -> Option<bool> + 'static) -> Self {
        self.display_check_override = Some(Arc::new(check));
        self
    }

    /// Called with each shadow host; returning false skips its shadow tree
    pub fn shadow_root_filter(mut self, filter: impl Fn(N) -> bool + 'static) -> Self {
        self.shadow_root_filter = Some(Arc::new(filter));
        self
    }

    /// Called with hosts of closed shadow roots; returning true lets the
    /// traversal enter the closed tree
    pub fn closed_shadow_opener(mut self, opener: impl Fn(N) -> bool + 'static) -> Self {
        self.closed_shadow_opener = Some(Arc::new(opener));
        self
    }

    pub fn has_node_filter(&self) -> bool {
        self.node_filter.is_some()
    }

    pub(crate) fn filter_node(&self, node: N) -> Option<bool> {
        self.node_filter.as_ref().and_then(|f| f(node))
    }

    pub(crate) fn override_display(&self, node: N) -> Option<bool> {
        self.display_check_override.as_ref().and_then(|f| f(node))
    }

    pub(crate) fn has_display_override(&self) -> bool {
        self.display_check_override.is_some()
    }

    pub(crate) fn allows_shadow_root(&self, host: N) -> bool {
        self.shadow_root_filter.as_ref().is_none_or(|f| f(host))
    }

    pub(crate) fn opens_closed_root(&self, host: N) -> bool {
        self.closed_shadow_opener.as_ref().is_some_and(|f| f(host))
    }
}

impl<N> Default for FocusOptions<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for FocusOptions<N> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            node_filter: self.node_filter.clone(),
            display_check_override: self.display_check_override.clone(),
            shadow_root_filter: self.shadow_root_filter.clone(),
            closed_shadow_opener: self.closed_shadow_opener.clone(),
        }
    }
}

impl<N> From<FocusConfig> for FocusOptions<N> {
    fn from(config: FocusConfig) -> Self {
        Self::from_config(config)
    }
}

impl<N> fmt::Debug for FocusOptions<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusOptions")
            .field("config", &self.config)
            .field("node_filter", &self.node_filter.is_some())
            .field("display_check_override", &self.display_check_override.is_some())
            .field("shadow_root_filter", &self.shadow_root_filter.is_some())
            .field("closed_shadow_opener", &self.closed_shadow_opener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_check_names() {
        for check in [
            DisplayCheck::Full,
            DisplayCheck::LegacyFull,
            DisplayCheck::NonZeroArea,
            DisplayCheck::None,
        ] {
            assert_eq!(check.as_str().parse::<DisplayCheck>().unwrap(), check);
        }
        assert_eq!(" Legacy-Full ".parse::<DisplayCheck>().unwrap(), DisplayCheck::LegacyFull);
        assert!(matches!(
            "partial".parse::<DisplayCheck>(),
            Err(FocusError::InvalidDisplayCheck(s)) if s == "partial"
        ));
    }

    #[test]
    fn test_config_json() {
        let config = FocusConfig::from_json(r#"{"deep": true, "display_check": "non-zero-area"}"#).unwrap();
        assert!(config.deep);
        assert!(!config.include_container);
        assert_eq!(config.display_check, DisplayCheck::NonZeroArea);

        assert_eq!(FocusConfig::from_json("{}").unwrap(), FocusConfig::default());
        assert!(FocusConfig::from_json(r#"{"display_check": "sometimes"}"#).is_err());
    }

    #[test]
    fn test_builder() {
        let options: FocusOptions<u32> = FocusOptions::new()
            .deep(true)
            .include_container(true)
            .display_check(DisplayCheck::None)
            .node_filter(|n| (n == 7).then_some(false));

        assert!(options.config.deep);
        assert!(options.config.include_container);
        assert_eq!(options.config.display_check, DisplayCheck::None);
        assert_eq!(options.filter_node(7), Some(false));
        assert_eq!(options.filter_node(8), None);
        assert!(options.allows_shadow_root(1));
        assert!(!options.opens_closed_root(1));
    }
}
