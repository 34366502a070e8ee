use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wordwise_types::AUTO_DETECT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerSide {
    Source,
    Target,
}

impl fmt::Display for PickerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerSide::Source => f.write_str("source"),
            PickerSide::Target => f.write_str("target"),
        }
    }
}

impl FromStr for PickerSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "source" | "from" => Ok(PickerSide::Source),
            "target" | "to" => Ok(PickerSide::Target),
            other => Err(format!("unknown picker: {other}")),
        }
    }
}

/// Chosen language pair plus picker chrome. At most one picker is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    source_code: String,
    target_code: String,
    expanded: Option<PickerSide>,
    source_query: String,
    target_query: String,
}

impl SelectionState {
    pub fn new(source_code: impl Into<String>, target_code: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
            target_code: target_code.into(),
            expanded: None,
            source_query: String::new(),
            target_query: String::new(),
        }
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn target_code(&self) -> &str {
        &self.target_code
    }

    pub fn code(&self, side: PickerSide) -> &str {
        match side {
            PickerSide::Source => &self.source_code,
            PickerSide::Target => &self.target_code,
        }
    }

    pub fn expanded(&self) -> Option<PickerSide> {
        self.expanded
    }

    pub fn query(&self, side: PickerSide) -> &str {
        match side {
            PickerSide::Source => &self.source_query,
            PickerSide::Target => &self.target_query,
        }
    }

    /// Open `side`'s picker (collapsing the other) or close it if already open.
    pub fn toggle_picker(&mut self, side: PickerSide) {
        self.expanded = if self.expanded == Some(side) {
            None
        } else {
            Some(side)
        };
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    pub fn set_query(&mut self, side: PickerSide, query: &str) {
        let slot = match side {
            PickerSide::Source => &mut self.source_query,
            PickerSide::Target => &mut self.target_query,
        };
        slot.clear();
        slot.push_str(query);
    }

    /// Set the code for `side`, collapse its picker and reset its query.
    pub fn select(&mut self, side: PickerSide, code: &str) {
        match side {
            PickerSide::Source => self.source_code = code.to_string(),
            PickerSide::Target => self.target_code = code.to_string(),
        }
        if self.expanded == Some(side) {
            self.expanded = None;
        }
        self.set_query(side, "");
    }

    pub fn can_swap(&self) -> bool {
        self.source_code != AUTO_DETECT
    }

    /// Exchange source and target codes. No-op while the source is auto-detect.
    pub fn swap(&mut self) -> bool {
        if !self.can_swap() {
            return false;
        }
        std::mem::swap(&mut self.source_code, &mut self.target_code);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_one_picker_collapses_the_other() {
        let mut selection = SelectionState::new("en", "es");
        selection.toggle_picker(PickerSide::Source);
        assert_eq!(selection.expanded(), Some(PickerSide::Source));

        selection.toggle_picker(PickerSide::Target);
        assert_eq!(selection.expanded(), Some(PickerSide::Target));

        selection.toggle_picker(PickerSide::Target);
        assert_eq!(selection.expanded(), None);
    }

    #[test]
    fn select_collapses_and_clears_query() {
        let mut selection = SelectionState::new("en", "es");
        selection.toggle_picker(PickerSide::Target);
        selection.set_query(PickerSide::Target, "fre");

        selection.select(PickerSide::Target, "fr");

        assert_eq!(selection.target_code(), "fr");
        assert_eq!(selection.expanded(), None);
        assert_eq!(selection.query(PickerSide::Target), "");
    }

    #[test]
    fn select_leaves_other_side_alone() {
        let mut selection = SelectionState::new("en", "es");
        selection.set_query(PickerSide::Source, "ger");
        selection.toggle_picker(PickerSide::Source);

        selection.select(PickerSide::Target, "ja");

        assert_eq!(selection.expanded(), Some(PickerSide::Source));
        assert_eq!(selection.query(PickerSide::Source), "ger");
    }

    #[test]
    fn double_swap_restores_codes() {
        let mut selection = SelectionState::new("en", "es");
        assert!(selection.swap());
        assert_eq!((selection.source_code(), selection.target_code()), ("es", "en"));
        assert!(selection.swap());
        assert_eq!((selection.source_code(), selection.target_code()), ("en", "es"));
    }

    #[test]
    fn swap_is_disabled_for_auto_detect() {
        let mut selection = SelectionState::new(AUTO_DETECT, "es");
        assert!(!selection.swap());
        assert_eq!(selection.source_code(), AUTO_DETECT);
        assert_eq!(selection.target_code(), "es");
    }
}
