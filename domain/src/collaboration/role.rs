//! Model roles and turn alternation

use serde::{Deserialize, Serialize};

/// One of the two collaborating roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelRole {
    Generator,
    Reviewer,
}

impl ModelRole {
    /// Slot in two-element per-role arrays
    pub fn index(&self) -> usize {
        match self {
            ModelRole::Generator => 0,
            ModelRole::Reviewer => 1,
        }
    }

    /// The role that acts after this one
    pub fn other(&self) -> ModelRole {
        match self {
            ModelRole::Generator => ModelRole::Reviewer,
            ModelRole::Reviewer => ModelRole::Generator,
        }
    }

    /// Name the models use to address each other inside prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelRole::Generator => "AI Model 1",
            ModelRole::Reviewer => "AI Model 2",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Generator => "generator",
            ModelRole::Reviewer => "reviewer",
        }
    }
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_swaps() {
        assert_eq!(ModelRole::Generator.other(), ModelRole::Reviewer);
        assert_eq!(ModelRole::Reviewer.other(), ModelRole::Generator);
        assert_eq!(ModelRole::Reviewer.other().other(), ModelRole::Reviewer);
    }

    #[test]
    fn test_index_slots_are_distinct() {
        assert_ne!(ModelRole::Generator.index(), ModelRole::Reviewer.index());
        assert!(ModelRole::Reviewer.index() < 2);
    }
}
