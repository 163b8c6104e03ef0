//! Printer Group Model
//!
//! Kitchen printer groups route the items of the listed categories to one
//! printer.

use serde::{Deserialize, Serialize};

/// Printer group entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterGroup {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Category ids
    #[serde(rename = "categorias", default)]
    pub categories: Vec<String>,
}

/// Create/update printer group payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrinterGroupDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categorias")]
    pub categories: Vec<String>,
}

impl From<&PrinterGroup> for PrinterGroupDraft {
    fn from(group: &PrinterGroup) -> Self {
        Self {
            name: group.name.clone(),
            categories: group.categories.clone(),
        }
    }
}

impl PrinterGroupDraft {
    /// Add the category if absent, remove it otherwise
    pub fn toggle_category(&mut self, category_id: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == category_id) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category_id.to_string());
        }
    }

    pub fn contains(&self, category_id: &str) -> bool {
        self.categories.iter().any(|c| c == category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_category() {
        let mut draft = PrinterGroupDraft::default();
        draft.toggle_category("bebidas");
        draft.toggle_category("postres");
        assert!(draft.contains("bebidas"));
        draft.toggle_category("bebidas");
        assert_eq!(draft.categories, vec!["postres".to_string()]);
    }
}
