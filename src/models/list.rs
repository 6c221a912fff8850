use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub count: f64,
    pub unit: String,
    pub ingredient: String,
}

/// Shopping list in insertion order. Item ids come from a counter that only
/// moves forward, so a deleted id is never handed out again.
#[derive(Debug, Default)]
pub struct List {
    items: Vec<ShoppingListItem>,
    next_id: u64,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(
        &mut self,
        count: f64,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> &ShoppingListItem {
        self.next_id += 1;
        let index = self.items.len();
        self.items.push(ShoppingListItem {
            id: format!("item-{}", self.next_id),
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        });
        &self.items[index]
    }

    /// Returns `false` when no item has this id
    pub fn delete_item(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Set a new count as entered. Returns `false` when no item has this id.
    pub fn update_count(&mut self, id: &str, new_count: f64) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.count = new_count;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
