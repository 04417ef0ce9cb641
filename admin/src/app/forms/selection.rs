//! Ordered product selection for the advertisement form.

use shared::IdRef;

/// Selected product ids in the order they were picked, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSelection {
    ids: Vec<i64>,
}

impl ProductSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut selection = Self::new();
        selection.select_all(ids);
        selection
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn select(&mut self, id: i64) {
        if !self.is_selected(id) {
            self.ids.push(id);
        }
    }

    /// Flip one product. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if let Some(position) = self.ids.iter().position(|&selected| selected == id) {
            self.ids.remove(position);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Add every id not already selected, keeping the given order.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = i64>) {
        for id in ids {
            self.select(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn to_refs(&self) -> Vec<IdRef> {
        self.ids.iter().copied().map(IdRef::new).collect()
    }
}
