//! Favorites ledger

use crate::models::Favorite;

#[derive(Debug, Default)]
pub struct FavoritesLedger {
    entries: Vec<Favorite>,
}

impl FavoritesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, favorite: Favorite) {
        self.entries.push(favorite);
    }

    /// Remove the first record for this document, if any
    pub fn remove_first(&mut self, document_id: &str) -> Option<Favorite> {
        let index = self
            .entries
            .iter()
            .position(|fav| fav.document_id == document_id)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Favorite> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
