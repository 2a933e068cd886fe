//! Document store
//!
//! Upsert-only map from id to document. There is no removal; deletion is
//! a status change made by the service. Listing preserves insertion order.

use std::collections::HashMap;

use crate::models::Document;

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, Document>,
    /// Ids in first-insertion order
    order: Vec<String>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Document> {
        self.documents.get_mut(id)
    }

    /// Insert or replace the document stored under its id
    pub fn put(&mut self, document: Document) {
        if !self.documents.contains_key(&document.id) {
            self.order.push(document.id.clone());
        }
        self.documents.insert(document.id.clone(), document);
    }

    /// All documents, oldest insertion first
    pub fn list(&self) -> impl Iterator<Item = &Document> {
        self.order.iter().filter_map(|id| self.documents.get(id))
    }

    /// First document (by insertion) bound to this path
    pub fn find_by_path(&self, path: &str) -> Option<&Document> {
        self.list().find(|doc| doc.path == path)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewDocument;
    use chrono::Utc;

    fn doc(id: &str, path: &str) -> Document {
        Document::create(
            id.to_string(),
            NewDocument {
                path: Some(path.to_string()),
                ..NewDocument::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_put_and_get() {
        let mut store = DocumentStore::new();
        assert!(store.is_empty());

        store.put(doc("a", ""));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().id, "a");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_put_is_upsert_and_keeps_position() {
        let mut store = DocumentStore::new();
        store.put(doc("a", ""));
        store.put(doc("b", ""));

        let mut replacement = doc("a", "");
        replacement.title = "Replaced".to_string();
        store.put(replacement);

        assert_eq!(store.len(), 2);
        let titles: Vec<_> = store.list().map(|d| (d.id.as_str(), d.title.as_str())).collect();
        assert_eq!(titles[0], ("a", "Replaced"));
        assert_eq!(titles[1].0, "b");
    }

    #[test]
    fn test_find_by_path_returns_first_match() {
        let mut store = DocumentStore::new();
        store.put(doc("a", "/x.md"));
        store.put(doc("b", "/y.md"));
        store.put(doc("c", "/x.md"));

        assert_eq!(store.find_by_path("/x.md").unwrap().id, "a");
        assert_eq!(store.find_by_path("/y.md").unwrap().id, "b");
        assert!(store.find_by_path("/z.md").is_none());
    }
}
