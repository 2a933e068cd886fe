//! Document list filtering and sorting
//!
//! Every predicate is independent and they are AND-combined. Sorting runs
//! after filtering and is stable, with no secondary key.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Document, DocumentStatus, DocumentType};

/// Field a document listing can be sorted by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    CreatedAt,
    ModifiedAt,
    AccessedAt,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Options for `list-documents`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentFilter {
    pub status: Option<DocumentStatus>,
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentType>,
    /// Only `Some(true)` narrows the listing; `Some(false)` keeps everything
    pub favorite: Option<bool>,
    /// Keep documents carrying at least one of these tags
    pub tags: Option<Vec<String>>,
    pub query: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl DocumentFilter {
    /// Whether a document passes every predicate
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(status) = self.status {
            if doc.status != status {
                return false;
            }
        }
        if let Some(doc_type) = self.doc_type {
            if doc.doc_type != doc_type {
                return false;
            }
        }
        if self.favorite == Some(true) && !doc.is_favorite {
            return false;
        }
        if let Some(tags) = self.tags.as_ref().filter(|tags| !tags.is_empty()) {
            if !tags.iter().any(|tag| doc.tags.contains(tag)) {
                return false;
            }
        }
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            if !doc.matches_query(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Filter then sort, consuming the candidate list
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        let mut kept: Vec<Document> = documents.into_iter().filter(|d| self.matches(d)).collect();

        if let Some(field) = self.sort_by {
            let order = self.sort_order.unwrap_or_default();
            kept.sort_by(|a, b| {
                let ordering = compare_by(field, a, b);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        kept
    }
}

fn compare_by(field: SortField, a: &Document, b: &Document) -> Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::ModifiedAt => a.modified_at.cmp(&b.modified_at),
        SortField::AccessedAt => a.accessed_at.cmp(&b.accessed_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewDocument;
    use chrono::{TimeZone, Utc};

    fn doc(id: &str, title: &str, created: i64) -> Document {
        Document::create(
            id.to_string(),
            NewDocument::titled(title),
            Utc.timestamp_opt(created, 0).unwrap(),
        )
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let docs = vec![doc("a", "B", 2), doc("b", "A", 1)];
        let result = DocumentFilter::default().apply(docs);
        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_status_and_type_are_exact_matches() {
        let mut archived = doc("a", "A", 0);
        archived.status = DocumentStatus::Archived;
        let mut text = doc("b", "B", 0);
        text.doc_type = DocumentType::Text;
        let docs = vec![archived, text, doc("c", "C", 0)];

        let by_status = DocumentFilter {
            status: Some(DocumentStatus::Archived),
            ..Default::default()
        }
        .apply(docs.clone());
        assert_eq!(ids(&by_status), vec!["a"]);

        let by_type = DocumentFilter {
            doc_type: Some(DocumentType::Text),
            ..Default::default()
        }
        .apply(docs);
        assert_eq!(ids(&by_type), vec!["b"]);
    }

    #[test]
    fn test_favorite_false_does_not_narrow() {
        let mut fav = doc("a", "A", 0);
        fav.is_favorite = true;
        let docs = vec![fav, doc("b", "B", 0)];

        let only_favs = DocumentFilter {
            favorite: Some(true),
            ..Default::default()
        }
        .apply(docs.clone());
        assert_eq!(ids(&only_favs), vec!["a"]);

        let all = DocumentFilter {
            favorite: Some(false),
            ..Default::default()
        }
        .apply(docs);
        assert_eq!(ids(&all), vec!["a", "b"]);
    }

    #[test]
    fn test_tags_intersect() {
        let mut rust = doc("a", "A", 0);
        rust.tags = vec!["rust".to_string()];
        let mut go = doc("b", "B", 0);
        go.tags = vec!["go".to_string(), "web".to_string()];
        let docs = vec![rust, go, doc("c", "C", 0)];

        let result = DocumentFilter {
            tags: Some(vec!["web".to_string(), "rust".to_string()]),
            ..Default::default()
        }
        .apply(docs.clone());
        assert_eq!(ids(&result), vec!["a", "b"]);

        let empty_tags = DocumentFilter {
            tags: Some(vec![]),
            ..Default::default()
        }
        .apply(docs);
        assert_eq!(empty_tags.len(), 3);
    }

    #[test]
    fn test_query_is_case_insensitive_over_title_and_content() {
        let mut hidden = doc("a", "Plain", 0);
        hidden.content = Some("needle in CONTENT".to_string());
        let docs = vec![hidden, doc("b", "Needle Title", 0), doc("c", "Other", 0)];

        let result = DocumentFilter {
            query: Some("NEEDLE".to_string()),
            ..Default::default()
        }
        .apply(docs);
        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_by_title_and_created() {
        let docs = vec![doc("a", "banana", 3), doc("b", "apple", 1), doc("c", "cherry", 2)];

        let by_title = DocumentFilter {
            sort_by: Some(SortField::Title),
            ..Default::default()
        }
        .apply(docs.clone());
        assert_eq!(ids(&by_title), vec!["b", "a", "c"]);

        let by_created_desc = DocumentFilter {
            sort_by: Some(SortField::CreatedAt),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        }
        .apply(docs);
        assert_eq!(ids(&by_created_desc), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_predicates_combine() {
        let mut a = doc("a", "Report", 0);
        a.tags = vec!["work".to_string()];
        a.is_favorite = true;
        let mut b = doc("b", "Report", 0);
        b.tags = vec!["work".to_string()];
        let docs = vec![a, b];

        let result = DocumentFilter {
            favorite: Some(true),
            tags: Some(vec!["work".to_string()]),
            query: Some("rep".to_string()),
            ..Default::default()
        }
        .apply(docs);
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_deserialize_wire_filter() {
        let filter: DocumentFilter = serde_json::from_str(
            r#"{"status": "deleted", "type": "text", "sortBy": "modifiedAt", "sortOrder": "desc"}"#,
        )
        .unwrap();
        assert_eq!(filter.status, Some(DocumentStatus::Deleted));
        assert_eq!(filter.doc_type, Some(DocumentType::Text));
        assert_eq!(filter.sort_by, Some(SortField::ModifiedAt));
        assert_eq!(filter.sort_order, Some(SortOrder::Desc));
    }
}
