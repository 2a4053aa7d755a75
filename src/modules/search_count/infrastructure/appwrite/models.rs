use crate::modules::search_count::domain::{NewSearchCount, SearchCountRecord};
use serde::{Deserialize, Serialize};

/// Envelope of a document list call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentList<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub documents: Vec<T>,
}

/// Search count document as stored in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCountDocument {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub movie_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    pub count: i64,
}

impl From<SearchCountDocument> for SearchCountRecord {
    fn from(doc: SearchCountDocument) -> Self {
        SearchCountRecord {
            id: doc.id,
            search_term: doc.search_term,
            movie_id: doc.movie_id,
            title: doc.title,
            poster_url: doc.poster_url,
            count: doc.count,
        }
    }
}

/// Attribute payload for a new document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCountData {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub movie_id: i64,
    pub title: String,
    pub count: i64,
    pub poster_url: Option<String>,
}

impl From<NewSearchCount> for SearchCountData {
    fn from(new: NewSearchCount) -> Self {
        SearchCountData {
            search_term: new.search_term,
            movie_id: new.movie_id,
            title: new.title,
            count: new.count,
            poster_url: new.poster_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest<T> {
    pub document_id: String,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountUpdate {
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateDocumentRequest<T> {
    pub data: T,
}
