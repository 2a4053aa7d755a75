use super::models::{
    CountUpdate, CreateDocumentRequest, DocumentList, SearchCountData, SearchCountDocument,
    UpdateDocumentRequest,
};
use super::query::Query;
use crate::modules::search_count::domain::{NewSearchCount, SearchCountRecord, SearchCountStore};
use crate::shared::{
    config::AppwriteConfig,
    errors::{AppError, AppResult},
    infrastructure::http_client::RateLimitClient,
    utils::{LogContext, TimedOperation},
};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Lets the server generate the document id
const UNIQUE_ID: &str = "unique()";

/// Search counters kept in an Appwrite collection, accessed over REST
pub struct AppwriteSearchCountStore {
    http_client: RateLimitClient,
    documents_url: String,
    collection_id: String,
}

impl AppwriteSearchCountStore {
    pub fn new(config: AppwriteConfig) -> AppResult<Self> {
        let http_client = RateLimitClient::for_appwrite(&config)?;
        Ok(Self::with_client(http_client, &config))
    }

    /// Create store with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, config: &AppwriteConfig) -> Self {
        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint,
            urlencoding::encode(&config.database_id),
            urlencoding::encode(&config.collection_id)
        );
        Self {
            http_client,
            documents_url,
            collection_id: config.collection_id.clone(),
        }
    }

    pub fn documents_url(&self) -> &str {
        &self.documents_url
    }

    async fn list(&self, queries: &[Query], context: &str) -> AppResult<Vec<SearchCountRecord>> {
        let list: DocumentList<SearchCountDocument> = self
            .request(Method::GET, &self.documents_url, &Query::to_params(queries), None, context)
            .await?;
        Ok(list.documents.into_iter().map(Into::into).collect())
    }

    async fn request<T>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        context: &str,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        LogContext::store_operation(context, &self.collection_id, None);
        let timer = TimedOperation::new(context);

        let result = self
            .http_client
            .send_json(method, url, query, body.as_ref(), context)
            .await
            .map_err(into_store_error);

        LogContext::store_operation(context, &self.collection_id, Some(timer.finish()));
        result
    }
}

#[async_trait]
impl SearchCountStore for AppwriteSearchCountStore {
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchCountRecord>> {
        let records = self
            .list(
                &[Query::equal("searchTerm", term), Query::limit(1)],
                "Failed to look up search count",
            )
            .await?;
        Ok(records.into_iter().next())
    }

    async fn create(&self, record: NewSearchCount) -> AppResult<SearchCountRecord> {
        let body = serde_json::to_value(CreateDocumentRequest {
            document_id: UNIQUE_ID.to_string(),
            data: SearchCountData::from(record),
        })?;

        let document: SearchCountDocument = self
            .request(
                Method::POST,
                &self.documents_url,
                &[],
                Some(body),
                "Failed to create search count",
            )
            .await?;
        Ok(document.into())
    }

    async fn update_count(&self, id: &str, count: i64) -> AppResult<SearchCountRecord> {
        let url = format!("{}/{}", self.documents_url, urlencoding::encode(id));
        let body = serde_json::to_value(UpdateDocumentRequest {
            data: CountUpdate { count },
        })?;

        let document: SearchCountDocument = self
            .request(
                Method::PATCH,
                &url,
                &[],
                Some(body),
                "Failed to update search count",
            )
            .await?;
        Ok(document.into())
    }

    async fn list_top(&self, limit: usize) -> AppResult<Vec<SearchCountRecord>> {
        self.list(
            &[
                Query::limit(limit),
                Query::order_desc("count"),
                Query::order_asc("$createdAt"),
            ],
            "Failed to list trending searches",
        )
        .await
    }
}

// Everything that goes wrong talking to the database is a store failure
fn into_store_error(err: AppError) -> AppError {
    match err {
        AppError::StoreError(_) => err,
        other => AppError::StoreError(other.message().to_string()),
    }
}
