//! Azure AI Search index client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::domain::dedup::traits::{DedupError, Result, SearchIndex};
use crate::domain::dedup::types::{IndexRecord, SearchHit};

pub const API_VERSION: &str = "2023-07-01-Preview";

/// Number of nearest neighbors requested per query.
const KNN_K: usize = 5;
const VECTOR_DIMENSIONS: usize = 1536;

/// Client for a hosted Azure AI Search index with vector fields.
pub struct AzureSearchIndex {
    http: reqwest::Client,
    service_name: String,
    index_name: String,
    api_key: String,
}

impl AzureSearchIndex {
    pub fn new(service_name: &str, index_name: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            service_name: service_name.to_owned(),
            index_name: index_name.to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    fn index_url(&self) -> String {
        format!(
            "https://{}.search.windows.net/indexes/{}?api-version={}",
            self.service_name, self.index_name, API_VERSION
        )
    }

    fn docs_url(&self, operation: &str) -> String {
        format!(
            "https://{}.search.windows.net/indexes/{}/docs/{}?api-version={}",
            self.service_name, self.index_name, operation, API_VERSION
        )
    }

    fn index_schema(&self) -> serde_json::Value {
        json!({
            "name": self.index_name,
            "fields": [
                {
                    "name": "id",
                    "type": "Edm.String",
                    "key": true,
                    "filterable": true
                },
                {
                    "name": "category",
                    "type": "Edm.String",
                    "filterable": true,
                    "searchable": true,
                    "retrievable": true
                },
                {
                    "name": "title",
                    "type": "Edm.String",
                    "searchable": true,
                    "retrievable": true
                },
                {
                    "name": "titleVector",
                    "type": "Collection(Edm.Single)",
                    "searchable": true,
                    "retrievable": true,
                    "dimensions": VECTOR_DIMENSIONS,
                    "vectorSearchConfiguration": "vectorConfig"
                },
                {
                    "name": "content",
                    "type": "Edm.String",
                    "searchable": true,
                    "retrievable": true
                },
                {
                    "name": "contentVector",
                    "type": "Collection(Edm.Single)",
                    "searchable": true,
                    "retrievable": true,
                    "dimensions": VECTOR_DIMENSIONS,
                    "vectorSearchConfiguration": "vectorConfig"
                }
            ],
            "corsOptions": {
                "allowedOrigins": ["*"],
                "maxAgeInSeconds": 60
            },
            "vectorSearch": {
                "algorithmConfigurations": [
                    {
                        "name": "vectorConfig",
                        "kind": "hnsw"
                    }
                ]
            },
            "semantic": {
                "configurations": [
                    {
                        "name": "default-semantic-config",
                        "prioritizedFields": {
                            "titleField": { "fieldName": "title" },
                            "prioritizedContentFields": [
                                { "fieldName": "content" }
                            ],
                            "prioritizedKeywordsFields": []
                        }
                    }
                ]
            }
        })
    }
}

#[async_trait]
impl SearchIndex for AzureSearchIndex {
    async fn ensure_index(&self) -> Result<()> {
        let resp = self
            .http
            .put(self.index_url())
            .header("api-key", &self.api_key)
            .json(&self.index_schema())
            .send()
            .await
            .map_err(|e| DedupError::Index(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DedupError::Index(format!(
                "Index schema update failed with {}: {}",
                status, body
            )));
        }

        info!(index = %self.index_name, "Search index schema is up to date");
        Ok(())
    }

    async fn upsert(&self, record: &IndexRecord) -> Result<bool> {
        let resp = self
            .http
            .post(self.docs_url("index"))
            .header("api-key", &self.api_key)
            .json(&[record])
            .send()
            .await
            .map_err(|e| DedupError::Index(e.to_string()))?;

        let status = resp.status().as_u16();
        if status == 200 || status == 201 {
            Ok(true)
        } else {
            let body = resp.text().await.unwrap_or_default();
            error!(id = %record.id, status, "Upsert rejected by index service: {}", body);
            Ok(false)
        }
    }

    async fn query_similar(&self, vector: &[f32]) -> Result<Vec<SearchHit>> {
        let resp = self
            .http
            .post(self.docs_url("search"))
            .header("api-key", &self.api_key)
            .json(&json!({
                "vector": {
                    "value": vector,
                    "fields": "contentVector",
                    "k": KNN_K
                },
                "select": "title, content, category, id"
            }))
            .send()
            .await
            .map_err(|e| DedupError::Index(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DedupError::Index(format!(
                "Vector query failed with {}: {}",
                status, body
            )));
        }

        let response = resp
            .json::<QueryResponse>()
            .await
            .map_err(|e| DedupError::Index(format!("Failed to parse query response: {}", e)))?;

        Ok(response.value)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    value: Vec<SearchHit>,
}
