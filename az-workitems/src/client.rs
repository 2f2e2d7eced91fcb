use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{RawWorkItem, WorkItem, WorkItemRef};

const WIQL_API_VERSION: &str = "7.0";

#[derive(Error, Debug)]
pub enum WorkItemClientError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("UnexpectedStatus: {status} ({body})")]
    UnexpectedStatus { status: u16, body: String },
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

/// Source of work-item pages and bodies.
///
/// `WorkItemClient` is the production implementation; the seam exists so
/// the export/import drivers can be tested against an in-memory source.
#[async_trait]
pub trait WorkItemSource: Send + Sync {
    /// Query one page of work-item references.
    ///
    /// Items are filtered to the given type, created after `start_date`,
    /// with an id strictly greater than `last_id`, ordered by id
    /// ascending, at most `top` items.
    async fn query_page(
        &self,
        item_type: &str,
        start_date: &str,
        last_id: i32,
        top: usize,
    ) -> Result<Vec<WorkItemRef>, WorkItemClientError>;

    /// Fetch the full work item behind a reference URL.
    async fn get_work_item(&self, url: &str) -> Result<WorkItem, WorkItemClientError>;
}

pub struct WorkItemClient {
    http: reqwest::Client,
    organization: String,
    project: String,
    pat: String,
}

impl WorkItemClient {
    pub fn new(organization: &str, project: &str, pat: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            organization: organization.to_owned(),
            project: project.to_owned(),
            pat: pat.to_owned(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!(":{}", self.pat)))
    }

    fn wiql_url(&self, top: usize) -> String {
        format!(
            "https://dev.azure.com/{}/_apis/wit/wiql?api-version={}&$top={}",
            self.organization, WIQL_API_VERSION, top
        )
    }

    fn wiql_query(&self, item_type: &str, start_date: &str, last_id: i32) -> String {
        format!(
            "SELECT \
               [System.Id], \
               [System.Title], \
               [System.Description], \
               [System.WorkItemType], \
               [System.State] \
             FROM workItems \
             WHERE \
               [System.TeamProject] = '{}' AND \
               [System.CreatedDate] > '{}' AND \
               [System.WorkItemType] = '{}' AND \
               [System.Id] > {} \
             ORDER BY [System.Id]",
            self.project, start_date, item_type, last_id
        )
    }
}

#[async_trait]
impl WorkItemSource for WorkItemClient {
    async fn query_page(
        &self,
        item_type: &str,
        start_date: &str,
        last_id: i32,
        top: usize,
    ) -> Result<Vec<WorkItemRef>, WorkItemClientError> {
        let query = self.wiql_query(item_type, start_date, last_id);

        let resp = self
            .http
            .post(self.wiql_url(top))
            .header("Authorization", self.auth_header())
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .map_err(|e| WorkItemClientError::ResponseError(e.to_string()))?;

        if resp.status() == 401 || resp.status() == 403 {
            return Err(WorkItemClientError::Unauthorized);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(WorkItemClientError::UnexpectedStatus { status, body });
        }

        let response = resp.json::<WiqlResponse>().await.map_err(|e| {
            WorkItemClientError::ParsingError(format!("Failed to parse WIQL response: {}", e))
        })?;

        Ok(response.work_items)
    }

    async fn get_work_item(&self, url: &str) -> Result<WorkItem, WorkItemClientError> {
        let resp = self
            .http
            .get(url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| WorkItemClientError::ResponseError(e.to_string()))?;

        if resp.status() == 401 || resp.status() == 403 {
            return Err(WorkItemClientError::Unauthorized);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(WorkItemClientError::UnexpectedStatus { status, body });
        }

        let raw = resp.json::<RawWorkItem>().await.map_err(|e| {
            WorkItemClientError::ParsingError(format!("Failed to parse work item: {}", e))
        })?;

        Ok(WorkItem::from(raw))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WiqlResponse {
    work_items: Vec<WorkItemRef>,
}
