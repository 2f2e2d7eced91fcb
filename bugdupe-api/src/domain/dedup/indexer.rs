//! Batch import driver: staged work items into the vector index.

use std::sync::Arc;

use az_workitems::{
    export_work_items, load_staged_pages, reset_staging_dir, ExportError, ExportOptions, WorkItem,
    WorkItemClientError, WorkItemSource,
};
use tracing::{info, warn};

use super::traits::{Embedder, Result, SearchIndex};
use super::types::IndexRecord;

/// Maximum stored content length in characters.
pub const MAX_CONTENT_CHARS: usize = 16383;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Tracker(#[from] WorkItemClientError),
    #[error(transparent)]
    Dedup(#[from] super::traits::DedupError),
}

/// Statistics from one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub pages: usize,
    pub indexed: usize,
    pub skipped: usize,
    pub upsert_failures: usize,
}

/// Import-path pipeline: hydrated work items are converted to markdown,
/// embedded and upserted one at a time.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SearchIndex>,
}

impl Indexer {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn SearchIndex>) -> Self {
        Self { embedder, index }
    }

    /// Index a single work item.
    ///
    /// The caller guarantees a non-empty title and description. The
    /// description is converted from HTML to markdown (images dropped)
    /// and truncated before embedding and storage. Returns the upsert
    /// outcome: `false` means the index service rejected the write.
    pub async fn index_work_item(&self, item: &WorkItem) -> Result<bool> {
        let content = truncate_chars(html_to_markdown(&item.description), MAX_CONTENT_CHARS);

        let title_vector = self.embedder.embed(&item.title).await?;
        let content_vector = self.embedder.embed(&content).await?;

        let record = IndexRecord {
            id: item.id.to_string(),
            title: item.title.clone(),
            content,
            category: item.item_type.clone(),
            title_vector,
            content_vector,
        };

        self.index.upsert(&record).await
    }

    /// Run a full import: ensure the index schema, export matching work
    /// items to the staging directory, then hydrate and index them one
    /// at a time.
    ///
    /// An upsert rejection is logged and the loop continues; a failed
    /// hydration aborts the whole run.
    pub async fn run_import<S: WorkItemSource>(
        &self,
        source: &S,
        opts: &ExportOptions,
    ) -> std::result::Result<ImportStats, ImportError> {
        self.index.ensure_index().await?;

        reset_staging_dir(&opts.output_dir)?;
        let pages = export_work_items(source, opts).await?;
        let staged = load_staged_pages(&opts.output_dir)?;

        let mut stats = ImportStats {
            pages,
            ..Default::default()
        };

        for page in staged {
            for item_ref in page.items {
                let item = source.get_work_item(&item_ref.url).await?;

                // Some work items are empty; embeddings cannot be
                // created from empty strings.
                if !item.has_content() {
                    stats.skipped += 1;
                    continue;
                }

                if self.index_work_item(&item).await? {
                    stats.indexed += 1;
                    info!("Added {} to search", item.id);
                } else {
                    stats.upsert_failures += 1;
                    warn!("Index rejected work item {}", item.id);
                }
            }
        }

        Ok(stats)
    }
}

/// Convert tracker HTML to markdown, dropping embedded images.
///
/// Markdown keeps the text content while shedding markup, which shrinks
/// the token count for both embedding and adjudication.
fn html_to_markdown(html: &str) -> String {
    htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["img"])
        .build()
        .convert(html)
        .unwrap_or_else(|_| html.to_owned())
}

fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((byte_index, _)) = text.char_indices().nth(max) {
        text.truncate(byte_index);
    }
    text
}
