use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::client::{WorkItemClientError, WorkItemSource};
use crate::models::WorkItemRef;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Client(#[from] WorkItemClientError),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("SerializationError: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Options for a paged work-item export.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub item_type: String,
    pub start_date: String,
    pub output_dir: PathBuf,
    pub page_size: usize,
    /// Resume cursor, exclusive. Items with id <= last_id are skipped.
    pub last_id: i32,
}

impl ExportOptions {
    pub fn new(
        item_type: impl Into<String>,
        start_date: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        page_size: usize,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            start_date: start_date.into(),
            output_dir: output_dir.into(),
            page_size,
            last_id: 1,
        }
    }
}

/// One staged page of exported work-item references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedPage {
    pub path: PathBuf,
    pub items: Vec<WorkItemRef>,
}

/// Export work items page by page into the staging directory.
///
/// Each full page advances the id cursor to the highest id seen; a page
/// shorter than `page_size` terminates the export. Every non-empty page
/// is written to `{output_dir}/{unix_millis}-{page_index}.json` before
/// the next page is requested, so an aborted export leaves the pages
/// fetched so far on disk.
///
/// Returns the number of pages written.
pub async fn export_work_items<S: WorkItemSource>(
    source: &S,
    opts: &ExportOptions,
) -> Result<usize, ExportError> {
    let mut last_id = opts.last_id;
    let mut page_index = 0;

    loop {
        let items = source
            .query_page(&opts.item_type, &opts.start_date, last_id, opts.page_size)
            .await?;

        if items.is_empty() {
            break;
        }

        let file_path = opts
            .output_dir
            .join(format!("{}-{}.json", unix_millis(), page_index));
        fs::write(&file_path, serde_json::to_string(&items)?)?;
        info!(
            page = page_index,
            items = items.len(),
            "Staged page to {}",
            file_path.display()
        );

        if items.len() < opts.page_size {
            page_index += 1;
            break;
        }

        // Ids are ordered ascending, so the last item carries the max id.
        last_id = items.last().map(|item| item.id).unwrap_or(last_id);
        page_index += 1;
    }

    Ok(page_index)
}

/// Load every staged page from the staging directory, in file-name order.
pub fn load_staged_pages(dir: &Path) -> Result<Vec<StagedPage>, ExportError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut pages = Vec::with_capacity(paths.len());
    for path in paths {
        let data = fs::read_to_string(&path)?;
        let items: Vec<WorkItemRef> = serde_json::from_str(&data)?;
        pages.push(StagedPage { path, items });
    }

    Ok(pages)
}

/// Create the staging directory if missing and remove any leftover files
/// from a previous run.
pub fn reset_staging_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir)?;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn unix_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}
