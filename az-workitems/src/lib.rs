mod client;
mod exporter;
mod models;

pub use client::{WorkItemClient, WorkItemClientError, WorkItemSource};
pub use exporter::{
    export_work_items, load_staged_pages, reset_staging_dir, ExportError, ExportOptions,
    StagedPage,
};
pub use models::{WorkItem, WorkItemRef};
