use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reference to a work item as returned by a WIQL query.
///
/// The full item (title, description) has to be fetched separately
/// through the `url`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemRef {
    pub id: i32,
    pub url: String,
}

/// A fully hydrated work item with the tracker-specific field names
/// already mapped onto a normalized shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: i32,
    pub item_type: String,
    pub title: String,
    pub description: String,
}

impl WorkItem {
    /// Whether the item carries enough text to be worth indexing.
    ///
    /// Items with an empty title or description are skipped by the
    /// import driver since embeddings cannot be created from empty text.
    pub fn has_content(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}

/// Raw work item shape as returned by the item-fetch endpoint.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RawWorkItem {
    pub id: i32,
    pub fields: Value,
}

impl From<RawWorkItem> for WorkItem {
    fn from(raw: RawWorkItem) -> Self {
        Self {
            id: raw.id,
            item_type: string_field(&raw.fields, "System.WorkItemType"),
            title: string_field(&raw.fields, "System.Title"),
            description: string_field(&raw.fields, "System.Description"),
        }
    }
}

fn string_field(fields: &Value, name: &str) -> String {
    fields
        .get(name)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_owned()
}
