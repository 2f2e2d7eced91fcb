//! Vector-index client implementations.

mod azure_search;
#[cfg(test)]
mod mock;

pub use azure_search::AzureSearchIndex;
#[cfg(test)]
pub use mock::MockSearchIndex;
