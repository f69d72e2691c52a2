pub mod directory;

use crate::{
    errors::DirectoryError,
    models::{
        hospital::Hospital,
        recipient::{MessageContent, Recipient},
    },
};
use async_trait::async_trait;
use std::sync::Arc;

/// External hospital directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Searches hospitals of a locality by name, zero matches is `Ok(vec![])`
    async fn search_hospitals(
        &self,
        locality_key: &str,
        search_query: &str,
    ) -> Result<Vec<Hospital>, DirectoryError>;

    /// Fetches one hospital by its numeric id, `None` if the directory does not know it
    async fn get_hospital(&self, hospital_id: u64) -> Result<Option<Hospital>, DirectoryError>;
}

/// Outbound messaging provider, implemented by
/// [`VonageClient`](crate::webhook::vonage::client::VonageClient)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    async fn send(&self, to: &Recipient, content: &MessageContent) -> anyhow::Result<()>;
}

pub type ImplDirectoryService = Arc<dyn DirectoryService>;
pub type ImplMessageDispatcher = Arc<dyn MessageDispatcher>;
