use super::types::{ContextRecord, SessionContext};
use crate::error::{FetchError, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

type ContextFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<ContextRecord>>> + Send + 'a>>;

/// Host collaborator that hands out the current conversation and contact.
///
/// Each read resolves once, to a record or to absence.
pub trait ContextSource: Send + Sync {
    fn conversation<'a>(&'a self) -> ContextFuture<'a>;

    fn contact<'a>(&'a self) -> ContextFuture<'a>;
}

impl SessionContext {
    /// Read both snapshots concurrently.
    pub async fn load(source: &dyn ContextSource) -> Result<Self> {
        let (conversation, contact) = tokio::join!(source.conversation(), source.contact());
        let session = Self::new(conversation?, contact?);
        tracing::debug!(
            conversation = session.conversation.is_some(),
            contact = session.contact.is_some(),
            "session context loaded"
        );
        Ok(session)
    }
}

/// Fixed snapshots, for embedding hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticContextSource {
    conversation: Option<ContextRecord>,
    contact: Option<ContextRecord>,
}

impl StaticContextSource {
    pub fn new(conversation: Option<ContextRecord>, contact: Option<ContextRecord>) -> Self {
        Self {
            conversation,
            contact,
        }
    }
}

impl ContextSource for StaticContextSource {
    fn conversation<'a>(&'a self) -> ContextFuture<'a> {
        Box::pin(async move { Ok(self.conversation.clone()) })
    }

    fn contact<'a>(&'a self) -> ContextFuture<'a> {
        Box::pin(async move { Ok(self.contact.clone()) })
    }
}

/// Reads each snapshot from an optional JSON file.
#[derive(Debug, Clone, Default)]
pub struct FileContextSource {
    conversation_path: Option<PathBuf>,
    contact_path: Option<PathBuf>,
}

impl FileContextSource {
    pub fn new(conversation_path: Option<PathBuf>, contact_path: Option<PathBuf>) -> Self {
        Self {
            conversation_path,
            contact_path,
        }
    }
}

async fn read_record(path: Option<&Path>) -> Result<Option<ContextRecord>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FetchError::Context(format!("failed to read {}: {e}", path.display())))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| FetchError::Context(format!("{} is not valid JSON: {e}", path.display())))?;

    ContextRecord::from_value(value)
        .map(Some)
        .ok_or_else(|| FetchError::Context(format!("{} must hold a JSON object", path.display())))
}

impl ContextSource for FileContextSource {
    fn conversation<'a>(&'a self) -> ContextFuture<'a> {
        Box::pin(read_record(self.conversation_path.as_deref()))
    }

    fn contact<'a>(&'a self) -> ContextFuture<'a> {
        Box::pin(read_record(self.contact_path.as_deref()))
    }
}
