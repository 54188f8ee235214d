//! Output-delivery collaborator

/// Hands a finished credentials document off for persistence. The pipeline
/// treats delivery as fire-and-forget aside from error logging.
#[async_trait::async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver(&self, filename: &str, contents: &str) -> Result<(), crate::error::Error>;
}

/// Writes documents into a directory, overwriting on conflict.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    directory: std::path::PathBuf,
}

impl DirectoryDelivery {
    pub fn new(directory: impl Into<std::path::PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait::async_trait]
impl Delivery for DirectoryDelivery {
    async fn deliver(&self, filename: &str, contents: &str) -> Result<(), crate::error::Error> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(filename);
        tokio::fs::write(&path, contents).await?;
        tracing::debug!(message = "Wrote credentials document", path = ?path);
        Ok(())
    }
}
