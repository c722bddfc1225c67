use async_trait::async_trait;
use cloudmap_application::ports::ProviderTableStore;
use cloudmap_domain::{DomainError, ProviderTable, ProviderTableFile};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Provider table persisted as pretty-printed JSON:
/// `{"Services":[{"Name":"AWS","IPRange":["3.0.0.0/8"]}]}`.
pub struct JsonFileProviderStore {
    path: PathBuf,
}

impl JsonFileProviderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, what: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::ConfigurationError(format!("{} {}: {}", what, self.path.display(), e))
    }
}

#[async_trait]
impl ProviderTableStore for JsonFileProviderStore {
    async fn load(&self) -> Result<ProviderTable, DomainError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.error("cannot read provider table", e))?;

        let file: ProviderTableFile =
            serde_json::from_str(&raw).map_err(|e| self.error("malformed provider table", e))?;

        let table = ProviderTable::from_file(file)?;
        debug!(path = %self.path.display(), cidrs = table.cidr_count(), "Provider table read");
        Ok(table)
    }

    async fn save(&self, table: &ProviderTable) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(&table.to_file())
            .map_err(|e| self.error("cannot encode provider table", e))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.error("cannot write provider table", e))?;

        debug!(path = %self.path.display(), "Provider table written");
        Ok(())
    }
}
