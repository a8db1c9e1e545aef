use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Files under a base directory; parents are created on write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("curvas/aceite.csv", b"km,risk_pct\n").await.unwrap();

        let data = tokio::fs::read(dir.path().join("curvas/aceite.csv")).await.unwrap();
        assert_eq!(data, b"km,risk_pct\n");
    }

    #[tokio::test]
    async fn write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("curva.csv", b"old contents").await.unwrap();
        storage.write_file("curva.csv", b"km,risk_pct\n").await.unwrap();

        let data = tokio::fs::read(storage.full_path("curva.csv")).await.unwrap();
        assert_eq!(data, b"km,risk_pct\n");
    }

    #[tokio::test]
    async fn unwritable_base_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("archivo");
        std::fs::write(&blocker, b"x").unwrap();
        let storage = LocalStorage::new(&blocker);

        let err = storage.write_file("curva.csv", b"km").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::CalcError::Io(_)));
    }
}
