use std::path::{Path, PathBuf};

use dnsbench_domain::DomainError;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::warn;

/// Reads `dir/name`, falling back to `default` when the file does not yet exist
/// (first boot, or a document that was never customized).
pub async fn read_or_default<T: DeserializeOwned + Default>(dir: &str, name: &str) -> Result<T, DomainError> {
    let path = document_path(dir, name);
    match fs::read_to_string(&path).await {
        Ok(contents) => serde_json::from_str(&contents).map_err(|e| DomainError::Store(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config document, falling back to default");
            Ok(T::default())
        }
    }
}

/// Write-to-temp-then-rename so a crash or concurrent reader never observes a
/// half-written document (§4.7 "rewrite atomically").
pub async fn write_atomic<T: Serialize + Sync>(dir: &str, name: &str, value: &T) -> Result<(), DomainError> {
    fs::create_dir_all(dir).await.map_err(|e| DomainError::Store(e.to_string()))?;
    let path = document_path(dir, name);
    let tmp_path = document_path(dir, &format!("{name}.tmp"));

    let serialized = serde_json::to_string_pretty(value).map_err(|e| DomainError::Store(e.to_string()))?;
    fs::write(&tmp_path, serialized).await.map_err(|e| DomainError::Store(e.to_string()))?;
    fs::rename(&tmp_path, &path).await.map_err(|e| DomainError::Store(e.to_string()))?;
    Ok(())
}

fn document_path(dir: &str, name: &str) -> PathBuf {
    Path::new(dir).join(name)
}
