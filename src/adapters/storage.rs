use crate::domain::model::Theater;
use crate::domain::ports::Storage;
use crate::utils::error::{MoopError, Result};
use std::path::Path;

const MY_THEATERS_FILE: &str = "my_theaters.json";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

/// Persists the user's selected theaters as JSON.
#[derive(Debug, Clone)]
pub struct TheaterSettingsStore<S: Storage> {
    storage: S,
}

impl<S: Storage> TheaterSettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 尚未儲存過時回傳空清單
    pub async fn load(&self) -> Result<Vec<Theater>> {
        match self.storage.read_file(MY_THEATERS_FILE).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(MoopError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No saved theaters yet");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn save(&self, theaters: &[Theater]) -> Result<()> {
        let json = serde_json::to_vec_pretty(theaters)?;
        tracing::debug!("Saving {} theater(s) ({} bytes)", theaters.len(), json.len());
        self.storage.write_file(MY_THEATERS_FILE, &json).await
    }
}
