use crate::domain::model::Cart;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{CartError, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

/// Key under which the cart snapshot is stored.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// One file per key inside `base_path`.
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

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.storage_dir())
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", file_name))
    }
}

fn write_atomically(dir: &Path, target: &Path, data: &[u8]) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(target).map_err(|e| CartError::Persist {
        key: target.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

impl Storage for LocalStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.path_for(key);
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let dir = self.base_path.clone();
        let target = self.path_for(key);
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &data))
            .await
            .map_err(|e| CartError::Persist {
                key: key.to_string(),
                message: e.to_string(),
            })?
    }
}

/// Process-local storage; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.lock().await;
        entries.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.get(key).await)
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

/// Reads and writes the whole cart under [`CART_STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct CartSnapshotStore<S: Storage> {
    storage: S,
}

impl<S: Storage> CartSnapshotStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> Result<Cart> {
        match self.storage.read(CART_STORAGE_KEY).await? {
            Some(data) => {
                let cart: Cart = serde_json::from_slice(&data)?;
                tracing::debug!("Loaded cart snapshot with {} items", cart.len());
                Ok(cart)
            }
            None => {
                tracing::debug!("No cart snapshot stored, starting empty");
                Ok(Cart::new())
            }
        }
    }

    pub async fn save(&self, cart: &Cart) -> Result<()> {
        let data = serde_json::to_vec(cart)?;
        tracing::debug!("Writing cart snapshot ({} bytes)", data.len());
        self.storage.write(CART_STORAGE_KEY, &data).await
    }
}
