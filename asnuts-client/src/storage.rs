//! 本地持久化存储
//!
//! # 架构
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                SharedStorage                  │
//! │  Arc<dyn StorageBackend>  (File / Memory)     │
//! │  broadcast::Sender<StorageEvent>              │
//! └───────────────┬───────────────────────────────┘
//!                 │ tab()
//!       ┌─────────┴─────────┐
//!       ▼                   ▼
//!   TabStorage (A)      TabStorage (B)
//! ```
//!
//! 所有标签页共享同一个后端；写入 [`keys::PRODUCTS`] / [`keys::ORDERS`]
//! 会向其他标签页发送 [`StorageEvent`]，标签页通过
//! [`TabStorage::drain_events`] 主动拉取，不会收到自己的写入。

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::ClientResult;

/// 存储键，值均为 JSON 文档
pub mod keys {
    pub const PRODUCTS: &str = "srs_cashews_products";
    pub const ORDERS: &str = "srs_cashews_orders";
    pub const CART: &str = "keerthivasan_cashews_cart";
    pub const TOKEN: &str = "asNuts_token";
    pub const USER: &str = "asNuts_user";

    /// Keys whose writes are announced to other tabs
    pub const SHARED: [&str; 2] = [PRODUCTS, ORDERS];

    pub fn is_shared(key: &str) -> bool {
        SHARED.contains(&key)
    }
}

/// Events buffered per tab before the oldest are dropped
pub const EVENT_CAPACITY: usize = 64;

/// Raw key/value backend
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// In-memory backend (tests, ephemeral sessions)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> ClientResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        // 先写临时文件再重命名，避免读到半截文档
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Change notification delivered to the other tabs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    /// Tab that performed the write
    pub origin: Uuid,
}

/// Storage shared by every tab of one client installation
#[derive(Clone)]
pub struct SharedStorage {
    backend: Arc<dyn StorageBackend>,
    events: broadcast::Sender<StorageEvent>,
}

impl SharedStorage {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { backend, events }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn open(dir: impl AsRef<Path>) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(FileStorage::new(dir)?)))
    }

    /// Open a new tab with its own identity and event subscription
    pub fn tab(&self) -> TabStorage {
        TabStorage {
            shared: self.clone(),
            id: Uuid::new_v4(),
            events: self.events.subscribe(),
        }
    }
}

/// One tab's handle onto [`SharedStorage`]
pub struct TabStorage {
    shared: SharedStorage,
    id: Uuid,
    events: broadcast::Receiver<StorageEvent>,
}

impl TabStorage {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Open a sibling tab on the same storage
    pub fn sibling(&self) -> TabStorage {
        self.shared.tab()
    }

    /// Read and decode a JSON document; `Ok(None)` when absent
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> ClientResult<Option<T>> {
        match self.shared.backend.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn get_raw(&self, key: &str) -> ClientResult<Option<String>> {
        self.shared.backend.get(key)
    }

    pub fn set_raw(&self, key: &str, value: &str) -> ClientResult<()> {
        self.shared.backend.set(key, value)?;
        self.announce(key);
        Ok(())
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> ClientResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }

    /// Write only when the stored document differs; returns whether it wrote
    ///
    /// Two tabs reloading on each other's events settle instead of looping.
    pub fn set_json_if_changed<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> ClientResult<bool> {
        let raw = serde_json::to_string(value)?;
        if self.get_raw(key)?.as_deref() == Some(raw.as_str()) {
            return Ok(false);
        }
        self.set_raw(key, &raw)?;
        Ok(true)
    }

    pub fn remove(&self, key: &str) -> ClientResult<()> {
        self.shared.backend.remove(key)?;
        self.announce(key);
        Ok(())
    }

    /// Pending events written by other tabs, oldest first
    ///
    /// When the receiver lagged, every shared key missing from the result is
    /// reported as changed (origin [`Uuid::nil`]) so the tab still reloads.
    pub fn drain_events(&mut self) -> Vec<StorageEvent> {
        let mut drained = Vec::new();
        let mut lagged = false;
        loop {
            match self.events.try_recv() {
                Ok(event) if event.origin != self.id => drained.push(event),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        tab = %self.id,
                        skipped,
                        "Storage events dropped, reloading shared keys"
                    );
                    lagged = true;
                }
                Err(_) => break,
            }
        }
        if lagged {
            for key in keys::SHARED {
                if !drained.iter().any(|e| e.key == key) {
                    drained.push(StorageEvent {
                        key: key.to_string(),
                        origin: Uuid::nil(),
                    });
                }
            }
        }
        drained
    }

    fn announce(&self, key: &str) {
        if !keys::is_shared(key) {
            return;
        }
        // 没有订阅者时发送失败，忽略即可
        let _ = self.shared.events.send(StorageEvent {
            key: key.to_string(),
            origin: self.id,
        });
    }
}

/// Read a JSON document, treating undecodable data as absent
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(tab: &TabStorage, key: &str) -> T {
    match tab.get_json::<T>(key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable stored document");
            T::default()
        }
    }
}
