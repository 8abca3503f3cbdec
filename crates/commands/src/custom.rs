use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use {async_trait::async_trait, tracing::warn};

/// Per-channel custom commands: channel → command name → reply text.
pub type CustomCommandMap = HashMap<String, HashMap<String, String>>;

/// Persistence backend for the custom-command snapshot.
///
/// Writes are best-effort: the in-memory map stays authoritative and a
/// failed persist only shows up in the logs.
#[async_trait]
pub trait CustomCommandSink: Send + Sync {
    async fn persist(&self, snapshot: &CustomCommandMap) -> anyhow::Result<()>;
}

/// Runtime store of user-defined commands.
///
/// Mutated from handler code; the lock is never held across an await.
pub struct CustomCommands {
    inner: RwLock<CustomCommandMap>,
    sink: Arc<dyn CustomCommandSink>,
}

impl CustomCommands {
    #[must_use]
    pub fn new(seed: CustomCommandMap, sink: Arc<dyn CustomCommandSink>) -> Self {
        Self {
            inner: RwLock::new(seed),
            sink,
        }
    }

    /// Stored reply text for `(channel, name)`, if any.
    #[must_use]
    pub fn get(&self, channel: &str, name: &str) -> Option<String> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(channel)?.get(name).cloned()
    }

    /// Insert or overwrite a command and kick off a fire-and-forget persist
    /// of the full snapshot.
    ///
    /// Command names are stored case-folded so lookups by the lowercased
    /// command word always hit.
    pub fn register(&self, channel: &str, name: &str, text: &str) {
        let snapshot = {
            let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
            map.entry(channel.to_string())
                .or_default()
                .insert(name.to_lowercase(), text.to_string());
            map.clone()
        };

        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(err) = sink.persist(&snapshot).await {
                warn!(error = %err, "failed to persist custom commands");
            }
        });
    }

    /// Copy of the current map.
    #[must_use]
    pub fn snapshot(&self) -> CustomCommandMap {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// In-memory sink recording the last persisted snapshot. Test double and
/// fallback for setups without a cache directory.
#[derive(Default)]
pub struct MemorySink {
    last: Mutex<Option<CustomCommandMap>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_snapshot(&self) -> Option<CustomCommandMap> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl CustomCommandSink for MemorySink {
    async fn persist(&self, snapshot: &CustomCommandMap) -> anyhow::Result<()> {
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(snapshot.clone());
        Ok(())
    }
}
