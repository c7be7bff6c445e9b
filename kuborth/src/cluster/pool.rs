//! `ClusterPool` — keeps per-(kubeconfig-path, context-name) clients alive
//! for a short idle window so switching back and forth between contexts
//! doesn't pay reconnect cost every time, without leaking connections
//! forever (§3 "Lifecycles").

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::ClusterClient;

const IDLE_EVICTION: Duration = Duration::from_secs(120);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PoolKey {
    pub kubeconfig_path: String,
    pub context: String,
}

struct Entry {
    client: Arc<dyn ClusterClient>,
    last_used: Instant,
}

/// Caches `ClusterClient` instances, building new ones via a caller-supplied
/// factory and evicting entries idle for more than two minutes.
pub struct ClusterPool {
    entries: Mutex<HashMap<PoolKey, Entry>>,
}

impl Default for ClusterPool {
    fn default() -> Self {
        ClusterPool { entries: Mutex::new(HashMap::new()) }
    }
}

impl ClusterPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a client for `key`, constructing it via `build` on a cache miss
    /// or after idle eviction.
    pub fn get<F>(&self, key: &PoolKey, build: F) -> Arc<dyn ClusterClient>
    where
        F: FnOnce() -> Arc<dyn ClusterClient>,
    {
        let mut entries = self.entries.lock().unwrap();
        self.evict_idle_locked(&mut entries);
        if let Some(entry) = entries.get_mut(key) {
            entry.last_used = Instant::now();
            return entry.client.clone();
        }
        let client = build();
        entries.insert(
            key.clone(),
            Entry { client: client.clone(), last_used: Instant::now() },
        );
        client
    }

    fn evict_idle_locked(&self, entries: &mut HashMap<PoolKey, Entry>) {
        let now = Instant::now();
        entries.retain(|_, e| now.duration_since(e.last_used) < IDLE_EVICTION);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
