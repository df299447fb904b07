//! Ephemeral per-visitor state, used only to render acknowledgment pages.

use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// What a visitor last submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorState {
    pub duplicate_attempt: bool,
    pub name: String,
    pub lastname: String,
    pub question_1: String,
}

impl VisitorState {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }
}

/// In-memory store keyed by an opaque visitor id; entries expire after `ttl`
/// without access.
#[derive(Debug)]
pub struct VisitorStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, VisitorState)>>,
}

impl VisitorStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// 128 random bits, hex.
    pub fn new_id() -> String {
        format!("{:032x}", rand::thread_rng().r#gen::<u128>())
    }

    pub fn get(&self, id: &str) -> Option<VisitorState> {
        let mut map = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        let now = Instant::now();
        map.retain(|_, (seen, _)| now.duration_since(*seen) < self.ttl);
        map.get_mut(id).map(|(seen, state)| {
            *seen = now;
            state.clone()
        })
    }

    pub fn put(&self, id: &str, state: VisitorState) {
        let mut map = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        map.insert(id.to_string(), (Instant::now(), state));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
