//! Dedup Cache
//!
//! Settled resolutions keyed by question identity. Entries expire after the
//! TTL; expiry is lazy, swept before every lookup rather than on a timer.

use quizquorum_domain::{QuestionKey, Resolution};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    resolution: Resolution,
    inserted_at: Instant,
}

/// TTL-bounded answer cache
#[derive(Debug)]
pub struct AnswerCache {
    entries: HashMap<QuestionKey, CacheEntry>,
    ttl: Duration,
}

impl AnswerCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Drop every entry at least `ttl` old. Returns how many were removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < ttl);
        before - self.entries.len()
    }

    pub fn get(&self, key: &QuestionKey) -> Option<&Resolution> {
        self.entries.get(key).map(|entry| &entry.resolution)
    }

    pub fn contains(&self, key: &QuestionKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: QuestionKey, resolution: Resolution, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                resolution,
                inserted_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizquorum_domain::{QuestionInput, ResolutionMethod};

    fn key(text: &str) -> QuestionKey {
        QuestionKey::from_input(&QuestionInput::from(text))
    }

    fn resolution() -> Resolution {
        Resolution::new("A", 80, ResolutionMethod::Majority, vec![])
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let mut cache = AnswerCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert(key("old"), resolution(), start);
        cache.insert(key("new"), resolution(), start + Duration::from_secs(30));

        assert_eq!(cache.sweep(start + Duration::from_secs(59)), 0);
        assert_eq!(cache.sweep(start + Duration::from_secs(60)), 1);
        assert!(cache.get(&key("old")).is_none());
        assert!(cache.get(&key("new")).is_some());
    }

    #[test]
    fn test_zero_ttl_expires_everything() {
        let mut cache = AnswerCache::new(Duration::ZERO);
        let now = Instant::now();
        cache.insert(key("q"), resolution(), now);
        assert_eq!(cache.sweep(now), 1);
        assert!(cache.is_empty());
    }
}
