use crate::models::Channel;
use crate::services::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const DEFAULT_CHANNEL_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
struct CachedChannel {
    channel: Channel,
    cached_at: DateTime<Utc>,
}

/// Channel statistics keyed by channel id. Entries are never evicted; an
/// entry whose age reaches the TTL is simply treated as absent on read.
pub struct ChannelCache {
    entries: Mutex<HashMap<String, CachedChannel>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ChannelCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        ChannelCache {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn with_default_ttl(clock: Arc<dyn Clock>) -> Self {
        Self::new(Duration::hours(DEFAULT_CHANNEL_TTL_HOURS), clock)
    }

    pub fn get(&self, channel_id: &str) -> Option<Channel> {
        let now = self.clock.now();
        if let Ok(entries) = self.entries.lock() {
            if let Some(entry) = entries.get(channel_id) {
                if now - entry.cached_at < self.ttl {
                    return Some(entry.channel.clone());
                }
                debug!("Channel cache entry for {channel_id} is stale");
            }
        }
        None
    }

    pub fn put(&self, channel: Channel) {
        let cached_at = self.clock.now();
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(channel.id.clone(), CachedChannel { channel, cached_at });
        }
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        if let Ok(entries) = self.entries.lock() {
            entries.len()
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
