use crate::domain::value_objects::CacheType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheTypeStatus {
    pub cache_type: CacheType,
    pub item_count: u64,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub is_stale: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheStatusSnapshot {
    pub total_items: u64,
    pub stale_items: u64,
    pub cache_types: Vec<CacheTypeStatus>,
}

impl CacheStatusSnapshot {
    pub fn new(total_items: u64, stale_items: u64, cache_types: Vec<CacheTypeStatus>) -> Self {
        Self {
            total_items,
            stale_items,
            cache_types,
        }
    }
}
