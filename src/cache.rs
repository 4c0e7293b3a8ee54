//! Cache of resolved daily targets.
//!
//! Entries are keyed by mode and date. Only the newest date seen and the day
//! before it are kept: today's targets and the yesterday reveal both stay warm
//! while older days are dropped on rollover.

use crate::model::daily::{DailyTarget, GameMode};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

pub trait DailyCache: Send + Sync {
    fn get(&self, mode: GameMode, date: NaiveDate) -> Option<DailyTarget>;
    fn put(&self, mode: GameMode, date: NaiveDate, target: DailyTarget);
}

#[derive(Debug, Default)]
pub struct MemoryDailyCache {
    entries: RwLock<HashMap<(GameMode, NaiveDate), DailyTarget>>,
}

impl MemoryDailyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DailyCache for MemoryDailyCache {
    fn get(&self, mode: GameMode, date: NaiveDate) -> Option<DailyTarget> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(mode, date))
            .cloned()
    }

    fn put(&self, mode: GameMode, date: NaiveDate, target: DailyTarget) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let newest = entries
            .keys()
            .map(|(_, cached_date)| *cached_date)
            .fold(date, NaiveDate::max);
        let oldest_kept = newest.pred_opt().unwrap_or(newest);
        if date < oldest_kept {
            return;
        }
        entries.retain(|(_, cached_date), _| *cached_date >= oldest_kept);
        entries.insert((mode, date), target);
    }
}

/// Always misses; every resolve goes to the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl DailyCache for NoCache {
    fn get(&self, _mode: GameMode, _date: NaiveDate) -> Option<DailyTarget> {
        None
    }

    fn put(&self, _mode: GameMode, _date: NaiveDate, _target: DailyTarget) {}
}
