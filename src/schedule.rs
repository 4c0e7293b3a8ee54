//! Deterministic selection of future daily assignments.
//!
//! The pick for a day depends only on the mode, the date and the candidate
//! list, so re-running the scheduler (or running it on two hosts) agrees.

use crate::clock::date_key;
use crate::errors::StoreError;
use crate::model::daily::{GameMode, NewDailyAssignment};
use crate::store::Store;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info};

/// xmur3 string hash, finalized once.
fn xmur3(seed: &str) -> u32 {
    let units: Vec<u16> = seed.encode_utf16().collect();
    let mut h = 1_779_033_703_u32 ^ units.len() as u32;
    for unit in units {
        h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// First output of a mulberry32 generator seeded with `seed`.
fn mulberry32(seed: u32) -> u32 {
    let state = seed.wrapping_add(0x6D2B_79F5);
    let mut t = (state ^ (state >> 15)).wrapping_mul(state | 1);
    t = t.wrapping_add(t ^ (t >> 7));
    t ^ (t >> 14)
}

/// Index in `[0, len)` derived from `seed`, or `None` for an empty list.
pub fn daily_index(seed: &str, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let roll = u64::from(mulberry32(xmur3(seed)));
    Some(((roll * len as u64) >> 32) as usize)
}

pub fn seed_for(mode: GameMode, date: NaiveDate) -> String {
    format!("{}-{}", mode, date_key(date))
}

/// Ascending candidate ids per mode.
pub type Candidates = HashMap<GameMode, Vec<i64>>;

pub fn plan_assignment(date: NaiveDate, candidates: &Candidates) -> NewDailyAssignment {
    let pick = |mode: GameMode| {
        let ids = candidates.get(&mode)?;
        let index = daily_index(&seed_for(mode, date), ids.len())?;
        ids.get(index).copied()
    };

    NewDailyAssignment {
        date,
        language_id: pick(GameMode::Language),
        snippet_id: pick(GameMode::Snippet),
        regex_id: pick(GameMode::Regex),
        complexity_id: pick(GameMode::Complexity),
    }
}

/// Creates assignments for `from .. from + days` where none exist yet.
/// Returns how many were created.
pub async fn schedule_ahead(
    store: &dyn Store,
    from: NaiveDate,
    days: u32,
) -> Result<usize, StoreError> {
    let mut candidates = Candidates::new();
    for mode in GameMode::ALL {
        let ids = store.candidate_ids(mode).await?;
        debug!("{} {} candidates available for scheduling", ids.len(), mode);
        candidates.insert(mode, ids);
    }

    let mut created = 0;
    for offset in 0..days {
        let Some(date) = from.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        if store
            .insert_daily_assignment(plan_assignment(date, &candidates))
            .await?
        {
            created += 1;
        } else {
            debug!("Assignment for {} already exists, left untouched", date);
        }
    }

    info!(
        "Scheduled {} new daily assignments starting {}",
        created, from
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::daily::DailyAssignment;
    use crate::model::regex::RegexChallenge;
    use crate::store::MemoryStore;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_daily_index_known_values() {
        assert_eq!(daily_index("2024-01-01", 10), Some(1));
        assert_eq!(daily_index("language-2024-01-01", 4), Some(2));
        assert_eq!(daily_index("regex-2024-01-02", 7), Some(0));
        assert_eq!(daily_index("snippet-2024-03-15", 100), Some(64));
    }

    #[test]
    fn test_daily_index_bounds() {
        assert_eq!(daily_index("anything", 0), None);
        for n in 1..50 {
            let index = daily_index(&format!("complexity-2024-02-{n:02}"), n).unwrap();
            assert!(index < n);
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        let mut candidates = Candidates::new();
        candidates.insert(GameMode::Language, (1..=20).collect());
        candidates.insert(GameMode::Regex, vec![]);

        let first = plan_assignment(day(1, 1), &candidates);
        let second = plan_assignment(day(1, 1), &candidates);

        assert_eq!(first, second);
        assert!(first.language_id.is_some());
        assert_eq!(first.regex_id, None);
        assert_eq!(first.snippet_id, None);
    }

    #[tokio::test]
    async fn test_schedule_ahead_keeps_existing_rows() {
        let store = MemoryStore::new();
        for id in 1..=3 {
            store.add_regex(RegexChallenge {
                id,
                source_text: "a".to_string(),
                target_text: "b".to_string(),
                instruction: "swap".to_string(),
            });
        }
        let pinned = DailyAssignment {
            date: day(1, 2),
            language_id: None,
            snippet_id: None,
            regex_id: Some(42),
            complexity_id: None,
        };
        store.set_daily_assignment(pinned.clone());

        let created = schedule_ahead(&store, day(1, 1), 5).await.unwrap();
        assert_eq!(created, 4);
        assert_eq!(store.daily_assignment(day(1, 2)).await.unwrap(), Some(pinned));

        let first = store.daily_assignment(day(1, 1)).await.unwrap().unwrap();
        assert!(matches!(first.regex_id, Some(1..=3)));

        assert_eq!(schedule_ahead(&store, day(1, 1), 5).await.unwrap(), 0);
    }
}
