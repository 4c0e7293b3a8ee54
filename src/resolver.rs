//! Maps a game day to the entity assigned to it.

use crate::cache::DailyCache;
use crate::errors::ResolveError;
use crate::model::complexity::ComplexityCase;
use crate::model::daily::{DailyTarget, GameMode};
use crate::model::language::Language;
use crate::model::regex::RegexChallenge;
use crate::model::snippet::Snippet;
use crate::store::Store;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct DailyResolver {
    store: Arc<dyn Store>,
    cache: Arc<dyn DailyCache>,
}

impl DailyResolver {
    pub fn new(store: Arc<dyn Store>, cache: Arc<dyn DailyCache>) -> Self {
        Self { store, cache }
    }

    pub async fn resolve(&self, mode: GameMode, date: NaiveDate) -> Result<DailyTarget, ResolveError> {
        if let Some(target) = self.cache.get(mode, date) {
            debug!("Daily {} target for {} served from cache", mode, date);
            return Ok(target);
        }

        let assignment = self.store.daily_assignment(date).await?;
        let Some(id) = assignment.and_then(|assignment| assignment.id_for(mode)) else {
            warn!("No {} assignment found for {}", mode, date);
            return Err(ResolveError::NotFound { mode, date });
        };

        let target = match mode {
            GameMode::Language => self.store.language_by_id(id).await?.map(DailyTarget::Language),
            GameMode::Snippet => self.store.snippet_by_id(id).await?.map(DailyTarget::Snippet),
            GameMode::Regex => self.store.regex_by_id(id).await?.map(DailyTarget::Regex),
            GameMode::Complexity => self
                .store
                .complexity_by_id(id)
                .await?
                .map(DailyTarget::Complexity),
        }
        .ok_or(ResolveError::DataIntegrity { mode, date, id })?;

        self.cache.put(mode, date, target.clone());
        Ok(target)
    }

    pub async fn language(&self, date: NaiveDate) -> Result<Language, ResolveError> {
        match self.resolve(GameMode::Language, date).await? {
            DailyTarget::Language(language) => Ok(language),
            other => Err(mismatch(GameMode::Language, date, &other)),
        }
    }

    pub async fn snippet(&self, date: NaiveDate) -> Result<Snippet, ResolveError> {
        match self.resolve(GameMode::Snippet, date).await? {
            DailyTarget::Snippet(snippet) => Ok(snippet),
            other => Err(mismatch(GameMode::Snippet, date, &other)),
        }
    }

    pub async fn regex(&self, date: NaiveDate) -> Result<RegexChallenge, ResolveError> {
        match self.resolve(GameMode::Regex, date).await? {
            DailyTarget::Regex(challenge) => Ok(challenge),
            other => Err(mismatch(GameMode::Regex, date, &other)),
        }
    }

    pub async fn complexity(&self, date: NaiveDate) -> Result<ComplexityCase, ResolveError> {
        match self.resolve(GameMode::Complexity, date).await? {
            DailyTarget::Complexity(case) => Ok(case),
            other => Err(mismatch(GameMode::Complexity, date, &other)),
        }
    }

    /// The language a snippet is written in. A snippet pointing at a missing
    /// language is corrupt data, not a missing challenge.
    pub async fn snippet_language(
        &self,
        date: NaiveDate,
        snippet: &Snippet,
    ) -> Result<Language, ResolveError> {
        self.store
            .language_by_id(snippet.language_id)
            .await?
            .ok_or(ResolveError::DataIntegrity {
                mode: GameMode::Snippet,
                date,
                id: snippet.language_id,
            })
    }
}

// Only reachable through a cache implementation storing under the wrong key.
fn mismatch(mode: GameMode, date: NaiveDate, found: &DailyTarget) -> ResolveError {
    let id = match found {
        DailyTarget::Language(language) => language.id,
        DailyTarget::Snippet(snippet) => snippet.id,
        DailyTarget::Regex(challenge) => challenge.id,
        DailyTarget::Complexity(case) => case.id,
    };
    warn!("Cache returned a {} target for {} on {}", found.mode(), mode, date);
    ResolveError::DataIntegrity { mode, date, id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryDailyCache, NoCache};
    use crate::model::daily::DailyAssignment;
    use crate::store::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn regex(id: i64) -> RegexChallenge {
        RegexChallenge {
            id,
            source_text: format!("source {id}"),
            target_text: format!("target {id}"),
            instruction: "swap".to_string(),
        }
    }

    fn assignment(date: NaiveDate, regex_id: Option<i64>) -> DailyAssignment {
        DailyAssignment {
            date,
            language_id: None,
            snippet_id: None,
            regex_id,
            complexity_id: None,
        }
    }

    fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.add_regex(regex(1));
        store.add_regex(regex(2));
        store.set_daily_assignment(assignment(day(1), Some(1)));
        store.set_daily_assignment(assignment(day(2), Some(2)));
        store
    }

    #[tokio::test]
    async fn test_resolve_is_deterministic() {
        let resolver = DailyResolver::new(seeded_store(), Arc::new(NoCache));

        let first = resolver.regex(day(1)).await.unwrap();
        let second = resolver.regex(day(1)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.id, 1);
        assert_eq!(resolver.regex(day(2)).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_resolve_caches_per_date() {
        let store = seeded_store();
        let cache = Arc::new(MemoryDailyCache::new());
        let resolver = DailyResolver::new(store.clone(), cache.clone());

        assert_eq!(resolver.regex(day(1)).await.unwrap().id, 1);
        assert_eq!(cache.len(), 1);

        // Rows are immutable in production; changing one here proves the
        // second read comes from the cache.
        store.add_regex(RegexChallenge {
            instruction: "changed".to_string(),
            ..regex(1)
        });
        assert_eq!(resolver.regex(day(1)).await.unwrap().instruction, "swap");

        assert_eq!(resolver.regex(day(2)).await.unwrap().id, 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.get(GameMode::Regex, day(1)).map(|target| target.mode()),
            Some(GameMode::Regex)
        );
    }

    #[tokio::test]
    async fn test_missing_assignment_is_not_found() {
        let resolver = DailyResolver::new(seeded_store(), Arc::new(NoCache));

        let err = resolver.regex(day(3)).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { mode: GameMode::Regex, .. }));

        let err = resolver.language(day(1)).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { mode: GameMode::Language, .. }));
    }

    #[tokio::test]
    async fn test_dangling_id_is_data_integrity() {
        let store = seeded_store();
        store.set_daily_assignment(assignment(day(4), Some(99)));
        let resolver = DailyResolver::new(store, Arc::new(NoCache));

        let err = resolver.regex(day(4)).await.unwrap_err();
        assert!(matches!(err, ResolveError::DataIntegrity { id: 99, .. }));
    }
}
