use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::*;

/// Best (lowest) move count per tier, `None` until a game of that tier is won.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    #[serde(default)]
    pub easy: Option<u32>,
    #[serde(default)]
    pub hard: Option<u32>,
}

impl BestScores {
    pub const fn get(&self, tier: Tier) -> Option<u32> {
        match tier {
            Tier::Easy => self.easy,
            Tier::Hard => self.hard,
        }
    }

    fn slot_mut(&mut self, tier: Tier) -> &mut Option<u32> {
        match tier {
            Tier::Easy => &mut self.easy,
            Tier::Hard => &mut self.hard,
        }
    }
}

/// Keeps the best scores in memory and writes them through to a [`Storage`] on every new record.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreStore<K> {
    storage: K,
    scores: BestScores,
}

impl<K: Storage> ScoreStore<K> {
    pub const KEY: &'static str = "twinflip:best-scores:v1";

    /// Loads the stored record, falling back to an empty one on any failure.
    pub fn load(storage: K) -> Self {
        let scores = Self::read(&storage).unwrap_or_else(|err| {
            log::warn!("Could not load best scores, starting empty: {}", err);
            BestScores::default()
        });
        Self { storage, scores }
    }

    fn read(storage: &K) -> Result<BestScores> {
        let Some(raw) = storage.get(Self::KEY)? else {
            return Ok(BestScores::default());
        };
        serde_json::from_str(&raw).map_err(|_| StorageError::Malformed.into())
    }

    fn write(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.scores).map_err(|_| StorageError::Malformed)?;
        self.storage.set(Self::KEY, &raw)?;
        Ok(())
    }

    pub fn scores(&self) -> BestScores {
        self.scores
    }

    pub fn best(&self, tier: Tier) -> Option<u32> {
        self.scores.get(tier)
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Records a win, returns whether it beat the previous best. Never gets worse.
    pub fn submit(&mut self, tier: Tier, moves: u32) -> bool {
        let slot = self.scores.slot_mut(tier);
        if slot.is_some_and(|best| best <= moves) {
            return false;
        }

        *slot = Some(moves);
        log::debug!("New best for {:?}: {} moves", tier, moves);
        if let Err(err) = self.write() {
            log::error!("Could not save best scores: {}", err);
        }
        true
    }
}

/// Formats a best score for display, `--` when there is none yet.
pub fn format_best(best: Option<u32>) -> String {
    best.map_or_else(|| "--".to_string(), |moves| moves.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> core::result::Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> core::result::Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn store_with(raw: &str) -> ScoreStore<MemoryStorage> {
        ScoreStore::load(MemoryStorage::new().with_entry(ScoreStore::<MemoryStorage>::KEY, raw))
    }

    #[test]
    fn loads_persisted_scores() {
        let store = store_with(r#"{"easy":9,"hard":null}"#);

        assert_eq!(store.best(Tier::Easy), Some(9));
        assert_eq!(store.best(Tier::Hard), None);
    }

    #[test]
    fn malformed_or_missing_content_falls_back_to_empty() {
        assert_eq!(store_with("not json").scores(), BestScores::default());
        assert_eq!(store_with(r#"{"easy":-3}"#).scores(), BestScores::default());
        assert_eq!(store_with("{}").scores(), BestScores::default());
        assert_eq!(
            ScoreStore::load(MemoryStorage::new()).scores(),
            BestScores::default()
        );
    }

    #[test]
    fn unavailable_storage_is_not_fatal() {
        let mut store = ScoreStore::load(BrokenStorage);

        assert_eq!(store.best(Tier::Easy), None);
        assert!(store.submit(Tier::Easy, 14));
        assert_eq!(store.best(Tier::Easy), Some(14));
    }

    #[test]
    fn best_score_never_gets_worse() {
        let mut store = store_with(r#"{"easy":10,"hard":null}"#);

        assert!(!store.submit(Tier::Easy, 12));
        assert_eq!(store.best(Tier::Easy), Some(10));
        assert!(!store.submit(Tier::Easy, 10));

        assert!(store.submit(Tier::Easy, 8));
        assert_eq!(store.best(Tier::Easy), Some(8));
        assert_eq!(
            store.storage().entry(ScoreStore::<MemoryStorage>::KEY),
            Some(r#"{"easy":8,"hard":null}"#)
        );
    }

    #[test]
    fn first_win_of_a_tier_is_a_record() {
        let mut store = ScoreStore::load(NullStorage);

        assert!(store.submit(Tier::Hard, 30));
        assert_eq!(store.best(Tier::Hard), Some(30));
        assert_eq!(store.best(Tier::Easy), None);
    }

    #[test]
    fn best_is_formatted_with_placeholder() {
        assert_eq!(format_best(None), "--");
        assert_eq!(format_best(Some(7)), "7");
    }
}
