use crate::storage::{self, KvStore};
use crate::types::LoggedSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    InProgress,
    Finalized,
}

/// Per-exercise, per-day session state. The logged-set list is append-only
/// and chronological; finalizing freezes it for the rest of the day. Every
/// mutation is written straight through the injected store so a reload
/// mid-session loses nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseSession {
    day: String,
    exercise: String,
    sets: Vec<LoggedSet>,
    finalized: bool,
}

impl ExerciseSession {
    /// Rehydrate from the store. Persisted state only survives if it was
    /// written today; anything older (or unreadable) is discarded and its
    /// keys removed, so the exercise starts the day at `Idle`.
    pub fn load(store: &impl KvStore, day: &str, exercise: &str, today: &str) -> Self {
        let mut session = Self {
            day: day.to_string(),
            exercise: exercise.to_string(),
            sets: Vec::new(),
            finalized: false,
        };

        let stored_date = store.get(&storage::date_key(day, exercise));
        if stored_date.as_deref() != Some(today) {
            store.remove(&storage::series_key(day, exercise));
            store.remove(&storage::finalized_key(day, exercise));
            return session;
        }

        session.sets = store
            .get(&storage::series_key(day, exercise))
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        session.finalized =
            store.get(&storage::finalized_key(day, exercise)).as_deref() == Some("true");
        session
    }

    pub fn phase(&self) -> SessionPhase {
        if self.finalized {
            SessionPhase::Finalized
        } else if self.sets.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::InProgress
        }
    }

    pub fn sets(&self) -> &[LoggedSet] {
        &self.sets
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Displayed set number for the next entry (index + 1).
    pub fn next_set_number(&self) -> usize {
        self.sets.len() + 1
    }

    pub fn target_reached(&self, target_series: u32) -> bool {
        self.sets.len() as u32 >= target_series
    }

    /// Append a completed set and persist it. Returns false without touching
    /// anything when the session is already finalized; the caller starts the
    /// rest countdown and fires the remote write only on true.
    pub fn log_set(&mut self, store: &impl KvStore, set: LoggedSet, today: &str) -> bool {
        if self.finalized {
            return false;
        }
        self.sets.push(set);
        if let Ok(json) = serde_json::to_string(&self.sets) {
            store.set(&storage::series_key(&self.day, &self.exercise), &json);
        }
        store.set(&storage::date_key(&self.day, &self.exercise), today);
        true
    }

    /// Mark the exercise done for today. Idempotent.
    pub fn finalize(&mut self, store: &impl KvStore) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        store.set(&storage::finalized_key(&self.day, &self.exercise), "true");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const TODAY: &str = "Mon Feb 02 2026";
    const YESTERDAY: &str = "Sun Feb 01 2026";

    fn a_set(reps: u32) -> LoggedSet {
        LoggedSet {
            reps,
            rpe: 8,
            weight: "80".into(),
        }
    }

    #[test]
    fn phases_progress_from_idle_to_finalized() {
        let store = MemoryStore::new();
        let mut session = ExerciseSession::load(&store, "LUNES", "Sentadilla", TODAY);
        assert_eq!(session.phase(), SessionPhase::Idle);

        assert!(session.log_set(&store, a_set(10), TODAY));
        assert_eq!(session.phase(), SessionPhase::InProgress);

        session.finalize(&store);
        assert_eq!(session.phase(), SessionPhase::Finalized);
    }

    #[test]
    fn logging_persists_and_reloads_within_the_same_day() {
        let store = MemoryStore::new();
        let mut session = ExerciseSession::load(&store, "LUNES", "Sentadilla", TODAY);
        session.log_set(&store, a_set(10), TODAY);
        session.log_set(&store, a_set(8), TODAY);

        let reloaded = ExerciseSession::load(&store, "LUNES", "Sentadilla", TODAY);
        assert_eq!(reloaded.sets(), session.sets());
        assert_eq!(reloaded.next_set_number(), 3);
    }

    #[test]
    fn stale_state_is_discarded_and_its_keys_removed() {
        let store = MemoryStore::new();
        let mut session = ExerciseSession::load(&store, "LUNES", "Sentadilla", YESTERDAY);
        session.log_set(&store, a_set(10), YESTERDAY);
        session.finalize(&store);

        let fresh = ExerciseSession::load(&store, "LUNES", "Sentadilla", TODAY);
        assert_eq!(fresh.phase(), SessionPhase::Idle);
        assert!(fresh.sets().is_empty());
        assert_eq!(store.get("series_LUNES_Sentadilla"), None);
        assert_eq!(store.get("finalized_LUNES_Sentadilla"), None);
    }

    #[test]
    fn corrupt_stored_sets_read_as_empty() {
        let store = MemoryStore::new();
        store.set("date_LUNES_Sentadilla", TODAY);
        store.set("series_LUNES_Sentadilla", "not json");

        let session = ExerciseSession::load(&store, "LUNES", "Sentadilla", TODAY);
        assert!(session.sets().is_empty());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn finalized_session_refuses_new_sets() {
        let store = MemoryStore::new();
        let mut session = ExerciseSession::load(&store, "LUNES", "Sentadilla", TODAY);
        session.log_set(&store, a_set(10), TODAY);
        session.finalize(&store);

        assert!(!session.log_set(&store, a_set(9), TODAY));
        assert_eq!(session.sets().len(), 1);
    }

    #[test]
    fn finalize_is_idempotent() {
        let store = MemoryStore::new();
        let mut session = ExerciseSession::load(&store, "LUNES", "Sentadilla", TODAY);
        session.log_set(&store, a_set(10), TODAY);
        session.finalize(&store);
        let before = session.clone();
        session.finalize(&store);
        assert_eq!(session, before);
    }

    #[test]
    fn target_is_reached_at_the_configured_set_count() {
        let store = MemoryStore::new();
        let mut session = ExerciseSession::load(&store, "LUNES", "Sentadilla", TODAY);
        session.log_set(&store, a_set(10), TODAY);
        session.log_set(&store, a_set(10), TODAY);
        assert!(!session.target_reached(3));
        session.log_set(&store, a_set(10), TODAY);
        assert!(session.target_reached(3));
    }
}
