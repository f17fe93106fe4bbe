//! Local key-value persistence. Per-exercise session state is namespaced as
//! `{kind}_{day}_{exercise}`; the training flag and its start timestamp are
//! global keys shared by the whole session shell.

pub const TRAINING_FLAG_KEY: &str = "isTraining";
pub const START_TIME_KEY: &str = "startTime";

const PER_EXERCISE_PREFIXES: &[&str] = &["series_", "finalized_", "date_"];

pub fn series_key(day: &str, exercise: &str) -> String {
    format!("series_{}_{}", day, exercise)
}

pub fn finalized_key(day: &str, exercise: &str) -> String {
    format!("finalized_{}_{}", day, exercise)
}

pub fn date_key(day: &str, exercise: &str) -> String {
    format!("date_{}_{}", day, exercise)
}

/// Storage seam so the session machine and shell stay testable off-browser.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn keys(&self) -> Vec<String>;
}

/// `window.localStorage` backend. Missing storage (disabled, sandboxed)
/// degrades to reads of nothing and silent writes.
pub struct LocalStore(Option<web_sys::Storage>);

impl LocalStore {
    pub fn new() -> Self {
        Self(web_sys::window().and_then(|w| w.local_storage().ok()).flatten())
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.0 {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.0 {
            let _ = storage.remove_item(key);
        }
    }

    fn keys(&self) -> Vec<String> {
        let Some(storage) = &self.0 else {
            return Vec::new();
        };
        let len = storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .collect()
    }
}

/// End-of-session sweep: every per-exercise key for every exercise, plus the
/// global training flags.
pub fn clear_session_state(store: &impl KvStore) {
    for key in store.keys() {
        if PER_EXERCISE_PREFIXES.iter().any(|p| key.starts_with(p)) {
            store.remove(&key);
        }
    }
    store.remove(TRAINING_FLAG_KEY);
    store.remove(START_TIME_KEY);
}

#[cfg(test)]
pub struct MemoryStore(std::cell::RefCell<std::collections::HashMap<String, String>>);

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self(std::cell::RefCell::new(std::collections::HashMap::new()))
    }
}

#[cfg(test)]
impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }
}
