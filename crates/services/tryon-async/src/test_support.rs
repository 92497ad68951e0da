//! Test-only utilities: scoped env overrides and progress-stream body builders.

/// Environment overrides that are undone when the value is dropped.
///
/// Each key's original value is captured the first time the key is touched, and
/// all keys are put back in reverse order on drop. Mutating the process
/// environment races with other threads, so callers run under `#[serial(env)]`.
#[derive(Default)]
#[must_use = "overrides are undone as soon as this is dropped"]
pub struct ScopedEnv {
    originals: Vec<(&'static str, Option<String>)>,
}

impl ScopedEnv {
    /// Starts with no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value` for the lifetime of `self`.
    pub fn set(mut self, key: &'static str, value: &str) -> Self {
        self.remember(key);
        unsafe { std::env::set_var(key, value) };
        self
    }

    /// Unsets `key` for the lifetime of `self`.
    pub fn unset(mut self, key: &'static str) -> Self {
        self.remember(key);
        unsafe { std::env::remove_var(key) };
        self
    }

    fn remember(&mut self, key: &'static str) {
        if self.originals.iter().all(|(k, _)| *k != key) {
            self.originals.push((key, std::env::var(key).ok()));
        }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, original) in self.originals.drain(..).rev() {
            match original {
                Some(v) => unsafe { std::env::set_var(key, v) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

/// Formats one progress-stream frame the way the server writes it.
#[must_use]
pub fn frame(payload: &serde_json::Value) -> String {
    format!("data: {payload}\n\n")
}

/// Concatenates frames into a complete response body.
#[must_use]
pub fn stream_body(payloads: &[serde_json::Value]) -> String {
    payloads.iter().map(frame).collect()
}
