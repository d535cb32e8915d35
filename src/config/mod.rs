use crate::storage::WATCHLIST_KEY;

pub(crate) const DEFAULT_DEBOUNCE_MS: i32 = 500;

/// Runtime knobs for the search sync and the watchlist store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    /// Quiet period before typed text becomes a navigation.
    pub debounce_ms: i32,
    /// localStorage key holding the watchlist snapshot.
    pub storage_key: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            storage_key: WATCHLIST_KEY.to_string(),
        }
    }
}

impl SyncConfig {
    /// Negative delays make no sense for `setTimeout`; treat them as zero.
    pub fn with_debounce_ms(mut self, ms: i32) -> Self {
        self.debounce_ms = ms.max(0);
        self
    }

    /// Read overrides from `window.ENV` (`DEBOUNCE_MS`, or legacy
    /// `debounce_ms`), falling back to defaults.
    pub fn from_env() -> Self {
        let config = Self::default();

        let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) else {
            return config;
        };
        if env.is_undefined() || !env.is_object() {
            return config;
        }

        for key in ["DEBOUNCE_MS", "debounce_ms"] {
            if let Ok(v) = js_sys::Reflect::get(&env, &key.into()) {
                if let Some(ms) = v.as_f64() {
                    return config.with_debounce_ms(ms as i32);
                }
            }
        }

        config
    }
}
