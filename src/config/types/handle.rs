//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so a
//! host can swap settings while filter calls are in flight. Each call takes
//! one snapshot and uses it throughout.

use crate::config::MedialConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<MedialConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(MedialConfig::default()));

/// Snapshot of the active configuration.
#[inline]
pub fn cfg() -> Arc<MedialConfig> {
    CONFIG.load_full()
}

/// Install `config` as the active configuration.
#[inline]
pub fn init_config(config: MedialConfig) -> Arc<MedialConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}

/// Serializes tests that install a global config.
#[cfg(test)]
pub(crate) static HANDLE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_replaces_snapshot() {
        let _guard = HANDLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut config = MedialConfig::default();
        config.site.root = "https://handle.example".into();

        let installed = init_config(config);
        assert_eq!(installed.site.root, "https://handle.example");
        assert!(Arc::ptr_eq(&installed, &cfg()));
    }
}
