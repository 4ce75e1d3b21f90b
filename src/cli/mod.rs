//! Command-line interface module.

mod args;
mod common;
pub mod filter;
pub mod inspect;

pub use args::{Cli, Commands, FilterArgs, InspectArgs, OverrideArgs};

use anyhow::Result;
use std::path::Path;

use crate::config::{MedialConfig, cfg, init_config};
use crate::filter::MedialFilter;

/// Load the config file, apply overrides and install it as the active
/// configuration, then build a filter from the installed snapshot.
pub fn load_filter(config_path: &Path, overrides: &OverrideArgs) -> Result<MedialFilter> {
    init_config(MedialConfig::load(config_path, &overrides.to_overrides())?);
    Ok(MedialFilter::from_config(cfg()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::handle::HANDLE_LOCK;
    use std::sync::Arc;

    #[test]
    fn test_load_filter_reads_installed_config() {
        let _guard = HANDLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medial.toml");
        std::fs::write(&path, "[site]\nroot = \"https://file.example/\"\n").unwrap();

        let overrides = OverrideArgs {
            formats: Some("4".into()),
            ..Default::default()
        };
        let filter = load_filter(&path, &overrides).unwrap();
        let active = cfg();

        assert!(std::ptr::eq(filter.config(), Arc::as_ptr(&active)));
        assert_eq!(active.site_root(), "https://file.example");
        assert!(active.filter.allows("4"));
        assert!(!active.filter.allows("1"));
    }

    #[test]
    fn test_load_filter_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medial.toml");
        std::fs::write(&path, "[render]\nwidth = 0\n").unwrap();

        let overrides = OverrideArgs {
            site_root: Some("https://cli.example".into()),
            ..Default::default()
        };
        assert!(load_filter(&path, &overrides).is_err());
    }
}
