//! Process-wide default configuration.
//!
//! Clients built without an explicit configuration start from a snapshot of
//! this value. It is lazily initialised to [`DoohlyConfig::default`] and can be
//! mutated in place, replaced wholesale, or reset.
//!
//! Concurrent mutation is not coordinated beyond the lock around each call:
//! two callers racing [`configure`] and [`reset_configuration`] see whichever
//! ran last.

use crate::config::DoohlyConfig;
use crate::Result;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

static CONFIGURATION: OnceLock<RwLock<DoohlyConfig>> = OnceLock::new();

fn cell() -> &'static RwLock<DoohlyConfig> {
    CONFIGURATION.get_or_init(|| RwLock::new(DoohlyConfig::default()))
}

/// Snapshot of the current default configuration.
#[must_use]
pub fn configuration() -> DoohlyConfig {
    cell()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Mutate the default configuration in place, then validate it.
///
/// The mutation is kept even when validation fails.
///
/// # Errors
///
/// Returns [`Error::ConfigError`](crate::Error::ConfigError) if the resulting
/// configuration has no token or an out-of-range field.
pub fn configure<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut DoohlyConfig),
{
    let mut guard = cell().write().unwrap_or_else(PoisonError::into_inner);
    f(&mut *guard);
    debug!(base_url = %guard.api_base_url, "Updated default Doohly configuration");
    guard.validate_config()
}

/// Replace the default configuration wholesale.
pub fn set_configuration(config: DoohlyConfig) {
    debug!(base_url = %config.api_base_url, "Replaced default Doohly configuration");
    *cell().write().unwrap_or_else(PoisonError::into_inner) = config;
}

/// Restore the default configuration to its initial values.
pub fn reset_configuration() {
    set_configuration(DoohlyConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    static LOCK: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        reset_configuration();
        guard
    }

    #[test]
    fn test_configure_mutates_in_place() {
        let _guard = serial();

        configure(|config| {
            config.api_token = Some("my_token".to_string());
            config.timeout_secs = 60;
        })
        .unwrap();

        let config = configuration();
        assert_eq!(config.token(), Some("my_token"));
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_configure_validates() {
        let _guard = serial();

        let err = configure(|config| config.api_token = None).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_configure_keeps_mutation_on_failure() {
        let _guard = serial();

        let result = configure(|config| config.timeout_secs = 90);
        assert!(result.is_err());
        assert_eq!(configuration().timeout_secs, 90);
    }

    #[test]
    fn test_reset_clears_token() {
        let _guard = serial();

        configure(|config| config.api_token = Some("test".to_string())).unwrap();
        reset_configuration();

        assert!(configuration().api_token.is_none());
        assert_eq!(configuration(), DoohlyConfig::default());
    }

    #[test]
    fn test_set_configuration_replaces() {
        let _guard = serial();

        set_configuration(DoohlyConfig::new("replaced").with_base_url("http://localhost:1"));

        let config = configuration();
        assert_eq!(config.token(), Some("replaced"));
        assert_eq!(config.api_base_url, "http://localhost:1");
    }
}
