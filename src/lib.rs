//! Binds environment variables onto the fields of nested configuration records.
//!
//! Every leaf field gets a variable name derived from its prefix and field
//! path (`MY` + `nested.big_int_pointer` -> `MY_NESTED_BIG_INT_POINTER`).
//! Loading never stops at the first bad value: every rejected variable is
//! collected into one [`EnvErrors`] report, which post-load checks made with
//! [`ensure`] extend.
//!
//! ```
//! use envbind::{impl_record, Loader, MapSource};
//!
//! #[derive(Debug, Default)]
//! struct Database {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default)]
//! struct AppConfig {
//!     debug: bool,
//!     database: Option<Database>,
//! }
//!
//! impl_record!(Database { host, port });
//! impl_record!(AppConfig { debug, database });
//!
//! let source = MapSource::new()
//!     .with("APP_DEBUG", "true")
//!     .with("APP_DATABASE_PORT", "0");
//! let loader = Loader::new(source);
//!
//! let mut cfg = AppConfig { database: Some(Database::default()), ..AppConfig::default() };
//! let result = loader.load(&mut cfg, "APP");
//! let port = cfg.database.as_ref().map_or(0, |db| db.port);
//! let result = loader.ensure(result, "APP_DATABASE_PORT", port > 0, "must be positive");
//!
//! assert!(cfg.debug);
//! assert!(result.unwrap_err().to_string().contains("APP_DATABASE_PORT must be positive: got \"0\""));
//! ```

mod classify;
mod errors;
mod logger;
mod macros;
mod naming;
mod parse;
mod redact;
mod source;
mod terminal;
mod traits;
mod traversal;

use std::error::Error;

pub use classify::{classify, FieldClass};
pub use errors::{merge, EnvErrors, InvalidKey, ParseError};
pub use logger::{log_with_prefix, render};
pub use naming::{env_key, env_segment};
pub use parse::Leaf;
pub use redact::{is_sensitive, REDACTED};
pub use source::{EnvSource, MapSource, ProcessEnv};
pub use terminal::Terminal;
pub use traits::{Field, FromEnv, Inspector, Record, Visitor};
pub use traversal::Loader;

/// Binds `record` from the process environment, under `prefix`.
pub fn load_with_prefix(record: &mut dyn Record, prefix: &str) -> Result<(), EnvErrors> {
    Loader::new(ProcessEnv).load(record, prefix)
}

/// Like [`load_with_prefix`], but any invalid variable is fatal.
///
/// # Panics
///
/// Panics with the full report when any variable could not be bound.
pub fn must_load_with_prefix(record: &mut dyn Record, prefix: &str) {
    if let Err(errors) = load_with_prefix(record, prefix) {
        panic!("{errors}");
    }
}

/// Adds a post-load check to the result of [`load_with_prefix`].
///
/// The raw value shown in the report is read from the process environment.
pub fn ensure(
    result: Result<(), EnvErrors>,
    key: &str,
    predicate: bool,
    message: impl Into<String>,
) -> Result<(), EnvErrors> {
    Loader::new(ProcessEnv).ensure(result, key, predicate, message)
}

/// [`ensure`] for type-erased errors.
///
/// # Panics
///
/// Panics when `err` is not an [`EnvErrors`].
pub fn ensure_boxed(
    err: Option<Box<dyn Error + Send + Sync>>,
    key: &str,
    predicate: bool,
    message: impl Into<String>,
) -> Option<Box<dyn Error + Send + Sync>> {
    Loader::new(ProcessEnv).ensure_boxed(err, key, predicate, message)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    /// Restores the touched variables when dropped.
    struct EnvGuard {
        entries: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            let entries = vars
                .iter()
                .map(|(name, value)| {
                    let previous = env::var(name).ok();
                    env::set_var(name, value);
                    (*name, previous)
                })
                .collect();
            Self { entries }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (name, value) in self.entries.drain(..) {
                match value {
                    Some(value) => env::set_var(name, value),
                    None => env::remove_var(name),
                }
            }
        }
    }

    #[derive(Debug, Default)]
    struct Settings {
        int: i64,
        some_password: String,
    }

    crate::impl_record!(Settings { int, some_password });

    #[test]
    fn test_load_from_process_env() {
        let _guard = EnvGuard::set(&[("ENVBIND_LOAD_INT", "10")]);

        let mut settings = Settings::default();
        load_with_prefix(&mut settings, "ENVBIND_LOAD").unwrap();
        assert_eq!(settings.int, 10);
    }

    #[test]
    fn test_from_env() {
        let _guard = EnvGuard::set(&[("ENVBIND_FROM_ENV_INT", "7")]);

        let settings = Settings::from_env_with_prefix("ENVBIND_FROM_ENV").unwrap();
        assert_eq!(settings.int, 7);
    }

    #[test]
    fn test_multiple_errors() {
        let _guard = EnvGuard::set(&[("ENVBIND_MULTI_INT", "foo")]);

        let mut settings = Settings::default();
        let result = load_with_prefix(&mut settings, "ENVBIND_MULTI");
        let result = crate::ensure!(result, "ENVBIND_MULTI_INT", false, "must be {}", "positive");

        assert!(result
            .unwrap_err()
            .to_string()
            .contains(r#"ENVBIND_MULTI_INT must be an int: must be positive: got "foo""#));
    }

    #[test]
    fn test_extra_errors() {
        let _guard = EnvGuard::set(&[("ENVBIND_EXTRA_INT", "-1")]);

        let mut settings = Settings::default();
        let result = load_with_prefix(&mut settings, "ENVBIND_EXTRA");
        assert!(result.is_ok());

        let result = ensure(result, "ENVBIND_EXTRA_INT", true, "must be a negative integer");
        assert!(result.is_ok());

        let result = ensure(result, "ENVBIND_EXTRA_INT", false, "must be a positive integer");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains(r#"ENVBIND_EXTRA_INT must be a positive integer: got "-1""#));
    }

    #[test]
    fn test_password_printing() {
        let _guard = EnvGuard::set(&[("ENVBIND_PW_SOME_PASSWORD", "secret")]);

        let mut settings = Settings::default();
        let result = load_with_prefix(&mut settings, "ENVBIND_PW");
        let msg = ensure(result, "ENVBIND_PW_SOME_PASSWORD", false, "is invalid")
            .unwrap_err()
            .to_string();

        assert!(msg.contains("ENVBIND_PW_SOME_PASSWORD is invalid"));
        assert!(!msg.contains("secret"));
    }

    #[test]
    #[should_panic(expected = "Errors occurred while acting on the struct")]
    fn test_must_load_panics() {
        let _guard = EnvGuard::set(&[("ENVBIND_PANIC_INT", "foo")]);

        let mut settings = Settings::default();
        must_load_with_prefix(&mut settings, "ENVBIND_PANIC");
    }

    #[test]
    fn test_ensure_boxed_round_trips_through_dyn_error() {
        let err = ensure_boxed(None, "ENVBIND_BOXED_UNSET", false, "must be set");
        let err = ensure_boxed(err, "ENVBIND_BOXED_UNSET", true, "ignored");

        let err = err.unwrap();
        let errors = err.downcast_ref::<EnvErrors>().unwrap();
        assert_eq!(errors.get("ENVBIND_BOXED_UNSET"), Some("must be set"));
    }
}
