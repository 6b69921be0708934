use std::error::Error;

use tracing::{debug, trace, warn};

use crate::classify::FieldClass;
use crate::errors::{merge, EnvErrors};
use crate::naming::env_key;
use crate::parse::Leaf;
use crate::redact::is_sensitive;
use crate::source::{EnvSource, ProcessEnv};
use crate::traits::{Record, Visitor};

/// Binds records from an environment store.
#[derive(Debug, Clone, Default)]
pub struct Loader<S = ProcessEnv> {
    source: S,
}

impl<S: EnvSource> Loader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Binds every leaf of `record` from variables under `prefix`.
    ///
    /// Unset variables leave their fields alone. Every present value that
    /// cannot be bound is collected, and the fields they target are left
    /// unmodified.
    pub fn load(&self, record: &mut dyn Record, prefix: &str) -> Result<(), EnvErrors> {
        let mut binder = Binder {
            source: &self.source,
            path: prefix.to_string(),
            errors: None,
            assigned: 0,
        };
        record.visit(&mut binder);

        debug!(prefix, assigned = binder.assigned, "bound record from environment");
        match binder.errors {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }

    /// Adds a post-load check to a load result.
    ///
    /// When `predicate` holds, `result` is returned unchanged. Otherwise
    /// `message` is merged under `key`, after any message the key already has.
    pub fn ensure(
        &self,
        result: Result<(), EnvErrors>,
        key: &str,
        predicate: bool,
        message: impl Into<String>,
    ) -> Result<(), EnvErrors> {
        if predicate {
            return result;
        }

        let existing = result.err();
        let raw = match &existing {
            Some(errors) if errors.contains_key(key) => None,
            _ if is_sensitive(key) => None,
            _ => self.source.var(key).ok().flatten(),
        };
        Err(merge(existing, key, message.into(), raw))
    }

    /// Like [`Loader::ensure`], for callers holding a type-erased error.
    ///
    /// # Panics
    ///
    /// Panics when `err` holds an error that was not produced by this crate.
    pub fn ensure_boxed(
        &self,
        err: Option<Box<dyn Error + Send + Sync>>,
        key: &str,
        predicate: bool,
        message: impl Into<String>,
    ) -> Option<Box<dyn Error + Send + Sync>> {
        if predicate {
            return err;
        }

        let result = match err {
            None => Ok(()),
            Some(err) => match err.downcast::<EnvErrors>() {
                Ok(errors) => Err(*errors),
                Err(other) => panic!("ensure only works on errors returned by envbind, got: {other}"),
            },
        };
        self.ensure(result, key, false, message)
            .err()
            .map(|errors| Box::new(errors) as Box<dyn Error + Send + Sync>)
    }
}

struct Binder<'a> {
    source: &'a dyn EnvSource,
    path: String,
    errors: Option<EnvErrors>,
    assigned: usize,
}

impl Binder<'_> {
    fn fail(&mut self, key: &str, reason: impl std::fmt::Display, raw: Option<String>) {
        warn!(key, reason = %reason, "rejected environment value");
        self.errors = Some(merge(self.errors.take(), key, reason, raw));
    }
}

impl Visitor for Binder<'_> {
    fn leaf(&mut self, name: &str, class: FieldClass, leaf: &mut dyn Leaf) -> bool {
        let key = env_key(&self.path, name);
        let raw = match self.source.var(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                trace!(key = %key, "not set, keeping current value");
                return false;
            }
            Err(reason) => {
                self.fail(&key, reason, None);
                return false;
            }
        };

        match leaf.assign(&raw) {
            Ok(()) => {
                debug!(key = %key, ?class, "bound");
                self.assigned += 1;
                true
            }
            Err(reason) => {
                self.fail(&key, reason, Some(raw));
                false
            }
        }
    }

    fn nested(&mut self, name: &str, record: Option<&mut dyn Record>) -> bool {
        let key = env_key(&self.path, name);
        let Some(record) = record else {
            trace!(key = %key, "absent section, skipping");
            return false;
        };

        let before = self.assigned;
        let parent = std::mem::replace(&mut self.path, key);
        record.visit(self);
        self.path = parent;
        self.assigned > before
    }
}
