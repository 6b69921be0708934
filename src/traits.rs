use crate::classify::FieldClass;
use crate::errors::EnvErrors;
use crate::parse::Leaf;

/// A configuration record whose fields can be bound from environment variables.
///
/// Implementations report every field in declaration order, handing each one
/// to the visitor through [`Field::visit`]. The [`impl_record!`](crate::impl_record)
/// macro writes this for plain structs:
///
/// ```
/// use envbind::impl_record;
///
/// #[derive(Debug, Default)]
/// struct Database {
///     host: String,
///     port: u16,
///     password: String,
/// }
///
/// impl_record!(Database { host, port, password });
/// ```
pub trait Record {
    /// Hands every field to `visitor` for binding.
    fn visit(&mut self, visitor: &mut dyn Visitor);

    /// Hands every field to `inspector` for read-only traversal.
    fn inspect(&self, inspector: &mut dyn Inspector);
}

/// One named slot of a [`Record`].
///
/// The class is a property of the type alone, so a field is classified the
/// same way whether or not it currently holds a value.
pub trait Field {
    const CLASS: FieldClass;

    /// Presents this field to `visitor` under `name`.
    ///
    /// Returns true when a value was assigned from the environment.
    fn visit(&mut self, name: &str, visitor: &mut dyn Visitor) -> bool;

    /// Presents this field to `inspector` under `name`.
    fn inspect(&self, name: &str, inspector: &mut dyn Inspector);
}

/// Mutable traversal over the fields of a record tree.
pub trait Visitor {
    /// Called for every scalar or terminal leaf. Returns true when the leaf
    /// was assigned.
    fn leaf(&mut self, name: &str, class: FieldClass, leaf: &mut dyn Leaf) -> bool;

    /// Called for every nested record. `None` means the record is absent and
    /// must not be descended into. Returns true when any leaf below was assigned.
    fn nested(&mut self, name: &str, record: Option<&mut dyn Record>) -> bool;
}

/// Read-only traversal over the fields of a record tree.
pub trait Inspector {
    /// Called for every scalar or terminal leaf. `None` is an unset optional leaf.
    fn leaf(&mut self, name: &str, class: FieldClass, leaf: Option<&dyn Leaf>);

    /// Called for every nested record, `None` when absent.
    fn nested(&mut self, name: &str, record: Option<&dyn Record>);
}

/// A trait for types that can be constructed from environment variables.
///
/// Every `Record` with a `Default` gets this for free: the default value is
/// built first, so any variable that is not set keeps its default.
///
/// # Examples
/// ```
/// use envbind::{impl_record, FromEnv};
///
/// #[derive(Debug, Default)]
/// struct WebSocketConfig {
///     host: String,
///     port: u16,
/// }
///
/// impl_record!(WebSocketConfig { host, port });
///
/// let config = WebSocketConfig::from_env_with_prefix("DOCTEST_UNSET_WS").unwrap();
/// assert_eq!(config.port, 0);
/// ```
pub trait FromEnv: Sized {
    /// Creates a new instance of the type from variables under `prefix`.
    fn from_env_with_prefix(prefix: &str) -> Result<Self, EnvErrors>;
}

impl<T: Record + Default> FromEnv for T {
    fn from_env_with_prefix(prefix: &str) -> Result<Self, EnvErrors> {
        let mut value = T::default();
        crate::load_with_prefix(&mut value, prefix)?;
        Ok(value)
    }
}
