/// Implements [`Record`](crate::Record) and [`Field`](crate::Field) for a struct.
///
/// Fields are listed in declaration order; each one is bound from the variable
/// derived from its identifier. Every listed field type must implement `Field`.
/// Structs used behind `Option` must also implement `Default`.
#[macro_export]
macro_rules! impl_record {
    ($record:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Record for $record {
            fn visit(&mut self, visitor: &mut dyn $crate::Visitor) {
                $( $crate::Field::visit(&mut self.$field, stringify!($field), visitor); )*
            }

            fn inspect(&self, inspector: &mut dyn $crate::Inspector) {
                $( $crate::Field::inspect(&self.$field, stringify!($field), inspector); )*
            }
        }

        impl $crate::Field for $record {
            const CLASS: $crate::FieldClass = $crate::FieldClass::Nested;

            fn visit(&mut self, name: &str, visitor: &mut dyn $crate::Visitor) -> bool {
                visitor.nested(name, Some(self as &mut dyn $crate::Record))
            }

            fn inspect(&self, name: &str, inspector: &mut dyn $crate::Inspector) {
                inspector.nested(name, Some(self as &dyn $crate::Record))
            }
        }
    };
}

/// Formatting front end for [`ensure`](crate::ensure).
///
/// The message is only formatted when the predicate fails.
///
/// ```
/// use envbind::ensure;
///
/// let port = 0;
/// let result = ensure!(Ok(()), "APP_PORT", port > 0, "must be {}", "positive");
/// assert!(result.unwrap_err().to_string().contains("APP_PORT must be positive"));
/// ```
#[macro_export]
macro_rules! ensure {
    ($result:expr, $key:expr, $predicate:expr, $($message:tt)+) => {{
        let result: ::std::result::Result<(), $crate::EnvErrors> = $result;
        if $predicate {
            result
        } else {
            $crate::ensure(result, $key, false, ::std::format!($($message)+))
        }
    }};
}
