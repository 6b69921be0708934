//! Opaque value types bound from a single variable.
//!
//! A terminal type is a composite value that must be treated as a leaf rather
//! than as a nested configuration section. Registering a type with
//! [`terminal_type!`](crate::terminal_type) makes it, and its `Option` form,
//! bindable. The crate registers [`BigInt`].

use num_bigint::BigInt;

use crate::errors::ParseError;

/// Parsing and log formatting for a registered terminal type.
pub trait Terminal: Sized {
    fn parse_terminal(raw: &str) -> Result<Self, ParseError>;

    /// Stable structural description used by the configuration log.
    fn describe(&self) -> String;
}

/// Registers one or more [`Terminal`] types as terminal leaves.
///
/// ```
/// use envbind::{terminal_type, ParseError, Terminal};
///
/// #[derive(Debug, Default)]
/// struct Hex(u32);
///
/// impl Terminal for Hex {
///     fn parse_terminal(raw: &str) -> Result<Self, ParseError> {
///         u32::from_str_radix(raw, 16)
///             .map(Hex)
///             .map_err(|_| ParseError::Custom("must be hexadecimal".to_string()))
///     }
///
///     fn describe(&self) -> String {
///         format!("Hex({:#x})", self.0)
///     }
/// }
///
/// terminal_type!(Hex);
///
/// assert_eq!(envbind::classify::<Hex>(), envbind::FieldClass::Terminal);
/// ```
#[macro_export]
macro_rules! terminal_type {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Leaf for $ty {
                fn assign(&mut self, raw: &str) -> ::std::result::Result<(), $crate::ParseError> {
                    *self = <$ty as $crate::Terminal>::parse_terminal(raw)?;
                    Ok(())
                }

                fn render(&self) -> ::std::string::String {
                    <$ty as $crate::Terminal>::describe(self)
                }
            }

            impl $crate::Field for $ty {
                const CLASS: $crate::FieldClass = $crate::FieldClass::Terminal;

                fn visit(&mut self, name: &str, visitor: &mut dyn $crate::Visitor) -> bool {
                    visitor.leaf(name, Self::CLASS, self)
                }

                fn inspect(&self, name: &str, inspector: &mut dyn $crate::Inspector) {
                    inspector.leaf(name, Self::CLASS, Some(self as &dyn $crate::Leaf))
                }
            }
        )+
    };
}

impl Terminal for BigInt {
    fn parse_terminal(raw: &str) -> Result<Self, ParseError> {
        let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::BigInt);
        }
        raw.parse().map_err(|_| ParseError::BigInt)
    }

    fn describe(&self) -> String {
        let (sign, magnitude) = self.to_u64_digits();
        let words = magnitude
            .iter()
            .map(|word| format!("{word:#x}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("BigInt {{ sign: {sign:?}, magnitude: [{words}] }}")
    }
}

terminal_type!(BigInt);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Leaf;
    use crate::source::MapSource;
    use crate::traversal::Loader;

    #[test]
    fn test_parse_big_int() {
        let mut value = BigInt::default();
        value.assign("9571").unwrap();
        assert_eq!(value, BigInt::from(9571));

        value.assign("-18446744073709551616123").unwrap();
        assert_eq!(
            value,
            "-18446744073709551616123".parse::<BigInt>().unwrap()
        );

        value.assign("+5").unwrap();
        assert_eq!(value, BigInt::from(5));
    }

    #[test]
    fn test_reject_malformed_big_int() {
        let mut value = BigInt::from(1);
        for raw in ["99abc", "a34k", "", "-", "1_000", "0x10", " 1"] {
            assert_eq!(value.assign(raw), Err(ParseError::BigInt), "{raw:?}");
        }
        assert_eq!(value, BigInt::from(1));
    }

    #[derive(Debug, Default)]
    struct Limits {
        ceiling: Option<BigInt>,
    }

    crate::impl_record!(Limits { ceiling });

    #[test]
    fn test_optional_big_int() {
        let mut limits = Limits::default();
        let loader = Loader::new(MapSource::new().with("L_CEILING", "a34k"));
        let err = loader.load(&mut limits, "L").unwrap_err();
        assert_eq!(err.get("L_CEILING"), Some("must be a base-10 big.Int"));
        assert!(limits.ceiling.is_none());

        let loader = Loader::new(MapSource::new().with("L_CEILING", "112"));
        loader.load(&mut limits, "L").unwrap();
        assert_eq!(limits.ceiling, Some(BigInt::from(112)));
    }

    #[test]
    fn test_describe_is_structural() {
        assert_eq!(
            BigInt::from(9571).describe(),
            "BigInt { sign: Plus, magnitude: [0x2563] }"
        );
        assert_eq!(
            BigInt::from(-1).describe(),
            "BigInt { sign: Minus, magnitude: [0x1] }"
        );
        assert_eq!(
            BigInt::default().describe(),
            "BigInt { sign: NoSign, magnitude: [] }"
        );
    }
}
