use crate::traits::{Field, Inspector, Visitor};

/// How the traversal treats a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    /// A primitive value bound from one variable.
    Scalar,
    /// An opaque composite value bound from one variable, never descended into.
    Terminal,
    /// A configuration section whose own fields are bound.
    Nested,
}

impl FieldClass {
    pub fn is_leaf(self) -> bool {
        !matches!(self, FieldClass::Nested)
    }
}

/// Classifies a field type without looking at any value of it.
pub fn classify<F: Field>() -> FieldClass {
    F::CLASS
}

macro_rules! scalar_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Field for $ty {
                const CLASS: FieldClass = FieldClass::Scalar;

                fn visit(&mut self, name: &str, visitor: &mut dyn Visitor) -> bool {
                    visitor.leaf(name, Self::CLASS, self)
                }

                fn inspect(&self, name: &str, inspector: &mut dyn Inspector) {
                    inspector.leaf(name, Self::CLASS, Some(self as &dyn crate::parse::Leaf))
                }
            }
        )+
    };
}

scalar_field!(bool, i32, i64, u8, u16, u32, u64, String, Vec<i64>, Vec<String>);

/// `Option` is the by-reference form of any field.
///
/// An absent nested record is reported to the visitor as `None` and skipped.
/// An absent leaf is parsed into a fresh default and only kept when the
/// environment actually assigned it.
impl<F: Field + Default> Field for Option<F> {
    const CLASS: FieldClass = F::CLASS;

    fn visit(&mut self, name: &str, visitor: &mut dyn Visitor) -> bool {
        if let Some(inner) = self {
            return inner.visit(name, visitor);
        }
        if !F::CLASS.is_leaf() {
            return visitor.nested(name, None);
        }

        let mut fresh = F::default();
        let assigned = fresh.visit(name, visitor);
        if assigned {
            *self = Some(fresh);
        }
        assigned
    }

    fn inspect(&self, name: &str, inspector: &mut dyn Inspector) {
        match self {
            Some(inner) => inner.inspect(name, inspector),
            None if F::CLASS.is_leaf() => inspector.leaf(name, F::CLASS, None),
            None => inspector.nested(name, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[derive(Debug, Default)]
    struct Section {
        value: i64,
    }

    crate::impl_record!(Section { value });

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(classify::<bool>(), FieldClass::Scalar);
        assert_eq!(classify::<u8>(), FieldClass::Scalar);
        assert_eq!(classify::<String>(), FieldClass::Scalar);
        assert_eq!(classify::<Vec<i64>>(), FieldClass::Scalar);
        assert_eq!(classify::<Option<u16>>(), FieldClass::Scalar);
    }

    #[test]
    fn test_terminal_kinds() {
        assert_eq!(classify::<BigInt>(), FieldClass::Terminal);
        assert_eq!(classify::<Option<BigInt>>(), FieldClass::Terminal);
    }

    #[test]
    fn test_nested_kinds() {
        assert_eq!(classify::<Section>(), FieldClass::Nested);
        assert_eq!(classify::<Option<Section>>(), FieldClass::Nested);
        assert!(!FieldClass::Nested.is_leaf());
        assert!(FieldClass::Terminal.is_leaf());
    }
}
