use std::num::IntErrorKind;

use crate::errors::ParseError;

/// A field bound directly from one environment variable.
///
/// `assign` must leave `self` untouched when it returns an error.
pub trait Leaf {
    /// Parses `raw` and stores it in place.
    fn assign(&mut self, raw: &str) -> Result<(), ParseError>;

    /// Formats the current value for the configuration log.
    fn render(&self) -> String;
}

impl Leaf for bool {
    fn assign(&mut self, raw: &str) -> Result<(), ParseError> {
        *self = match raw {
            "true" => true,
            "false" => false,
            _ => return Err(ParseError::Bool),
        };
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Leaf for String {
    fn assign(&mut self, raw: &str) -> Result<(), ParseError> {
        *self = raw.to_string();
        Ok(())
    }

    fn render(&self) -> String {
        format!("{self:?}")
    }
}

macro_rules! signed_leaf {
    ($($ty:ty),+) => {
        $(
            impl Leaf for $ty {
                fn assign(&mut self, raw: &str) -> Result<(), ParseError> {
                    *self = raw.parse().map_err(|_| ParseError::Int)?;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

signed_leaf!(i32, i64);

/// Parses a base-10 unsigned value of `bits` width through a wider signed
/// intermediate, so negative and oversized inputs get range errors rather
/// than a generic parse failure.
pub(crate) fn parse_unsigned(raw: &str, bits: u32) -> Result<u64, ParseError> {
    let max = u64::MAX >> (64 - bits);
    let wide: i128 = raw.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => ParseError::AboveMax { max },
        IntErrorKind::NegOverflow => ParseError::BelowMin { min: 0 },
        _ => ParseError::Uint { bits },
    })?;

    if wide < 0 {
        return Err(ParseError::BelowMin { min: 0 });
    }
    if wide > i128::from(max) {
        return Err(ParseError::AboveMax { max });
    }
    u64::try_from(wide).map_err(|_| ParseError::AboveMax { max })
}

macro_rules! unsigned_leaf {
    ($($ty:ty => $bits:literal),+) => {
        $(
            impl Leaf for $ty {
                fn assign(&mut self, raw: &str) -> Result<(), ParseError> {
                    let value = parse_unsigned(raw, $bits)?;
                    *self = <$ty>::try_from(value)
                        .map_err(|_| ParseError::AboveMax { max: u64::from(<$ty>::MAX) })?;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

unsigned_leaf!(u8 => 8, u16 => 16, u32 => 32, u64 => 64);

/// Splits a comma-separated value. An empty value is an empty list.
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').filter(move |_| !raw.is_empty())
}

impl Leaf for Vec<i64> {
    fn assign(&mut self, raw: &str) -> Result<(), ParseError> {
        let parsed = split_list(raw)
            .enumerate()
            .map(|(index, item)| item.parse().map_err(|_| ParseError::IntList { index }))
            .collect::<Result<Vec<i64>, _>>()?;
        *self = parsed;
        Ok(())
    }

    fn render(&self) -> String {
        format!("{self:?}")
    }
}

impl Leaf for Vec<String> {
    fn assign(&mut self, raw: &str) -> Result<(), ParseError> {
        *self = split_list(raw).map(str::to_string).collect();
        Ok(())
    }

    fn render(&self) -> String {
        format!("{self:?}")
    }
}
