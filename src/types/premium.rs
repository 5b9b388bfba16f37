use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Percentage premium of a domestic quote over its converted reference quote.
///
/// A value of `0.0` can also mean "unknown" when the reference price or fx
/// rate was zero at computation time; consumers that need to tell the two
/// apart must check the snapshot's freshness tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Premium(pub Decimal);

impl Premium {
    pub const ZERO: Premium = Premium(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Premium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for Premium {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Premium {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decimal = Decimal::from_str(&s).map_err(serde::de::Error::custom)?;
        Ok(Premium(decimal))
    }
}

impl std::ops::Sub for Premium {
    type Output = Decimal;

    /// Gap between two venues' premiums, in percentage points
    fn sub(self, rhs: Self) -> Decimal {
        self.0 - rhs.0
    }
}
