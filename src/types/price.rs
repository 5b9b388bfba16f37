use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Price type using NewType pattern for type safety
/// Prevents accidental mixing with other numeric types like Premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Create a new Price from a Decimal
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Get the underlying Decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Create a Price from a string
    pub fn from_str(s: &str) -> Result<Self, rust_decimal::Error> {
        let decimal = Decimal::from_str(s)?;
        Ok(Self(decimal))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True for prices a settlement or premium can safely divide by
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Custom serialization to preserve decimal places
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.0.to_string())
    }
}

// Custom deserialization from string
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decimal = Decimal::from_str(&s).map_err(serde::de::Error::custom)?;
        Ok(Price(decimal))
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::Sub for Price {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

// Implement multiplication with scalar values
impl std::ops::Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

impl std::ops::Div<Decimal> for Price {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self {
        Self(self.0 / rhs)
    }
}

// Implement Price / Price -> Decimal (for ratio calculations)
impl std::ops::Div<Price> for Price {
    type Output = Decimal;

    fn div(self, rhs: Price) -> Decimal {
        self.0 / rhs.0
    }
}
