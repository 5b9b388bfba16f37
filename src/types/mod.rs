pub mod freshness;
pub mod premium;
pub mod price;

pub use freshness::Freshness;
pub use premium::Premium;
pub use price::Price;
