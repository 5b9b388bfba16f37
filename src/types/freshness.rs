use serde::{Deserialize, Serialize};

/// Origin of a snapshot field
///
/// `Fresh` means the value came from a live fetch in the same capture;
/// `Fallback` means the live fetch failed and a last-known-good or static
/// default was substituted. A surface that wants to warn the user about
/// degraded data checks these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Fresh,
    Fallback,
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh)
    }
}
