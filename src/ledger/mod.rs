pub mod order;
pub mod paper;
pub mod wallet;

pub use order::{Order, OrderSide, Settlement};
pub use paper::{LedgerError, PaperLedger};
pub use wallet::Wallet;
