//! `al-ledger`: the resource ledger.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`spoke`]    | `Spoke` (stock, counters, flags)                           |
//! | [`arrivals`] | `ArrivalQueue`, `Delivery`                                 |
//! | [`ledger`]   | `ResourceLedger`, `PeriodReport`, `upkeep_due`             |
//! | [`error`]    | `LedgerError`, `LedgerResult<T>`                           |
//!
//! # Invariants
//!
//! - Stock is unsigned; overdraws clamp to zero and become incidents.
//! - An operation needs `A > 0 ∧ B > 0 ∧ C > 0 ∧ D > 0` at the time of the
//!   call and removes exactly one C and one D.
//! - Deliveries made in period `p` are usable from `p + 1`.

pub mod arrivals;
pub mod error;
pub mod ledger;
pub mod spoke;


pub use arrivals::{ArrivalQueue, Delivery};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{HubStock, PeriodReport, ResourceLedger, upkeep_due};
pub use spoke::Spoke;
