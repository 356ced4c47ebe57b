//! `stockroom-finance` — financial entries mirrored from the external store.

pub mod entry;

pub use entry::{EntryKind, FinancialEntry, PaymentMethod};
