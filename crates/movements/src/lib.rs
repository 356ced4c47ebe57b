//! `stockroom-movements` — movement records, the batch state machine, and
//! stock application.
//!
//! A movement record describes one product quantity transferred between two
//! locations. Records sharing a batch identifier form one logical transfer;
//! completion applies every member's delta to the per-location stock mapping
//! exactly once. Everything in this crate is pure; repository orchestration
//! lives in `stockroom-infra`.

pub mod batch;
pub mod movement;
pub mod stock;
pub mod transfer;

pub use batch::{batch_status, completion_deltas, edit_items, group_for_display, BatchGroup, BatchItem, StockDelta};
pub use movement::{MovementRecord, MovementStatus};
pub use stock::{apply_delta, apply_transfer};
pub use transfer::TransferRequest;
