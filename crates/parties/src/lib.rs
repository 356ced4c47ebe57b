//! `stockroom-parties` — client records mirrored from the external store.

pub mod client;

pub use client::{Client, ContactInfo};
