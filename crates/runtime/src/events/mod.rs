//! Change notifications for store consumers.
//!
//! The store publishes a [`StoreEvent`] after every committed change. Events
//! are best-effort; the snapshot remains the source of truth.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{RunEnd, StoreEvent};
