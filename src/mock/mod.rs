//! Mock Collaborator Implementations
//!
//! Configurable in-process stand-ins for the host server's items, events,
//! and UI handles, for unit and integration tests.
//!
//! - `MockItem`: storage or physical item with a configurable probe
//!   compatibility policy (accept-all, reject-all, allowlist) and probe
//!   call recording
//! - `MockPreviewEvent`: both slots, a recorded result item, and a shared
//!   `MockUi` handle
//! - `MockUi`: records repair-cost writes and viewer refreshes

mod event;
mod item;

pub use event::{MockPreviewEvent, MockUi, UiState};
pub use item::{Compat, MockItem};
