//! In-process domain events and best-effort delivery channels.

pub mod bus;
pub mod delivery;

pub use bus::{EventBus, PlatformEvent};
