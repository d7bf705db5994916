//! Best-effort delivery channels for platform events.

pub mod email;

pub use email::{EmailConfig, EmailDelivery, EmailError};
