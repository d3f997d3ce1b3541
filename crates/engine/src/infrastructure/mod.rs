//! Infrastructure adapters implementing the outbound ports.

pub mod clock;
pub mod detection;
pub mod event_bus;
pub mod persistence;
pub mod settings;
