//! Outbound ports - interfaces the engine drives, implemented by adapters.

mod clock_port;
mod detection_port;
mod event_bus_port;
mod persistence_port;

pub use clock_port::{ClockPort, RandomPort};
pub use detection_port::{DetectionError, DetectionPort, ImageBuffer};
pub use event_bus_port::{EventBusError, EventBusPort};
pub use persistence_port::{BlobStorePort, PersistenceError, SnapshotStorePort};
