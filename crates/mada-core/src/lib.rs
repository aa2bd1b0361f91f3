// mada-core: Session, polling, and entity-projection layer between
// mada-api and the host automation platform.

pub mod config;
pub mod convert;
pub mod coordinator;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod manifest;
pub mod model;
pub mod paths;
pub mod registry;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::SessionConfig;
pub use coordinator::{PollCoordinator, PollState, StatusSnapshot};
pub use dispatch::{CommandDispatcher, WritePayload, WriteRoute, route_for};
pub use entity::EntityView;
pub use error::CoreError;
pub use registry::SessionRegistry;
pub use session::Session;

// Re-export model types at the crate root for ergonomics.
pub use model::{DeviceClass, DeviceInfo, EntityDefinition, EntityKind, StateClass};
