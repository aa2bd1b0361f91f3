// mada-api: Async Rust client for the MADA irrigation controller's HTTP API.

pub mod client;
pub mod error;
pub mod manifest;
pub mod transport;

pub use client::DeviceClient;
pub use error::Error;
pub use manifest::{DeviceManifest, ManifestEntry};
pub use transport::TransportConfig;
