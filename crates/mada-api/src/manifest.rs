// Wire types for the device's self-describing capability manifest.
//
// `GET /mada` returns the controller's identity plus a list of entity
// records. Firmware revisions differ in which fields they emit, so every
// field is lenient: a sparse or partially-shaped manifest still parses.

use serde::Deserialize;

/// The capability manifest served at `GET /mada`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceManifest {
    /// Device category string, `"irrigation_controller"` on current firmware.
    #[serde(rename = "type", default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    /// Firmware version string.
    #[serde(default)]
    pub version: Option<String>,
    /// Declared entities. Missing or empty means the device exposes nothing.
    #[serde(default)]
    pub entities: Vec<ManifestEntry>,
}

/// One declared entity in the manifest.
///
/// `id` is optional on the wire; records without one are unusable and get
/// discarded downstream. `data_path` is the ordered key sequence used to
/// pull this entity's value out of the status document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestEntry {
    #[serde(default)]
    pub id: Option<String>,
    /// Entity kind string: `"sensor"`, `"switch"`, or `"number"`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data_path: Vec<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub device_class: Option<String>,
    #[serde(default)]
    pub state_class: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}
