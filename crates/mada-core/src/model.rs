// ── Domain model ──
//
// Typed projections of the device's manifest records. Entity behavior is
// driven by the `kind` discriminant consumed by one generic projector --
// there is no per-kind type hierarchy.

/// What an entity is, and therefore how it reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Read-only telemetry value.
    Sensor,
    /// Boolean read + boolean write.
    Switch,
    /// Numeric read + bounded numeric write.
    Number,
}

impl EntityKind {
    /// Parse a manifest kind string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sensor" => Some(Self::Sensor),
            "switch" => Some(Self::Switch),
            "number" => Some(Self::Number),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Switch => "switch",
            Self::Number => "number",
        }
    }

    /// Whether entities of this kind accept writes at all.
    pub fn is_writable(self) -> bool {
        !matches!(self, Self::Sensor)
    }
}

/// Closed vocabulary of device classes the firmware may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Moisture,
    Voltage,
    Battery,
    Temperature,
    Humidity,
    Illuminance,
}

impl DeviceClass {
    /// Parse a manifest device-class string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "moisture" => Some(Self::Moisture),
            "voltage" => Some(Self::Voltage),
            "battery" => Some(Self::Battery),
            "temperature" => Some(Self::Temperature),
            "humidity" => Some(Self::Humidity),
            "illuminance" => Some(Self::Illuminance),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moisture => "moisture",
            Self::Voltage => "voltage",
            Self::Battery => "battery",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Illuminance => "illuminance",
        }
    }
}

/// Closed vocabulary of sensor state classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    Measurement,
    Total,
    TotalIncreasing,
}

impl StateClass {
    /// Parse a manifest state-class string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "measurement" => Some(Self::Measurement),
            "total" => Some(Self::Total),
            "total_increasing" => Some(Self::TotalIncreasing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Measurement => "measurement",
            Self::Total => "total",
            Self::TotalIncreasing => "total_increasing",
        }
    }
}

/// A fully-typed entity definition built from one manifest record.
///
/// Unique per `id` within a session; the definition table is built once
/// at session establishment and never changes afterwards.
#[derive(Debug, Clone)]
pub struct EntityDefinition {
    pub id: String,
    pub kind: EntityKind,
    /// Human-readable name; falls back to the id when the manifest has none.
    pub display_name: String,
    /// Ordered key sequence into the status document. A path shorter than
    /// two keys makes every read "unavailable" but is not an error.
    pub data_path: Vec<String>,
    pub unit: Option<String>,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    pub icon: Option<String>,
    /// Number bounds; meaningful for `EntityKind::Number` only.
    pub min: f64,
    pub max: f64,
    /// Write granularity. `1.0` means integer payloads.
    pub step: f64,
}

/// Device-identity record attached to the session, for the host's
/// device registry (name, manufacturer, model, firmware version).
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub sw_version: Option<String>,
    pub mac: Option<String>,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            name: "MADA Bewässerung".into(),
            manufacturer: "Custom".into(),
            model: "HiGrow".into(),
            sw_version: None,
            mac: None,
        }
    }
}
