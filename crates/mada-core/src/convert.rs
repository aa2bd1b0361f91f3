// ── Wire-to-domain conversion ──
//
// Turns lenient `mada_api` manifest records into typed definitions.
// The discard rules live here: no id, or an unknown kind string, means
// the record produces nothing.

use mada_api::manifest::{DeviceManifest, ManifestEntry};
use tracing::debug;

use crate::model::{DeviceClass, DeviceInfo, EntityDefinition, EntityKind, StateClass};

// Number-entity defaults when the manifest omits bounds.
const DEFAULT_MIN: f64 = 0.0;
const DEFAULT_MAX: f64 = 100.0;
const DEFAULT_STEP: f64 = 1.0;

/// Convert one manifest record into a typed definition.
///
/// Returns `None` for records without an `id` or with an unknown kind
/// string -- the device may declare entity kinds this bridge does not
/// model yet, and those must not poison the rest of the table.
pub(crate) fn entity_definition(entry: ManifestEntry) -> Option<EntityDefinition> {
    let id = entry.id?;
    let kind_str = entry.kind.unwrap_or_default();
    let Some(kind) = EntityKind::parse(&kind_str) else {
        debug!(id, kind = kind_str, "skipping manifest entry with unknown kind");
        return None;
    };

    let display_name = entry.name.unwrap_or_else(|| id.clone());

    Some(EntityDefinition {
        display_name,
        kind,
        data_path: entry.data_path,
        unit: entry.unit,
        device_class: entry.device_class.as_deref().and_then(DeviceClass::parse),
        state_class: entry.state_class.as_deref().and_then(StateClass::parse),
        icon: entry.icon.or_else(|| default_icon(kind)),
        min: entry.min.unwrap_or(DEFAULT_MIN),
        max: entry.max.unwrap_or(DEFAULT_MAX),
        step: entry.step.unwrap_or(DEFAULT_STEP),
        id,
    })
}

/// Stock icon for kinds whose manifest record declares none. Sensors get
/// whatever the host derives from their device class.
fn default_icon(kind: EntityKind) -> Option<String> {
    match kind {
        EntityKind::Switch => Some("mdi:toggle-switch".to_owned()),
        EntityKind::Number => Some("mdi:numeric".to_owned()),
        EntityKind::Sensor => None,
    }
}

/// Build the device-identity record from the manifest, falling back to
/// defaults for anything the firmware did not report.
pub(crate) fn device_info(manifest: &DeviceManifest) -> DeviceInfo {
    let defaults = DeviceInfo::default();
    DeviceInfo {
        name: manifest.name.clone().unwrap_or(defaults.name),
        manufacturer: defaults.manufacturer,
        model: manifest.model.clone().unwrap_or(defaults.model),
        sw_version: manifest.version.clone(),
        mac: manifest.mac.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(id: Option<&str>, kind: Option<&str>) -> ManifestEntry {
        ManifestEntry {
            id: id.map(str::to_owned),
            kind: kind.map(str::to_owned),
            ..ManifestEntry::default()
        }
    }

    #[test]
    fn record_without_id_is_discarded() {
        assert!(entity_definition(entry(None, Some("sensor"))).is_none());
    }

    #[test]
    fn unknown_kind_is_discarded() {
        assert!(entity_definition(entry(Some("x"), Some("valve_group"))).is_none());
        assert!(entity_definition(entry(Some("x"), None)).is_none());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let def = entity_definition(entry(Some("pumpe"), Some("switch"))).unwrap();
        assert_eq!(def.display_name, "pumpe");
        assert_eq!(def.kind, EntityKind::Switch);
    }

    #[test]
    fn number_defaults_applied() {
        let def = entity_definition(entry(Some("n"), Some("number"))).unwrap();
        assert_eq!(def.min, 0.0);
        assert_eq!(def.max, 100.0);
        assert_eq!(def.step, 1.0);
    }

    #[test]
    fn per_kind_icon_fallback() {
        let def = entity_definition(entry(Some("pumpe"), Some("switch"))).unwrap();
        assert_eq!(def.icon.as_deref(), Some("mdi:toggle-switch"));

        let def = entity_definition(entry(Some("n"), Some("number"))).unwrap();
        assert_eq!(def.icon.as_deref(), Some("mdi:numeric"));

        let def = entity_definition(entry(Some("s"), Some("sensor"))).unwrap();
        assert!(def.icon.is_none());
    }

    #[test]
    fn declared_icon_wins_over_fallback() {
        let mut e = entry(Some("pumpe"), Some("switch"));
        e.icon = Some("mdi:water-pump".into());
        let def = entity_definition(e).unwrap();
        assert_eq!(def.icon.as_deref(), Some("mdi:water-pump"));
    }

    #[test]
    fn device_identity_defaults() {
        let info = device_info(&DeviceManifest::default());
        assert_eq!(info.name, "MADA Bewässerung");
        assert_eq!(info.manufacturer, "Custom");
        assert_eq!(info.model, "HiGrow");
    }

    #[test]
    fn unknown_vocab_strings_map_to_none() {
        let mut e = entry(Some("s"), Some("sensor"));
        e.device_class = Some("plasma_flux".into());
        e.state_class = Some("sometimes".into());
        let def = entity_definition(e).unwrap();
        assert!(def.device_class.is_none());
        assert!(def.state_class.is_none());
    }

    #[test]
    fn known_vocab_strings_parse() {
        let mut e = entry(Some("s"), Some("sensor"));
        e.device_class = Some("moisture".into());
        e.state_class = Some("measurement".into());
        let def = entity_definition(e).unwrap();
        assert_eq!(def.device_class, Some(DeviceClass::Moisture));
        assert_eq!(def.state_class, Some(StateClass::Measurement));
    }
}
