// ── Manifest loading ──
//
// One fetch per session, never on the poll timer. Failure policy is
// deliberately soft: a device that cannot serve its manifest still gets
// a live session, just with zero discovered entities. See DESIGN.md.

use indexmap::IndexMap;
use mada_api::DeviceClient;
use tracing::{info, warn};

use crate::convert;
use crate::model::{DeviceInfo, EntityDefinition};

/// Fetch the capability manifest and build the entity-definition table.
///
/// Any error -- timeout, transport failure, non-200, malformed body --
/// yields an empty table and the default device identity. Records
/// without an `id` are discarded; duplicate ids overwrite earlier ones
/// (last-wins, matching the device's own ordering).
pub(crate) async fn load(client: &DeviceClient) -> (IndexMap<String, EntityDefinition>, DeviceInfo) {
    let manifest = match client.fetch_manifest().await {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!(error = %e, "could not fetch device manifest; continuing with no entities");
            return (IndexMap::new(), DeviceInfo::default());
        }
    };

    if let Some(ref device_type) = manifest.device_type {
        if device_type != "irrigation_controller" {
            warn!(device_type, "unexpected device type in manifest");
        }
    }

    let info = convert::device_info(&manifest);

    let mut definitions = IndexMap::new();
    for entry in manifest.entities {
        if let Some(def) = convert::entity_definition(entry) {
            definitions.insert(def.id.clone(), def);
        }
    }

    info!(
        entities = definitions.len(),
        model = %info.model,
        "loaded entity definitions from device manifest"
    );

    (definitions, info)
}
