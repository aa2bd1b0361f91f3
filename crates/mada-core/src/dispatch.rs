// ── Command dispatch ──
//
// All entity writes flow through here. The device derives its RPC
// endpoint names from entity ids, with one legacy exception; that
// mapping lives in a single explicit table rather than being scattered
// through the write path.

use serde_json::{Value, json};
use tracing::debug;

use mada_api::DeviceClient;

use crate::coordinator::PollCoordinator;
use crate::error::CoreError;
use crate::model::EntityDefinition;

/// Value shapes an entity write can carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WritePayload {
    Bool(bool),
    Number(f64),
}

/// A derived RPC target: endpoint path segment plus payload key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRoute {
    /// Endpoint segment under `/rpc/`, e.g. `"Pumpe.Set"`.
    pub endpoint: String,
    /// Key the value is wrapped under, e.g. `{"on": true}`.
    pub payload_key: &'static str,
}

// Legacy override: the pump-power entity predates the `.Set` convention
// and writes through the fixed PWM endpoint. Matched case-insensitively
// as a substring of the entity id.
const PUMP_POWER_ID_FRAGMENT: &str = "pumpenleistung";
const PUMP_PWM_ENDPOINT: &str = "Pump.SetPWM";

/// Derive the RPC route for a write. Ordered rules, first match wins:
///
/// 1. ids containing the legacy pump-power fragment target the fixed
///    PWM endpoint with payload key `pwm`, regardless of data path;
/// 2. everything else targets `<CapitalizedId>.Set` with key `on` for
///    boolean writes and `value` for numeric writes.
pub fn route_for(entity_id: &str, payload: WritePayload) -> WriteRoute {
    if entity_id.to_lowercase().contains(PUMP_POWER_ID_FRAGMENT) {
        return WriteRoute {
            endpoint: PUMP_PWM_ENDPOINT.to_owned(),
            payload_key: "pwm",
        };
    }

    WriteRoute {
        endpoint: format!("{}.Set", capitalize(entity_id)),
        payload_key: match payload {
            WritePayload::Bool(_) => "on",
            WritePayload::Number(_) => "value",
        },
    }
}

/// Uppercase the first character, matching the firmware's endpoint
/// naming (`pumpe` -> `Pumpe.Set`).
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Issues entity writes against the device and schedules a follow-up
/// refresh on success.
#[derive(Clone)]
pub struct CommandDispatcher {
    client: DeviceClient,
    coordinator: PollCoordinator,
}

impl CommandDispatcher {
    pub(crate) fn new(client: DeviceClient, coordinator: PollCoordinator) -> Self {
        Self {
            client,
            coordinator,
        }
    }

    /// Write a value to the device entity described by `def`.
    ///
    /// Numeric writes are validated against the definition's `[min, max]`
    /// range (rejected, not clamped) and coerced to an integer when
    /// `step == 1`. On HTTP 200 an out-of-cycle refresh is requested so
    /// the next snapshot reflects the command promptly; on any failure
    /// nothing else happens -- no refresh, no snapshot change.
    pub async fn write(
        &self,
        def: &EntityDefinition,
        payload: WritePayload,
    ) -> Result<(), CoreError> {
        ensure_writable(def, payload)?;
        let value = coerce(def, payload)?;
        let route = route_for(&def.id, payload);
        let body = json!({ route.payload_key: value });

        debug!(entity = %def.id, endpoint = %route.endpoint, %body, "dispatching write");

        self.client.send_command(&route.endpoint, &body).await?;
        self.coordinator.request_refresh();
        Ok(())
    }
}

/// Refuse writes to kinds that do not accept them.
fn ensure_writable(def: &EntityDefinition, payload: WritePayload) -> Result<(), CoreError> {
    if def.kind.is_writable() {
        return Ok(());
    }
    Err(CoreError::NotWritable {
        id: def.id.clone(),
        operation: match payload {
            WritePayload::Bool(_) => "boolean",
            WritePayload::Number(_) => "numeric",
        },
    })
}

/// Range-check and shape the outgoing JSON value.
fn coerce(def: &EntityDefinition, payload: WritePayload) -> Result<Value, CoreError> {
    match payload {
        WritePayload::Bool(on) => Ok(Value::Bool(on)),
        WritePayload::Number(v) => {
            if !v.is_finite() || v < def.min || v > def.max {
                return Err(CoreError::ValidationFailed {
                    message: format!(
                        "value {v} outside [{}, {}] for entity {}",
                        def.min, def.max, def.id
                    ),
                });
            }
            // step == 1 means the firmware expects an integer payload.
            #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
            if def.step == 1.0 {
                Ok(json!(v.round() as i64))
            } else {
                Ok(json!(v))
            }
        }
    }
}
