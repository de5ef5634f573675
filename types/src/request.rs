//! Wire payload for the reminder creation endpoint.

use serde::{Deserialize, Serialize};

use crate::{DeliveryMode, DeliveryTarget, EpochMillis, PostId};

/// Body of `POST /add`.
///
/// ```json
/// {"message": "...", "post_id": "...", "remember_at": "1700000000000",
///  "send_to": "...", "reminder_type": "dm"}
/// ```
///
/// `send_to` and `reminder_type` are omitted for classic reminders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub message: String,
    pub post_id: PostId,
    #[serde(with = "millis_string")]
    pub remember_at: EpochMillis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_to: Option<DeliveryTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_type: Option<DeliveryMode>,
}

impl ReminderRequest {
    #[must_use]
    pub fn classic(message: impl Into<String>, post_id: PostId, remember_at: EpochMillis) -> Self {
        Self {
            message: message.into(),
            post_id,
            remember_at,
            send_to: None,
            reminder_type: None,
        }
    }

    #[must_use]
    pub fn targeted(
        message: impl Into<String>,
        post_id: PostId,
        remember_at: EpochMillis,
        send_to: Option<DeliveryTarget>,
        reminder_type: DeliveryMode,
    ) -> Self {
        Self {
            message: message.into(),
            post_id,
            remember_at,
            send_to,
            reminder_type: Some(reminder_type),
        }
    }
}

mod millis_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::EpochMillis;

    pub(super) fn serialize<S: Serializer>(value: &EpochMillis, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&value.to_wire())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<EpochMillis, D::Error> {
        let raw = String::deserialize(de)?;
        raw.trim()
            .parse::<i64>()
            .map(EpochMillis::new)
            .map_err(|e| D::Error::custom(format!("remember_at is not an integer: {e}")))
    }
}
