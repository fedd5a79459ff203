use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Names of the interactions the product records.
pub mod names {
    pub const SEED_CREATED: &str = "seed_created";
    pub const REPORT_DOWNLOADED: &str = "report_downloaded";
    pub const TOUR_COMPLETED: &str = "tour_completed";
    pub const TOUR_SKIPPED: &str = "tour_skipped";
    pub const DEMO_SELECTED: &str = "demo_selected";
}

/// One recorded interaction. Serialized with the camelCase field names the
/// persisted log has always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_id: String,
}

/// Coerces an arbitrary JSON value into an event payload.
///
/// Objects pass through, `null` becomes empty, any other value is wrapped under `"value"`.
pub fn into_payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".into(), other);
            map
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_coercion() {
        assert_eq!(into_payload(json!({"a": 1}))["a"], json!(1));
        assert!(into_payload(Value::Null).is_empty());
        assert_eq!(into_payload(json!("x"))["value"], json!("x"));
    }

    #[test]
    fn stored_shape_uses_camel_case_user_id() {
        let event = AnalyticsEvent {
            id: "evt_1".into(),
            name: names::TOUR_COMPLETED.into(),
            payload: Map::new(),
            timestamp: Utc::now(),
            user_id: "user_1".into(),
        };
        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["userId"], json!("user_1"));
        assert!(value.get("user_id").is_none());
    }
}
