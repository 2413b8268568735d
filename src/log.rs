use serde::Serialize;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug, Serialize)]
pub struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    pub timestamp_ms: u64,
    pub level: String,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick: Option<u64>,
    pub details: Value,
}

impl StructuredLogLine {
    pub fn new(
        level: &str,
        event: &str,
        seed: Option<u32>,
        tick: Option<u64>,
        details: Value,
    ) -> Self {
        Self {
            timestamp_ms: now_ms(),
            level: level.to_string(),
            event: event.to_string(),
            seed,
            tick,
            details,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("structured log should serialize")
    }
}

/// One JSON line on stderr.
pub fn emit_log(level: &str, event: &str, seed: Option<u32>, tick: Option<u64>, details: Value) {
    eprintln!(
        "{}",
        StructuredLogLine::new(level, event, seed, tick, details).to_json()
    );
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::StructuredLogLine;
    use serde_json::{json, Value};

    #[test]
    fn optional_fields_are_omitted() {
        let line = StructuredLogLine::new("info", "run_started", None, None, json!({}));
        let value: Value = serde_json::from_str(&line.to_json()).expect("valid json");
        assert_eq!(value["level"], "info");
        assert_eq!(value["event"], "run_started");
        assert!(value.get("seed").is_none());
        assert!(value.get("tick").is_none());
        assert!(value["timestampMs"].is_u64());
    }

    #[test]
    fn seed_and_tick_are_carried() {
        let line = StructuredLogLine::new(
            "warn",
            "audio_failed",
            Some(7),
            Some(120),
            json!({ "cue": "dot_collected" }),
        );
        let value: Value = serde_json::from_str(&line.to_json()).expect("valid json");
        assert_eq!(value["seed"], 7);
        assert_eq!(value["tick"], 120);
        assert_eq!(value["details"]["cue"], "dot_collected");
    }
}
