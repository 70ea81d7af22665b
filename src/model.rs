//! Data model for pipeline runs and their task logs.
//!
//! These types mirror the backend's wire format exactly. They are read-only
//! projections: fetched fresh on every view activation, never mutated, never
//! sent back. The derivation helpers at the bottom of this module are the
//! canonical formatting rules shared by the TUI monitor and the stdout
//! commands, so both surfaces display runs identically.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Sentinel shown for a duration that cannot be derived (run not finished,
/// or a timestamp that failed to parse).
pub const DURATION_SENTINEL: &str = "-";

/// Execution status of a pipeline run, as reported by the backend.
///
/// `running` may transition to `success` or `failed` on the server side but
/// never back. Statuses this client does not know about decode to `Unknown`
/// instead of failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
    Running,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Human-readable label for this status.
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Failed => "failed",
            RunStatus::Running => "running",
            RunStatus::Unknown => "unknown",
        }
    }
}

/// Semantic tone used when rendering a status.
///
/// The actual colors live with each renderer; this type keeps the mapping
/// UI-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
    Info,
}

/// Label and tone pair for displaying a run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusVisual {
    pub label: &'static str,
    pub tone: StatusTone,
}

/// Map a run status to its display visual.
///
/// Total over all statuses: anything that is not `success` or `failed`,
/// including statuses introduced by future backend versions, gets the
/// neutral `Info` tone.
pub fn visual_for(status: RunStatus) -> StatusVisual {
    let tone = match status {
        RunStatus::Success => StatusTone::Success,
        RunStatus::Failed => StatusTone::Error,
        _ => StatusTone::Info,
    };
    StatusVisual {
        label: status.label(),
        tone,
    }
}

/// A single execution instance of a named task group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: i64,
    pub group_name: String,
    pub status: RunStatus,
    /// ISO-8601 timestamp. Kept as the raw wire string so a malformed value
    /// degrades only the derived fields, not the whole decode.
    pub start_time: String,
    /// Completion instant, present only once the run has finished.
    ///
    /// On the wire this is a tagged optional `{ "time": ..., "valid": ... }`
    /// (the backend's SQL null wrapper, which also emits capitalized keys),
    /// or `null`, or absent entirely. All non-valid shapes decode to `None`.
    #[serde(default, with = "end_time")]
    pub end_time: Option<String>,
}

/// One structured message emitted by a task during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    #[serde(default)]
    pub run_id: i64,
    pub task_name: String,
    pub timestamp: String,
    /// May contain newlines; renderers must preserve them.
    pub message: String,
}

/// One run together with its ordered log lines.
///
/// Log order is whatever the backend returned; the client does not re-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDetail {
    pub run: Run,
    pub logs: Vec<LogEntry>,
}

/// Derive the display duration of a run.
///
/// Finished runs (a valid `end_time`) format elapsed seconds to two decimal
/// places, e.g. `"23.00s"`; equal start and end instants yield `"0.00s"`.
/// Unfinished runs and malformed timestamps yield [`DURATION_SENTINEL`].
/// Never fails.
pub fn duration_of(run: &Run) -> String {
    let Some(end_raw) = run.end_time.as_deref() else {
        return DURATION_SENTINEL.to_string();
    };
    match (
        DateTime::parse_from_rfc3339(&run.start_time),
        DateTime::parse_from_rfc3339(end_raw),
    ) {
        (Ok(start), Ok(end)) => {
            let millis = end.signed_duration_since(start).num_milliseconds();
            format!("{:.2}s", millis as f64 / 1000.0)
        }
        _ => DURATION_SENTINEL.to_string(),
    }
}

/// Format an ISO-8601 timestamp as a local date and time.
///
/// Falls back to the raw string when it does not parse, so a malformed
/// timestamp degrades a single cell rather than erroring the view.
pub fn format_local_datetime(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Format an ISO-8601 timestamp as a local time of day (no date component).
pub fn format_local_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(ts) => ts.with_timezone(&Local).format("%H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Serde adapter between the backend's tagged-optional timestamp and
/// `Option<String>`.
///
/// Accepted on decode: an object with `time`/`valid` keys in either lowercase
/// or Go-style capitalized spelling, a JSON `null`, or (via
/// `#[serde(default)]` on the field) no field at all. Only `valid == true`
/// produces `Some`. Encoding always emits the lowercase tagged shape.
mod end_time {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    struct Tagged {
        #[serde(default, alias = "Time")]
        time: Option<String>,
        #[serde(default, alias = "Valid")]
        valid: bool,
    }

    #[derive(Serialize)]
    struct TaggedRef<'a> {
        time: Option<&'a str>,
        valid: bool,
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tagged = Option::<Tagged>::deserialize(deserializer)?;
        Ok(tagged.and_then(|t| if t.valid { t.time } else { None }))
    }

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        TaggedRef {
            time: value.as_deref(),
            valid: value.is_some(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_times(start: &str, end: Option<&str>) -> Run {
        Run {
            id: 1,
            group_name: "ci".to_string(),
            status: RunStatus::Success,
            start_time: start.to_string(),
            end_time: end.map(String::from),
        }
    }

    #[test]
    fn test_visual_for_success_is_success_tone() {
        let visual = visual_for(RunStatus::Success);
        assert_eq!(visual.tone, StatusTone::Success);
        assert_eq!(visual.label, "success");
    }

    #[test]
    fn test_visual_for_failed_is_error_tone() {
        assert_eq!(visual_for(RunStatus::Failed).tone, StatusTone::Error);
    }

    #[test]
    fn test_visual_for_running_and_unknown_are_info_tone() {
        assert_eq!(visual_for(RunStatus::Running).tone, StatusTone::Info);
        assert_eq!(visual_for(RunStatus::Unknown).tone, StatusTone::Info);
    }

    #[test]
    fn test_duration_of_unfinished_run_is_sentinel() {
        let run = run_with_times("2025-09-21T22:10:00Z", None);
        assert_eq!(duration_of(&run), DURATION_SENTINEL);
    }

    #[test]
    fn test_duration_of_zero_elapsed() {
        let run = run_with_times("2025-09-21T21:50:42Z", Some("2025-09-21T21:50:42Z"));
        assert_eq!(duration_of(&run), "0.00s");
    }

    #[test]
    fn test_duration_of_finished_run() {
        let run = run_with_times("2025-09-21T21:50:42Z", Some("2025-09-21T21:51:05Z"));
        assert_eq!(duration_of(&run), "23.00s");
    }

    #[test]
    fn test_duration_of_subsecond_precision() {
        let run = run_with_times("2025-09-21T21:50:42Z", Some("2025-09-21T21:50:42.500Z"));
        assert_eq!(duration_of(&run), "0.50s");
    }

    #[test]
    fn test_duration_of_malformed_start_degrades_to_sentinel() {
        let run = run_with_times("garbage", Some("2025-09-21T21:51:05Z"));
        assert_eq!(duration_of(&run), DURATION_SENTINEL);
    }

    #[test]
    fn test_duration_of_malformed_end_degrades_to_sentinel() {
        let run = run_with_times("2025-09-21T21:50:42Z", Some("not a time"));
        assert_eq!(duration_of(&run), DURATION_SENTINEL);
    }

    #[test]
    fn test_end_time_decodes_valid_tagged_value() {
        let json = r#"{"id":1,"group_name":"ci","status":"success",
            "start_time":"2025-09-21T21:50:42Z",
            "end_time":{"time":"2025-09-21T21:51:05Z","valid":true}}"#;
        let run: Run = serde_json::from_str(json).unwrap();
        assert_eq!(run.end_time.as_deref(), Some("2025-09-21T21:51:05Z"));
    }

    #[test]
    fn test_end_time_decodes_go_capitalized_keys() {
        let json = r#"{"id":1,"group_name":"ci","status":"success",
            "start_time":"2025-09-21T21:50:42Z",
            "end_time":{"Time":"2025-09-21T21:51:05Z","Valid":true}}"#;
        let run: Run = serde_json::from_str(json).unwrap();
        assert_eq!(run.end_time.as_deref(), Some("2025-09-21T21:51:05Z"));
    }

    #[test]
    fn test_end_time_invalid_flag_means_not_finished() {
        let json = r#"{"id":3,"group_name":"ci","status":"running",
            "start_time":"2025-09-21T22:10:00Z",
            "end_time":{"valid":false}}"#;
        let run: Run = serde_json::from_str(json).unwrap();
        assert_eq!(run.end_time, None);
    }

    #[test]
    fn test_end_time_null_means_not_finished() {
        let json = r#"{"id":3,"group_name":"ci","status":"running",
            "start_time":"2025-09-21T22:10:00Z","end_time":null}"#;
        let run: Run = serde_json::from_str(json).unwrap();
        assert_eq!(run.end_time, None);
    }

    #[test]
    fn test_end_time_absent_means_not_finished() {
        let json = r#"{"id":3,"group_name":"ci","status":"running",
            "start_time":"2025-09-21T22:10:00Z"}"#;
        let run: Run = serde_json::from_str(json).unwrap();
        assert_eq!(run.end_time, None);
    }

    #[test]
    fn test_end_time_reencodes_tagged_shape() {
        let run = run_with_times("2025-09-21T21:50:42Z", Some("2025-09-21T21:51:05Z"));
        let value = serde_json::to_value(&run).unwrap();
        assert_eq!(value["end_time"]["valid"], serde_json::json!(true));
        assert_eq!(
            value["end_time"]["time"],
            serde_json::json!("2025-09-21T21:51:05Z")
        );
    }

    #[test]
    fn test_unknown_status_decodes_defensively() {
        let json = r#"{"id":9,"group_name":"ci","status":"paused",
            "start_time":"2025-09-21T22:10:00Z"}"#;
        let run: Run = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, RunStatus::Unknown);
        assert_eq!(visual_for(run.status).tone, StatusTone::Info);
    }

    #[test]
    fn test_log_entry_without_run_id_defaults() {
        let json = r#"{"id":1,"task_name":"build",
            "timestamp":"2025-09-21T21:50:43Z","message":"ok"}"#;
        let log: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(log.run_id, 0);
    }

    #[test]
    fn test_format_local_datetime_malformed_falls_back_to_raw() {
        assert_eq!(format_local_datetime("not a time"), "not a time");
        assert_eq!(format_local_time("not a time"), "not a time");
    }

    #[test]
    fn test_format_local_time_has_no_date_component() {
        let formatted = format_local_time("2025-09-21T21:50:42Z");
        assert_eq!(formatted.len(), 8); // HH:MM:SS
        assert!(!formatted.contains('-'));
    }
}
