//! The JSON report written to standard output.

use serde::Serialize;

use crate::error::Error;

/// Outcome of an apply invocation.
///
/// Exactly one report is serialized to stdout per run. Success reports
/// carry the effective flags and the raw device output; failure reports
/// carry the error string, plus the logs accumulated so far when the
/// failure happened after the session was up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    /// Raw device output captured during the session, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,
}

impl Report {
    /// A successful push.
    pub fn success(applied: bool, commit: bool, saved: bool, dry_run: bool, logs: Vec<String>) -> Self {
        Self {
            ok: true,
            error: None,
            applied: Some(applied),
            commit: Some(commit),
            saved: Some(saved),
            dry_run: Some(dry_run),
            logs: Some(logs),
        }
    }

    /// A failure before any session output existed.
    pub fn failure(error: &Error) -> Self {
        Self {
            ok: false,
            error: Some(error.to_string()),
            applied: None,
            commit: None,
            saved: None,
            dry_run: None,
            logs: None,
        }
    }

    /// A failure during the apply stage, carrying the logs so far.
    pub fn failure_with_logs(error: &Error, logs: Vec<String>) -> Self {
        Self {
            logs: Some(logs),
            ..Self::failure(error)
        }
    }

    /// Process exit code matching the `ok` flag.
    pub fn exit_code(&self) -> i32 {
        if self.ok { 0 } else { 1 }
    }

    /// Serialize to the single-line JSON document the contract requires.
    pub fn to_json(&self) -> String {
        // A Report contains only strings and bools; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"ok":false,"error":"serialize failed"}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_success_shape() {
        let report = Report::success(true, true, false, false, vec!["out".into()]);
        let value: Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["applied"], true);
        assert_eq!(value["commit"], true);
        assert_eq!(value["saved"], false);
        assert_eq!(value["dryRun"], false);
        assert_eq!(value["logs"], serde_json::json!(["out"]));
        assert!(value.get("error").is_none());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_failure_omits_success_fields() {
        let report = Report::failure(&Error::MissingField);
        let value: Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"], "host and username required");
        assert!(value.get("applied").is_none());
        assert!(value.get("logs").is_none());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_failure_with_logs_keeps_partial_output() {
        use crate::error::{ChannelError, SessionError};

        let err = Error::Apply(SessionError::Channel(ChannelError::Closed));
        let report = Report::failure_with_logs(&err, vec!["partial".into()]);
        let value: Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"], "apply failed: channel closed");
        assert_eq!(value["logs"], serde_json::json!(["partial"]));
    }
}
