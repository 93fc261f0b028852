//! The apply request parsed from standard input.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// One configuration push, as supplied by the caller on stdin.
///
/// Field names follow the JSON contract (`dryRun`, not `dry_run`).
/// `commit` and `save` default to true; a dry run pushes to the candidate
/// configuration, shows the diff and discards it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    /// String fields accept JSON null as equivalent to absent.
    #[serde(default, deserialize_with = "null_to_empty")]
    pub host: String,

    /// SSH port; absent, null or 0 all mean the default of 22.
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default, deserialize_with = "null_to_empty")]
    pub username: String,

    #[serde(default, deserialize_with = "null_to_empty")]
    pub password: String,

    /// Multi-line block of configuration; only `set `/`delete ` lines
    /// are pushed, everything else is dropped.
    #[serde(default, deserialize_with = "null_to_empty")]
    pub configuration: String,

    #[serde(default = "default_true")]
    pub commit: bool,

    #[serde(default = "default_true")]
    pub save: bool,

    #[serde(default)]
    pub dry_run: bool,
}

fn default_true() -> bool {
    true
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApplyRequest {
    /// Parse a request from a JSON document.
    pub fn from_json(input: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(input)?)
    }

    /// Check the required fields are present and non-empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.host.is_empty() || self.username.is_empty() {
            return Err(Error::MissingField);
        }
        Ok(())
    }

    /// Effective SSH port.
    pub fn port(&self) -> u16 {
        match self.port {
            Some(0) | None => 22,
            Some(p) => p,
        }
    }

    /// Password wrapped for the transport layer.
    pub fn password(&self) -> SecretString {
        SecretString::from(self.password.clone())
    }

    /// Extract the configuration operations to push.
    ///
    /// Lines are trimmed; only non-empty lines starting with `set ` or
    /// `delete ` survive, in input order.
    pub fn operations(&self) -> Vec<String> {
        self.configuration
            .lines()
            .map(str::trim)
            .filter(|line| {
                !line.is_empty() && (line.starts_with("set ") || line.starts_with("delete "))
            })
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = ApplyRequest::from_json(r#"{"host":"r1","username":"admin"}"#).unwrap();
        assert_eq!(req.port(), 22);
        assert_eq!(req.password, "");
        assert_eq!(req.configuration, "");
        assert!(req.commit);
        assert!(req.save);
        assert!(!req.dry_run);
    }

    #[test]
    fn test_camel_case_dry_run() {
        let req = ApplyRequest::from_json(
            r#"{"host":"r1","username":"admin","dryRun":true,"commit":false,"save":false}"#,
        )
        .unwrap();
        assert!(req.dry_run);
        assert!(!req.commit);
        assert!(!req.save);
    }

    #[test]
    fn test_port_zero_means_default() {
        let req = ApplyRequest::from_json(r#"{"host":"r1","username":"admin","port":0}"#).unwrap();
        assert_eq!(req.port(), 22);

        let req =
            ApplyRequest::from_json(r#"{"host":"r1","username":"admin","port":2222}"#).unwrap();
        assert_eq!(req.port(), 2222);
    }

    #[test]
    fn test_validate_requires_host_and_username() {
        let req = ApplyRequest::from_json(r#"{"username":"admin"}"#).unwrap();
        assert!(matches!(req.validate(), Err(Error::MissingField)));

        let req = ApplyRequest::from_json(r#"{"host":"r1"}"#).unwrap();
        assert!(matches!(req.validate(), Err(Error::MissingField)));

        // Empty strings count as missing
        let req = ApplyRequest::from_json(r#"{"host":"","username":"admin"}"#).unwrap();
        assert!(matches!(req.validate(), Err(Error::MissingField)));

        let req = ApplyRequest::from_json(r#"{"host":"r1","username":"admin"}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_null_string_fields_treated_as_absent() {
        let req = ApplyRequest::from_json(
            r#"{"host":"r1","username":"admin","password":null,"configuration":null}"#,
        )
        .unwrap();
        assert_eq!(req.password, "");
        assert_eq!(req.configuration, "");

        // Null host counts as missing, same as an absent field
        let req = ApplyRequest::from_json(r#"{"host":null,"username":"admin"}"#).unwrap();
        assert!(matches!(req.validate(), Err(Error::MissingField)));
    }

    #[test]
    fn test_invalid_json() {
        let err = ApplyRequest::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid json"));
    }

    #[test]
    fn test_operations_filtering() {
        let req = ApplyRequest::from_json(
            r#"{"host":"r1","username":"admin","configuration":"set interfaces eth0 address 1.2.3.4/24\nnot a command\ndelete interfaces eth1"}"#,
        )
        .unwrap();
        assert_eq!(
            req.operations(),
            vec![
                "set interfaces eth0 address 1.2.3.4/24".to_string(),
                "delete interfaces eth1".to_string(),
            ]
        );
    }

    #[test]
    fn test_operations_trim_and_blank_lines() {
        let req = ApplyRequest::from_json(
            r#"{"host":"r1","username":"admin","configuration":"  set system host-name r1  \r\n\n   \n# comment\nsetting is not set\ndelete system ntp"}"#,
        )
        .unwrap();
        assert_eq!(
            req.operations(),
            vec![
                "set system host-name r1".to_string(),
                "delete system ntp".to_string(),
            ]
        );
    }

    #[test]
    fn test_operations_empty() {
        let req = ApplyRequest::from_json(
            r#"{"host":"r1","username":"admin","configuration":"show interfaces\n\n"}"#,
        )
        .unwrap();
        assert!(req.operations().is_empty());
    }
}
