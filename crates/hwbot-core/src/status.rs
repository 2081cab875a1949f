//! Homework status -> human-readable verdict.

use std::collections::HashMap;

use serde_json::Value;

use crate::{errors::Error, validate::kind, Result};

/// Lookup table from review status code to verdict text.
#[derive(Clone, Debug)]
pub struct StatusCatalog {
    verdicts: HashMap<String, String>,
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self::new([
            (
                "approved",
                "The work has been reviewed: the reviewer liked everything. Hooray!",
            ),
            ("reviewing", "The work has been taken for review."),
            (
                "rejected",
                "The work has been reviewed: the reviewer has comments.",
            ),
        ])
    }
}

impl StatusCatalog {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            verdicts: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn verdict(&self, status: &str) -> Option<&str> {
        self.verdicts.get(status).map(String::as_str)
    }

    /// Build the notification text for a single homework record.
    pub fn describe_status(&self, record: &Value) -> Result<String> {
        let homework_name = required_str(record, "homework_name")?;
        let status = required_str(record, "status")?;

        let Some(verdict) = self.verdict(status) else {
            let err = Error::UnknownStatus(status.to_string());
            tracing::error!("{err}");
            return Err(err);
        };

        Ok(format!("Changed review status of work \"{homework_name}\". {verdict}"))
    }
}

fn required_str<'a>(record: &'a Value, field: &'static str) -> Result<&'a str> {
    let err = match record.get(field) {
        Some(Value::String(s)) => return Ok(s.as_str()),
        None => Error::MissingField(field),
        Some(other) => {
            Error::TypeMismatch(format!("`{field}` is {}, expected a string", kind(other)))
        }
    };
    tracing::error!("{err}");
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn great_job() -> StatusCatalog {
        StatusCatalog::new([("approved", "Great job!")])
    }

    #[test]
    fn formats_known_status() {
        let record = json!({"homework_name": "proj1", "status": "approved", "id": 7});
        assert_eq!(
            great_job().describe_status(&record).unwrap(),
            "Changed review status of work \"proj1\". Great job!"
        );
    }

    #[test]
    fn formatting_is_idempotent() {
        let catalog = StatusCatalog::default();
        let record = json!({"homework_name": "proj1", "status": "reviewing"});
        let a = catalog.describe_status(&record).unwrap();
        let b = catalog.describe_status(&record).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_fields_are_reported() {
        let catalog = StatusCatalog::default();
        assert!(matches!(
            catalog.describe_status(&json!({"status": "approved"})),
            Err(Error::MissingField("homework_name"))
        ));
        assert!(matches!(
            catalog.describe_status(&json!({"homework_name": "proj1"})),
            Err(Error::MissingField("status"))
        ));
        // Not an object at all: nothing can be found in it.
        assert!(matches!(
            catalog.describe_status(&json!(["proj1", "approved"])),
            Err(Error::MissingField("homework_name"))
        ));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let record = json!({"homework_name": "proj1", "status": "reviewing"});
        match great_job().describe_status(&record) {
            Err(Error::UnknownStatus(s)) => assert_eq!(s, "reviewing"),
            other => panic!("expected UnknownStatus, got {other:?}"),
        }
    }

    #[test]
    fn non_string_field_is_type_mismatch() {
        let record = json!({"homework_name": 12, "status": "approved"});
        assert!(matches!(
            great_job().describe_status(&record),
            Err(Error::TypeMismatch(_))
        ));
    }

    #[test]
    fn default_catalog_knows_review_statuses() {
        let catalog = StatusCatalog::default();
        for s in ["approved", "reviewing", "rejected"] {
            assert!(catalog.verdict(s).is_some(), "{s}");
        }
        assert!(catalog.verdict("on_hold").is_none());
    }
}
