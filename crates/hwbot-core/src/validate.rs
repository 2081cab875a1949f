//! Shape checks for the review API response.

use serde_json::Value;

use crate::{domain::UnixTime, errors::Error, Result};

const HOMEWORKS: &str = "homeworks";
const CURRENT_DATE: &str = "current_date";

/// A response that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse<'a> {
    pub homeworks: &'a [Value],
    /// `None` when the key is present but not an integer.
    pub current_date: Option<UnixTime>,
}

impl<'a> ApiResponse<'a> {
    pub fn from_value(response: Option<&'a Value>) -> Result<Self> {
        let homeworks = extract_homeworks(response)?;
        // extract_homeworks guarantees the key exists.
        let current_date = response
            .and_then(|v| v.get(CURRENT_DATE))
            .and_then(Value::as_i64);
        Ok(Self {
            homeworks,
            current_date,
        })
    }
}

/// Check the response shape and return the list of homework records, in order.
pub fn extract_homeworks(response: Option<&Value>) -> Result<&[Value]> {
    let response = match response {
        None | Some(Value::Null) => return Err(Error::EmptyResponse),
        Some(v) => v,
    };

    let Some(obj) = response.as_object() else {
        return Err(Error::TypeMismatch(format!(
            "review API response is {}, expected an object",
            kind(response)
        )));
    };

    let missing: Vec<&str> = [HOMEWORKS, CURRENT_DATE]
        .into_iter()
        .filter(|key| !obj.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(Error::IncorrectShape(format!(
            "missing key(s): {}",
            missing.join(", ")
        )));
    }

    match &obj[HOMEWORKS] {
        Value::Array(items) => Ok(items.as_slice()),
        other => Err(Error::TypeMismatch(format!(
            "`{HOMEWORKS}` is {}, expected a list",
            kind(other)
        ))),
    }
}

pub(crate) fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_response_is_empty() {
        assert!(matches!(extract_homeworks(None), Err(Error::EmptyResponse)));
        assert!(matches!(
            extract_homeworks(Some(&Value::Null)),
            Err(Error::EmptyResponse)
        ));
    }

    #[test]
    fn non_object_responses_are_type_mismatch() {
        for v in [json!([1, 2]), json!("homeworks"), json!(42), json!(true)] {
            assert!(
                matches!(extract_homeworks(Some(&v)), Err(Error::TypeMismatch(_))),
                "{v}"
            );
        }
    }

    #[test]
    fn missing_keys_are_incorrect_shape() {
        for v in [
            json!({"foo": 1}),
            json!({"homeworks": []}),
            json!({"current_date": 1000}),
        ] {
            assert!(
                matches!(extract_homeworks(Some(&v)), Err(Error::IncorrectShape(_))),
                "{v}"
            );
        }
    }

    #[test]
    fn homeworks_must_be_a_list() {
        let v = json!({"homeworks": {"homework_name": "proj1"}, "current_date": 1000});
        let err = extract_homeworks(Some(&v)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn returns_homeworks_in_order() {
        let v = json!({
            "homeworks": [{"homework_name": "b"}, {"homework_name": "a"}],
            "current_date": 1000,
        });
        let list = extract_homeworks(Some(&v)).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["homework_name"], "b");

        let empty = json!({"homeworks": [], "current_date": 1000});
        assert!(extract_homeworks(Some(&empty)).unwrap().is_empty());
    }

    #[test]
    fn api_response_reads_current_date() {
        let v = json!({"homeworks": [], "current_date": 1000});
        let r = ApiResponse::from_value(Some(&v)).unwrap();
        assert_eq!(r.current_date, Some(1000));

        let v = json!({"homeworks": [], "current_date": "yesterday"});
        let r = ApiResponse::from_value(Some(&v)).unwrap();
        assert_eq!(r.current_date, None);
    }
}
