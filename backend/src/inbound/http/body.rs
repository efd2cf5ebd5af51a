//! JSON request bodies.
//!
//! Bodies are read as raw bytes. Anything that is not a JSON object of the
//! expected shape reads as an empty payload, so the service reports its own
//! invalid-input error after the token and path checks. Arrays never bind
//! to fields by position.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::validation::is_non_null_struct;

/// Decode `body` into `T`, falling back to `T::default()`.
///
/// # Examples
/// ```
/// use borga::domain::GroupInput;
/// use borga::inbound::http::body::structured_body;
///
/// let input: GroupInput = structured_body(br#"{"name":"G"}"#);
/// assert_eq!(input.name.as_deref(), Some("G"));
///
/// let input: GroupInput = structured_body(b"null");
/// assert_eq!(input, GroupInput::default());
/// ```
pub fn structured_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) if is_non_null_struct(&value) && value.is_object() => value,
        Ok(_) => {
            debug!("request body is not a JSON object");
            return T::default();
        }
        Err(err) => {
            debug!(error = %err, "request body is not JSON");
            return T::default();
        }
    };
    serde_json::from_value(value).unwrap_or_else(|err| {
        debug!(error = %err, "request body has the wrong shape");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GroupInput;
    use rstest::rstest;

    #[rstest]
    #[case::empty(b"")]
    #[case::garbage(b"{name")]
    #[case::null(b"null")]
    #[case::number(b"42")]
    #[case::string(b"\"G\"")]
    #[case::empty_array(b"[]")]
    #[case::positional_array(br#"["G","D"]"#)]
    #[case::wrong_type(br#"{"name": 5}"#)]
    fn unusable_bodies_read_as_empty(#[case] body: &[u8]) {
        assert_eq!(structured_body::<GroupInput>(body), GroupInput::default());
    }

    #[rstest]
    fn missing_fields_stay_absent() {
        let input: GroupInput = structured_body(br#"{"description":"D"}"#);
        assert_eq!(input.name, None);
        assert_eq!(input.description.as_deref(), Some("D"));
    }
}
