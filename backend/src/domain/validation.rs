//! Pure input predicates shared by the service and inbound adapters.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .unwrap_or_else(|error| panic!("token regex failed to compile: {error}"))
    })
}

/// True when `value` follows the 8-4-4-4-12 hexadecimal token grammar.
///
/// # Examples
/// ```
/// use borga::domain::validation::is_well_formed_token;
///
/// assert!(is_well_formed_token("0F3EDB9B-76eb-4fc3-a87b-a40980b9a922"));
/// assert!(!is_well_formed_token("0f3edb9b76eb4fc3a87ba40980b9a922"));
/// ```
pub fn is_well_formed_token(value: &str) -> bool {
    token_regex().is_match(value)
}

/// True when `value` is a JSON object or array.
pub fn is_non_null_struct(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Treats missing and empty strings alike.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::lowercase("fc585a9a-be72-486c-be1a-438f41acbaae", true)]
    #[case::uppercase("FC585A9A-BE72-486C-BE1A-438F41ACBAAE", true)]
    #[case::missing_hyphens("fc585a9abe72486cbe1a438f41acbaae", false)]
    #[case::short_group("fc585a9-be72-486c-be1a-438f41acbaae", false)]
    #[case::non_hex("zc585a9a-be72-486c-be1a-438f41acbaae", false)]
    #[case::trailing_space("fc585a9a-be72-486c-be1a-438f41acbaae ", false)]
    #[case::empty("", false)]
    fn token_grammar(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_well_formed_token(input), expected);
    }

    #[rstest]
    #[case::object(json!({ "name": "G" }), true)]
    #[case::empty_object(json!({}), true)]
    #[case::array(json!([1, 2]), true)]
    #[case::null(Value::Null, false)]
    #[case::string(json!("text"), false)]
    #[case::number(json!(4), false)]
    #[case::boolean(json!(true), false)]
    fn non_null_struct(#[case] input: Value, #[case] expected: bool) {
        assert_eq!(is_non_null_struct(&input), expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some(" "), Some(" "))]
    #[case(Some("G"), Some("G"))]
    fn presence_follows_emptiness(#[case] input: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(present(input), expected);
    }
}
