use uuid::Uuid;

use crate::error::ServiceError;

/// Returns the value when it counts as supplied: absent and empty strings do not.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parses a store identifier from its request representation.
pub fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::MalformedId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_missing() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some(" ".into())), Some(" "));
        assert_eq!(present(&Some("a@b.com".into())), Some("a@b.com"));
    }

    #[test]
    fn ids_round_trip_and_garbage_is_malformed() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("not-a-hex-id"),
            Err(ServiceError::MalformedId(raw)) if raw == "not-a-hex-id"
        ));
    }
}
