//! Shared HTTP utilities for the report gateway.

/// Extracts the human readable message from a JSON error body.
///
/// The backend reports failures as `{"message": "..."}` and, for some
/// validation errors, `{"error": "..."}`. `message` wins when both exist.
pub(super) fn extract_backend_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    ["message", "error"]
        .into_iter()
        .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::extract_backend_message;

    #[rstest]
    #[case::message(r#"{"message":"Fecha inválida"}"#, Some("Fecha inválida"))]
    #[case::error_field(r#"{"error":"Unauthorized"}"#, Some("Unauthorized"))]
    #[case::message_wins(r#"{"message":"primero","error":"segundo"}"#, Some("primero"))]
    #[case::blank_message_falls_back(r#"{"message":"  ","error":"segundo"}"#, Some("segundo"))]
    #[case::not_json("<html>502</html>", None)]
    #[case::no_fields(r#"{"status":500}"#, None)]
    fn extracts_message(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_backend_message(body).as_deref(), expected);
    }
}
