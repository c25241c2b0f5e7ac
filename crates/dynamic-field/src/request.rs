//! Parameters of a composer dialog request.

use crate::error::ComposeError;
use vactory_util::non_blank;

const FIELD_ID_REQUIRED: &str =
    "The \"field_id\" query parameter is required and must be a string.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalRequest {
    /// Host field the composed data belongs to.
    pub field_id: String,
    /// `None` until a widget has been picked.
    pub widget_id: Option<String>,
    /// Host field cardinality; `-1` is unlimited.
    pub cardinality: Option<i64>,
    pub wrapper_id: Option<String>,
    /// Prior data blob, from `dialogOptions[data]`.
    pub data: Option<String>,
}

impl ModalRequest {
    /// Reads the query string pairs and the dialog data.
    ///
    /// Empty values are treated as absent; a missing `field_id` is a client
    /// error.
    pub fn from_query<'a, I>(query: I, dialog_data: Option<&str>) -> Result<Self, ComposeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = ModalRequest {
            data: non_blank(dialog_data).map(str::to_string),
            ..ModalRequest::default()
        };
        for (name, value) in query {
            let Some(value) = non_blank(Some(value)) else {
                continue;
            };
            match name {
                "field_id" => request.field_id = value.to_string(),
                "widget_id" => request.widget_id = Some(value.to_string()),
                "cardinality" => request.cardinality = value.trim().parse().ok(),
                "wrapper_id" => request.wrapper_id = Some(value.to_string()),
                _ => {}
            }
        }
        if request.field_id.is_empty() {
            return Err(ComposeError::client(FIELD_ID_REQUIRED));
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_id() {
        let err = ModalRequest::from_query([("widget_id", "a:b")], None).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), FIELD_ID_REQUIRED);

        let err = ModalRequest::from_query([("field_id", "")], None).unwrap_err();
        assert!(matches!(err, ComposeError::ClientInput(_)));
    }

    #[test]
    fn test_all_parameters() {
        let request = ModalRequest::from_query(
            [
                ("field_id", "field_blocks"),
                ("widget_id", "vactory:slider"),
                ("cardinality", "-1"),
                ("wrapper_id", ""),
                ("ignored", "x"),
            ],
            Some("[]"),
        )
        .unwrap();
        assert_eq!(request.field_id, "field_blocks");
        assert_eq!(request.widget_id.as_deref(), Some("vactory:slider"));
        assert_eq!(request.cardinality, Some(-1));
        assert_eq!(request.wrapper_id, None);
        assert_eq!(request.data.as_deref(), Some("[]"));
    }
}
