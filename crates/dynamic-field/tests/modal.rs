mod common;

use serde_json::json;
use vactory_dynamic_field::{
    ComposeError, ConfigurationError, DynamicFieldSettings, ModalComposer, ModalRequest,
    ModalStep, RowAction, SchemaStore, SelectMode, Submission, WidgetCatalog,
};

fn request(widget_id: Option<&str>, data: Option<&str>) -> ModalRequest {
    let mut query = vec![("field_id", "field_blocks")];
    if let Some(id) = widget_id {
        query.push(("widget_id", id));
    }
    ModalRequest::from_query(query, data).unwrap()
}

fn composer() -> ModalComposer<vactory_dynamic_field::JsonDirSchemas> {
    ModalComposer::new(common::store(), DynamicFieldSettings::default())
}

#[test]
fn directory_store_lists_every_fixture() {
    let ids: Vec<String> = common::store()
        .list()
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(
        ids,
        vec!["partner:map", "vactory:legacy", "vactory:quote", "vactory:slider"]
    );
}

#[test]
fn directory_store_unknown_widget() {
    let err = common::store().load_schema("vactory:nope").unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownWidget(id) if id == "vactory:nope"));
}

#[test]
fn catalog_groups_enabled_widgets_with_others_last() {
    let catalog = WidgetCatalog::from_store(&common::store()).unwrap();
    let groups = catalog.by_category(None);
    let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(categories, vec!["Sliders", "Others"]);
    let others: Vec<&str> = groups[1].widgets.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(others, vec!["partner:map", "vactory:quote"]);
}

#[test]
fn open_without_widget_lists_templates() {
    let step = composer().open(&request(None, None), None).unwrap();
    let ModalStep::SelectWidget(selection) = step else {
        panic!("expected the selection step");
    };
    assert_eq!(selection.field_id, "field_blocks");
    assert_eq!(selection.mode, SelectMode::Templates);
    assert_eq!(selection.groups.len(), 2);
}

#[test]
fn dropdown_mode_and_provider_filter() {
    let settings = DynamicFieldSettings::from_toml_str("is_dropdown_select_templates = true").unwrap();
    let composer = ModalComposer::new(common::store(), settings)
        .with_allowed_providers(vec!["partner".to_string()]);
    let selection = composer.select_widget("field_blocks").unwrap();
    assert_eq!(selection.mode, SelectMode::Dropdown);
    assert_eq!(selection.groups.len(), 1);
    assert_eq!(selection.groups[0].widgets[0].id, "partner:map");
}

#[test]
fn open_with_widget_composes_prior_data() {
    let blob = r#"[{"title": "Saved"}]"#;
    let step = composer()
        .open(&request(Some("vactory:slider"), Some(blob)), Some(2))
        .unwrap();
    let ModalStep::Form(form) = step else {
        panic!("expected the component form");
    };
    assert_eq!(form.components.len(), 2);
    assert_eq!(
        form.find("components[0][title]").unwrap().default_value,
        Some(json!("Saved"))
    );
}

#[test]
fn unknown_widget_is_a_configuration_error() {
    let err = composer()
        .open(&request(Some("vactory:nope"), None), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ComposeError::Configuration(ConfigurationError::UnknownWidget(_))
    ));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn malformed_blob_is_a_client_error() {
    let err = composer()
        .open(&request(Some("vactory:slider"), Some("{oops")), None)
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn add_more_is_allowed_with_invalid_components() {
    let form = composer()
        .row_action(
            &request(Some("vactory:slider"), None),
            json!([{"title": ""}]),
            RowAction::AddMore,
        )
        .unwrap();
    assert_eq!(form.components.len(), 2);
}

#[test]
fn remove_one_is_blocked_by_validation_errors() {
    let composer = composer();
    let req = request(Some("vactory:slider"), None);

    let blocked = composer
        .row_action(&req, json!([{"title": "A"}, {"title": ""}]), RowAction::RemoveOne)
        .unwrap();
    assert_eq!(blocked.components.len(), 2);
    assert_eq!(blocked.errors.len(), 1);
    assert_eq!(blocked.errors[0].name(), "components[1][title]");

    let removed = composer
        .row_action(&req, json!([{"title": "A"}, {"title": "B"}]), RowAction::RemoveOne)
        .unwrap();
    assert_eq!(removed.components.len(), 1);
    assert!(removed.errors.is_empty());
}

#[test]
fn submit_reorders_by_submitted_weight() {
    let submission = composer()
        .submit(
            &request(Some("vactory:slider"), None),
            json!({
                "0": {"title": "A", "_weight": 2},
                "1": {"title": "B", "_weight": 1},
                "extra_field": {"intro": "Hi"}
            }),
        )
        .unwrap();
    let Submission::Accepted { widget_id, data } = submission else {
        panic!("expected the data to be accepted");
    };
    assert_eq!(widget_id, "vactory:slider");
    let data: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(
        data,
        json!({
            "0": {"title": "B", "_weight": 1},
            "1": {"title": "A", "_weight": 2},
            "extra_field": {"intro": "Hi"}
        })
    );
}

#[test]
fn submit_with_errors_rebuilds_the_form() {
    let submission = composer()
        .submit(
            &request(Some("vactory:quote"), None),
            json!([{"author": "Anon"}]),
        )
        .unwrap();
    let Submission::Invalid(form) = submission else {
        panic!("expected validation errors");
    };
    assert_eq!(form.errors[0].name(), "components[0][quote]");
    assert_eq!(
        form.find("components[0][author]").unwrap().default_value,
        Some(json!("Anon"))
    );
}

#[test]
fn submit_requires_a_widget() {
    let err = composer()
        .submit(&request(None, None), json!([]))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
