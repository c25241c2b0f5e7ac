#![allow(dead_code)]

use std::path::PathBuf;
use vactory_dynamic_field::{JsonDirSchemas, SchemaStore, WidgetSchema};

/// Fixture widgets:
/// - `vactory:slider` multiple, limit 3, groups, media and extra fields,
/// - `vactory:quote` single, one required field,
/// - `partner:map` blank category,
/// - `vactory:legacy` disabled.
pub fn widgets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/widgets")
}

pub fn store() -> JsonDirSchemas {
    JsonDirSchemas::open(widgets_dir()).expect("fixture directory")
}

pub fn slider() -> WidgetSchema {
    store().load_schema("vactory:slider").expect("slider fixture")
}

pub fn quote() -> WidgetSchema {
    store().load_schema("vactory:quote").expect("quote fixture")
}
