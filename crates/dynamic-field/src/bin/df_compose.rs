//! `df-compose` - compose a widget form from a schema and a data blob.
//!
//! Usage:
//!   df-compose <schema.json> [rows]
//!
//! The prior data blob is read from stdin; empty stdin means no blob.
//! The composed form is printed as JSON. Set `RUST_LOG` for logs on stderr.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;
use vactory_dynamic_field::{build, ComposerState, DynamicFieldSettings, WidgetSchema};

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vactory_dynamic_field=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn main() {
    setup_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(schema_path) = args.get(1) else {
        fail("Usage: df-compose <schema.json> [rows]");
    };
    let rows = match args.get(2).map(|r| r.parse::<usize>()) {
        None => None,
        Some(Ok(rows)) => Some(rows),
        Some(Err(_)) => fail("rows must be a non-negative integer"),
    };

    let path = Path::new(schema_path);
    let widget_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("widget");
    let schema = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| WidgetSchema::from_json_str(widget_id, &text).map_err(|e| e.to_string()))
        .unwrap_or_else(|e| fail(e));

    let mut blob = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut blob) {
        fail(e);
    }
    let blob = blob.trim();
    let blob = (!blob.is_empty()).then_some(blob);

    let settings = DynamicFieldSettings::default();
    let state = ComposerState::from_blob(blob, rows, settings.row_floor).unwrap_or_else(|e| fail(e));
    let form = build(&schema, &state);

    let out = serde_json::to_string_pretty(&form).unwrap_or_else(|e| fail(e));
    let mut stdout = io::stdout();
    if let Err(e) = writeln!(stdout, "{out}") {
        fail(e);
    }
}
