use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use serde_json::{Value, json};

use invoicely_cli::{App, AppConfig, Cli, Command, Outcome};
use invoicely_core::{FixedClock, InvoiceId};
use invoicely_infra::InvoiceStore;
use invoicely_observability::LogFormat;

fn app(seed: bool) -> App {
    let config = AppConfig {
        seed,
        ..AppConfig::default()
    };
    let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
    App::build(&config, clock).expect("app builds")
}

fn run(app: &App, command: Command) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = app.run(&command, &mut out).expect("command runs");
    (outcome, String::from_utf8(out).expect("utf-8 output"))
}

fn write_draft(name: &str, draft: &Value) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "invoicely-{}-{}.json",
        name,
        InvoiceId::generate()
    ));
    std::fs::write(&path, serde_json::to_vec(draft).unwrap()).unwrap();
    path
}

fn valid_draft(id: &str) -> Value {
    json!({
        "id": id,
        "date": "2024-06-01",
        "invoiceNumber": 200,
        "customerName": "Acme",
        "billingAddress": "1 Main Road",
        "shippingAddress": "2 Dock Street",
        "gstID": "29ABCDE1234F1Z5",
        "items": [
            { "id": "i1", "itemName": "Bolts", "quantity": 6, "price": 10, "amount": 60 },
            { "id": "i2", "itemName": "Nuts", "quantity": 2, "price": 20, "amount": 40 }
        ],
        "billSundrys": [],
        "totalAmount": 100
    })
}

#[test]
fn list_prints_seed_summaries_in_order() {
    let app = app(true);
    let (outcome, out) = run(&app, Command::List);

    assert_eq!(outcome, Outcome::Success);
    let rows: Vec<Value> = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], "0");
    assert_eq!(rows[1]["customerName"], "XYZ");
    assert_eq!(rows[1]["totalAmount"], 100.0);
}

#[test]
fn unseeded_store_starts_empty() {
    let app = app(false);
    let (outcome, out) = run(&app, Command::List);

    assert_eq!(outcome, Outcome::Success);
    assert!(out.is_empty());
    assert!(app.store().is_empty().unwrap());
}

#[test]
fn show_reports_missing_invoice() {
    let app = app(true);

    let (outcome, out) = run(&app, Command::Show { id: "1".to_string() });
    assert_eq!(outcome, Outcome::Success);
    let shown: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(shown["items"].as_array().unwrap().len(), 2);

    let (outcome, out) = run(&app, Command::Show { id: "missing-id".to_string() });
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(out.trim(), "invoice missing-id not found");
}

#[test]
fn check_prints_field_errors() {
    let app = app(true);

    let path = write_draft("check-ok", &valid_draft("new-1"));
    let (outcome, out) = run(&app, Command::Check { path });
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out.trim(), "valid");

    let mut draft = valid_draft("new-2");
    draft["totalAmount"] = json!(90);
    let path = write_draft("check-bad", &draft);
    let (outcome, out) = run(&app, Command::Check { path });
    assert_eq!(outcome, Outcome::Failure);
    let errors: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(errors.as_object().unwrap().len(), 1);
    assert!(errors.get("totalAmount").is_some());

    // Checking never touches the store.
    assert_eq!(app.store().len().unwrap(), 2);
}

#[test]
fn submit_appends_and_rejects_duplicates() {
    let app = app(true);
    let path = write_draft("submit", &valid_draft("new-3"));

    let (outcome, out) = run(&app, Command::Submit { path: path.clone() });
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out.lines().count(), 3);
    assert_eq!(
        app.store().get_by_id(&InvoiceId::from("new-3")).unwrap().total_amount,
        100.0
    );

    let (outcome, out) = run(&app, Command::Submit { path });
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(out.trim(), "invoice new-3 already exists");
    assert_eq!(app.store().len().unwrap(), 3);
}

#[test]
fn malformed_draft_is_an_error() {
    let app = app(true);
    let path = std::env::temp_dir().join(format!("invoicely-bad-{}.json", InvoiceId::generate()));
    std::fs::write(&path, "{ not json").unwrap();

    let mut out = Vec::new();
    let err = app.run(&Command::Check { path }, &mut out).unwrap_err();
    assert!(err.to_string().contains("malformed draft"));
}

#[test]
fn config_reads_environment_values() {
    let config = AppConfig::from_lookup(|key| match key {
        "INVOICELY_SEED" => Some("false".to_string()),
        "INVOICELY_LOG_FORMAT" => Some("pretty".to_string()),
        _ => None,
    });
    assert!(!config.seed);
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert!(config.warnings.is_empty());
}

#[test]
fn config_falls_back_on_bad_values() {
    let config = AppConfig::from_lookup(|key| match key {
        "INVOICELY_SEED" => Some("maybe".to_string()),
        "INVOICELY_LOG_FORMAT" => Some("xml".to_string()),
        _ => None,
    });
    assert_eq!(config.seed, AppConfig::default().seed);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.warnings.len(), 2);
}

#[test]
fn cli_parses_subcommands() {
    let cli = Cli::parse_from(["invoicely", "show", "42"]);
    assert_eq!(cli.command, Command::Show { id: "42".to_string() });

    let cli = Cli::parse_from(["invoicely", "check", "draft.json"]);
    assert_eq!(cli.command, Command::Check { path: PathBuf::from("draft.json") });
}
