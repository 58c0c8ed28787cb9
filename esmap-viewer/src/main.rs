//! Standalone binary for the esmap interactive viewer.
//! Usage:
//!   esmapv [path]
//!   esmapv --export fields --out field-structure.txt

mod viewer;

use clap::{Arg, Command, ValueHint};
use esmap_config::Loader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use viewer::lang::LanguageStore;
use viewer::model::Model;
use viewer::sample::SAMPLE_DOCUMENT;
use viewer::snapshot::{export_panel, Panel};

fn main() {
    let matches = Command::new("esmapv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive terminal editor and visualizer for search-index configurations")
        .arg(
            Arg::new("path")
                .help("Index definition to open (defaults to a built-in sample)")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Additional configuration file layered over the defaults")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help("Override the UI language (en, ko)"),
        )
        .arg(
            Arg::new("state-file")
                .long("state-file")
                .help("Where the selected language is persisted")
                .default_value(".esmap-state.toml")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .help("Render one panel to a text snapshot and exit")
                .value_parser(["shards", "fields", "analysis"]),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .help("Snapshot output path (with --export)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write tracing output to this file instead of stderr")
                .value_hint(ValueHint::FilePath),
        )
        .get_matches();

    init_tracing(matches.get_one::<String>("log-file").map(String::as_str));

    let state_path = PathBuf::from(matches.get_one::<String>("state-file").expect("has default"));

    let mut loader = Loader::new().with_optional_file(&state_path);
    if let Some(config_path) = matches.get_one::<String>("config") {
        loader = loader.with_file(config_path);
    }
    if let Some(lang) = matches.get_one::<String>("lang") {
        loader = match loader.set_override("ui.language", lang.as_str()) {
            Ok(loader) => loader,
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        };
    }
    let config = match loader.build() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    let text = match matches.get_one::<String>("path") {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("Error reading {}: {err}", path);
                std::process::exit(1);
            }
        },
        None => SAMPLE_DOCUMENT.to_string(),
    };

    // Headless snapshot export: render one panel and exit.
    if let Some(panel_name) = matches.get_one::<String>("export") {
        let Some(panel) = Panel::from_name(panel_name) else {
            eprintln!("Error: unknown panel '{panel_name}'");
            std::process::exit(1);
        };
        let model = Model::new(text);
        let mut store = LanguageStore::new();
        store.init(&config.ui.language);
        let out = matches
            .get_one::<String>("out")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{}.txt", panel.file_stem())));
        if let Err(err) = export_panel(panel, &model, &store, &out) {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
        println!("{}", out.display());
        return;
    }

    let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Err(err) = viewer::viewer::run_viewer(text, &config, Some(state_path), export_dir) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(log_file: Option<&str>) {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => match std::fs::File::create(path) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .init();
            }
            Err(err) => {
                eprintln!("Error: cannot open log file {path}: {err}");
                std::process::exit(1);
            }
        },
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
