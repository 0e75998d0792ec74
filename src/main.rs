use std::io::Read;
use std::path::PathBuf;

use rxdoc_lib::models::{PrescriptionState, RenderMode};
use rxdoc_lib::rx::{render_prescription, NoCatalog};
use rxdoc_lib::config;
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Usage: rxdoc [--template] [prescription.json]")]
    Usage,
}

struct Args {
    mode: RenderMode,
    input: Option<PathBuf>,
}

fn parse_args() -> Result<Args, CliError> {
    let mut args = Args {
        mode: RenderMode::Final,
        input: None,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--template" => args.mode = RenderMode::Template,
            "-" => args.input = None,
            flag if flag.starts_with('-') => return Err(CliError::Usage),
            path if args.input.is_none() => args.input = Some(PathBuf::from(path)),
            _ => return Err(CliError::Usage),
        }
    }
    Ok(args)
}

fn run() -> Result<(), CliError> {
    let args = parse_args()?;
    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let state: PrescriptionState = serde_json::from_str(&raw)?;
    tracing::info!(
        prescription_id = %state.id,
        items = state.items.len(),
        mode = %args.mode,
        "Rendering prescription"
    );

    let issued_on = chrono::Local::now().date_naive();
    let docs = render_prescription(&state, &NoCatalog, args.mode, issued_on);
    println!("{}", serde_json::to_string_pretty(&docs)?);
    Ok(())
}

fn main() {
    rxdoc_lib::init_tracing();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    if let Err(e) = run() {
        tracing::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
