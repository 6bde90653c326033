//! CareCost CLI - one-shot lookups and an interactive prompt session.
//!
//! Commands:
//! - `search` - list ICD-10 codes matching a symptom
//! - `validate-zip` - check whether a 5-digit ZIP code exists
//! - `analyze` - search, pick a code by number, and print the cost ranges
//! - `ask` - put a free-form medical question to the backend assistant
//! - `interactive` - the full symptom, diagnosis, ZIP, results walk-through

mod console;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use carecost_core::api::HttpBackend;
use carecost_core::config::ClientConfig;
use carecost_core::workflow::ZIP_LENGTH;
use carecost_core::{WorkflowController, WorkflowError, ZipStatus};

use crate::console::{parse_choice, prompt, ConsoleView};

type Controller = WorkflowController<HttpBackend, ConsoleView<io::Stdout>>;

#[derive(Parser)]
#[command(
    name = "carecost",
    about = "CareCost CLI - from a symptom to an estimated cost range"
)]
struct Cli {
    /// Backend base URL. Overrides the config file and CARECOST_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds. Overrides the config file and CARECOST_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List ICD-10 codes matching a symptom.
    Search {
        /// Symptom text, e.g. "chest pain".
        #[arg(required = true, num_args = 1..)]
        symptom: Vec<String>,
    },
    /// Check whether a ZIP code exists.
    ValidateZip {
        zip: String,
    },
    /// Estimate costs for a symptom, a chosen code and a ZIP code.
    Analyze {
        /// Symptom text to search.
        #[arg(long)]
        symptom: String,

        /// Which search result to use, counting from 1.
        #[arg(long)]
        index: usize,

        /// 5-digit ZIP code.
        #[arg(long)]
        zip: String,
    },
    /// Ask the backend assistant a medical question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Walk through symptom, diagnosis, ZIP code and results at the prompt.
    Interactive,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    let result = build_controller(&cli).and_then(|mut controller| match &cli.command {
        Commands::Search { symptom } => run_search(&mut controller, &symptom.join(" "), cli.json),
        Commands::ValidateZip { zip } => run_validate_zip(&mut controller, zip, cli.json),
        Commands::Analyze { symptom, index, zip } => {
            run_analyze(&mut controller, symptom, *index, zip, cli.json)
        }
        Commands::Ask { query } => run_ask(&mut controller, &query.join(" "), cli.json),
        Commands::Interactive => run_interactive(&mut controller),
    });

    if let Err(e) = result {
        if !already_reported(&e) {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}

/// The console view has printed every workflow error except an out-of-range pick.
fn already_reported(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<WorkflowError>(),
        Some(e) if !matches!(e, WorkflowError::SelectionOutOfRange { .. })
    )
}

/// Diagnostics go to stderr so stdout stays clean for results and JSON.
fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("carecost=warn".parse()?))
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// Defaults, then config file, then environment, then command-line flags.
fn resolve_config(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::resolve(cli.config.as_deref(), env)
        .context("invalid CareCost configuration")?;
    if let Some(url) = &cli.base_url {
        config.base_url = url.trim().to_string();
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout_secs = secs;
    }
    config.validate().context("invalid command-line option")?;
    Ok(config)
}

fn build_controller(cli: &Cli) -> Result<Controller> {
    let config = resolve_config(cli, |key| std::env::var(key).ok())?;
    info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "using backend");
    let api = HttpBackend::new(&config)?;
    Ok(WorkflowController::new(api, ConsoleView::new(io::stdout(), cli.json)))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_search(controller: &mut Controller, symptom: &str, json: bool) -> Result<()> {
    let candidates = controller.search_diagnoses(symptom)?;
    if json {
        print_json(&json!({ "symptom": symptom.trim(), "icd_codes": candidates }))?;
    }
    Ok(())
}

fn run_validate_zip(controller: &mut Controller, zip: &str, json: bool) -> Result<()> {
    let zip = zip.trim();
    if zip.chars().count() != ZIP_LENGTH {
        bail!("{}", carecost_core::workflow::BAD_ZIP_MESSAGE);
    }

    let status = controller.validate_zip(zip);
    if json {
        let valid = match status {
            ZipStatus::Valid => Some(true),
            ZipStatus::Invalid => Some(false),
            ZipStatus::Unknown => None,
        };
        print_json(&json!({ "zip_code": zip, "valid": valid }))?;
    }
    match status {
        ZipStatus::Valid => Ok(()),
        ZipStatus::Invalid => bail!("{zip} is not a known ZIP code"),
        ZipStatus::Unknown => bail!("could not reach the backend to check {zip}"),
    }
}

fn run_analyze(
    controller: &mut Controller,
    symptom: &str,
    index: usize,
    zip: &str,
    json: bool,
) -> Result<()> {
    let count = controller.search_diagnoses(symptom)?.len();
    if count == 0 {
        bail!("no diagnosis codes matched {:?}", symptom.trim());
    }
    let Some(selection) = index.checked_sub(1).filter(|i| *i < count) else {
        bail!("--index must be between 1 and {count}");
    };
    controller.select_diagnosis(selection)?;

    let result = controller.analyze_costs(zip)?;
    if json {
        print_json(&serde_json::to_value(&result)?)?;
    }
    Ok(())
}

fn run_ask(controller: &mut Controller, query: &str, json: bool) -> Result<()> {
    let answer = controller.ask(query)?;
    if json {
        print_json(&json!({ "query": query.trim(), "response": answer }))?;
    } else {
        println!("{answer}");
    }
    Ok(())
}

/// Prompt-driven session. End of input at any prompt ends it quietly.
fn run_interactive(controller: &mut Controller) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        let Some(symptom) = prompt(&mut input, &mut out, "Enter a symptom: ")? else {
            return Ok(());
        };
        writeln!(out)?;
        match controller.search_diagnoses(&symptom) {
            Ok(codes) if codes.is_empty() => return Ok(()),
            Ok(_) => break,
            Err(e) if e.is_validation() => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let count = controller.session().candidates().len();
    let selection = loop {
        let label = format!("Select a code (1-{count}): ");
        let Some(raw) = prompt(&mut input, &mut out, &label)? else {
            return Ok(());
        };
        match parse_choice(&raw, count) {
            Some(index) => break index,
            None => writeln!(out, "Please enter a number between 1 and {count}")?,
        }
    };
    controller.select_diagnosis(selection)?;

    let zip = loop {
        let Some(zip) = prompt(&mut input, &mut out, "Enter your ZIP code for cost lookup: ")?
        else {
            return Ok(());
        };
        if zip.chars().count() != ZIP_LENGTH {
            writeln!(out, "{}", carecost_core::workflow::BAD_ZIP_MESSAGE)?;
            continue;
        }
        match controller.validate_zip(&zip) {
            ZipStatus::Valid => break zip,
            ZipStatus::Invalid => continue,
            // unreachable backend: let the analysis report the real error
            ZipStatus::Unknown => break zip,
        }
    };

    controller.analyze_costs(&zip)?;
    Ok(())
}
