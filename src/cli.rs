//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_export_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::typst_report::TypstReportAdapter;
use crate::domain::catalog::{default_addbacks, merge_catalog, parse_category, Category};
use crate::domain::config_validation::{resolve_settings, SettingsOverrides, ValuationSettings};
use crate::domain::earnings::Mode;
use crate::domain::engine::{evaluate, ValuationRequest, ValuationResult};
use crate::domain::error::ValuatorError;
use crate::domain::export::export_rows;
use crate::domain::session::Session;
use crate::domain::sheet::{AmountSheet, FinancialInputs, OwnerAddBacks};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::{ReportContext, ReportPort};

#[derive(Parser, Debug)]
#[command(name = "valuator", about = "Restaurant EBITDA / SDE valuation calculator")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a valuation and write the requested reports
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        /// Separate file holding [session], [inputs] and [addbacks]
        #[arg(short, long)]
        inputs: Option<PathBuf>,
        /// Typst report output path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// CSV export output path
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        base: Option<String>,
        /// Currency amount for `--base fixed`, e.g. `$86,729`
        #[arg(long)]
        fixed_base: Option<String>,
    },
    /// Validate a valuation configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the input fields and add-back categories
    Fields {
        #[arg(long)]
        mode: Option<String>,
        /// Include `[addback_categories]` from this config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Output destinations for an evaluation.
#[derive(Debug, Default)]
pub struct OutputPaths<'a> {
    pub report: Option<&'a Path>,
    pub csv: Option<&'a Path>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Evaluate {
            config,
            inputs,
            output,
            csv,
            mode,
            base,
            fixed_base,
        } => {
            let overrides = SettingsOverrides {
                mode,
                base,
                fixed_base,
            };
            let outputs = OutputPaths {
                report: output.as_deref(),
                csv: csv.as_deref(),
            };
            run_evaluate(&config, inputs.as_deref(), &overrides, &outputs)
        }
        Command::Validate { config } => run_validate(&config),
        Command::Fields { mode, config } => run_fields(mode.as_deref(), config.as_deref()),
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .init();
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ValuatorError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn sheet_from_section(config: &dyn ConfigPort, section: &str) -> AmountSheet {
    AmountSheet::from_raw(config.section_entries(section))
}

/// Read `[inputs]`, warning about fields the chosen mode does not use.
pub fn build_inputs(config: &dyn ConfigPort, mode: Mode) -> FinancialInputs {
    let inputs = sheet_from_section(config, "inputs");
    let shape = mode.shape();

    if !inputs.contains(&shape.revenue) {
        warn!(field = %shape.revenue, "revenue field missing, treating as 0");
    }
    for (key, _) in inputs.iter() {
        if key != shape.revenue && !shape.costs.iter().any(|c| c == key) {
            warn!(field = key, %mode, "input not used by this mode");
        }
    }
    inputs
}

pub fn build_addbacks(config: &dyn ConfigPort) -> OwnerAddBacks {
    sheet_from_section(config, "addbacks")
}

/// Default add-back catalog overlaid with `[addback_categories]` entries
/// (`key = Label | description`) from each config in turn.
pub fn build_addback_catalog(configs: &[&dyn ConfigPort]) -> Vec<Category> {
    configs.iter().fold(default_addbacks(), |catalog, config| {
        let extra = config
            .section_entries("addback_categories")
            .into_iter()
            .map(|(key, value)| parse_category(&key, &value))
            .collect();
        merge_catalog(catalog, extra)
    })
}

pub fn build_session(config: &dyn ConfigPort) -> Session {
    Session::new(
        &config.get_string("session", "name").unwrap_or_default(),
        &config.get_string("session", "email").unwrap_or_default(),
    )
}

pub fn build_request(
    settings: &ValuationSettings,
    inputs_config: &dyn ConfigPort,
    addback_catalog: Vec<Category>,
) -> ValuationRequest {
    ValuationRequest::new(
        settings.mode,
        build_inputs(inputs_config, settings.mode),
        build_addbacks(inputs_config),
        settings.base,
    )
    .with_multiples(settings.multiples)
    .with_addback_catalog(addback_catalog)
}

/// Warning for a lead that is only partly filled in, if any.
pub fn session_warning(session: &Session) -> Option<&'static str> {
    if session.is_complete() || (session.name.is_empty() && session.email.is_empty()) {
        None
    } else if session.email.is_empty() {
        Some("session has a name but no email; report is not tied to a lead")
    } else {
        Some("session has an email but no name; report heading omits the lead")
    }
}

/// Resolve settings, read inputs and evaluate. Inputs come from
/// `inputs_config` when given, otherwise from `config`.
pub fn evaluate_config(
    config: &dyn ConfigPort,
    inputs_config: Option<&dyn ConfigPort>,
    overrides: &SettingsOverrides,
) -> Result<(ValuationRequest, ValuationResult, Session), ValuatorError> {
    let settings = resolve_settings(config, overrides)?;
    let source = inputs_config.unwrap_or(config);
    let catalog = match inputs_config {
        Some(inputs) => build_addback_catalog(&[config, inputs]),
        None => build_addback_catalog(&[config]),
    };
    let request = build_request(&settings, source, catalog);
    let result = evaluate(&request);
    let session = build_session(source);
    Ok((request, result, session))
}

pub fn write_outputs(
    ctx: &ReportContext,
    template_path: Option<&str>,
    outputs: &OutputPaths,
) -> Result<(), ValuatorError> {
    if let Some(path) = outputs.report {
        let adapter = match template_path {
            Some(t) => TypstReportAdapter::from_template_path(t)?,
            None => TypstReportAdapter::new(),
        };
        adapter.write(ctx, path)?;
        info!(path = %path.display(), "report written");
    }
    if let Some(path) = outputs.csv {
        CsvExportAdapter::new().write(ctx, path)?;
        info!(path = %path.display(), "CSV export written");
    }
    Ok(())
}

pub fn run_evaluate(
    config_path: &Path,
    inputs_path: Option<&Path>,
    overrides: &SettingsOverrides,
    outputs: &OutputPaths,
) -> ExitCode {
    // Stage 1: Load config and optional inputs file
    info!(path = %config_path.display(), "loading config");
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let inputs_config = match inputs_path {
        Some(p) => {
            info!(path = %p.display(), "loading inputs");
            match load_config(p) {
                Ok(c) => Some(c),
                Err(code) => return code,
            }
        }
        None => None,
    };

    // Stage 2: Resolve settings and evaluate
    let (request, result, session) = match evaluate_config(
        &config,
        inputs_config.as_ref().map(|c| c as &dyn ConfigPort),
        overrides,
    ) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    info!(
        mode = %request.mode,
        base = %request.base,
        multiples = %request.multiples,
        "valuation computed"
    );

    match session_warning(&session) {
        Some(message) => warn!(name = %session.name, email = %session.email, "{}", message),
        None if session.is_complete() => info!(name = %session.name, "report prepared for lead"),
        None => {}
    }

    // Stage 3: Print summary
    print_rows(&request, &result);
    if result.net_metric < 0.0 {
        warn!(metric = result.mode.metric_label(), "earnings are negative");
    }

    // Stage 4: Write reports
    let ctx = ReportContext {
        request: &request,
        result: &result,
        session: &session,
        prepared_on: chrono::Local::now().date_naive(),
    };
    let template_path = config.get_string("report", "template_path");
    match write_outputs(&ctx, template_path.as_deref(), outputs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn print_rows(request: &ValuationRequest, result: &ValuationResult) {
    let rows = export_rows(request, result);
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in &rows {
        println!("{:<width$}  {:>14}", row.label, row.value, width = width);
    }
}

pub fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match resolve_settings(&config, &SettingsOverrides::default()) {
        Ok(settings) => {
            eprintln!("  mode:      {}", settings.mode);
            eprintln!("  base:      {}", settings.base);
            eprintln!("  multiples: {}", settings.multiples);
        }
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

pub fn run_fields(mode: Option<&str>, config_path: Option<&Path>) -> ExitCode {
    let modes = match mode {
        Some(m) => match m.parse::<Mode>() {
            Ok(mode) => vec![mode],
            Err(reason) => {
                let err = ValuatorError::invalid("valuation", "mode", reason);
                eprintln!("error: {err}");
                return (&err).into();
            }
        },
        None => vec![Mode::Ebitda, Mode::Sde],
    };

    for mode in modes {
        println!("[inputs] for {}:", mode);
        for field in mode.fields() {
            println!("  {:<22} {}  {}", field.key, field.label, field.description);
        }
        println!();
    }

    let catalog = match config_path {
        Some(path) => match load_config(path) {
            Ok(config) => build_addback_catalog(&[&config as &dyn ConfigPort]),
            Err(code) => return code,
        },
        None => default_addbacks(),
    };
    println!("[addbacks] (any key is accepted):");
    for category in catalog {
        println!(
            "  {:<22} {}  {}",
            category.key, category.label, category.description
        );
    }
    ExitCode::SUCCESS
}
