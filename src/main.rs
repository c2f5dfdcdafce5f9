//! form-relay command line.
//!
//! Fills one of the page's forms from arguments, submits it, and renders the
//! response on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use form_relay::config::{load_config, validation::validate_config, ConfigError, RelayConfig};
use form_relay::form::{FormField, FormSource, StaticForm};
use form_relay::handler::{self, SubmitError};
use form_relay::observability::logging;
use form_relay::page::{Page, DOCUMENTOS_FORM_ID, FORM_ID};
use form_relay::render::WriterRegion;

#[derive(Parser)]
#[command(name = "form-relay")]
#[command(about = "Submit forms to the documentos and validar endpoints", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.base_url.
    #[arg(short, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit the `form` form and pretty-print the JSON response
    Documentos(FormArgs),
    /// Submit the `form-documentos` form and print the response as-is
    Validar(FormArgs),
    /// Export results (not implemented)
    Export,
}

#[derive(Args, Default)]
struct FormArgs {
    /// Text field, NAME=VALUE (repeatable)
    #[arg(long = "field", value_parser = parse_assignment)]
    fields: Vec<(String, String)>,

    /// File input, NAME=PATH (repeatable)
    #[arg(long = "file", value_parser = parse_assignment)]
    files: Vec<(String, String)>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

fn resolve_config(cli: &Cli) -> Result<RelayConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.server.base_url = base_url.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

async fn fill_form(form: &StaticForm, args: &FormArgs) -> Result<(), SubmitError> {
    for (name, value) in &args.fields {
        form.set_text(name, value.clone());
    }
    for (name, path) in &args.files {
        let path = PathBuf::from(path);
        let file = FormField::file_from_path(&path)
            .await
            .map_err(|source| SubmitError::File { path, source })?;
        form.attach_file(name, file);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    logging::init(&config.observability);

    tracing::debug!(
        base_url = %config.server.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let (form_id, args) = match &cli.command {
        Commands::Documentos(args) => (FORM_ID, args),
        Commands::Validar(args) => (DOCUMENTOS_FORM_ID, args),
        Commands::Export => {
            if let Err(e) = handler::export() {
                tracing::error!(error = %e, "Export failed");
            }
            return Ok(());
        }
    };

    let form = Arc::new(StaticForm::new(FORM_ID));
    let documentos_form = Arc::new(StaticForm::new(DOCUMENTOS_FORM_ID));
    let target = if form_id == FORM_ID { &form } else { &documentos_form };
    fill_form(target, args).await?;
    tracing::debug!(
        form = %target.id(),
        fields = args.fields.len() + args.files.len(),
        "Form filled"
    );

    let page = Page::standard(&config, Arc::new(WriterRegion::stdout()), form, documentos_form)?;
    let (event, outcome) = page.submit(form_id).await?;
    tracing::debug!(
        default_prevented = event.default_prevented(),
        rendered = outcome.is_rendered(),
        "Submission finished"
    );

    Ok(())
}
