use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use scribens::cli::output::{self, OutputFormat};
use scribens::client::annotate_from_response;
use scribens::config::Overrides;
use scribens::{CheckReport, Config, ScribensClient};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "scribens")]
#[command(version, about = "Annotate French text with corrections from the Scribens spellchecker", long_about = None)]
struct Cli {
    /// Files to check (reads stdin when none are given)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Check this text instead of files
    #[arg(short, long, conflicts_with = "files")]
    text: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Maximum number of characters sent in a single request
    #[arg(long, value_name = "CHARS")]
    limit: Option<usize>,

    /// Service endpoint
    #[arg(long, env = "SCRIBENS_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Write the raw service response to this file
    #[arg(long, value_name = "PATH")]
    save_response: Option<PathBuf>,

    /// Annotate from a previously saved response instead of calling the service
    #[arg(long, value_name = "PATH")]
    from_response: Option<PathBuf>,

    /// Reuse cached responses for texts already checked
    #[arg(long)]
    cache: bool,

    /// Log each applied correction
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

/// A text to check and where it came from
struct Input {
    source: String,
    text: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "scribens", &mut io::stdout());
        return Ok(());
    }

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let colored = !cli.no_color;
    if !colored {
        colored::control::set_override(false);
    }

    let inputs = read_inputs(&cli)?;

    let reports = match &cli.from_response {
        Some(path) => replay(path, &inputs)?,
        None => check_all(&cli, &inputs)?,
    };

    let mut total_errors = 0;
    for (input, report) in inputs.iter().zip(&reports) {
        total_errors += report.misspellings.len();
        println!(
            "{}",
            output::render_report(&input.source, report, colored, cli.format)
        );
    }

    if cli.format == OutputFormat::Text {
        output::print_check_summary(total_errors, reports.len(), colored);
    }

    // Exit with appropriate code
    if total_errors > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn read_inputs(cli: &Cli) -> Result<Vec<Input>> {
    if let Some(text) = &cli.text {
        return Ok(vec![Input {
            source: "-".to_string(),
            text: text.clone(),
        }]);
    }

    if cli.files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(vec![Input {
            source: "-".to_string(),
            text,
        }]);
    }

    cli.files
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            Ok(Input {
                source: path.display().to_string(),
                text,
            })
        })
        .collect()
}

fn replay(path: &Path, inputs: &[Input]) -> Result<Vec<CheckReport>> {
    if inputs.len() != 1 {
        anyhow::bail!("--from-response annotates exactly one text, {} given", inputs.len());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read response file: {}", path.display()))?;
    let report = annotate_from_response(&inputs[0].text, &json)
        .with_context(|| format!("Failed to annotate from {}", path.display()))?;

    Ok(vec![report])
}

fn check_all(cli: &Cli, inputs: &[Input]) -> Result<Vec<CheckReport>> {
    let config = Config::load(Overrides {
        endpoint: cli.endpoint.clone(),
        char_limit: cli.limit,
        timeout_secs: cli.timeout,
        save_response: cli.save_response.clone(),
        cache: cli.cache,
    })?;

    let client = ScribensClient::new(&config).context("Failed to build HTTP client")?;

    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Checking {}...", input.source));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let report = client.spellcheck_report(&input.text);
        spinner.finish_and_clear();

        reports.push(report.with_context(|| format!("Failed to check {}", input.source))?);
    }

    Ok(reports)
}
