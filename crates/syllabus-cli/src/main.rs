use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use syllabus_core::config_file::{load_config, load_strict};
use syllabus_core::{ChatCompletionsClient, ServiceConfig, Syllabus, generate_answer};
use syllabus_pdf_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

/// Syllabus Q&A - Extract course structure from syllabus PDFs and generate CO-based questions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the platform/CWD cascade
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the full syllabus record as JSON
    Extract {
        /// Path to the syllabus PDF (or a .txt dump of its text)
        file_path: PathBuf,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print course details, units and the course outcomes linked to them
    Summary {
        /// Path to the syllabus PDF (or a .txt dump of its text)
        file_path: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show the unit topics behind a course outcome
    Topics {
        /// Path to the syllabus PDF (or a .txt dump of its text)
        file_path: PathBuf,

        /// Course outcome code, e.g. CO2
        co: String,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Generate questions for a course outcome with the configured model
    Ask {
        /// Path to the syllabus PDF (or a .txt dump of its text)
        file_path: PathBuf,

        /// Course outcome code, e.g. CO2
        #[arg(long)]
        co: String,

        /// What to generate, e.g. "3 two-mark and 2 ten-mark questions"
        #[arg(long)]
        prompt: String,

        /// Print the system message and prompt without calling the model
        #[arg(long)]
        dry_run: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract {
            file_path,
            output,
            compact,
        } => extract(&file_path, output, compact),
        Command::Summary {
            file_path,
            no_color,
        } => summary(&file_path, ColorMode(!no_color)),
        Command::Topics {
            file_path,
            co,
            no_color,
        } => topics(&file_path, &co, ColorMode(!no_color)),
        Command::Ask {
            file_path,
            co,
            prompt,
            dry_run,
            no_color,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            ask(&file_path, &co, &prompt, dry_run, &config, ColorMode(!no_color)).await
        }
    }
}

/// Initialize tracing; `RUST_LOG` wins over `-v`. Logs go to stderr so JSON
/// on stdout stays clean.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "syllabus_core=info,syllabus_parsing=info,syllabus_pdf_mupdf=info",
        1 => "syllabus_core=debug,syllabus_parsing=debug,syllabus_pdf_mupdf=debug",
        _ => "syllabus_core=trace,syllabus_parsing=trace,syllabus_pdf_mupdf=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    let file = match explicit {
        Some(path) => load_strict(path)?,
        None => load_config(),
    };
    Ok(ServiceConfig::from_env(&file))
}

/// Load and assemble a syllabus. `.txt` files are taken as already-extracted
/// page text; anything else goes through MuPDF.
fn load_syllabus(file_path: &Path) -> anyhow::Result<Syllabus> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let is_text = file_path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);

    let syllabus = if is_text {
        let text = std::fs::read_to_string(file_path)?;
        syllabus_parsing::assemble(&text)
    } else {
        syllabus_parsing::extract_syllabus(file_path, &MupdfBackend::new())?
    };
    Ok(syllabus)
}

fn extract(file_path: &Path, output: Option<PathBuf>, compact: bool) -> anyhow::Result<()> {
    let syllabus = load_syllabus(file_path)?;
    let document = syllabus.document();

    let json = if compact {
        serde_json::to_string(document)?
    } else {
        serde_json::to_string_pretty(document)?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn summary(file_path: &Path, color: ColorMode) -> anyhow::Result<()> {
    let syllabus = load_syllabus(file_path)?;
    let mut stdout = std::io::stdout();
    output::print_summary(&mut stdout, &syllabus.summary(), color)?;
    Ok(())
}

fn topics(file_path: &Path, co: &str, color: ColorMode) -> anyhow::Result<()> {
    let syllabus = load_syllabus(file_path)?;
    let mut stdout = std::io::stdout();
    match syllabus.co_topics(co) {
        Ok(topics) => output::print_co_topics(&mut stdout, &topics, color)?,
        Err(e) => {
            output::print_query_error(&mut stdout, &e, color)?;
            std::process::exit(1);
        }
    }
    Ok(())
}

async fn ask(
    file_path: &Path,
    co: &str,
    prompt: &str,
    dry_run: bool,
    config: &ServiceConfig,
    color: ColorMode,
) -> anyhow::Result<()> {
    let syllabus = load_syllabus(file_path)?;
    let mut stdout = std::io::stdout();

    let context = match syllabus.question_context(co, prompt) {
        Ok(context) => context,
        Err(e) => {
            output::print_query_error(&mut stdout, &e, color)?;
            std::process::exit(1);
        }
    };

    if dry_run {
        writeln!(stdout, "--- system ---\n{}", context.system_message)?;
        writeln!(stdout, "--- prompt ---\n{}", context.prompt)?;
        return Ok(());
    }

    if config.llm_api_token.is_none() {
        tracing::warn!("no HF_TOKEN or [llm] api_token configured, the request will likely be rejected");
    }
    let client = ChatCompletionsClient::from_config(config)?;
    let answer = generate_answer(&client, &context.system_message, &context.prompt).await;
    output::print_answer(&mut stdout, &context, &answer, color)?;
    Ok(())
}
