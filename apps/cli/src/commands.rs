//! CLI command definitions, routing, and tracing setup.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use contentflow_core::{
    Assistant, OpenRouterClient, RenderSegment, Transcript, catalog_context, load_catalog,
    render_message, resolve, segments_to_html,
};
use contentflow_shared::{
    AppConfig, ChatMessage, ContentItem, MessageId, api_key, init_config, load_config,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ContentFlow: find and open content through a chat assistant.
#[derive(Parser)]
#[command(
    name = "contentflow",
    version,
    about = "Ask the content assistant and render replies with resolved content links.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// How resolved segments are printed.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Html,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Resolve and format an assistant message.
    Render {
        /// Message file (reads stdin when omitted or "-").
        file: Option<PathBuf>,

        /// Catalog snapshot (JSON array). Defaults to `[catalog].path`.
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Ask the assistant a question about the catalog.
    Ask {
        question: String,

        /// Catalog snapshot (JSON array). Defaults to `[catalog].path`.
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,

        /// Override the configured model.
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Print the catalog listing sent to the agent.
    Context {
        /// Catalog snapshot (JSON array). Defaults to `[catalog].path`.
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout stays
/// clean for rendered output.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "contentflow=info",
        1 => "contentflow=debug",
        _ => "contentflow=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render {
            file,
            catalog,
            output,
        } => cmd_render(file.as_deref(), catalog.as_deref(), output),
        Command::Ask {
            question,
            catalog,
            output,
            model,
        } => cmd_ask(&question, catalog.as_deref(), output, model).await,
        Command::Context { catalog } => cmd_context(catalog.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_render(file: Option<&Path>, catalog: Option<&Path>, output: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let entries = load_catalog_for(&config, catalog)?;

    let text = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| eyre!("cannot read '{}': {e}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let segments = resolve(&text, &entries);
    print_segments(&segments, output)
}

async fn cmd_ask(
    question: &str,
    catalog: Option<&Path>,
    output: OutputFormat,
    model: Option<String>,
) -> Result<()> {
    let config = load_config()?;
    let key = api_key(&config)?;
    let entries = load_catalog_for(&config, catalog)?;

    let mut client = OpenRouterClient::new(&config.openrouter, key)?;
    if let Some(model) = model {
        client = client.with_model(model);
    }
    info!(model = client.model(), entries = entries.len(), "asking assistant");

    let assistant = Assistant::new(client, config.assistant.clone());

    let mut transcript = Transcript::new(assistant.greeting());
    transcript.push(ChatMessage::user(question));

    let pending = assistant.pending();
    let spinner = spinner(&pending.content);
    let pending_id = transcript.begin_pending(pending);
    let reply = assistant.reply(question, &entries).await;
    spinner.finish_and_clear();

    let segments = settle_reply(&mut transcript, pending_id, reply, &entries);
    print_segments(&segments, output)
}

fn cmd_context(catalog: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let entries = load_catalog_for(&config, catalog)?;
    println!("{}", catalog_context(&entries));
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The `--catalog` flag wins over `[catalog].path`.
fn load_catalog_for(config: &AppConfig, flag: Option<&Path>) -> Result<Vec<ContentItem>> {
    let path = match (flag, config.catalog.path.as_deref()) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) => PathBuf::from(path),
        (None, None) => {
            return Err(eyre!(
                "no catalog given: pass --catalog or set [catalog].path in the config file"
            ));
        }
    };
    Ok(load_catalog(&path)?)
}

/// Settle the pending placeholder and render the reply that replaced it.
fn settle_reply(
    transcript: &mut Transcript,
    pending_id: MessageId,
    reply: ChatMessage,
    entries: &[ContentItem],
) -> Vec<RenderSegment> {
    transcript.settle(pending_id, reply);
    transcript
        .messages()
        .last()
        .map(|message| render_message(message, entries))
        .unwrap_or_default()
}

fn print_segments(segments: &[RenderSegment], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Html => println!("{}", segments_to_html(segments)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(segments)?),
    }
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(
            style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
