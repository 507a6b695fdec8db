use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use formbuilder::app::{
    AppState, DragEnd, FileStorage, Message, PreferenceStore, Question, StorageConfig,
};

#[derive(Parser, Debug)]
#[command(name = "formbuilder", version, about = "Form builder preferences and ranking tools")]
struct Cli {
    /// Directory holding the preferences file (overrides FORMBUILDER_CONFIG_DIR)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show or change saved preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Reorder ranking options the way a finished drag would
    Rank {
        /// Option texts in their current order
        #[arg(required = true)]
        options: Vec<String>,

        /// Index of the dragged option
        #[arg(long)]
        from: usize,

        /// Drop index; omit to simulate a cancelled drag
        #[arg(long)]
        to: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    /// Print the current preferences as JSON
    Show,
    /// Switch between the light and dark theme
    ToggleTheme,
    /// Set the interface language
    SetLanguage { language: String },
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_ranking(app: &AppState<FileStorage>) {
    let options = app.questions.questions().first().and_then(Question::options);
    for (rank, option) in options.into_iter().flatten().enumerate() {
        println!("{}. {}", rank + 1, option.text);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging()?;

    let config = StorageConfig::resolve(cli.config_dir.as_deref());
    info!(dir = %config.dir.display(), "Using preferences directory");
    let preferences = PreferenceStore::open(FileStorage::new(&config.dir), config.key.as_str());
    let mut app = AppState::new(preferences);

    match cli.command {
        Command::Prefs(PrefsCommand::Show) => {}
        Command::Prefs(PrefsCommand::ToggleTheme) => app.dispatch(Message::ToggleTheme)?,
        Command::Prefs(PrefsCommand::SetLanguage { language }) => {
            app.dispatch(Message::SetLanguage(language))?
        }
        Command::Rank { options, from, to } => {
            let question = app.questions.add_ranking_question("Ranking");
            for text in options {
                app.questions.add_option(question, text)?;
            }
            app.dispatch(Message::MoveOption {
                question,
                drag: DragEnd::new(from, to),
            })?;
            print_ranking(&app);
            return Ok(());
        }
    }

    println!("{}", serde_json::to_string_pretty(app.preferences.state())?);
    Ok(())
}
