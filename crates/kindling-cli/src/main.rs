use clap::{CommandFactory, Parser, Subcommand};
use kindling_core::Config;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "kindling", version, about = "Kindling streak and cycle CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cycle's photo, message and game
    Today,
    /// Report a won mini-game
    Complete(commands::complete::CompleteArgs),
    /// Streak counters and cycle state
    Status,
    /// Play and result history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Clear all streak state
    Reset {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    let result = match cli.command {
        Commands::Today => commands::today::run(&config),
        Commands::Complete(args) => commands::complete::run(&config, args),
        Commands::Status => commands::status::run(&config),
        Commands::History { action } => commands::history::run(&config, action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset { yes } => commands::reset::run(&config, yes),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
