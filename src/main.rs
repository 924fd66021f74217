use asistencia_bot::config::{
    BotConfig, ConfigError, DEFAULT_POLL_TIMEOUT, REPORT_CHAT_ENV, TOKEN_ENV,
};
use asistencia_bot::state::DEFAULT_DATA_FILE;
use asistencia_bot::telegram::DEFAULT_API_URL;
use asistencia_bot::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "asistencia-bot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Telegram bot collecting Zoom attendance per group", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RunArgs {
    /// Bot token from @BotFather
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Chat that also receives the summary when a round completes
    #[arg(long, env = REPORT_CHAT_ENV, allow_hyphen_values = true)]
    report_chat_id: Option<String>,

    /// State file
    #[arg(long, env = "ASISTENCIA_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Long-poll timeout in seconds
    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT.as_secs())]
    poll_timeout: u64,
}

impl RunArgs {
    fn into_config(self) -> std::result::Result<BotConfig, ConfigError> {
        Ok(BotConfig::new(self.token, self.report_chat_id)?
            .with_data_file(self.data_file)
            .with_api_url(self.api_url)
            .with_poll_timeout(Duration::from_secs(self.poll_timeout)))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot and poll Telegram for commands
    Run(RunArgs),

    /// Show the round in progress from the state file
    Status {
        /// State file
        #[arg(long, env = "ASISTENCIA_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
        data_file: PathBuf,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Mark every group as pending again
    Reset {
        /// State file
        #[arg(long, env = "ASISTENCIA_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
        data_file: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    asistencia_bot::logging::init_tracing();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format!("Error: failed to create tokio runtime: {}", e).red());
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => {
            asistencia_bot::cli::run::run(args.into_config()?).await?;
        }

        Commands::Status { data_file, json } => {
            asistencia_bot::cli::status::run(&data_file, json)?;
        }

        Commands::Reset { data_file } => {
            asistencia_bot::cli::reset::run(&data_file)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "asistencia-bot", &mut io::stdout());
        }
    }

    Ok(())
}
