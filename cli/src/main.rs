//! Terminal driver for the session manager.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs the same `SessionManager` the browser uses, with notifications printed
//! to stderr and navigation targets printed to stdout. Sessions live only as
//! long as the process, so `logout` and `whoami` are most useful inside
//! `repl`.


use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{Parser, Subcommand};
use session::config::{ConfigError, IdentityConfig};
use session::memory::MemoryProvider;
use session::supabase::SupabaseAuth;
use session::{IdentityProvider, Navigator, Notification, Notifier, ProviderError, SessionManager, User};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("identity config: {0}")]
    Config(#[from] ConfigError),
    #[error("identity client: {0}")]
    Provider(#[from] ProviderError),
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("{0} failed")]
    OperationFailed(&'static str),
    #[error("{0}")]
    Usage(String),
}

#[derive(Parser, Debug)]
#[command(name = "insure-cli", about = "Insurance assistant session CLI")]
struct Cli {
    /// Use the in-memory provider seeded with the demo account.
    #[arg(long, default_value_t = false)]
    offline: bool,

    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    Login {
        email: String,
        #[arg(long, env = "INSURE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Signup {
        email: String,
        #[arg(long, env = "INSURE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: String,
    },
    Logout,
    Whoami,
    /// Read commands from stdin, one per line.
    Repl,
}

/// One parsed `repl` line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Login { email: String, password: String },
    Signup { email: String, password: String, name: String },
    Logout,
    Whoami,
    Help,
    Quit,
}

const REPL_HELP: &str = "commands: login <email> <password> | signup <email> <password> <name...> | logout | whoami | help | quit";

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    // Stdout carries command output and navigation lines only.
    if tracing::subscriber::set_global_default(log_subscriber(io::stderr)).is_err() {
        eprintln!("a global tracing subscriber is already installed");
    }

    let cli = Cli::parse();
    let provider = build_provider(cli.offline, cli.supabase_url.as_deref(), cli.anon_key.as_deref())?;
    let console = Arc::new(Console::default());
    let manager = SessionManager::new(provider, console.clone(), console.clone());
    manager.activate().await;

    let mut stdout = io::stdout().lock();
    let result = match into_repl_command(cli.command) {
        Some(command) => execute(&manager, &console, command, &mut stdout).await.map(|_| ()),
        None => run_repl(&manager, &console, io::stdin().lock(), &mut stdout).await,
    };
    manager.deactivate();
    result
}

fn log_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt().with_writer(writer).finish()
}

fn build_provider(
    offline: bool,
    url: Option<&str>,
    anon_key: Option<&str>,
) -> Result<Arc<dyn IdentityProvider>, CliError> {
    if offline {
        tracing::info!("using offline demo provider");
        return Ok(Arc::new(MemoryProvider::demo()));
    }
    let config = match (url, anon_key) {
        (Some(url), Some(key)) => IdentityConfig::new(url, key),
        _ => IdentityConfig::from_env()?,
    };
    tracing::info!(url = %config.url, "using identity service");
    Ok(Arc::new(SupabaseAuth::new(&config)?))
}

/// One-shot equivalent of a subcommand; `None` for `repl`.
fn into_repl_command(command: Command) -> Option<ReplCommand> {
    match command {
        Command::Login { email, password } => Some(ReplCommand::Login { email, password }),
        Command::Signup { email, password, name } => Some(ReplCommand::Signup { email, password, name }),
        Command::Logout => Some(ReplCommand::Logout),
        Command::Whoami => Some(ReplCommand::Whoami),
        Command::Repl => None,
    }
}

fn parse_repl_line(line: &str) -> Result<Option<ReplCommand>, CliError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let command = match verb {
        "login" => match (words.next(), words.next(), words.next()) {
            (Some(email), Some(password), None) => {
                ReplCommand::Login { email: email.to_owned(), password: password.to_owned() }
            }
            _ => return Err(CliError::Usage("usage: login <email> <password>".to_owned())),
        },
        "signup" => {
            let (Some(email), Some(password)) = (words.next(), words.next()) else {
                return Err(CliError::Usage("usage: signup <email> <password> <name...>".to_owned()));
            };
            let name = words.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return Err(CliError::Usage("usage: signup <email> <password> <name...>".to_owned()));
            }
            ReplCommand::Signup { email: email.to_owned(), password: password.to_owned(), name }
        }
        "logout" => ReplCommand::Logout,
        "whoami" => ReplCommand::Whoami,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(CliError::Usage(format!("unknown command `{other}`; try `help`"))),
    };
    Ok(Some(command))
}

/// Run one command. Returns `false` when the session should end.
async fn execute<W: Write>(
    manager: &SessionManager,
    console: &Console,
    command: ReplCommand,
    out: &mut W,
) -> Result<bool, CliError> {
    let failures_before = console.failures();
    let label = match command {
        ReplCommand::Login { email, password } => {
            manager.login(&email, &password).await;
            "login"
        }
        ReplCommand::Signup { email, password, name } => {
            manager.signup(&email, &password, &name).await;
            "signup"
        }
        ReplCommand::Logout => {
            manager.logout().await;
            "logout"
        }
        ReplCommand::Whoami => {
            writeln!(out, "{}", describe_user(manager.user().as_ref()))?;
            return Ok(true);
        }
        ReplCommand::Help => {
            writeln!(out, "{REPL_HELP}")?;
            return Ok(true);
        }
        ReplCommand::Quit => return Ok(false),
    };
    if console.failures() > failures_before {
        return Err(CliError::OperationFailed(label));
    }
    Ok(true)
}

async fn run_repl<R: BufRead, W: Write>(
    manager: &SessionManager,
    console: &Console,
    input: R,
    out: &mut W,
) -> Result<(), CliError> {
    for line in input.lines() {
        let command = match parse_repl_line(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        match execute(manager, console, command, out).await {
            Ok(true) => {}
            Ok(false) => break,
            // Already reported through the notifier.
            Err(CliError::OperationFailed(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn describe_user(user: Option<&User>) -> String {
    match user {
        Some(user) => match user.name.as_deref() {
            Some(name) => format!("{name} <{}> ({})", user.email, user.id),
            None => format!("{} ({})", user.email, user.id),
        },
        None => "not signed in".to_owned(),
    }
}

fn format_notification(notification: &Notification) -> String {
    let prefix = if notification.is_destructive() { "error" } else { "info" };
    if notification.description.is_empty() {
        format!("{prefix}: {}", notification.title)
    } else {
        format!("{prefix}: {}: {}", notification.title, notification.description)
    }
}

/// Notification and navigation sink for the terminal.
#[derive(Debug, Default)]
struct Console {
    failures: AtomicUsize,
}

impl Console {
    fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }
}

impl Notifier for Console {
    fn notify(&self, notification: Notification) {
        if notification.is_destructive() {
            self.failures.fetch_add(1, Ordering::SeqCst);
        }
        eprintln!("{}", format_notification(&notification));
    }
}

impl Navigator for Console {
    fn navigate(&self, path: &str) {
        println!("-> {path}");
    }
}
