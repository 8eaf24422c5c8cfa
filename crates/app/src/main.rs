use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AdminPolicy, AppServices, Clock};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://academy.sqlite3";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidLogLevel { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLogLevel { raw } => {
                write!(f, "invalid --log-level value (expected one of {LOG_LEVELS:?}): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    admins: Vec<String>,
    log_level: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--admin <email>]... [--log-level <level>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --log-level info");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ACADEMY_DB_URL, ACADEMY_ADMIN_EMAILS (comma-separated), ACADEMY_LOG, RUST_LOG");
}

fn split_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn check_log_level(raw: String) -> Result<String, ArgsError> {
    let level = raw.trim().to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(ArgsError::InvalidLogLevel { raw })
    }
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        Self::parse_from(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Flags win over the environment. Any `--admin` flag replaces the
    /// environment allow-list.
    fn parse_from(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("ACADEMY_DB_URL").map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let env_admins = env("ACADEMY_ADMIN_EMAILS")
            .map(|raw| split_emails(&raw))
            .unwrap_or_default();
        let mut log_level = match env("ACADEMY_LOG") {
            Some(raw) => check_log_level(raw)?,
            None => "info".to_string(),
        };
        let mut flag_admins: Vec<String> = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--admin" => {
                    let value = require_value(&mut args, "--admin")?;
                    flag_admins.extend(split_emails(&value));
                }
                "--log-level" => {
                    log_level = check_log_level(require_value(&mut args, "--log-level")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let admins = if flag_admins.is_empty() {
            env_admins
        } else {
            flag_admins
        };
        Ok(Self {
            db_url,
            admins,
            log_level,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn default_filter(level: &str) -> String {
    format!("app={level},services={level},ui={level},storage={level}")
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level))))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    init_tracing(&args.log_level);

    prepare_sqlite_file(&args.db_url)?;
    let admins = AdminPolicy::new(args.admins.iter().map(String::as_str));
    if admins.is_empty() {
        tracing::info!("no admin emails configured");
    }
    let services = AppServices::new_sqlite(&args.db_url, Clock::system(), admins).await?;
    tracing::info!(db = %args.db_url, "storage ready");

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // Some dev setups default the window to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Pre-Approval Academy")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        Args::parse_from(args.iter().map(|s| (*s).to_string()), |key| {
            env.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        })
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.db_url, DEFAULT_DB_URL);
        assert!(args.admins.is_empty());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn admin_flags_replace_env_list() {
        let env = [("ACADEMY_ADMIN_EMAILS", "a@example.com, b@example.com,")];
        assert_eq!(
            parse(&[], &env).unwrap().admins,
            ["a@example.com", "b@example.com"]
        );
        let args = parse(&["--admin", "c@example.com", "--admin", "d@example.com"], &env).unwrap();
        assert_eq!(args.admins, ["c@example.com", "d@example.com"]);
    }

    #[test]
    fn relative_db_paths_become_absolute() {
        let args = parse(&["--db", "sqlite:data/academy.sqlite3"], &[]).unwrap();
        assert!(args.db_url.starts_with("sqlite:///"), "{}", args.db_url);
        assert!(args.db_url.ends_with("data/academy.sqlite3"));
        assert_eq!(
            parse(&["--db", "sqlite::memory:"], &[]).unwrap().db_url,
            "sqlite::memory:"
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse(&["--log-level", "loud"], &[]).unwrap_err(),
            ArgsError::InvalidLogLevel { raw: "loud".into() }
        );
        assert_eq!(
            parse(&["--db"], &[]).unwrap_err(),
            ArgsError::MissingValue { flag: "--db" }
        );
        assert_eq!(
            parse(&["--verbose"], &[]).unwrap_err(),
            ArgsError::UnknownArg("--verbose".into())
        );
        assert_eq!(parse(&["--log-level", "DEBUG"], &[]).unwrap().log_level, "debug");
    }

    #[test]
    fn default_filter_covers_every_crate() {
        assert_eq!(
            default_filter("warn"),
            "app=warn,services=warn,ui=warn,storage=warn"
        );
    }
}
