use std::fmt;

use academy_core::model::Principal;
use chrono::{DateTime, Utc};
use services::{AdminPolicy, AppServices, AuthError, Clock, Credentials, SessionController, View};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    students: u32,
    password: String,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStudents { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStudents { raw } => write!(f, "invalid --students value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("ACADEMY_DB_URL")
            .unwrap_or_else(|_| "sqlite:academy.sqlite3?mode=rwc".into());
        let mut students = std::env::var("ACADEMY_SEED_STUDENTS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(10);
        let mut password =
            std::env::var("ACADEMY_SEED_PASSWORD").unwrap_or_else(|_| "legacy2053".into());
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--students" => {
                    let value = require_value(&mut args, "--students")?;
                    students = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidStudents { raw: value.clone() })?;
                }
                "--password" => {
                    password = require_value(&mut args, "--password")?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            students,
            password,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p services --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:academy.sqlite3?mode=rwc)");
    eprintln!("  --students <n>            Number of demo learners to create (default: 10)");
    eprintln!("  --password <pw>           Password for every demo account (default: legacy2053)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  ACADEMY_DB_URL, ACADEMY_SEED_STUDENTS, ACADEMY_SEED_PASSWORD");
}

/// Sign up the demo account, or sign in when an earlier run created it.
async fn demo_principal(
    services: &AppServices,
    credentials: &Credentials,
) -> Result<Principal, AuthError> {
    let identity = services.identity();
    match identity.sign_up(credentials).await {
        Err(AuthError::EmailAlreadyRegistered) => identity.sign_in(credentials).await,
        other => other,
    }
}

/// Walk a learner through `lessons` modules and, when `sit_exam` is set, a
/// perfect exam.
async fn play_through(
    session: &mut SessionController,
    lessons: usize,
    sit_exam: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if session.view() != View::Dashboard {
        return Err(format!("expected dashboard, found {}", session.view()).into());
    }

    while session.progress().completed_count() < lessons {
        if session.view() == View::Dashboard {
            session.resume()?;
        }
        let lesson = session
            .snapshot()
            .active_lesson()
            .ok_or("no lesson at cursor")?;
        session.complete_lesson(lesson.id, lesson.xp_reward()).await?;
    }
    if session.view() == View::Lesson {
        session.back_to_dashboard()?;
    }

    if sit_exam && !session.quiz().is_completed() {
        session.resume()?;
        while !session.quiz().is_completed() {
            let question = session
                .snapshot()
                .current_question()
                .ok_or("no question at cursor")?;
            if !session.quiz().has_answered_current() {
                session.answer_question(question.correct_index).await?;
            }
            session.advance_quiz().await?;
        }
        session.back_to_dashboard()?;
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = args.now.map_or_else(Clock::system, Clock::fixed);
    let services = AppServices::new_sqlite(&args.db_url, clock, AdminPolicy::none()).await?;
    let lesson_count = services.curriculum().lesson_count();

    for i in 0..args.students {
        let credentials =
            Credentials::new(format!("student{}@academy.local", i + 1), args.password.clone());
        let principal = demo_principal(&services, &credentials).await?;

        let lessons = (i as usize * 4) % (lesson_count + 1);
        let sit_exam = lessons == lesson_count && i % 2 == 0;

        let mut session = services.session_controller();
        session.on_identity_changed(Some(principal)).await;
        play_through(&mut session, lessons, sit_exam).await?;

        println!(
            "{}: {} lessons, {} xp{}",
            credentials.email,
            session.progress().completed_count(),
            session.progress().xp(),
            if session.progress().quiz_passed() { ", certified" } else { "" }
        );
        session.sign_out().await;
    }

    println!("Seeded {} learners into {}", args.students, args.db_url);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
