use std::fmt;
use std::io::{BufRead, Write};

use services::{AppServices, Clock, ResultsView, SessionError, StepOutcome};
use talent_core::model::RESPONSE_OPTIONS;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- run     [--db <sqlite_url>]   # take or resume the assessment");
    eprintln!("  cargo run -p app -- results [--db <sqlite_url>]   # show the finished report");
    eprintln!("  cargo run -p app -- reset   [--db <sqlite_url>]   # clear all saved state");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:talent.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TALENT_DB_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    Results,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "run" => Some(Self::Run),
            "results" => Some(Self::Results),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("TALENT_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://talent.sqlite3".into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = args
                        .next()
                        .ok_or(ArgsError::MissingValue { flag: "--db" })?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url })
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: run the assessment when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Run,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Run,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    tracing::debug!(db_url = %parsed.db_url, "opening storage");
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock()).await?;

    match cmd {
        Command::Run => run_assessment(&services).await,
        Command::Results => show_results(&services).await,
        Command::Reset => {
            services.quiz_flow().restart().await?;
            println!("Saved progress and results cleared.");
            Ok(())
        }
    }
}

async fn run_assessment(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let flow = services.quiz_flow();
    let mut session = flow.resume_or_start().await?;

    if session.answers().is_empty() {
        println!("Talent assessment: 40 statements, pick the option that fits you best.");
    } else {
        let progress = session.progress();
        println!(
            "Resuming: {} of {} answered.",
            progress.answered, progress.total
        );
    }
    println!("Keys: 1-5 answer, p previous, n next, q save and quit.");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let progress = session.progress();
        let question = session.current_question();
        println!();
        println!(
            "Question {} of {}: {}",
            progress.current + 1,
            progress.total,
            question.text()
        );
        for (i, option) in RESPONSE_OPTIONS.iter().enumerate() {
            let marker = match session.answers().score_for(question.id()) {
                Some(score) if score == option.score => '*',
                _ => ' ',
            };
            println!("  {} {}. {}", marker, i + 1, option.label);
        }
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let input = line?.trim().to_lowercase();

        match input.as_str() {
            "1" | "2" | "3" | "4" | "5" => {
                let index = input.parse::<usize>()? - 1;
                flow.answer_current(&mut session, RESPONSE_OPTIONS[index].score)
                    .await?;
                // Move on automatically, except from the last question where
                // the respondent confirms with `n`.
                if !session.at_last() {
                    flow.next(&mut session).await?;
                }
            }
            "p" => {
                if !flow.retreat(&mut session).await? {
                    println!("Already at the first question.");
                }
            }
            "n" => {
                if !session.answers().contains(session.current_question().id()) {
                    println!("Answer this question first.");
                    continue;
                }
                match flow.next(&mut session).await {
                    Ok(StepOutcome::Moved(_)) => {}
                    Ok(StepOutcome::Finalized) => {
                        println!();
                        println!("Assessment complete.");
                        return show_results(services).await;
                    }
                    Err(SessionError::Incomplete { answered, total }) => {
                        println!(
                            "Only {answered} of {total} questions answered; go back and finish them all."
                        );
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            "q" => {
                println!("Progress saved.");
                break;
            }
            "" => {}
            other => println!("Unrecognized input: {other}"),
        }
    }

    Ok(())
}

async fn show_results(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    match services.results().load_results().await {
        Ok(view) => {
            render_results(&view);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn render_results(view: &ResultsView) {
    const BAR_WIDTH: usize = 20;

    println!();
    println!("{}", view.summary);
    println!();
    for item in &view.items {
        let filled = ((item.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar: String = "#".repeat(filled.min(BAR_WIDTH));
        println!(
            "  {}. {:<22} {:>2}  [{:<width$}]  {}",
            item.code,
            item.name,
            item.score,
            bar,
            item.band.label(),
            width = BAR_WIDTH
        );
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
