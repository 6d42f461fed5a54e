//! Coach CLI - interactive interview practice in the terminal.
//!
//! # Architecture
//!
//! The engine is synchronous; the only async edge is the optional remote
//! text generation, so the runtime wraps a blocking stdin loop:
//!
//! ```text
//! main() -> init_tracing() -> load config -> resume or start a Session
//!              |
//!              v
//!   loop: read line -> Session::respond() -> score card + coach line
//!                   -> on a stage change, ask that stage's opener question
//!   exit: save snapshot, append activity record, print session summary
//! ```
//!
//! `exit`/`quit` (or Ctrl-D) end the session; `reset` abandons it and
//! starts over from the greeting.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, Write as IoWrite};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use coach_engine::{
    ActivityRecord, CoachConfig, ConfigError, FeedbackTier, QuestionCategory, ScoringTuning,
    Session, SessionSnapshot, TurnOutcome,
};
use coach_providers::{ApiToken, GenerationClient, GenerationConfig};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_coach_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over mixing log lines
    // into the conversation on stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_coach_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let candidates = coach_log_file_candidates();
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn coach_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.coach/logs/coach.log
    if let Some(config_path) = CoachConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("coach.log"));
    }

    // Fallback: ./.coach/logs/coach.log (useful in constrained environments)
    candidates.push(PathBuf::from(".coach").join("logs").join("coach.log"));

    candidates
}

fn load_config() -> CoachConfig {
    match CoachConfig::load() {
        Ok(Some(config)) => config,
        Ok(None) => CoachConfig::default(),
        Err(error) => {
            match &error {
                ConfigError::Read { path, source } => {
                    println!(
                        "Couldn't read {} ({source}). Using defaults.",
                        path.display()
                    );
                }
                ConfigError::Parse { path, source } => {
                    println!(
                        "Couldn't parse {} ({source}). Using defaults.",
                        path.display()
                    );
                }
            }
            CoachConfig::default()
        }
    }
}

fn scoring_tuning(config: &CoachConfig) -> ScoringTuning {
    match config.scoring_tuning() {
        Ok(tuning) => tuning,
        Err(error) => {
            tracing::warn!(%error, "Invalid [scoring] values, using defaults");
            println!("Invalid [scoring] values ({error}). Using defaults.");
            ScoringTuning::default()
        }
    }
}

/// Build the remote-generation client when `[generation]` enables it and a
/// token resolves. Anything short of that keeps the session fully local.
fn generation_client(config: &CoachConfig) -> Option<GenerationClient> {
    let section = config.generation.as_ref()?;
    if !section.enabled {
        return None;
    }

    let Some(token) = section.resolved_token() else {
        tracing::warn!("Remote generation enabled but no API token resolved");
        println!("Remote generation is enabled but no API token is set; staying local.");
        return None;
    };

    let mut generation = GenerationConfig::new().with_token(ApiToken::new(token));
    if let Some(url) = &section.api_url {
        generation = generation.with_base_url(url);
    }
    if let Some(timeout) = section.timeout_secs {
        generation = generation.with_timeout(Duration::from_secs(timeout));
    }
    if let Some(models) = &section.models {
        if models.is_empty() {
            tracing::warn!("Ignoring empty [generation] model list");
        } else {
            generation = generation
                .with_models(models.clone())
                .expect("model list verified non-empty");
        }
    }

    Some(GenerationClient::new(generation))
}

/// Pick up the previous session if a compatible snapshot exists.
fn resume_or_start(tuning: ScoringTuning) -> (Session, bool) {
    let Some(path) = SessionSnapshot::default_path() else {
        return (Session::new(tuning), false);
    };

    match SessionSnapshot::load_from(&path) {
        Ok(Some(snapshot)) => (Session::resume(snapshot, tuning), true),
        Ok(None) => (Session::new(tuning), false),
        Err(error) => {
            tracing::warn!(%error, "Couldn't load previous session, starting fresh");
            (Session::new(tuning), false)
        }
    }
}

fn save_session(session: &Session) {
    let Some(path) = SessionSnapshot::default_path() else {
        return;
    };
    if let Err(error) = session.snapshot().save_to(&path) {
        tracing::warn!(%error, "Couldn't save session");
    }
}

fn discard_saved_session() {
    if let Some(path) = SessionSnapshot::default_path()
        && path.exists()
        && let Err(error) = fs::remove_file(&path)
    {
        tracing::warn!(%error, "Couldn't remove saved session");
    }
}

/// Append the session's activity record to `~/.coach/activity.jsonl`, one
/// JSON object per line, in the shape the activity store consumes.
fn append_activity(record: &ActivityRecord) {
    let Some(config_path) = CoachConfig::path() else {
        return;
    };
    let Some(dir) = config_path.parent() else {
        return;
    };

    let path = dir.join("activity.jsonl");
    let line = match serde_json::to_string(record) {
        Ok(line) => line,
        Err(error) => {
            tracing::warn!(%error, "Couldn't serialize activity record");
            return;
        }
    };

    let result = fs::create_dir_all(dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| writeln!(file, "{line}"))
    });
    if let Err(error) = result {
        tracing::warn!(%error, path = %path.display(), "Couldn't append activity record");
    }
}

fn tier_label(tier: FeedbackTier) -> &'static str {
    match tier {
        FeedbackTier::Excellent => "excellent",
        FeedbackTier::Good => "good",
        FeedbackTier::Decent => "decent",
        FeedbackTier::NeedsDevelopment => "needs work",
    }
}

fn print_score_card(outcome: &TurnOutcome) {
    let score = &outcome.score;
    println!();
    println!(
        "  score {}/100 ({})",
        score.score(),
        tier_label(score.tier())
    );
    println!("  {}", score.feedback());
    for strength in score.strengths() {
        println!("  + {strength}");
    }
    for suggestion in score.suggestions() {
        println!("  > {suggestion}");
    }
}

fn print_banner(session: &Session, resumed: bool, remote: bool) {
    println!("Interview practice session. Type 'exit' to finish, 'reset' to start over.");
    if remote {
        println!("Remote generation is on; replies may take a moment.");
    }
    println!();

    if resumed {
        println!(
            "coach> Welcome back! We were in the {} stage, {} questions in. Pick up where you left off.",
            session.stage(),
            session.question_count()
        );
    } else {
        println!(
            "coach> Hi there! I'm your interview coach. Let's start with the classic opener: what's your elevator pitch?"
        );
    }
    println!();
}

fn print_summary(session: &Session, record: &ActivityRecord) {
    println!();
    println!("Session summary");
    println!("  stage reached:      {}", session.stage().display_name());
    println!("  questions answered: {}", record.message_count);
    if record.message_count > 0 {
        println!("  average score:      {}/100", record.score);
    }
    println!();
    println!("Practice makes progress. See you next time!");
}

async fn run_turn(session: &mut Session, generation: Option<&GenerationClient>, line: &str) {
    let outcome = session.respond(line);
    print_score_card(&outcome);

    let reply = match generation {
        Some(client) => client.generate_or(line, outcome.reply.clone()).await,
        None => outcome.reply.clone(),
    };
    println!();
    println!("coach> {reply}");

    if outcome.stage_changed() && !outcome.stage.is_closing() {
        println!();
        println!("-- {} --", outcome.stage.display_name());
        let question = session.question_for(QuestionCategory::for_stage(outcome.stage));
        println!("coach> {question}");
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_config();
    let tuning = scoring_tuning(&config);
    let generation = generation_client(&config);

    let (mut session, resumed) = resume_or_start(tuning);
    tracing::info!(
        session = %session.id(),
        resumed,
        remote = generation.is_some(),
        "Session started"
    );
    print_banner(&session, resumed, generation.is_some());

    let started = Instant::now();
    let stdin = std::io::stdin();
    let mut input = String::new();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            // Ctrl-D
            println!();
            break;
        }

        let line = input.trim();
        match line {
            "exit" | "quit" => break,
            "reset" => {
                discard_saved_session();
                session = Session::new(tuning);
                println!();
                println!("coach> Fresh start. Whenever you're ready: what's your elevator pitch?");
                println!();
                continue;
            }
            _ => run_turn(&mut session, generation.as_ref(), line).await,
        }
    }

    save_session(&session);
    let record = session.activity_record(started.elapsed());
    append_activity(&record);
    tracing::info!(
        session = %session.id(),
        questions = record.message_count,
        score = record.score,
        duration_secs = record.duration_secs,
        "Session ended"
    );
    print_summary(&session, &record);

    Ok(())
}
