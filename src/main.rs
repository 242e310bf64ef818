use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use quiztake::app::App;
use quiztake::cli::Cli;
use quiztake::config::{Settings, SubmitTarget};
use quiztake::error::Error;
use quiztake::gateway::BackgroundGateway;
use quiztake::git::GitStore;
use quiztake::model::Quiz;
use quiztake::session::SubmissionGateway;
use quiztake::store::{compute_file_hash, DirStore};
use quiztake::{logging, parser, timer, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    let quiz = load_quiz(&cli.quiz)?;

    if cli.check {
        print_summary(&quiz, cli.minutes);
        return Ok(());
    }

    let settings = Settings::resolve(&cli, &quiz)?;
    logging::init_logging(&settings.log_file)?;
    info!(quiz = %quiz.quiz_file, hash = %quiz.quiz_hash, "quiz loaded");

    let quiz = Arc::new(quiz);
    let (gateway, submit_rx, location) = match &settings.target {
        SubmitTarget::Directory(dir) => {
            let (gateway, rx) = BackgroundGateway::new(DirStore::new(dir, Arc::clone(&quiz)));
            let gateway: Box<dyn SubmissionGateway> = Box::new(gateway);
            (gateway, rx, dir.display().to_string())
        }
        SubmitTarget::Git(repo) => {
            let (gateway, rx) = BackgroundGateway::new(GitStore::new(repo, Arc::clone(&quiz)));
            let gateway: Box<dyn SubmissionGateway> = Box::new(gateway);
            (gateway, rx, format!("{} (git)", repo.display()))
        }
    };

    let mut app = App::start(Arc::clone(&quiz), settings.time_limit_seconds(), gateway)?;
    app.results_location = Some(location);

    let stop = Arc::new(AtomicBool::new(false));
    let timer_rx = timer::spawn_ticker(Arc::clone(&stop));

    let result = tui::run_tui(&mut app, &timer_rx, &submit_rx);
    stop.store(true, Ordering::SeqCst);

    if let Some(attempt) = app.session.attempt_ref() {
        println!("Submitted attempt {}", attempt);
    }
    result
}

fn load_quiz(path: &Path) -> Result<Quiz, Error> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let quiz_hash = compute_file_hash(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let quiz_filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    parser::parse_quiz(&content, &quiz_filename, &quiz_hash).map_err(Error::Parse)
}

fn print_summary(quiz: &Quiz, minutes_override: Option<i64>) {
    let minutes = minutes_override.unwrap_or(quiz.frontmatter.time_limit);
    println!("Quiz: {}", quiz.title);
    println!("Questions: {}", quiz.questions.len());
    println!("Time limit: {} min", minutes);
    println!(
        "Answer key: {}",
        if quiz.has_answer_key() { "yes" } else { "no" }
    );
    println!("Hash: {}", quiz.quiz_hash);
}
