//! Story Sprout - command line entry point
//!
//! Works against a learner profile stored as JSON. Plans the next story,
//! scores a read-aloud transcript, and prints child or parent reports.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use story_sprout::core::{LearningConfig, Result, SessionId, UserView};
use story_sprout::report::WordMasteryReport;
use story_sprout::session::RecognizedWord;
use story_sprout::story::STORY_SYSTEM_PROMPT;
use story_sprout::vocab::{select_vocabulary, MasteryCategory};
use story_sprout::LearnerProfile;
use tracing_subscriber::EnvFilter;

/// Adaptive vocabulary planning and reading progress for young readers
#[derive(Parser, Debug)]
#[command(name = "story-sprout")]
#[command(about = "Plan stories and track reading progress for a young reader")]
struct Args {
    /// Learning configuration (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Learner profile (JSON); created on first write
    #[arg(long, default_value = "profile.json")]
    profile: PathBuf,

    /// Learner name used when a new profile is created
    #[arg(long, default_value = "reader")]
    name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the vocabulary constraint and writer prompt for the next story
    Plan {
        #[arg(long, default_value = "adventure")]
        theme: String,

        /// Override the configured story word count
        #[arg(long)]
        target: Option<usize>,

        /// Override the configured new word ratio
        #[arg(long)]
        ratio: Option<f64>,
    },

    /// Score a transcript against page text and record the session
    Read {
        /// Text of the page that was read
        #[arg(long)]
        page: String,

        /// JSON array of recognized words: [{"text", "start_ms", "end_ms"}]
        #[arg(long)]
        transcript: PathBuf,

        /// Session id (a fresh time-ordered id when omitted)
        #[arg(long)]
        session: Option<String>,
    },

    /// Print progress for the child or parent view
    Report {
        #[arg(long, value_enum, default_value = "child")]
        view: UserView,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("story_sprout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LearningConfig::load(path)?,
        None => LearningConfig::default(),
    };

    let mut profile = load_profile(&args.profile, &args.name)?;

    match args.command {
        Command::Plan {
            theme,
            target,
            ratio,
        } => {
            let mut request = profile.plan_story(&theme, &config)?;
            if target.is_some() || ratio.is_some() {
                request.constraint = select_vocabulary(
                    &profile.words,
                    target.unwrap_or(config.selection.target_story_word_count),
                    ratio.unwrap_or(config.selection.new_word_ratio),
                    &config.mastery,
                )?;
            }
            println!("{}", serde_json::to_string_pretty(&request.constraint)?);
            println!();
            println!("--- system prompt ---\n{}", STORY_SYSTEM_PROMPT);
            println!("--- user prompt ---\n{}", request.prompt());
        }
        Command::Read {
            page,
            transcript,
            session,
        } => {
            let recognized: Vec<RecognizedWord> =
                serde_json::from_str(&fs::read_to_string(&transcript)?)?;
            let session_id = session
                .as_deref()
                .map(SessionId::from)
                .unwrap_or_default();

            let mut session = profile.begin_session(session_id);
            let result = profile.read_page(&mut session, &page, &recognized)?;
            for mismatch in &result.alignment.mismatches {
                println!("  '{}' (you said: '{}')", mismatch.expected, mismatch.heard);
            }
            let analysis = profile.complete_session(&mut session, &config)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);

            save_profile(&args.profile, &profile)?;
        }
        Command::Report { view } => match view {
            UserView::Child => print_child_view(&profile, &config),
            UserView::Parent => match profile.parent_report(&config) {
                Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                None => println!("No reading sessions available for report generation"),
            },
        },
    }

    Ok(())
}

fn print_child_view(profile: &LearnerProfile, config: &LearningConfig) {
    let words = WordMasteryReport::build(&profile.words, &config.mastery);
    println!("Hi {}!", profile.name);
    println!("  Stars:          {}", profile.rewards.stars);
    println!("  Streak:         {}", profile.rewards.streak);
    println!("  Reading level:  {}", profile.level);
    println!("  Words mastered: {}", words.count(MasteryCategory::Mastered));
    println!("  Sessions:       {}", profile.progress.len());
}

fn load_profile(path: &Path, name: &str) -> Result<LearnerProfile> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "starting a new learner profile");
        return Ok(LearnerProfile::new(name));
    }
    LearnerProfile::from_json(&fs::read_to_string(path)?)
}

fn save_profile(path: &Path, profile: &LearnerProfile) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, profile.to_json()?)?;
    tracing::debug!(path = %path.display(), words = profile.words.len(), "profile saved");
    Ok(())
}
