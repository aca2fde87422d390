use std::time::Duration;

use clap::Parser;
use quizdeck::{Quiz, QuestionSource, Settings, Theme};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file or http(s) URL to load the questions from
    #[arg(short, long, default_value = "questions.json")]
    questions: QuestionSource,

    /// Milliseconds to wait before revealing whether an answer was right
    #[arg(long, default_value_t = 800)]
    feedback_delay_ms: u64,

    /// Use the dark colour scheme
    #[arg(long)]
    dark: bool,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let settings = Settings {
        theme: if args.dark { Theme::Dark } else { Theme::Light },
        feedback_delay: Duration::from_millis(args.feedback_delay_ms),
    };

    if let Err(e) = Quiz::new(args.questions, settings).run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
