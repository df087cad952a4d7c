use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use escucha::service::wire::{GenerateRequest, GenerateResponse, GradeRequest, UserAnswers};
use escucha::service::{ExerciseBackend, HttpBackend};

#[derive(Parser, Debug)]
#[command(about = "One-shot client for the exercise service endpoints", long_about = None)]
pub struct Cli {
    /// Service base URL; falls back to ESCUCHA_SERVICE_URL
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Request a fresh exercise for a prompt
    Generate {
        #[arg(long)]
        prompt: String,
        /// Exercise language code, e.g. "es"
        #[arg(long)]
        language: Option<String>,
        /// Voice-cloning sample name on the service
        #[arg(long)]
        speaker_wav: Option<String>,
        /// Write the raw response JSON here (reusable with `grade`)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Grade answers against a previously saved exercise
    Grade {
        /// Response JSON written by `generate --out`
        #[arg(long)]
        exercise: PathBuf,
        /// One option key per multiple-choice question, in order
        #[arg(long = "mc")]
        mc: Vec<String>,
        /// One answer per open question, in order
        #[arg(long = "open")]
        open: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> escucha::error::AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let base_url = args
        .base_url
        .or_else(|| std::env::var("ESCUCHA_SERVICE_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());

    let backend = HttpBackend::connect(&base_url, Duration::from_secs(30))?;

    match args.command {
        Commands::Generate {
            prompt,
            language,
            speaker_wav,
            out,
        } => {
            let request = GenerateRequest::new(prompt)
                .with_voice(language.as_deref(), speaker_wav.as_deref());
            let response = backend.generate(&request).await?;

            println!("{}", response.data.text);
            for (i, q) in response.data.multiple_choice_questions.iter().enumerate() {
                println!();
                println!("MC {}. {}", i + 1, q.question);
                for (key, label) in &q.options {
                    println!("     {key}) {label}");
                }
            }
            for (i, q) in response.data.open_ended_questions.iter().enumerate() {
                println!();
                println!("Open {}. {}", i + 1, q.question);
            }
            println!();
            println!("audio: {}", backend.audio_url(&response.audio_url));

            if let Some(out) = out {
                std::fs::write(&out, serde_json::to_string_pretty(&response).unwrap())?;
                println!("saved to {}", out.display());
            }
        }

        Commands::Grade {
            exercise,
            mut mc,
            mut open,
        } => {
            let raw = std::fs::read_to_string(&exercise)?;
            let response: GenerateResponse =
                serde_json::from_str(&raw).expect("Invalid exercise file");

            // unanswered slots are blank, same as the interactive session
            mc.resize(response.data.multiple_choice_questions.len(), String::new());
            open.resize(response.data.open_ended_questions.len(), String::new());

            let request = GradeRequest {
                exercise_data: response.data,
                user_answers: UserAnswers {
                    mcq_answers: mc,
                    open_ended_answers: open,
                },
            };
            let graded = backend.grade(&request).await?;

            for (i, entry) in graded.feedback.mcq_feedback.iter().enumerate() {
                println!("MC {}. {}", i + 1, entry.evaluation);
            }
            for (i, entry) in graded.feedback.open_ended_feedback.iter().enumerate() {
                println!("Open {}. {}", i + 1, entry.evaluation);
            }
        }
    }

    Ok(())
}
