//! Line-oriented front end for a single exercise session.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::AppResult;
use crate::service::ExerciseBackend;
use crate::session::{ExerciseSession, QuestionKind, SessionController, SessionFailure, SessionPhase};

const HELP: &str = "\
commands:
  gen <prompt>      generate an exercise from the prompt
  show              show the current exercise and answers
  mc <n> <key>      answer multiple-choice question n with option <key>
  open <n> <text>   answer open question n
  play              play the narration audio
  submit            submit answers for feedback
  help              show this text
  quit              exit";

pub async fn run_repl<B: ExerciseBackend>(mut session: ExerciseSession<B>) -> AppResult<()> {
    println!("escucha — listening practice. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                tracing::info!("Ctrl+C received, leaving.");
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "gen" => {
                session.set_prompt(rest);
                session.generate().await;
                match session.controller().failure() {
                    Some(_) => println!("Could not generate an exercise. Try again."),
                    None => render(session.controller()),
                }
            }
            "show" => render(session.controller()),
            "mc" => edit_answer(&mut session, QuestionKind::MultipleChoice, rest),
            "open" => edit_answer(&mut session, QuestionKind::OpenEnded, rest),
            "play" => {
                if let Err(e) = session.play_audio() {
                    println!("{e}");
                }
            }
            "submit" => match session.submit().await {
                Err(e) => println!("{e}"),
                Ok(_) => match session.controller().failure() {
                    Some(SessionFailure::Grading) => {
                        println!("Could not grade the answers. Try again.");
                    }
                    _ => render(session.controller()),
                },
            },
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            _ => println!("unknown command, type `help`"),
        }
    }

    Ok(())
}

fn edit_answer<B: ExerciseBackend>(
    session: &mut ExerciseSession<B>,
    kind: QuestionKind,
    rest: &str,
) {
    // questions are numbered from 1 in the rendering
    let parsed = rest
        .split_once(' ')
        .and_then(|(n, value)| Some((n.parse::<usize>().ok()?.checked_sub(1)?, value.trim())));

    let Some((index, value)) = parsed else {
        println!("usage: mc|open <n> <value>");
        return;
    };

    if let Err(e) = session.set_answer(kind, index, value) {
        println!("{e}");
    }
}

fn render(controller: &SessionController) {
    let Some(exercise) = controller.exercise() else {
        println!("No exercise loaded. Use `gen <prompt>`.");
        return;
    };

    println!();
    println!("{}", exercise.text());

    let answers = controller.answers();
    let feedback = controller.feedback();

    for (i, question) in exercise.multiple_choice().iter().enumerate() {
        println!();
        println!("MC {}. {}", i + 1, question.question());
        for (key, label) in question.options() {
            println!("     {key}) {label}");
        }
        if let Some(answers) = answers {
            let slot = &answers.mcq()[i];
            if slot.is_answered() {
                println!("     your answer: {}", slot.value());
            }
        }
        if let Some(feedback) = feedback {
            println!("     feedback: {}", feedback.mcq()[i]);
        }
    }

    for (i, question) in exercise.open_ended().iter().enumerate() {
        println!();
        println!("Open {}. {}", i + 1, question.question());
        if let Some(answers) = answers {
            let slot = &answers.open()[i];
            if slot.is_answered() {
                println!("     your answer: {}", slot.value());
            }
        }
        if let Some(feedback) = feedback {
            println!("     feedback: {}", feedback.open()[i]);
        }
    }

    println!();
    match controller.phase() {
        SessionPhase::Unanswered => println!("No answers yet."),
        SessionPhase::PartiallyAnswered => {
            if let Some(answers) = answers {
                println!("{} of {} answered.", answers.answered(), answers.total());
            }
        }
        SessionPhase::Answered => println!("All answered. Use `submit`."),
        SessionPhase::Reviewed => println!("Feedback received."),
        SessionPhase::NoExercise => {}
    }
}
