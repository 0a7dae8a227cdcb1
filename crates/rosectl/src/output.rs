//! Output formatting - terminal rendering of game replies

use owo_colors::OwoColorize;
use rand::Rng;
use rose_common::{
    AskLabel, AskResponse, GuessResponse, HealthResponse, Label, ModelPhase, StatusResponse,
    Terminal,
};

use crate::flavor;

/// Category name in its colour.
pub fn label_colored(label: Label) -> String {
    let name = label.as_str();
    match label {
        Label::Yes => name.bright_green().to_string(),
        Label::Close => name.yellow().to_string(),
        Label::DontKnow => name.cyan().to_string(),
        Label::No => name.red().to_string(),
        Label::TooFarAway => name.bright_red().to_string(),
    }
}

fn questions_left(count: u32, max: u32) -> String {
    let left = max.saturating_sub(count);
    if left <= 5 {
        format!("{} questions left", left).bright_yellow().to_string()
    } else {
        format!("{} questions left", left)
    }
}

pub fn render_status(status: &StatusResponse) -> String {
    let model = if status.model_ready {
        "[READY]".bright_green().to_string()
    } else {
        "[LOADING]".yellow().to_string()
    };
    let game = if !status.game_over {
        "in progress".to_string()
    } else if status.guessed_correctly {
        "won".bright_green().to_string()
    } else {
        "lost".bright_red().to_string()
    };
    format!(
        "Model:     {}\nGame:      {}\nQuestions: {}/{} ({})",
        model,
        game,
        status.question_count,
        status.max_questions,
        questions_left(status.question_count, status.max_questions)
    )
}

pub fn render_ask<R: Rng + ?Sized>(reply: &AskResponse, rng: &mut R) -> String {
    match reply.label {
        AskLabel::Category(label) => format!(
            "[{}] {}  ({})",
            label_colored(label),
            flavor::pick(label, rng),
            questions_left(reply.question_count, reply.max_questions)
        ),
        AskLabel::Outcome(Terminal::Guessed) => {
            let msg = reply.response.as_deref().unwrap_or("You guessed it!");
            format!("{}", msg.bright_green().bold())
        }
        AskLabel::Outcome(Terminal::GameOver) => {
            let msg = reply.response.as_deref().unwrap_or("Game over!");
            format!("{}", msg.bright_red())
        }
    }
}

pub fn render_guess(reply: &GuessResponse) -> String {
    if reply.correct {
        format!("{}", reply.message.bright_green().bold())
    } else if reply.game_over {
        format!("{}\n{}", reply.message.red(), "Game over!".bright_red())
    } else {
        format!("{}", reply.message.red())
    }
}

pub fn render_health(health: &HealthResponse) -> String {
    let phase = match health.model_phase {
        ModelPhase::Ready => "ready".bright_green().to_string(),
        ModelPhase::Training => "training".yellow().to_string(),
        ModelPhase::Failed => "failed".bright_red().to_string(),
    };
    let mut out = format!(
        "rosed v{} ({})\nUptime: {}s\nModel:  {}",
        health.version, health.status, health.uptime_seconds, phase
    );
    if let Some(err) = &health.last_error {
        out.push_str(&format!("\nError:  {}", err.bright_red()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ask_reply(label: AskLabel, response: Option<&str>) -> AskResponse {
        AskResponse {
            label,
            response: response.map(str::to_string),
            question_count: 3,
            max_questions: 20,
            game_over: matches!(label, AskLabel::Outcome(_)),
            guessed_correctly: matches!(label, AskLabel::Outcome(Terminal::Guessed)),
        }
    }

    #[test]
    fn test_render_category() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = render_ask(&ask_reply(AskLabel::Category(Label::Close), None), &mut rng);
        assert!(out.contains("close"));
        assert!(out.contains("17 questions left"));
    }

    #[test]
    fn test_render_terminal_uses_server_message() {
        let mut rng = StdRng::seed_from_u64(1);
        let reply = ask_reply(
            AskLabel::Outcome(Terminal::GameOver),
            Some("20 questions used! The answer was ROSE!"),
        );
        assert!(render_ask(&reply, &mut rng).contains("The answer was ROSE!"));
    }

    #[test]
    fn test_render_status_loading() {
        let status = StatusResponse {
            model_ready: false,
            question_count: 0,
            max_questions: 20,
            game_over: false,
            guessed_correctly: false,
        };
        let out = render_status(&status);
        assert!(out.contains("[LOADING]"));
        assert!(out.contains("0/20"));
    }

    #[test]
    fn test_render_failed_health() {
        let health = HealthResponse {
            status: "healthy".to_string(),
            version: "0.4.0".to_string(),
            uptime_seconds: 12,
            model_phase: ModelPhase::Failed,
            last_error: Some("tokenizer.json missing".to_string()),
        };
        let out = render_health(&health);
        assert!(out.contains("failed"));
        assert!(out.contains("tokenizer.json missing"));
    }
}
