use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::router::Route;

#[derive(Parser)]
#[command(name = "superquiz", version, about = "Terminal client for the SuperQuiz service")]
pub struct Cli {
    /// API origin, overrides SUPERQUIZ_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file, overrides SUPERQUIZ_SESSION_FILE
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Log in; prompts for anything not given
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "SUPERQUIZ_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "SUPERQUIZ_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the dashboard for the current user
    Whoami,
    /// List available quizzes
    Quizzes,
    /// Take a quiz interactively
    Take { id: i64 },
    /// Write a new quiz interactively
    Create,
    /// Open a view by path, e.g. /quizzes/3
    Open { path: String },
}

impl Cmd {
    /// View the command opens when it needs no extra handling.
    pub fn route(&self) -> Option<Route> {
        match self {
            Cmd::Whoami => Some(Route::Dashboard),
            Cmd::Quizzes => Some(Route::Quizzes),
            Cmd::Take { id } => Some(Route::QuizDetail(*id)),
            Cmd::Create => Some(Route::CreateQuiz),
            Cmd::Login { .. } | Cmd::Register { .. } | Cmd::Logout | Cmd::Open { .. } => None,
        }
    }
}
