use crate::models::user::User;
use crate::router::Route;

pub const BRAND: &str = "SuperQuiz";

pub fn render_navbar(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            "{} | dashboard {} | quizzes {} | create {} | {} (logout)",
            BRAND,
            Route::Dashboard,
            Route::Quizzes,
            Route::CreateQuiz,
            user.username
        ),
        None => format!(
            "{} | login {} | register {}",
            BRAND,
            Route::Login,
            Route::Register
        ),
    }
}
