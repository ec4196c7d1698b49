use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Quizzes,
    QuizDetail(i64),
    CreateQuiz,
}

impl Route {
    pub const AFTER_LOGIN: Route = Route::Dashboard;
    pub const AFTER_LOGOUT: Route = Route::Login;
    pub const AFTER_SUBMIT: Route = Route::Dashboard;
    pub const AFTER_CREATE: Route = Route::Quizzes;

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Where a navigation request actually lands: protected routes send
    /// anonymous users to the login view.
    pub fn guard(self, authenticated: bool) -> Route {
        if self.requires_auth() && !authenticated {
            Route::Login
        } else {
            self
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Register => f.write_str("/register"),
            Route::Dashboard => f.write_str("/"),
            Route::Quizzes => f.write_str("/quizzes"),
            Route::QuizDetail(id) => write!(f, "/quizzes/{}", id),
            Route::CreateQuiz => f.write_str("/quizzes/create"),
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Route::Dashboard),
            ["login"] => Ok(Route::Login),
            ["register"] => Ok(Route::Register),
            ["quizzes"] => Ok(Route::Quizzes),
            ["quizzes", "create"] => Ok(Route::CreateQuiz),
            ["quizzes", id] => id
                .parse()
                .map(Route::QuizDetail)
                .map_err(|_| Error::InvalidInput(format!("Unknown route: {}", s))),
            _ => Err(Error::InvalidInput(format!("Unknown route: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_parse_and_print() {
        for route in [
            Route::Login,
            Route::Register,
            Route::Dashboard,
            Route::Quizzes,
            Route::QuizDetail(42),
            Route::CreateQuiz,
        ] {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
        assert_eq!("/quizzes/".parse::<Route>().unwrap(), Route::Quizzes);
        assert!("/quizzes/abc".parse::<Route>().is_err());
        assert!("/admin".parse::<Route>().is_err());
    }

    #[test]
    fn protected_routes_redirect_to_login() {
        assert_eq!(Route::Quizzes.guard(false), Route::Login);
        assert_eq!(Route::QuizDetail(1).guard(true), Route::QuizDetail(1));
        assert_eq!(Route::Register.guard(false), Route::Register);
        assert_eq!(Route::AFTER_LOGOUT.guard(false), Route::Login);
    }
}
