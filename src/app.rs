use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::answer::SubmissionResult;
use crate::models::user::Credential;
use crate::router::Route;
use crate::services::api_client::ApiClient;
use crate::services::quiz_service::QuizService;
use crate::services::session_service::SessionStore;
use crate::storage::{FileTokenStore, TokenStore};
use crate::views::console::Console;
use crate::views::create_quiz::{create_quiz, AuthoringOutcome};
use crate::views::dashboard::{describe_result, render_dashboard};
use crate::views::navbar::render_navbar;
use crate::views::notice::Notice;
use crate::views::quiz_list::render_quiz_list;
use crate::views::take_quiz::{take_quiz, AttemptOutcome};

/// The client as a whole: session, quiz data and the view currently shown.
pub struct App {
    session: SessionStore,
    quizzes: QuizService,
    route: Option<Route>,
    last_result: Option<SubmissionResult>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.session_file));
        Self::with_parts(ApiClient::new(config.api_base_url.clone()), tokens)
    }

    pub fn with_parts(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            session: SessionStore::new(api.clone(), tokens),
            quizzes: QuizService::new(api),
            route: None,
            last_result: None,
        }
    }

    /// Restores a persisted session. An unreachable server is not fatal;
    /// the client simply starts signed out.
    pub async fn start(&mut self) -> Result<Option<Credential>> {
        match self.session.hydrate().await {
            Ok(credential) => Ok(credential),
            Err(err @ Error::Network { status: None, .. }) => {
                warn!("Starting signed out: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn quizzes(&self) -> &QuizService {
        &self.quizzes
    }

    pub fn current_route(&self) -> Option<Route> {
        self.route
    }

    pub fn last_result(&self) -> Option<&SubmissionResult> {
        self.last_result.as_ref()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<Route> {
        self.session.login(email, password).await?;
        Ok(Route::AFTER_LOGIN)
    }

    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> Result<Route> {
        self.session.register(username, email, password).await?;
        Ok(Route::AFTER_LOGIN)
    }

    pub fn logout(&mut self) -> Result<Route> {
        self.quizzes.clear_cache();
        self.last_result = None;
        self.session.logout()?;
        self.route = Some(Route::AFTER_LOGOUT);
        Ok(Route::AFTER_LOGOUT)
    }

    /// Shows `route` and follows whatever navigation the view triggers.
    pub async fn open<R, W>(&mut self, route: Route, console: &mut Console<R, W>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut next = Some(route);
        while let Some(route) = next {
            let target = route.guard(self.session.is_authenticated());
            if target != route {
                info!("{} requires a session, redirecting to {}", route, target);
            }
            self.route = Some(target);
            next = self.show(target, console).await?;
        }
        Ok(())
    }

    async fn show<R, W>(&mut self, route: Route, console: &mut Console<R, W>) -> Result<Option<Route>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match route {
            Route::Login => self.show_login(console, false).await,
            Route::Register => self.show_login(console, true).await,
            Route::Dashboard => {
                let Some(credential) = self.session.current_credential() else {
                    return Ok(Some(Route::Login));
                };
                let view = render_dashboard(&credential.user, self.last_result.as_ref());
                console.say(&render_navbar(Some(&credential.user))).await?;
                console.say(&view).await?;
                Ok(None)
            }
            Route::Quizzes => {
                let Some(credential) = self.session.current_credential().cloned() else {
                    return Ok(Some(Route::Login));
                };
                console.say(&render_navbar(Some(&credential.user))).await?;
                match self.quizzes.list_quizzes(&credential).await {
                    Ok(list) => {
                        console.say(&render_quiz_list(&list)).await?;
                        Ok(None)
                    }
                    Err(err) => self.fail("Could not load quizzes", err, console).await,
                }
            }
            Route::QuizDetail(id) => {
                let Some(credential) = self.session.current_credential().cloned() else {
                    return Ok(Some(Route::Login));
                };
                match take_quiz(console, &self.quizzes, &credential, id).await {
                    Ok(AttemptOutcome::Submitted(result)) => {
                        let notice = Notice::success(format!("Quiz finished! {}", describe_result(&result)));
                        console.say(&notice.to_string()).await?;
                        self.last_result = Some(result);
                        Ok(Some(Route::AFTER_SUBMIT))
                    }
                    Ok(AttemptOutcome::Abandoned) => Ok(None),
                    Err(err) => self.fail("Could not run the quiz", err, console).await,
                }
            }
            Route::CreateQuiz => {
                let Some(credential) = self.session.current_credential().cloned() else {
                    return Ok(Some(Route::Login));
                };
                match create_quiz(console, &self.quizzes, &credential).await {
                    Ok(AuthoringOutcome::Created(quiz)) => {
                        let notice = Notice::success(format!("Quiz \"{}\" created!", quiz.title));
                        console.say(&notice.to_string()).await?;
                        Ok(Some(Route::AFTER_CREATE))
                    }
                    Ok(AuthoringOutcome::Cancelled) => Ok(None),
                    Err(err) => self.fail("Could not create the quiz", err, console).await,
                }
            }
        }
    }

    async fn show_login<R, W>(
        &mut self,
        console: &mut Console<R, W>,
        register: bool,
    ) -> Result<Option<Route>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        console.say(&render_navbar(None)).await?;
        let username = if register {
            match console.ask("Username:").await? {
                Some(name) => Some(name),
                None => return Ok(None),
            }
        } else {
            None
        };
        let Some(email) = console.ask("Email:").await? else {
            return Ok(None);
        };
        let Some(password) = console.ask("Password:").await? else {
            return Ok(None);
        };

        self.authenticate(username.as_deref(), &email, &password, console)
            .await
    }

    /// Logs in, or registers when `username` is given. A rejection is shown
    /// as a notice with the server's message and yields `None`.
    pub async fn authenticate<R, W>(
        &mut self,
        username: Option<&str>,
        email: &str,
        password: &str,
        console: &mut Console<R, W>,
    ) -> Result<Option<Route>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (context, outcome) = match username {
            Some(username) => (
                "Registration failed",
                self.register(username, email, password).await,
            ),
            None => ("Login failed", self.login(email, password).await),
        };
        match outcome {
            Ok(next) => Ok(Some(next)),
            Err(err) => {
                console.say(&Notice::failure(context, &err).to_string()).await?;
                Ok(None)
            }
        }
    }

    /// Turns a failed remote call into a notice. An auth rejection of a
    /// signed-in request ends the session and redirects to the login view.
    async fn fail<R, W>(
        &mut self,
        context: &str,
        err: Error,
        console: &mut Console<R, W>,
    ) -> Result<Option<Route>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if err.is_auth() && self.session.is_authenticated() {
            warn!("Session rejected by the server, logging out: {}", err);
            console.say(&Notice::session_ended(context).to_string()).await?;
            return self.logout().map(Some);
        }
        console.say(&Notice::failure(context, &err).to_string()).await?;
        Ok(None)
    }
}
