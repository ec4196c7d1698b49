use std::process::ExitCode;

use clap::Parser;
use superquiz_client::cli::{Cli, Cmd};
use superquiz_client::config::Config;
use superquiz_client::router::Route;
use superquiz_client::views::console::Console;
use superquiz_client::views::navbar::render_navbar;
use superquiz_client::views::notice::Notice;
use superquiz_client::App;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = cli.session_file.clone() {
        config = config.with_session_file(path);
    }

    // Ctrl-C tears down the current view, including a pending submission.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }
    let mut console = Console::with_cancel(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        cancel,
    );

    let mut app = App::new(&config);
    app.start().await?;

    match cli.cmd {
        Cmd::Login {
            email: Some(email),
            password: Some(password),
        } => match app.authenticate(None, &email, &password, &mut console).await? {
            Some(next) => app.open(next, &mut console).await?,
            None => return Ok(ExitCode::FAILURE),
        },
        Cmd::Login { .. } => app.open(Route::Login, &mut console).await?,
        Cmd::Register {
            username: Some(username),
            email: Some(email),
            password: Some(password),
        } => match app
            .authenticate(Some(&username), &email, &password, &mut console)
            .await?
        {
            Some(next) => app.open(next, &mut console).await?,
            None => return Ok(ExitCode::FAILURE),
        },
        Cmd::Register { .. } => app.open(Route::Register, &mut console).await?,
        Cmd::Logout => {
            app.logout()?;
            console.say(&Notice::success("Logged out").to_string()).await?;
            console.say(&render_navbar(None)).await?;
        }
        Cmd::Open { path } => {
            let route: Route = path.parse()?;
            app.open(route, &mut console).await?;
        }
        cmd => {
            if let Some(route) = cmd.route() {
                app.open(route, &mut console).await?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
