//! tldq - line-oriented client for the TLD quiz and prediction service.
//!
//! The binary wires configuration, the HTTP client, and the session
//! controllers together; all game and prediction logic lives in
//! [`tldq_engine`]. Subcommands:
//!
//! ```text
//! tldq play                        quiz loop
//! tldq predict <name> [category]   one-shot prediction
//! tldq login | signup              credential flows
//! tldq logout                      clear the stored token
//! ```

use std::env;
use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;
use url::Url;

use tldq_api::ApiClient;
use tldq_engine::{
    AuthSession, CategoryInputMode, FileTokenStore, GameSession, GuessOutcome, PredictionSession,
    RoundPhase, TldqConfig, TokenStore,
};
use tldq_types::AuthMode;

type InputLines = Lines<BufReader<Stdin>>;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match TldqConfig::load() {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!(%error, "config unusable, falling back to defaults");
            TldqConfig::default()
        }
    };
    let base_url = Url::parse(&config.base_url()).context("invalid API base URL")?;
    let client =
        ApiClient::new(base_url, config.request_timeout()).context("failed to build HTTP client")?;

    let store_path = FileTokenStore::default_path().context("no data directory available")?;
    let store = FileTokenStore::new(store_path);
    restore_session(&client, &store).await;

    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("play") => play(&client).await,
        Some("predict") => match args.next() {
            Some(base_name) => predict_once(&client, &config, &base_name, args.next()).await,
            None => {
                print_usage();
                Ok(())
            }
        },
        Some("login") => authenticate(&client, store, AuthMode::Login).await,
        Some("signup") => authenticate(&client, store, AuthMode::Signup).await,
        Some("logout") => {
            store.clear().context("failed to clear stored token")?;
            println!("logged out");
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("usage: tldq <play | predict <name> [category] | login | signup | logout>");
}

/// Restore an authenticated view from the stored token, clearing the slot
/// when the service no longer accepts it.
async fn restore_session(client: &ApiClient, store: &FileTokenStore) {
    let token = match store.load() {
        Ok(Some(token)) => token,
        Ok(None) => return,
        Err(error) => {
            tracing::warn!(%error, "could not read stored token");
            return;
        }
    };
    match client.profile(&token).await {
        Ok(_) => tracing::info!("restored authenticated session"),
        Err(error) if error.is_unauthorized() => {
            tracing::info!("stored token no longer valid, clearing it");
            if let Err(error) = store.clear() {
                tracing::warn!(%error, "failed to clear stale token");
            }
        }
        Err(error) => tracing::warn!(%error, "could not verify stored token"),
    }
}

async fn prompt(lines: &mut InputLines, text: &str) -> Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

async fn play(client: &ApiClient) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = GameSession::new();

    loop {
        println!("loading question...");
        session.advance(client).await;

        match session.phase() {
            RoundPhase::Ready(question) => {
                println!();
                println!("domain:   {}", question.domain());
                println!("category: {}", question.category());
                let options: Vec<String> =
                    question.options().iter().map(|o| format!(".{o}")).collect();
                println!("options:  {}", options.join("  "));
            }
            RoundPhase::Failed(reason) => {
                println!("{reason}");
                match prompt(&mut lines, "retry? [y/N] ").await? {
                    Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
                    _ => return Ok(()),
                }
            }
            RoundPhase::Loading => continue,
        }

        let Some(guess) = prompt(&mut lines, "your guess> ").await? else {
            return Ok(());
        };
        let guess = guess.trim().trim_start_matches('.');
        match session.submit_guess(guess) {
            GuessOutcome::Correct | GuessOutcome::Incorrect { .. } => {
                if let Some(feedback) = session.feedback() {
                    println!("{feedback}");
                }
                println!("score: {}  streak: {}", session.score(), session.streak());
            }
            GuessOutcome::Rejected => {
                println!("that's not one of the options");
            }
        }

        match prompt(&mut lines, "[enter] next question, q to quit > ").await? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("q") => return Ok(()),
            Some(_) => {}
            None => return Ok(()),
        }
    }
}

async fn predict_once(
    client: &ApiClient,
    config: &TldqConfig,
    base_name: &str,
    category: Option<String>,
) -> Result<()> {
    let mut session = PredictionSession::new();
    if config.category_input() == CategoryInputMode::Enumerated {
        session.load_categories(client).await;
        if category.is_none() && !session.categories().is_empty() {
            println!("known categories: {}", session.categories().join(", "));
        }
    }

    session.set_base_name(base_name);
    if let Some(category) = category {
        session.set_use_category(true);
        session.set_category_hint(category);
    }

    if !session.submit(client).await {
        println!("base name must not be empty");
        return Ok(());
    }

    if session.predictions().is_empty() {
        println!("no predictions");
    } else {
        println!("top predictions for '{}':", base_name.trim());
        for (rank, prediction) in session.predictions().iter().enumerate() {
            println!(
                "{}. .{} ({:.1}%)",
                rank + 1,
                prediction.tld,
                prediction.score * 100.0
            );
        }
    }
    Ok(())
}

async fn authenticate(client: &ApiClient, store: FileTokenStore, mode: AuthMode) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let email = prompt(&mut lines, "email: ").await?.unwrap_or_default();
    let password = prompt(&mut lines, "password: ").await?.unwrap_or_default();

    let mut session = AuthSession::new(Box::new(store));
    session.set_mode(mode);
    session.set_email(email.trim());
    session.set_password(password);

    if session.submit(client).await {
        println!("{mode} succeeded");
    } else {
        println!("{}", session.error().unwrap_or("authentication failed"));
    }
    Ok(())
}
