use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use activity_tweeter::{Config, Tweeter};
use github_client::GitHubClient;
use twitter_client::TwitterClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("activity_tweeter=info".parse()?),
        )
        .init();

    info!("Activity tweeter starting...");

    if let Err(e) = run().await {
        error!("failed to tweet: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    // Load config
    let config = Config::from_env()?;

    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.http_timeout {
        http = http.timeout(timeout);
    }
    let http = http.build()?;

    let mut github = GitHubClient::with_http_client(http.clone(), config.github_token.clone());
    if let Some(url) = &config.github_api_url {
        github = github.with_base_url(url.as_str());
    }

    let mut twitter = TwitterClient::with_http_client(http, config.credentials.clone());
    if let Some(url) = &config.twitter_api_url {
        twitter = twitter.with_base_url(url.as_str());
    }

    let tweeter = Tweeter::new(Arc::new(github), Arc::new(twitter), &config);
    let stats = tweeter.run().await?;

    info!("Tweeter run complete. {stats}");
    Ok(())
}
