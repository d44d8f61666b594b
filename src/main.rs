use anyhow::Result;
use std::sync::Arc;

use calvox_auth::{GoogleOAuth2Provider, TokenStorage};
use calvox_core::{Config, ConsoleSpeaker, SkillRuntime};
use calvox_skill::CalendarSkill;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    calvox_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    let config = Arc::new(config);

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("auth") => run_auth(&config).await,
        Some("ask") => {
            let utterance = args.collect::<Vec<_>>().join(" ");
            if utterance.is_empty() {
                anyhow::bail!("Usage: calvox ask <utterance>");
            }
            run_ask(config, &utterance).await
        }
        _ => {
            println!("Calvox - a voice skill that reads your calendar");
            println!();
            println!("Usage:");
            println!("  calvox auth             Connect your Google account");
            println!("  calvox ask <utterance>  Hand an utterance to the skill");
            println!();
            println!(
                "Configuration: {}",
                config.config_dir.join("config.toml").display()
            );
            Ok(())
        }
    }
}

/// Run the interactive OAuth flow and store the resulting token.
async fn run_auth(config: &Config) -> Result<()> {
    if !config.google.is_configured() {
        anyhow::bail!(
            "Google OAuth is not configured; set google.client_id and google.client_secret in {}",
            config.config_dir.join("config.toml").display()
        );
    }

    let provider = GoogleOAuth2Provider::new(
        config.google.client_id.clone(),
        config.google.client_secret.clone(),
    );
    let storage = TokenStorage::open()?;

    let token_set = calvox_auth::authenticate(&provider, &storage).await?;

    println!("Google account connected.");
    tracing::info!(
        "Stored calendar credentials; access token expires at {}",
        token_set.expires_at
    );
    Ok(())
}

/// Feed one utterance through the runtime, speaking responses on stdout.
async fn run_ask(config: Arc<Config>, utterance: &str) -> Result<()> {
    let speaker = Arc::new(ConsoleSpeaker);

    let mut runtime = SkillRuntime::new(config.clone(), speaker);
    runtime.register_skill(Box::new(CalendarSkill::new(&config)?));
    runtime.initialize().await?;

    let handled = runtime.handle_utterance(utterance).await?;
    if !handled {
        println!("No skill could handle that.");
    }

    runtime.shutdown().await?;
    Ok(())
}
