pub mod config;
pub mod dialog;
pub mod error;
pub mod intent;
pub mod runtime;
pub mod skill;
pub mod speech;

pub use config::{Config, GoogleConfig, SkillSettings, ValidationResult};
pub use dialog::DialogRegistry;
pub use error::SkillError;
pub use intent::{Intent, IntentBuilder};
pub use runtime::SkillRuntime;
pub use skill::{Skill, SkillContext};
pub use speech::{CollectingSpeaker, ConsoleSpeaker, Speaker};

use anyhow::Result;

/// Initialize the core runtime facilities
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Calvox core initialized");
    Ok(())
}
