use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SkillError;
use crate::intent::Intent;
use crate::speech::Speaker;
use crate::Config;

/// Skill contract: lifecycle hooks plus intent handling.
///
/// A skill declares its intents up front; the runtime matches utterances
/// against them and dispatches back by intent name.
#[async_trait]
pub trait Skill: Send + Sync {
    /// Unique identifier for this skill
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// The intents this skill responds to
    fn intents(&self) -> Vec<Intent>;

    /// Initialize the skill with the given context
    async fn initialize(&mut self, ctx: &SkillContext) -> Result<(), SkillError>;

    /// Handle a matched intent
    async fn handle_intent(
        &self,
        intent: &str,
        utterance: &str,
        ctx: &SkillContext,
    ) -> Result<(), SkillError>;

    /// Shutdown the skill gracefully
    async fn shutdown(&mut self) -> Result<(), SkillError>;
}

/// Context provided to skills: settings store and speech output.
pub struct SkillContext {
    pub config: Arc<Config>,
    pub speaker: Arc<dyn Speaker>,
}

impl SkillContext {
    pub fn new(config: Arc<Config>, speaker: Arc<dyn Speaker>) -> Self {
        Self { config, speaker }
    }
}
