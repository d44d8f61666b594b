use std::sync::Arc;

use crate::error::SkillError;
use crate::intent::Intent;
use crate::skill::{Skill, SkillContext};
use crate::speech::Speaker;
use crate::Config;

/// Runtime that owns registered skills and routes utterances to them.
///
/// Invocations are serialized: one utterance is handled to completion
/// before the next is accepted.
pub struct SkillRuntime {
    context: SkillContext,
    skills: Vec<RegisteredSkill>,
}

struct RegisteredSkill {
    skill: Box<dyn Skill>,
    intents: Vec<Intent>,
}

impl SkillRuntime {
    /// Create a new runtime over a settings store and a speaker.
    pub fn new(config: Arc<Config>, speaker: Arc<dyn Speaker>) -> Self {
        Self {
            context: SkillContext::new(config, speaker),
            skills: Vec::new(),
        }
    }

    /// Register a skill with the runtime.
    pub fn register_skill(&mut self, skill: Box<dyn Skill>) {
        tracing::info!("Registering skill: {}", skill.name());
        let intents = skill.intents();
        self.skills.push(RegisteredSkill { skill, intents });
    }

    /// Initialize all registered skills.
    pub async fn initialize(&mut self) -> Result<(), SkillError> {
        tracing::info!("Initializing runtime with {} skills", self.skills.len());

        for entry in &mut self.skills {
            tracing::debug!("Initializing skill: {}", entry.skill.name());
            entry.skill.initialize(&self.context).await?;
        }

        tracing::info!("Runtime initialized successfully");
        Ok(())
    }

    /// Route an utterance to the first matching intent.
    ///
    /// Returns `true` if a skill handled it, `false` if nothing matched.
    pub async fn handle_utterance(&self, utterance: &str) -> Result<bool, SkillError> {
        for entry in &self.skills {
            for intent in &entry.intents {
                if intent.matches(utterance) {
                    tracing::info!(
                        intent = intent.name(),
                        skill = entry.skill.id(),
                        "Dispatching utterance"
                    );
                    entry
                        .skill
                        .handle_intent(intent.name(), utterance, &self.context)
                        .await?;
                    return Ok(true);
                }
            }
        }

        tracing::debug!("No intent matched utterance: {}", utterance);
        Ok(false)
    }

    /// Shutdown all skills.
    pub async fn shutdown(&mut self) -> Result<(), SkillError> {
        tracing::info!("Shutting down runtime");

        for entry in &mut self.skills {
            tracing::debug!("Shutting down skill: {}", entry.skill.name());
            if let Err(e) = entry.skill.shutdown().await {
                tracing::error!("Error shutting down skill {}: {}", entry.skill.name(), e);
            }
        }

        Ok(())
    }

    /// Get reference to the runtime config.
    pub fn config(&self) -> &Config {
        &self.context.config
    }
}
