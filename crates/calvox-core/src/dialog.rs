//! Dialog templates: named spoken-response strings with named placeholders.
//!
//! Templates go through a strict-mode Handlebars registry so a missing
//! placeholder fails loudly at render time instead of being spoken as an
//! empty gap.

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::SkillError;

/// Registry of dialog templates, keyed by dotted dialog name
/// (e.g. `event.is.at.oh.clock`).
pub struct DialogRegistry {
    registry: Handlebars<'static>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        Self { registry }
    }

    /// Register a dialog template under a name.
    pub fn register(&mut self, name: &str, template: &str) -> Result<(), SkillError> {
        self.registry
            .register_template_string(name, template)
            .map_err(|e| SkillError::Dialog {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Render a dialog with the given named placeholders.
    ///
    /// Whitespace is collapsed after substitution, so placeholders rendered
    /// empty (such as the meridiem on a 24-hour clock) leave no gap.
    pub fn render(&self, name: &str, params: &Value) -> Result<String, SkillError> {
        let rendered =
            self.registry
                .render(name, params)
                .map_err(|e| SkillError::Dialog {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        Ok(collapse_spaces(&rendered))
    }

    /// Whether a dialog with this name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.get_template(name).is_some()
    }
}

impl Default for DialogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_spaces(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    // Substituted-away placeholders can leave a space before punctuation
    collapsed.replace(" .", ".").replace(" ,", ",")
}
