//! Keyword-vocabulary intent matching.
//!
//! An intent is a named set of required vocabularies; an utterance matches
//! when every required vocabulary has at least one entry present as whole
//! words. This mirrors the keyword-triplet style of intent builders found
//! in voice-assistant hosts.

/// A named vocabulary: one concept, many surface forms.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub name: String,
    pub entries: Vec<String>,
}

/// A recognized spoken-command pattern mapped to a handler by name.
#[derive(Debug, Clone)]
pub struct Intent {
    name: String,
    required: Vec<Vocabulary>,
}

impl Intent {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the utterance satisfies every required vocabulary.
    pub fn matches(&self, utterance: &str) -> bool {
        let normalized = normalize(utterance);
        self.required.iter().all(|vocab| {
            vocab
                .entries
                .iter()
                .any(|entry| normalized.contains(&normalize(entry)))
        })
    }
}

/// Builder for [`Intent`], in the `require(..)` chaining style.
#[derive(Debug, Default)]
pub struct IntentBuilder {
    name: String,
    required: Vec<Vocabulary>,
}

impl IntentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
        }
    }

    /// Require one of `entries` to be present in the utterance.
    pub fn require(mut self, name: impl Into<String>, entries: &[&str]) -> Self {
        self.required.push(Vocabulary {
            name: name.into(),
            entries: entries.iter().map(|e| (*e).to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> Intent {
        Intent {
            name: self.name,
            required: self.required,
        }
    }
}

/// Lowercase, strip punctuation, collapse whitespace, and pad with single
/// spaces so `contains` checks match whole words only.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    let mut last_was_space = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    if !last_was_space {
        out.push(' ');
    }
    out
}
