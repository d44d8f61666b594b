//! The text-to-speech seam.
//!
//! Skills speak through the [`Speaker`] trait; what sits behind it is the
//! host's business. The console speaker stands in for a TTS engine, and the
//! collecting speaker records utterances so tests can assert on what was
//! said and in what order.

use parking_lot::Mutex;

/// Output seam for spoken responses.
pub trait Speaker: Send + Sync {
    /// Speak one utterance.
    fn speak(&self, text: &str);
}

/// Speaker that prints to stdout, standing in for a TTS engine.
#[derive(Debug, Default)]
pub struct ConsoleSpeaker;

impl Speaker for ConsoleSpeaker {
    fn speak(&self, text: &str) {
        tracing::debug!("speaking: {}", text);
        println!("{}", text);
    }
}

/// Speaker that records everything spoken, for tests.
#[derive(Debug, Default)]
pub struct CollectingSpeaker {
    spoken: Mutex<Vec<String>>,
}

impl CollectingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything spoken so far, in order.
    pub fn utterances(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }
}

impl Speaker for CollectingSpeaker {
    fn speak(&self, text: &str) {
        self.spoken.lock().push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_speaker_preserves_order() {
        let speaker = CollectingSpeaker::new();
        speaker.speak("first");
        speaker.speak("second");
        assert_eq!(speaker.utterances(), vec!["first", "second"]);
    }
}
