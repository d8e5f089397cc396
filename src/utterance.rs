//! The sentence being built: tile labels in activation order.

use crate::board::Tile;
use crate::speech::Speaker;

/// In-memory word buffer. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Utterance {
    words: Vec<String>,
}

impl Utterance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined with single spaces, for display.
    pub fn sentence(&self) -> String {
        self.words.join(" ")
    }

    /// Append the tile's label and speak its resolved text.
    ///
    /// The untrimmed label goes into the buffer; the trimmed spoken text goes to the
    /// speaker. Returns `false` (and touches nothing) when there is nothing to say.
    pub fn speak_tile(&mut self, tile: &Tile, speaker: &mut dyn Speaker) -> bool {
        let Some(spoken) = tile.spoken_text() else {
            return false;
        };
        self.words.push(tile.label.clone());
        speaker.speak(spoken);
        true
    }

    /// Speak the whole sentence again. The buffer is left as is.
    pub fn speak_all(&self, speaker: &mut dyn Speaker) -> bool {
        let sentence = self.sentence();
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return false;
        }
        speaker.speak(sentence);
        true
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn delete_last(&mut self) -> Option<String> {
        self.words.pop()
    }
}
