use std::time::Duration;

const TYPE_DELAY: Duration = Duration::from_millis(60);
const DELETE_DELAY: Duration = Duration::from_millis(30);
const FULL_PAUSE: Duration = Duration::from_millis(2000);
const NEXT_PHRASE_PAUSE: Duration = Duration::from_millis(400);

/// Types each phrase one char at a time, holds it, deletes it, moves on.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase_index: usize,
    char_index: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>) -> Self {
        Self {
            phrases,
            phrase_index: 0,
            char_index: 0,
            deleting: false,
        }
    }

    /// Advance one keystroke. Returns how long to wait before the next one.
    pub fn step(&mut self) -> Duration {
        let Some(phrase) = self.phrases.get(self.phrase_index) else {
            return FULL_PAUSE;
        };
        let len = phrase.chars().count();

        let mut delay = if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            DELETE_DELAY
        } else {
            self.char_index = (self.char_index + 1).min(len);
            TYPE_DELAY
        };

        if !self.deleting && self.char_index >= len {
            delay = FULL_PAUSE;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            delay = NEXT_PHRASE_PAUSE;
        }

        delay
    }

    /// The visible prefix of the current phrase.
    pub fn text(&self) -> String {
        self.phrases
            .get(self.phrase_index)
            .map(|p| p.chars().take(self.char_index).collect())
            .unwrap_or_default()
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tw(phrases: &[&str]) -> Typewriter {
        Typewriter::new(phrases.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_types_one_char_per_step() {
        let mut t = tw(&["abc"]);
        assert_eq!(t.step(), TYPE_DELAY);
        assert_eq!(t.text(), "a");
        assert_eq!(t.step(), TYPE_DELAY);
        assert_eq!(t.text(), "ab");
    }

    #[test]
    fn test_pauses_on_full_phrase_then_deletes() {
        let mut t = tw(&["ab", "xy"]);
        t.step();
        assert_eq!(t.step(), FULL_PAUSE);
        assert_eq!(t.text(), "ab");
        assert_eq!(t.step(), DELETE_DELAY);
        assert_eq!(t.text(), "a");
        assert_eq!(t.step(), NEXT_PHRASE_PAUSE);
        assert_eq!(t.text(), "");
        assert_eq!(t.phrase_index(), 1);
        t.step();
        assert_eq!(t.text(), "x");
    }

    #[test]
    fn test_wraps_to_first_phrase() {
        let mut t = tw(&["a", "b"]);
        // a: type (pause), delete (next); b: type (pause), delete (next)
        for _ in 0..4 {
            t.step();
        }
        assert_eq!(t.phrase_index(), 0);
    }

    #[test]
    fn test_slices_by_char_not_byte() {
        let mut t = tw(&["hi 🚀"]);
        for _ in 0..4 {
            t.step();
        }
        assert_eq!(t.text(), "hi 🚀");
    }

    #[test]
    fn test_empty_phrase_does_not_stall() {
        let mut t = tw(&["", "ok"]);
        assert_eq!(t.step(), FULL_PAUSE);
        assert_eq!(t.step(), NEXT_PHRASE_PAUSE);
        assert_eq!(t.phrase_index(), 1);
    }

    #[test]
    fn test_no_phrases() {
        let mut t = tw(&[]);
        assert_eq!(t.step(), FULL_PAUSE);
        assert_eq!(t.text(), "");
    }
}
