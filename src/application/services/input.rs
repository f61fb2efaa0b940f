//! Keyboard input and quick-fill suggestions

/// Keys the chat input distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
    Other,
}

/// A key press with the Shift modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn enter() -> Self {
        Self::new(Key::Enter)
    }

    pub fn shift_enter() -> Self {
        Self::new(Key::Enter).with_shift()
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    /// Whether this press submits instead of inserting a newline
    pub fn is_submit(&self) -> bool {
        self.key == Key::Enter && !self.shift
    }
}

/// Preset prompts that populate the draft without sending it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    MealPlan,
    CoreStrength,
}

impl Suggestion {
    pub const ALL: [Suggestion; 2] = [Suggestion::MealPlan, Suggestion::CoreStrength];

    pub fn text(&self) -> &'static str {
        match self {
            Suggestion::MealPlan => "Create a 7-day weight loss meal plan",
            Suggestion::CoreStrength => "Best exercises for core strength",
        }
    }

    /// Look up a suggestion by its 1-based menu number
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_plain_enter_submits() {
        assert!(KeyPress::enter().is_submit());
        assert!(!KeyPress::shift_enter().is_submit());
        assert!(!KeyPress::char('a').is_submit());
    }

    #[test]
    fn test_suggestion_lookup() {
        assert_eq!(Suggestion::from_index(1), Some(Suggestion::MealPlan));
        assert_eq!(Suggestion::from_index(2), Some(Suggestion::CoreStrength));
        assert_eq!(Suggestion::from_index(0), None);
        assert_eq!(Suggestion::from_index(3), None);
        assert_eq!(Suggestion::CoreStrength.text(), "Best exercises for core strength");
    }
}
