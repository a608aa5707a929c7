use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionType {
    #[default]
    Meeting,
    Call,
    Email,
    Conference,
    Other,
}

impl InteractionType {
    pub const ALL: [InteractionType; 5] = [
        InteractionType::Meeting,
        InteractionType::Call,
        InteractionType::Email,
        InteractionType::Conference,
        InteractionType::Other,
    ];

    /// Maps a free-text label onto a known type. Blank labels fall back to
    /// `Meeting`; anything unrecognised becomes `Other`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Self::Meeting;
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .unwrap_or(Self::Other)
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractionType::Meeting => "Meeting",
            InteractionType::Call => "Call",
            InteractionType::Email => "Email",
            InteractionType::Conference => "Conference",
            InteractionType::Other => "Other",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionType;

    #[test]
    fn blank_label_defaults_to_meeting() {
        assert_eq!(InteractionType::from_label(""), InteractionType::Meeting);
        assert_eq!(InteractionType::from_label("   "), InteractionType::Meeting);
    }

    #[test]
    fn known_labels_match_case_insensitively() {
        assert_eq!(InteractionType::from_label("call"), InteractionType::Call);
        assert_eq!(
            InteractionType::from_label(" Conference "),
            InteractionType::Conference
        );
    }

    #[test]
    fn unknown_label_is_other() {
        assert_eq!(
            InteractionType::from_label("Lunch and learn"),
            InteractionType::Other
        );
    }
}
