//! User actions — the buttons a renderer can press.

use serde::{Deserialize, Serialize};

use super::answers::GateQuestion;
use super::tiers::TierId;

/// Something the user did. Renderers send these back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Leave the landing screen and begin the gate check.
    StartQualification,
    /// Answer question A.
    AnswerValue { explained: bool },
    /// Answer question B.
    AnswerRelationship { exists: bool },
    /// Answer question C.
    AnswerAppropriatePerson { appropriate: bool },
    /// Pick an engagement tier after passing the gate check.
    SelectTier { tier: TierId },
    /// Go back one fixed level.
    Back,
    /// Start over: back to the landing screen with all answers cleared.
    Reset,
}

impl Action {
    /// The gate question this action answers, and the answer.
    pub fn gate_answer(&self) -> Option<(GateQuestion, bool)> {
        match *self {
            Self::AnswerValue { explained } => Some((GateQuestion::ValueExplained, explained)),
            Self::AnswerRelationship { exists } => Some((GateQuestion::HasRelationship, exists)),
            Self::AnswerAppropriatePerson { appropriate } => {
                Some((GateQuestion::AppropriatePerson, appropriate))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartQualification => write!(f, "start_qualification"),
            Self::AnswerValue { explained } => write!(f, "answer_value(explained={explained})"),
            Self::AnswerRelationship { exists } => {
                write!(f, "answer_relationship(exists={exists})")
            }
            Self::AnswerAppropriatePerson { appropriate } => {
                write!(f, "answer_appropriate_person(appropriate={appropriate})")
            }
            Self::SelectTier { tier } => write!(f, "select_tier({tier})"),
            Self::Back => write!(f, "back"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_tagged() {
        let json = serde_json::to_value(Action::SelectTier { tier: TierId::Tier3 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "select_tier", "tier": 3}));

        let parsed: Action =
            serde_json::from_str(r#"{"type": "answer_value", "explained": false}"#).unwrap();
        assert_eq!(parsed, Action::AnswerValue { explained: false });

        let parsed: Action = serde_json::from_str(r#"{"type": "reset"}"#).unwrap();
        assert_eq!(parsed, Action::Reset);
    }

    #[test]
    fn unknown_tier_is_rejected_on_the_wire() {
        let parsed = serde_json::from_str::<Action>(r#"{"type": "select_tier", "tier": 9}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn gate_answers() {
        assert_eq!(
            Action::AnswerRelationship { exists: true }.gate_answer(),
            Some((GateQuestion::HasRelationship, true))
        );
        assert_eq!(Action::Back.gate_answer(), None);
        assert_eq!(Action::SelectTier { tier: TierId::Tier1 }.gate_answer(), None);
    }
}
