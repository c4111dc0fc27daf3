//! Wizard steps — the closed set of screens a traversal can be on.

use serde::{Deserialize, Serialize};

use super::tiers::TierId;

/// The screens of the qualification flow.
///
/// Gate questions run linearly (RightToEngage → QuestionB → QuestionC) and
/// each one can branch off to an outcome screen. Passing all three leads to
/// tier selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    #[default]
    Initial,
    RightToEngage,
    QuestionB,
    QuestionC,
    NoValue,
    ExistingRelationship,
    Coordinate,
    DetermineType,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl Step {
    /// Every step, in flow order.
    pub const ALL: [Step; 12] = [
        Step::Initial,
        Step::RightToEngage,
        Step::QuestionB,
        Step::QuestionC,
        Step::NoValue,
        Step::ExistingRelationship,
        Step::Coordinate,
        Step::DetermineType,
        Step::Tier1,
        Step::Tier2,
        Step::Tier3,
        Step::Tier4,
    ];

    /// The fixed screen that `back` returns to. `Initial` has none.
    ///
    /// This is a single level, not a history stack: a tier screen always goes
    /// back to tier selection no matter how it was reached.
    pub fn back_target(&self) -> Option<Step> {
        use Step::*;
        match self {
            Initial => None,
            RightToEngage => Some(Initial),
            QuestionB => Some(RightToEngage),
            QuestionC => Some(QuestionB),
            NoValue => Some(Initial),
            ExistingRelationship => Some(QuestionB),
            Coordinate => Some(QuestionC),
            DetermineType => Some(QuestionC),
            Tier1 | Tier2 | Tier3 | Tier4 => Some(DetermineType),
        }
    }

    /// Whether this is an outcome screen (the flow ends here in practice).
    pub fn is_terminal(&self) -> bool {
        use Step::*;
        matches!(
            self,
            NoValue | ExistingRelationship | Coordinate | Tier1 | Tier2 | Tier3 | Tier4
        )
    }

    /// The tier shown on this screen, if it is a tier screen.
    pub fn tier(&self) -> Option<TierId> {
        match self {
            Self::Tier1 => Some(TierId::Tier1),
            Self::Tier2 => Some(TierId::Tier2),
            Self::Tier3 => Some(TierId::Tier3),
            Self::Tier4 => Some(TierId::Tier4),
            _ => None,
        }
    }

    /// The screen for a tier.
    pub fn for_tier(tier: TierId) -> Step {
        match tier {
            TierId::Tier1 => Self::Tier1,
            TierId::Tier2 => Self::Tier2,
            TierId::Tier3 => Self::Tier3,
            TierId::Tier4 => Self::Tier4,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Initial => "initial",
            Self::RightToEngage => "rightToEngage",
            Self::QuestionB => "questionB",
            Self::QuestionC => "questionC",
            Self::NoValue => "noValue",
            Self::ExistingRelationship => "existingRelationship",
            Self::Coordinate => "coordinate",
            Self::DetermineType => "determineType",
            Self::Tier1 => "tier1",
            Self::Tier2 => "tier2",
            Self::Tier3 => "tier3",
            Self::Tier4 => "tier4",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_targets_are_fixed_per_screen() {
        use Step::*;
        let expected = [
            (RightToEngage, Initial),
            (QuestionB, RightToEngage),
            (QuestionC, QuestionB),
            (NoValue, Initial),
            (ExistingRelationship, QuestionB),
            (Coordinate, QuestionC),
            (DetermineType, QuestionC),
            (Tier1, DetermineType),
            (Tier2, DetermineType),
            (Tier3, DetermineType),
            (Tier4, DetermineType),
        ];
        for (from, to) in expected {
            assert_eq!(from.back_target(), Some(to), "{from} should go back to {to}");
        }
        assert_eq!(Initial.back_target(), None);
    }

    #[test]
    fn terminal_steps() {
        use Step::*;
        let terminal: Vec<Step> = Step::ALL.into_iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(
            terminal,
            vec![NoValue, ExistingRelationship, Coordinate, Tier1, Tier2, Tier3, Tier4]
        );
        assert!(!Initial.is_terminal());
        assert!(!DetermineType.is_terminal());
    }

    #[test]
    fn tier_steps_map_both_ways() {
        for tier in TierId::ALL {
            let step = Step::for_tier(tier);
            assert_eq!(step.tier(), Some(tier));
        }
        assert_eq!(Step::QuestionC.tier(), None);
    }

    #[test]
    fn display_matches_serde() {
        for step in Step::ALL {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {step:?}"
            );
        }
    }

    #[test]
    fn default_is_initial() {
        assert_eq!(Step::default(), Step::Initial);
    }
}
