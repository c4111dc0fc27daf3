//! Navigation engine — the complete decision tree as one pure function.

use serde::Serialize;

use super::action::Action;
use super::answers::{AnswerSet, GateQuestion};
use super::step::Step;
use crate::error::WizardError;

/// Outcome of a valid transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub step: Step,
    pub answers: AnswerSet,
}

/// Map (step, action, answers) to the next step and answer set.
///
/// Any pair not in the decision tree is an `InvalidAction`; callers keep
/// their prior state in that case.
pub fn transition(
    step: Step,
    action: Action,
    answers: &AnswerSet,
) -> Result<Transition, WizardError> {
    let invalid = || WizardError::InvalidAction { step, action };
    let answered = |question: GateQuestion, value: bool, next: Step| Transition {
        step: next,
        answers: answers.with(question, value),
    };

    let next = match (step, action) {
        (_, Action::Reset) => Transition {
            step: Step::Initial,
            answers: AnswerSet::default(),
        },
        (current, Action::Back) => Transition {
            step: current.back_target().ok_or_else(invalid)?,
            answers: *answers,
        },
        (Step::Initial, Action::StartQualification) => Transition {
            step: Step::RightToEngage,
            answers: *answers,
        },
        (Step::RightToEngage, Action::AnswerValue { explained }) => answered(
            GateQuestion::ValueExplained,
            explained,
            if explained { Step::QuestionB } else { Step::NoValue },
        ),
        (Step::QuestionB, Action::AnswerRelationship { exists }) => answered(
            GateQuestion::HasRelationship,
            exists,
            if exists {
                Step::ExistingRelationship
            } else {
                Step::QuestionC
            },
        ),
        (Step::QuestionC, Action::AnswerAppropriatePerson { appropriate }) => answered(
            GateQuestion::AppropriatePerson,
            appropriate,
            if appropriate {
                Step::DetermineType
            } else {
                Step::Coordinate
            },
        ),
        (Step::DetermineType, Action::SelectTier { tier }) => Transition {
            step: Step::for_tier(tier),
            answers: *answers,
        },
        _ => return Err(invalid()),
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::tiers::TierId;

    fn empty() -> AnswerSet {
        AnswerSet::default()
    }

    #[test]
    fn decision_table() {
        use Step::*;
        let table = [
            (Initial, Action::StartQualification, None, RightToEngage),
            (
                RightToEngage,
                Action::AnswerValue { explained: true },
                Some((GateQuestion::ValueExplained, true)),
                QuestionB,
            ),
            (
                RightToEngage,
                Action::AnswerValue { explained: false },
                Some((GateQuestion::ValueExplained, false)),
                NoValue,
            ),
            (
                QuestionB,
                Action::AnswerRelationship { exists: true },
                Some((GateQuestion::HasRelationship, true)),
                ExistingRelationship,
            ),
            (
                QuestionB,
                Action::AnswerRelationship { exists: false },
                Some((GateQuestion::HasRelationship, false)),
                QuestionC,
            ),
            (
                QuestionC,
                Action::AnswerAppropriatePerson { appropriate: true },
                Some((GateQuestion::AppropriatePerson, true)),
                DetermineType,
            ),
            (
                QuestionC,
                Action::AnswerAppropriatePerson { appropriate: false },
                Some((GateQuestion::AppropriatePerson, false)),
                Coordinate,
            ),
        ];

        for (from, action, sets, to) in table {
            let t = transition(from, action, &empty()).unwrap();
            assert_eq!(t.step, to, "{from} + {action}");
            let expected = match sets {
                Some((q, v)) => empty().with(q, v),
                None => empty(),
            };
            assert_eq!(t.answers, expected, "{from} + {action}");
        }
    }

    #[test]
    fn tier_selection_lands_on_tier_screen() {
        for tier in TierId::ALL {
            let t = transition(Step::DetermineType, Action::SelectTier { tier }, &empty()).unwrap();
            assert_eq!(t.step, Step::for_tier(tier));
            assert!(t.answers.is_empty());
        }
    }

    #[test]
    fn back_uses_fixed_targets_and_keeps_answers() {
        let answers = empty()
            .with(GateQuestion::ValueExplained, true)
            .with(GateQuestion::HasRelationship, false);
        for step in Step::ALL {
            match step.back_target() {
                Some(target) => {
                    let t = transition(step, Action::Back, &answers).unwrap();
                    assert_eq!(t.step, target);
                    assert_eq!(t.answers, answers);
                }
                None => assert!(transition(step, Action::Back, &answers).is_err()),
            }
        }
    }

    #[test]
    fn reset_from_any_step_clears_answers() {
        let answers = empty().with(GateQuestion::AppropriatePerson, true);
        for step in Step::ALL {
            let t = transition(step, Action::Reset, &answers).unwrap();
            assert_eq!(t.step, Step::Initial);
            assert!(t.answers.is_empty());
        }
    }

    #[test]
    fn wrong_step_actions_are_invalid() {
        let cases = [
            (Step::Initial, Action::AnswerValue { explained: true }),
            (Step::RightToEngage, Action::StartQualification),
            (Step::RightToEngage, Action::AnswerRelationship { exists: true }),
            (Step::QuestionB, Action::AnswerValue { explained: true }),
            (Step::QuestionC, Action::SelectTier { tier: TierId::Tier1 }),
            (Step::Tier2, Action::SelectTier { tier: TierId::Tier3 }),
            (Step::NoValue, Action::StartQualification),
        ];
        for (step, action) in cases {
            let err = transition(step, action, &empty()).unwrap_err();
            assert_eq!(err, WizardError::InvalidAction { step, action });
        }
    }

    #[test]
    fn back_from_tier3_ignores_path_taken() {
        let via_full_path = empty()
            .with(GateQuestion::ValueExplained, true)
            .with(GateQuestion::HasRelationship, false)
            .with(GateQuestion::AppropriatePerson, true);
        for answers in [empty(), via_full_path] {
            let t = transition(Step::Tier3, Action::Back, &answers).unwrap();
            assert_eq!(t.step, Step::DetermineType);
        }
    }
}
