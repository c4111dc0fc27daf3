//! Gate-check answers collected during one traversal.

use serde::{Deserialize, Serialize};

/// The three mandatory gate questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GateQuestion {
    /// A: can the specific value be explained in 1-2 sentences?
    ValueExplained,
    /// B: is there an existing executive-level relationship?
    HasRelationship,
    /// C: is the salesperson the appropriate person to engage?
    AppropriatePerson,
}

impl GateQuestion {
    pub const ALL: [GateQuestion; 3] = [
        GateQuestion::ValueExplained,
        GateQuestion::HasRelationship,
        GateQuestion::AppropriatePerson,
    ];

    /// The letter the question is shown under.
    pub fn letter(&self) -> char {
        match self {
            Self::ValueExplained => 'A',
            Self::HasRelationship => 'B',
            Self::AppropriatePerson => 'C',
        }
    }
}

impl std::fmt::Display for GateQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValueExplained => write!(f, "valueExplained"),
            Self::HasRelationship => write!(f, "hasRelationship"),
            Self::AppropriatePerson => write!(f, "appropriatePerson"),
        }
    }
}

/// Answers recorded so far. A key is present only once its question has
/// been answered; unanswered keys are omitted from JSON, so an empty set is
/// `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_explained: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_relationship: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appropriate_person: Option<bool>,
}

impl AnswerSet {
    /// The recorded answer for a question, if any.
    pub fn get(&self, question: GateQuestion) -> Option<bool> {
        match question {
            GateQuestion::ValueExplained => self.value_explained,
            GateQuestion::HasRelationship => self.has_relationship,
            GateQuestion::AppropriatePerson => self.appropriate_person,
        }
    }

    /// Whether the question has been answered.
    pub fn contains(&self, question: GateQuestion) -> bool {
        self.get(question).is_some()
    }

    /// A copy of this set with `question` answered. Answering again
    /// overwrites the value; no key is ever removed.
    pub fn with(mut self, question: GateQuestion, answer: bool) -> Self {
        let slot = match question {
            GateQuestion::ValueExplained => &mut self.value_explained,
            GateQuestion::HasRelationship => &mut self.has_relationship,
            GateQuestion::AppropriatePerson => &mut self.appropriate_person,
        };
        *slot = Some(answer);
        self
    }

    /// Questions answered so far.
    pub fn answered(&self) -> Vec<GateQuestion> {
        GateQuestion::ALL
            .into_iter()
            .filter(|q| self.contains(*q))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.answered().is_empty()
    }
}
