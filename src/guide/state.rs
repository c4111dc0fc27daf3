//! Wizard state — one traversal of the guide.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::action::Action;
use super::answers::AnswerSet;
use super::navigation::transition;
use super::quick_reference::SectionKey;
use super::screen::{Screen, resolve};
use super::step::Step;
use crate::error::{AccessError, WizardError};

/// Run-time state of a single traversal.
///
/// Owned by exactly one traversal; hosts create it on mount and drop it on
/// unmount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step: Step,
    pub answers: AnswerSet,
    /// Quick-reference panel toggles. Absent means collapsed.
    #[serde(default)]
    pub expanded_sections: BTreeMap<SectionKey, bool>,
}

impl WizardState {
    /// Fresh state at the landing screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the wizard for a viewer. The guide is only reachable once the
    /// authentication collaborator has vouched for the viewer.
    pub fn mount(authorized: bool) -> Result<Self, AccessError> {
        if !authorized {
            warn!("Refusing to mount guide for unauthorized viewer");
            return Err(AccessError::Unauthorized);
        }
        Ok(Self::new())
    }

    /// Apply a user action. On `InvalidAction` nothing changes.
    pub fn dispatch(&mut self, action: Action) -> Result<Step, WizardError> {
        match transition(self.current_step, action, &self.answers) {
            Ok(next) => {
                debug!(from = %self.current_step, to = %next.step, %action, "Wizard transition");
                self.current_step = next.step;
                self.answers = next.answers;
                Ok(next.step)
            }
            Err(e) => {
                warn!(step = %self.current_step, %action, "Ignoring invalid wizard action");
                Err(e)
            }
        }
    }

    /// Flip a quick-reference panel. Returns whether it is now expanded.
    pub fn toggle_section(&mut self, key: SectionKey) -> bool {
        let entry = self.expanded_sections.entry(key).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Whether a quick-reference panel is expanded.
    pub fn is_expanded(&self, key: SectionKey) -> bool {
        self.expanded_sections.get(&key).copied().unwrap_or(false)
    }

    /// Back to the landing screen with all answers cleared. Panel toggles
    /// are kept.
    pub fn reset(&mut self) {
        self.current_step = Step::Initial;
        self.answers = AnswerSet::default();
    }

    /// Describe the current screen.
    pub fn current_screen(&self) -> Screen {
        resolve(self.current_step, &self.answers, &self.expanded_sections)
    }
}
