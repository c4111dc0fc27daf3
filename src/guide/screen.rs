//! Screen resolver — turns wizard state into a renderer-agnostic description.
//!
//! Nothing here mutates state. Every action placed on a screen carries its
//! target step, computed by running the navigation engine, so renderers never
//! need to know the decision tree.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use super::action::Action;
use super::answers::{AnswerSet, GateQuestion};
use super::navigation::transition;
use super::quick_reference::{SectionKey, quick_reference};
use super::step::Step;
use super::tiers::{PRE_SEND_CHECKLIST, ResearchBar, TierId, all_tiers, tier};

/// Visual intent of a callout. Renderers pick colours and icons from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Info,
    Success,
    Warning,
    Danger,
}

/// How list items are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    Bulleted,
    Numbered,
    Checklist,
}

/// One block of screen body content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Banner {
        heading: &'static str,
        subheading: &'static str,
    },
    Callout {
        tone: Tone,
        heading: &'static str,
        body: &'static str,
    },
    Prompt {
        heading: &'static str,
        body: &'static str,
    },
    Question {
        letter: char,
        question: GateQuestion,
        prompt: &'static str,
        hint: &'static str,
    },
    List {
        heading: &'static str,
        style: ListStyle,
        items: Vec<&'static str>,
    },
    ResearchMeter {
        bar: ResearchBar,
        caption: &'static str,
        fill_percent: u8,
    },
    QuickReference {
        key: SectionKey,
        label: &'static str,
        expanded: bool,
        /// Present only while the panel is expanded.
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<Vec<&'static str>>,
    },
}

/// Role of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Main forward action of the screen.
    Primary,
    /// A yes/no answer to a gate question.
    Answer,
    /// One of several parallel options (tier selection).
    Choice,
    Back,
    Reset,
}

/// A button on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenAction {
    pub label: &'static str,
    /// Optional second line under the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'static str>,
    pub kind: ActionKind,
    /// The action to dispatch when pressed.
    pub action: Action,
    pub target_step: Step,
}

/// Everything a renderer needs to paint the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub step_id: Step,
    pub title: &'static str,
    pub sections: Vec<Section>,
    pub actions: Vec<ScreenAction>,
}

impl Screen {
    /// The first action of a given kind, if any.
    pub fn action_of_kind(&self, kind: ActionKind) -> Option<&ScreenAction> {
        self.actions.iter().find(|a| a.kind == kind)
    }
}

/// Builds one screen; resolves each action's target through the engine.
struct ScreenBuilder<'a> {
    step: Step,
    answers: &'a AnswerSet,
    title: &'static str,
    sections: Vec<Section>,
    actions: Vec<ScreenAction>,
}

impl<'a> ScreenBuilder<'a> {
    fn new(step: Step, answers: &'a AnswerSet, title: &'static str) -> Self {
        Self {
            step,
            answers,
            title,
            sections: Vec::new(),
            actions: Vec::new(),
        }
    }

    fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    fn list(self, heading: &'static str, style: ListStyle, items: &[&'static str]) -> Self {
        self.section(Section::List {
            heading,
            style,
            items: items.to_vec(),
        })
    }

    fn action(self, label: &'static str, kind: ActionKind, action: Action) -> Self {
        self.action_with_detail(label, None, kind, action)
    }

    fn action_with_detail(
        mut self,
        label: &'static str,
        detail: Option<&'static str>,
        kind: ActionKind,
        action: Action,
    ) -> Self {
        match transition(self.step, action, self.answers) {
            Ok(next) => self.actions.push(ScreenAction {
                label,
                detail,
                kind,
                action,
                target_step: next.step,
            }),
            Err(e) => warn!(step = %self.step, %action, error = %e, "Screen offers an action with no transition"),
        }
        self
    }

    fn back(self, label: &'static str) -> Self {
        self.action(label, ActionKind::Back, Action::Back)
    }

    fn start_over(self) -> Self {
        self.action("Start Over", ActionKind::Reset, Action::Reset)
    }

    fn build(self) -> Screen {
        Screen {
            step_id: self.step,
            title: self.title,
            sections: self.sections,
            actions: self.actions,
        }
    }
}

/// Describe what to show for `step`.
pub fn resolve(
    step: Step,
    answers: &AnswerSet,
    expanded: &BTreeMap<SectionKey, bool>,
) -> Screen {
    match step {
        Step::Initial => initial(answers, expanded),
        Step::RightToEngage => ScreenBuilder::new(step, answers, "Mandatory Gate Check")
            .back("Back to Start")
            .section(Section::Prompt {
                heading: "Mandatory Gate Check",
                body: "Answer these three critical questions before proceeding:",
            })
            .section(Section::Question {
                letter: GateQuestion::ValueExplained.letter(),
                question: GateQuestion::ValueExplained,
                prompt: "Can you explain the specific value in 1-2 sentences?",
                hint: "If you can't explain this clearly and concretely in Slack, you haven't earned the right to engage yet.",
            })
            .action(
                "Yes, I can clearly articulate specific, customer-specific value",
                ActionKind::Answer,
                Action::AnswerValue { explained: true },
            )
            .action(
                "No, I'm not sure or it's generic",
                ActionKind::Answer,
                Action::AnswerValue { explained: false },
            )
            .build(),
        Step::QuestionB => ScreenBuilder::new(step, answers, "Question B")
            .back("Back")
            .section(Section::Question {
                letter: GateQuestion::HasRelationship.letter(),
                question: GateQuestion::HasRelationship,
                prompt: "Does the company/individual have an existing Supabase relationship?",
                hint: "Check for relationships with: Executive, Investor, Board member, or Partner",
            })
            .action(
                "Yes, there is an existing executive-level relationship",
                ActionKind::Answer,
                Action::AnswerRelationship { exists: true },
            )
            .action(
                "No existing executive relationships",
                ActionKind::Answer,
                Action::AnswerRelationship { exists: false },
            )
            .build(),
        Step::QuestionC => ScreenBuilder::new(step, answers, "Question C")
            .back("Back")
            .section(Section::Question {
                letter: GateQuestion::AppropriatePerson.letter(),
                question: GateQuestion::AppropriatePerson,
                prompt: "Are you the appropriate person to engage?",
                hint: "Should this be coordinated with or escalated to someone else?",
            })
            .action(
                "Yes, I'm the right person for this outreach",
                ActionKind::Answer,
                Action::AnswerAppropriatePerson { appropriate: true },
            )
            .action(
                "No, this should be coordinated or escalated",
                ActionKind::Answer,
                Action::AnswerAppropriatePerson { appropriate: false },
            )
            .build(),
        Step::NoValue => ScreenBuilder::new(step, answers, "Do Not Engage")
            .back("Back to Start")
            .section(Section::Callout {
                tone: Tone::Danger,
                heading: "Do Not Engage",
                body: "If you cannot identify specific, tangible value you will provide in the first interaction, do not reach out.",
            })
            .list(
                "Next Steps:",
                ListStyle::Bulleted,
                &[
                    "Post context in the sales channel for team input",
                    "Review the three-step research framework to find concrete value",
                    "Consider whether this prospect genuinely needs Supabase's help right now",
                ],
            )
            .start_over()
            .build(),
        Step::ExistingRelationship => ScreenBuilder::new(step, answers, "Requires Approval")
            .back("Back")
            .section(Section::Callout {
                tone: Tone::Warning,
                heading: "Requires Approval",
                body: "This account has an existing executive-level relationship (CEO, founder, board, investor). AE outbound requires explicit approval or coordination with the relationship owner.",
            })
            .list(
                "Required Actions:",
                ListStyle::Numbered,
                &[
                    "Identify who owns the relationship (check company/org level tags)",
                    "Contact the relationship owner to coordinate",
                    "Get explicit approval before any outreach",
                ],
            )
            .section(Section::Callout {
                tone: Tone::Danger,
                heading: "Investor Outreach Prohibited",
                body: "Any outreach to investors, VC firms, or investor-affiliated individuals is prohibited without escalation to GTM leadership.",
            })
            .start_over()
            .build(),
        Step::Coordinate => ScreenBuilder::new(step, answers, "Coordinate First")
            .back("Back")
            .section(Section::Callout {
                tone: Tone::Info,
                heading: "Coordinate First",
                body: "Post context in the sales channel or escalate to leadership before proceeding with outreach.",
            })
            .list(
                "What to Include:",
                ListStyle::Bulleted,
                &[
                    "Company/individual context",
                    "The specific value you identified",
                    "Why you think coordination is needed",
                    "Your proposed approach",
                ],
            )
            .start_over()
            .build(),
        Step::DetermineType => {
            let builder = ScreenBuilder::new(step, answers, "Gate Check Passed")
                .back("Back")
                .section(Section::Callout {
                    tone: Tone::Success,
                    heading: "Gate Check Passed",
                    body: "Now determine which engagement tier applies to proceed with research.",
                })
                .section(Section::Prompt {
                    heading: "Select Engagement Type:",
                    body: "Pick the tier that matches how this prospect surfaced.",
                });
            all_tiers()
                .iter()
                .fold(builder, |b, t| {
                    b.action_with_detail(
                        t.title,
                        Some(t.summary),
                        ActionKind::Choice,
                        Action::SelectTier { tier: t.id },
                    )
                })
                .build()
        }
        Step::Tier1 => tier_screen(step, TierId::Tier1, answers),
        Step::Tier2 => tier_screen(step, TierId::Tier2, answers),
        Step::Tier3 => tier_screen(step, TierId::Tier3, answers),
        Step::Tier4 => tier_screen(step, TierId::Tier4, answers),
    }
}

fn initial(answers: &AnswerSet, expanded: &BTreeMap<SectionKey, bool>) -> Screen {
    let builder = ScreenBuilder::new(Step::Initial, answers, "Outbound Engagement Guide")
        .section(Section::Banner {
            heading: "Outbound Engagement Guide",
            subheading: "Value-first, builder-focused outreach",
        })
        .section(Section::Callout {
            tone: Tone::Warning,
            heading: "Remember Our Foundation",
            body: "Supabase is product-led growth built for builders. Every outbound interaction must honor autonomy, technical excellence, and respect for time. Low-quality outreach erodes the trust that differentiates us.",
        })
        .section(Section::Prompt {
            heading: "Before You Begin",
            body: "Start by asking yourself: What is my \"Right to Engage\"?",
        })
        .action(
            "Start Qualification Check",
            ActionKind::Primary,
            Action::StartQualification,
        );

    SectionKey::ALL
        .into_iter()
        .fold(builder, |b, key| {
            let entry = quick_reference(key);
            let is_open = expanded.get(&key).copied().unwrap_or(false);
            b.section(Section::QuickReference {
                key,
                label: entry.label,
                expanded: is_open,
                body: is_open.then(|| entry.body.to_vec()),
            })
        })
        .build()
}

fn tier_screen(step: Step, id: TierId, answers: &AnswerSet) -> Screen {
    let descriptor = tier(id);
    let mut builder = ScreenBuilder::new(step, answers, descriptor.title)
        .back("Back to Tier Selection")
        .section(Section::ResearchMeter {
            bar: descriptor.research_bar,
            caption: descriptor.research_bar.caption(),
            fill_percent: descriptor.research_bar.fill_percent(),
        })
        .list(
            "Research Checklist:",
            ListStyle::Checklist,
            descriptor.requirements,
        );

    if let Some(examples) = descriptor.examples {
        builder = builder.list("Examples:", ListStyle::Bulleted, examples);
    }
    if let Some(notes) = descriptor.notes {
        builder = builder.section(Section::Callout {
            tone: Tone::Info,
            heading: "Note",
            body: notes,
        });
    }

    builder
        .list("Before Sending:", ListStyle::Bulleted, PRE_SEND_CHECKLIST)
        .action("Ready to Engage", ActionKind::Primary, Action::Reset)
        .start_over()
        .build()
}
