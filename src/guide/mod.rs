//! Outbound qualification wizard.
//!
//! A salesperson walks a fixed decision tree (three gate questions, then a
//! tier choice) and ends on either an outcome screen or a tier-specific
//! research checklist. The navigation engine and catalogs are pure; the
//! session registry and routes host many traversals over HTTP.

pub mod action;
pub mod answers;
pub mod navigation;
pub mod quick_reference;
pub mod routes;
pub mod screen;
pub mod session;
pub mod state;
pub mod step;
pub mod tiers;

pub use action::Action;
pub use answers::{AnswerSet, GateQuestion};
pub use navigation::{Transition, transition};
pub use quick_reference::{QuickReferenceEntry, SectionKey, quick_reference};
pub use routes::{GuideRouteState, guide_routes};
pub use screen::{ActionKind, Screen, ScreenAction, Section, resolve};
pub use session::{GuideSessions, SessionView, spawn_idle_sweep};
pub use state::WizardState;
pub use step::Step;
pub use tiers::{ResearchBar, TierDescriptor, TierId, tier};
