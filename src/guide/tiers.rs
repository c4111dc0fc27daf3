//! Tier content catalog — the four outreach tiers and their research checklists.
//!
//! All content here is policy data compiled into the binary. Lookups are
//! static and cannot fail once a `TierId` exists; only raw integers coming
//! from the outside are checked.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Identifier of an outreach tier. Serializes as the integer 1–4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TierId {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl TierId {
    pub const ALL: [TierId; 4] = [TierId::Tier1, TierId::Tier2, TierId::Tier3, TierId::Tier4];

    /// The tier's number, 1 through 4.
    pub fn number(&self) -> u8 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
            Self::Tier4 => 4,
        }
    }
}

impl TryFrom<u8> for TierId {
    type Error = WizardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Tier1),
            2 => Ok(Self::Tier2),
            3 => Ok(Self::Tier3),
            4 => Ok(Self::Tier4),
            other => Err(WizardError::UndefinedCatalogReference {
                catalog: "tier",
                key: other.to_string(),
            }),
        }
    }
}

impl From<TierId> for u8 {
    fn from(tier: TierId) -> Self {
        tier.number()
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Qualitative research intensity attached to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchBar {
    Low,
    Light,
    High,
    Strictest,
}

impl ResearchBar {
    /// Short caption shown under the research meter.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Low => "Lower bar",
            Self::Light => "Lighter requirements",
            Self::High => "Highest research bar",
            Self::Strictest => "Strictest requirements",
        }
    }

    /// How full a meter-style renderer should draw the bar, in percent.
    pub fn fill_percent(&self) -> u8 {
        match self {
            Self::Low => 25,
            Self::Light => 40,
            Self::High => 80,
            Self::Strictest => 100,
        }
    }
}

impl std::fmt::Display for ResearchBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Light => write!(f, "light"),
            Self::High => write!(f, "high"),
            Self::Strictest => write!(f, "strictest"),
        }
    }
}

/// Everything the guide shows for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDescriptor {
    pub id: TierId,
    pub title: &'static str,
    /// One-line description used on the tier selection screen.
    pub summary: &'static str,
    pub research_bar: ResearchBar,
    /// Research checklist. Order is meaningful.
    pub requirements: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
}

static TIERS: [TierDescriptor; 4] = [
    TierDescriptor {
        id: TierId::Tier1,
        title: "Tier 1: Product-Led Sales Trigger",
        summary: "Triggered by Supabase usage patterns or engagement behaviors",
        research_bar: ResearchBar::Low,
        requirements: &[
            "Review the specific PLS trigger that prompted this outreach",
            "Understand their Supabase usage patterns and feature adoption",
            "Identify scaling challenges or technical opportunities",
            "Research individual's role and how Supabase supports them",
        ],
        examples: Some(&[
            "User hits paid tier threshold",
            "Rapid growth in database connections",
            "Feature adoption indicating readiness for upgrade",
            "Usage pattern showing technical bottleneck we can solve",
        ]),
        notes: Some(
            "Primary focus area. These triggers indicate clear buying intent or technical milestones.",
        ),
    },
    TierDescriptor {
        id: TierId::Tier2,
        title: "Tier 2: Install Base Engagement",
        summary: "Existing Supabase user who hasn't hit PLS triggers",
        research_bar: ResearchBar::Light,
        requirements: &[
            "Review all Supabase products and features in use",
            "Check usage trajectory and patterns",
            "Review support tickets and community activity",
            "Understand their role and typical needs",
            "Identify specific value opportunities",
        ],
        examples: Some(&[
            "Free tier user who could benefit from paid features",
            "User with multiple independent team projects",
            "Account approaching limits who needs guidance",
        ]),
        notes: Some("Lighter research requirements since they've already chosen Supabase."),
    },
    TierDescriptor {
        id: TierId::Tier3,
        title: "Tier 3: True Outbound",
        summary: "No Supabase footprint, requires external trigger + value alignment",
        research_bar: ResearchBar::High,
        requirements: &[
            "Identify tangible external trigger (job posting, tech blog, public roadmap, etc.)",
            "Research company type, business model, and tech stack",
            "Identify specific ways Supabase aligns with visible needs",
            "Research individual thoroughly - role, responsibilities, interests",
            "Verify no competitor/partner/investor conflicts",
            "Confirm product capabilities align with their compliance needs (if regulated industry)",
        ],
        examples: Some(&[
            "Company posts Postgres engineering roles → offer to help scale infrastructure",
            "CTO writes about database challenges → offer architectural guidance",
            "Startup announces funding → help them scale properly from the start",
        ]),
        notes: Some(
            "Highest research bar. Must have both external trigger AND clear value alignment. Generic outreach not permitted.",
        ),
    },
    TierDescriptor {
        id: TierId::Tier4,
        title: "Tier 4: Social Signal Outreach",
        summary: "Triggered by LinkedIn post, conference appearance, etc.",
        research_bar: ResearchBar::Strictest,
        requirements: &[
            "Verify individual has no existing Supabase exec relationships",
            "Confirm they don't work for competitor, partner, or investor",
            "Ensure social signal genuinely relates to challenges Supabase solves",
            "Research company and role thoroughly",
            "Identify concrete technical value you can provide",
            "Complete full research framework (usage, individual, company)",
        ],
        examples: Some(&[
            "Developer tweets about Postgres migration challenges",
            "CTO presents at conference about infrastructure scaling",
            "Engineer writes blog post about real-time data problems",
        ]),
        notes: Some(
            "⚠️ Strictest requirements. Enhanced due diligence required. Social activity alone isn't sufficient - must relate to genuine technical needs.",
        ),
    },
];

/// Checks every message must pass before it goes out, whatever the tier.
pub const PRE_SEND_CHECKLIST: &[&str] = &[
    "Message is concise, technically informed, and action-oriented",
    "References specific aspects of their usage/company context",
    "Demonstrates research quality",
    "Respects the 3 touchpoint / 15 day limit",
    "Using email, LinkedIn, or in-app (never cold calling)",
];

/// Look up a tier's descriptor.
pub fn tier(id: TierId) -> &'static TierDescriptor {
    match id {
        TierId::Tier1 => &TIERS[0],
        TierId::Tier2 => &TIERS[1],
        TierId::Tier3 => &TIERS[2],
        TierId::Tier4 => &TIERS[3],
    }
}

/// All tiers in order.
pub fn all_tiers() -> &'static [TierDescriptor] {
    &TIERS
}
