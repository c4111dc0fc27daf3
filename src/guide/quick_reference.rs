//! Quick-reference catalog — the collapsible summary panels on the landing screen.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Key of a quick-reference panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Tiers,
    Research,
    Comms,
}

impl SectionKey {
    /// Panels in display order.
    pub const ALL: [SectionKey; 3] = [SectionKey::Tiers, SectionKey::Research, SectionKey::Comms];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiers => "tiers",
            Self::Research => "research",
            Self::Comms => "comms",
        }
    }
}

impl std::str::FromStr for SectionKey {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiers" => Ok(Self::Tiers),
            "research" => Ok(Self::Research),
            "comms" => Ok(Self::Comms),
            other => Err(WizardError::UndefinedCatalogReference {
                catalog: "quick reference",
                key: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One quick-reference panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickReferenceEntry {
    pub key: SectionKey,
    pub label: &'static str,
    pub body: &'static [&'static str],
}

static ENTRIES: [QuickReferenceEntry; 3] = [
    QuickReferenceEntry {
        key: SectionKey::Tiers,
        label: "Engagement Tiers",
        body: &[
            "Tier 1: Product-Led Sales triggers (highest priority)",
            "Tier 2: Install base engagement (existing users)",
            "Tier 3: True outbound (requires external trigger + value alignment)",
            "Tier 4: Social signals (strictest requirements)",
        ],
    },
    QuickReferenceEntry {
        key: SectionKey::Research,
        label: "Research Framework",
        body: &[
            "Step 1: Understand their Supabase usage patterns",
            "Step 2: Research the individual's role and needs",
            "Step 3: Research company context and prior interactions",
        ],
    },
    QuickReferenceEntry {
        key: SectionKey::Comms,
        label: "Communication Rules",
        body: &[
            "NO cold calling (only call if they provided their number)",
            "Maximum 3 touchpoints per contact within 15 days",
            "Email/LinkedIn and in-app are primary channels",
            "Messages must be concise, technical, action-oriented",
        ],
    },
];

/// Look up a quick-reference panel.
pub fn quick_reference(key: SectionKey) -> &'static QuickReferenceEntry {
    match key {
        SectionKey::Tiers => &ENTRIES[0],
        SectionKey::Research => &ENTRIES[1],
        SectionKey::Comms => &ENTRIES[2],
    }
}
