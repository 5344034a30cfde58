use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four selection categories that count toward project complexity,
/// plus service modules, which add hours but not complexity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionCategory {
    Crm,
    Cloud,
    Integration,
    AiTool,
    Module,
}

impl SelectionCategory {
    pub const ALL: [SelectionCategory; 5] = [
        SelectionCategory::Crm,
        SelectionCategory::Cloud,
        SelectionCategory::Integration,
        SelectionCategory::AiTool,
        SelectionCategory::Module,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Crm => "CRM Platforms",
            Self::Cloud => "Salesforce Clouds",
            Self::Integration => "Integrations",
            Self::AiTool => "AI Tools",
            Self::Module => "Service Modules",
        }
    }

    /// Whether items in this category count toward the complexity tier.
    pub fn counts_toward_complexity(&self) -> bool {
        !matches!(self, Self::Module)
    }
}

/// A fixed mapping from catalog labels to a non-negative integer value
/// (hours for selection tables, dollars-per-hour for power-up surcharges).
/// Unknown labels resolve to zero so catalogs can evolve without breaking
/// previously captured selections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTable {
    entries: &'static [(&'static str, u32)],
}

impl LabelTable {
    pub const fn new(entries: &'static [(&'static str, u32)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, label: &str) -> u32 {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, value)| *value)
            .unwrap_or(0)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(known, _)| *known == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One complexity tier: selections strictly above `above` apply `multiplier`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexityTier {
    pub above: u32,
    pub multiplier: Decimal,
}

const CRM_HOURS: &[(&str, u32)] = &[
    ("Salesforce", 50),
    ("Dynamics 365", 45),
    ("GoHighLevel", 35),
    ("HubSpot", 30),
    ("Monday.com", 25),
    ("Zoho", 25),
];

const CLOUD_HOURS: &[(&str, u32)] = &[
    ("Sales Cloud", 25),
    ("Service Cloud", 28),
    ("Marketing Cloud", 32),
    ("Commerce Cloud", 35),
    ("Financial Services Cloud", 38),
    ("Experience Cloud", 30),
    ("Agentforce", 40),
];

const INTEGRATION_HOURS: &[(&str, u32)] = &[
    ("Slack", 8),
    ("Asana", 8),
    ("Jira", 10),
    ("GitHub", 10),
    ("Google Workspace", 14),
    ("Microsoft 365", 14),
    ("Zoom", 8),
    ("DocuSign", 12),
    ("Make.com", 8),
    ("Zapier", 8),
    ("n8n", 10),
    ("MuleSoft", 35),
];

const AI_TOOL_HOURS: &[(&str, u32)] = &[
    ("OpenAI ChatGPT", 15),
    ("Gemini", 15),
    ("Copilot", 12),
    ("Claude", 15),
];

const MODULE_HOURS: &[(&str, u32)] = &[
    ("Reporting and Dashboards", 18),
    ("Workflow Automation", 22),
    ("Custom Development", 30),
    ("Lead Management", 15),
    ("Data Migration", 25),
    ("User Training", 12),
];

const POWER_UP_RATES: &[(&str, u32)] = &[
    ("Project Manager", 5),
    ("Customer Success Manager", 4),
    ("Solutions Architect", 8),
];

/// The versioned pricing configuration injected into the quote engine.
///
/// Swapping values here is a configuration change, not a logic change, but
/// released values are load-bearing: quotes must be reproducible for a
/// given version string.
#[derive(Clone, Debug, PartialEq)]
pub struct RateCard {
    pub version: &'static str,
    pub base_hours: u32,
    pub weekly_capacity_hours: u32,
    pub crm_hours: LabelTable,
    pub cloud_hours: LabelTable,
    pub integration_hours: LabelTable,
    pub ai_tool_hours: LabelTable,
    pub module_hours: LabelTable,
    pub power_up_rates: LabelTable,
    pub admin_rate: u32,
    pub developer_rate: u32,
    pub admin_pct: Decimal,
    pub developer_pct: Decimal,
    pub complexity_tiers: Vec<ComplexityTier>,
}

impl RateCard {
    /// The rate card used for new quotes.
    pub fn current() -> Self {
        Self::v2025_2()
    }

    /// Release 2025.2: 20 fixed overhead hours, 35 weekly delivery hours,
    /// complexity tiers at >5 and >10 breadth selections.
    pub fn v2025_2() -> Self {
        Self {
            version: "2025.2",
            base_hours: 20,
            weekly_capacity_hours: 35,
            crm_hours: LabelTable::new(CRM_HOURS),
            cloud_hours: LabelTable::new(CLOUD_HOURS),
            integration_hours: LabelTable::new(INTEGRATION_HOURS),
            ai_tool_hours: LabelTable::new(AI_TOOL_HOURS),
            module_hours: LabelTable::new(MODULE_HOURS),
            power_up_rates: LabelTable::new(POWER_UP_RATES),
            admin_rate: 55,
            developer_rate: 70,
            admin_pct: Decimal::new(40, 2),
            developer_pct: Decimal::new(60, 2),
            complexity_tiers: vec![
                ComplexityTier { above: 10, multiplier: Decimal::new(115, 2) },
                ComplexityTier { above: 5, multiplier: Decimal::new(110, 2) },
            ],
        }
    }

    pub fn by_version(version: &str) -> Option<Self> {
        match version.trim() {
            "2025.2" => Some(Self::v2025_2()),
            _ => None,
        }
    }

    pub fn hour_table(&self, category: SelectionCategory) -> &LabelTable {
        match category {
            SelectionCategory::Crm => &self.crm_hours,
            SelectionCategory::Cloud => &self.cloud_hours,
            SelectionCategory::Integration => &self.integration_hours,
            SelectionCategory::AiTool => &self.ai_tool_hours,
            SelectionCategory::Module => &self.module_hours,
        }
    }

    /// Tiered multiplier on total breadth of CRM, cloud, integration, and
    /// AI-tool selections. Tiers are checked highest threshold first.
    pub fn multiplier_for(&self, total_selections: u32) -> Decimal {
        self.complexity_tiers
            .iter()
            .find(|tier| total_selections > tier.above)
            .map(|tier| tier.multiplier)
            .unwrap_or(Decimal::ONE)
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::current()
    }
}
