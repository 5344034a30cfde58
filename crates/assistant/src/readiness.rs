//! Local gate in front of structured extraction. The hosted model is only
//! asked to parse a description when every category below has at least one
//! keyword hit; otherwise the user gets a clarifying prompt instead of a
//! wasted round-trip.

/// The five kinds of information a description needs before autofill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoCategory {
    Systems,
    PainPoints,
    Goals,
    Automations,
    Deliverables,
}

impl InfoCategory {
    pub const ALL: [InfoCategory; 5] = [
        InfoCategory::Systems,
        InfoCategory::PainPoints,
        InfoCategory::Goals,
        InfoCategory::Automations,
        InfoCategory::Deliverables,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Systems => "Current systems/infrastructure",
            Self::PainPoints => "Pain points/challenges",
            Self::Goals => "Desired outcomes & goals",
            Self::Automations => "Required automations/integrations",
            Self::Deliverables => "Key deliverables/requirements",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Systems => &[
                "salesforce",
                "dynamics",
                "gohighlevel",
                "hubspot",
                "monday",
                "zoho",
                "crm",
                "slack",
                "asana",
                "jira",
                "github",
                "google",
                "microsoft",
                "zoom",
                "docusign",
                "make",
                "zapier",
                "n8n",
                "mulesoft",
                "cloud",
                "integration",
            ],
            Self::PainPoints => &[
                "pain",
                "challenge",
                "issue",
                "problem",
                "difficulty",
                "struggle",
                "bottleneck",
                "manual",
                "inefficient",
            ],
            Self::Goals => &[
                "goal",
                "outcome",
                "objective",
                "want",
                "need",
                "require",
                "automate",
                "improve",
                "increase",
                "reduce",
                "streamline",
            ],
            Self::Automations => &[
                "automate",
                "automation",
                "workflow",
                "integrate",
                "integration",
                "connect",
                "sync",
            ],
            Self::Deliverables => &[
                "deliver",
                "deliverable",
                "requirement",
                "feature",
                "functionality",
                "capability",
                "module",
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessReport {
    pub missing: Vec<InfoCategory>,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Case-insensitive substring checks, one pass per category.
pub fn assess(description: &str) -> ReadinessReport {
    let normalized = description.to_lowercase();
    let missing = InfoCategory::ALL
        .into_iter()
        .filter(|category| {
            !category.keywords().iter().any(|keyword| normalized.contains(keyword))
        })
        .collect();

    ReadinessReport { missing }
}

#[cfg(test)]
mod tests {
    use super::{assess, InfoCategory};

    const COMPLETE_DESCRIPTION: &str = "We run Salesforce as our CRM but manual data entry is a \
        bottleneck. The goal is to automate lead routing with a workflow that syncs to Slack, \
        and the key deliverable is a reporting module for the sales team.";

    #[test]
    fn complete_description_passes_the_gate() {
        let report = assess(COMPLETE_DESCRIPTION);
        assert!(report.is_ready(), "missing: {:?}", report.missing);
    }

    #[test]
    fn empty_description_misses_every_category() {
        let report = assess("");
        assert_eq!(report.missing.len(), InfoCategory::ALL.len());
    }

    #[test]
    fn each_category_is_reported_independently() {
        // Systems, goals, automations, and deliverables present; pain points absent.
        let report = assess(
            "Salesforce rollout. Goal is to automate onboarding workflows; deliverables are \
             two custom features.",
        );
        assert_eq!(report.missing, vec![InfoCategory::PainPoints]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let report = assess(&COMPLETE_DESCRIPTION.to_uppercase());
        assert!(report.is_ready());
    }

    #[test]
    fn vague_text_misses_systems() {
        let report = assess(
            "Things are slow and manual; we want to improve and automate our delivery features.",
        );
        assert!(report.missing.contains(&InfoCategory::Systems));
    }
}
