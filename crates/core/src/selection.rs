use serde::{Deserialize, Serialize};

use crate::catalog::SelectionCategory;

/// Delivery team choice. Carried through for display only; no pricing
/// multiplier is keyed to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTeam {
    #[default]
    Nearshore,
    Offshore,
    Onshore,
}

impl DeliveryTeam {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nearshore => "Nearshore",
            Self::Offshore => "Offshore",
            Self::Onshore => "Onshore",
        }
    }

    pub fn positioning(&self) -> &'static str {
        match self {
            Self::Nearshore => "Best balance of cost and timezone alignment",
            Self::Offshore => "Most cost-effective option",
            Self::Onshore => "Premium local support",
        }
    }
}

/// Everything captured across the four estimator steps. Field names on the
/// wire match the estimator form and the assistant autofill contract, so
/// this record round-trips through both unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSelection {
    pub first_name: String,
    pub last_name: String,
    pub website: String,
    pub work_email: String,
    pub mobile_phone: String,
    pub project_type: String,
    pub project_description: String,
    #[serde(rename = "selectedCRMs")]
    pub selected_crms: Vec<String>,
    pub selected_clouds: Vec<String>,
    pub selected_integrations: Vec<String>,
    #[serde(rename = "selectedAITools")]
    pub selected_ai_tools: Vec<String>,
    pub additional_modules: Vec<String>,
    pub delivery_team: DeliveryTeam,
    pub power_ups: Vec<String>,
}

impl Default for ProjectSelection {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            website: String::new(),
            work_email: String::new(),
            mobile_phone: String::new(),
            project_type: "custom".to_string(),
            project_description: String::new(),
            selected_crms: Vec::new(),
            selected_clouds: Vec::new(),
            selected_integrations: Vec::new(),
            selected_ai_tools: Vec::new(),
            additional_modules: Vec::new(),
            delivery_team: DeliveryTeam::default(),
            power_ups: Vec::new(),
        }
    }
}

impl ProjectSelection {
    pub fn selection_set(&self, category: SelectionCategory) -> &[String] {
        match category {
            SelectionCategory::Crm => &self.selected_crms,
            SelectionCategory::Cloud => &self.selected_clouds,
            SelectionCategory::Integration => &self.selected_integrations,
            SelectionCategory::AiTool => &self.selected_ai_tools,
            SelectionCategory::Module => &self.additional_modules,
        }
    }

    fn selection_set_mut(&mut self, category: SelectionCategory) -> &mut Vec<String> {
        match category {
            SelectionCategory::Crm => &mut self.selected_crms,
            SelectionCategory::Cloud => &mut self.selected_clouds,
            SelectionCategory::Integration => &mut self.selected_integrations,
            SelectionCategory::AiTool => &mut self.selected_ai_tools,
            SelectionCategory::Module => &mut self.additional_modules,
        }
    }

    /// Membership toggle: add the label if absent, remove it if present.
    /// Toggling twice is a no-op, which is what makes checkbox handling
    /// safe to replay.
    pub fn toggle(&mut self, category: SelectionCategory, label: &str) {
        toggle_label(self.selection_set_mut(category), label);
    }

    pub fn toggle_power_up(&mut self, label: &str) {
        toggle_label(&mut self.power_ups, label);
    }

    /// Breadth of selections that drives the complexity tier. Additional
    /// modules and power-ups are excluded by design.
    pub fn total_selections(&self) -> u32 {
        (self.selected_crms.len()
            + self.selected_clouds.len()
            + self.selected_integrations.len()
            + self.selected_ai_tools.len()) as u32
    }

    pub fn has_contact_channel(&self) -> bool {
        !self.work_email.trim().is_empty() || !self.mobile_phone.trim().is_empty()
    }

    /// Merge an assistant autofill result. Only the five selection sets are
    /// ever taken from the patch; the delivery team resets to its default
    /// and power-ups are cleared unless the patch carries them, so an
    /// autofill never silently keeps stale premium add-ons.
    pub fn apply_patch(&mut self, patch: SelectionPatch) {
        if let Some(crms) = patch.selected_crms {
            self.selected_crms = crms;
        }
        if let Some(clouds) = patch.selected_clouds {
            self.selected_clouds = clouds;
        }
        if let Some(integrations) = patch.selected_integrations {
            self.selected_integrations = integrations;
        }
        if let Some(ai_tools) = patch.selected_ai_tools {
            self.selected_ai_tools = ai_tools;
        }
        if let Some(modules) = patch.additional_modules {
            self.additional_modules = modules;
        }
        self.delivery_team = patch.delivery_team.unwrap_or_default();
        self.power_ups = patch.power_ups.unwrap_or_default();
    }
}

fn toggle_label(set: &mut Vec<String>, label: &str) {
    if let Some(position) = set.iter().position(|existing| existing == label) {
        set.remove(position);
    } else {
        set.push(label.to_string());
    }
}

/// Partial selection extracted from an assistant reply. A reply counts as
/// structured configuration only when at least one of the five selection
/// keys is present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionPatch {
    #[serde(rename = "selectedCRMs")]
    pub selected_crms: Option<Vec<String>>,
    pub selected_clouds: Option<Vec<String>>,
    pub selected_integrations: Option<Vec<String>>,
    #[serde(rename = "selectedAITools")]
    pub selected_ai_tools: Option<Vec<String>>,
    pub additional_modules: Option<Vec<String>>,
    pub delivery_team: Option<DeliveryTeam>,
    pub power_ups: Option<Vec<String>>,
}

impl SelectionPatch {
    pub fn has_selection_keys(&self) -> bool {
        self.selected_crms.is_some()
            || self.selected_clouds.is_some()
            || self.selected_integrations.is_some()
            || self.selected_ai_tools.is_some()
            || self.additional_modules.is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::SelectionCategory;

    use super::{DeliveryTeam, ProjectSelection, SelectionPatch};

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut selection = ProjectSelection::default();
        selection.toggle(SelectionCategory::Crm, "Salesforce");
        assert_eq!(selection.selected_crms, vec!["Salesforce".to_string()]);

        selection.toggle(SelectionCategory::Crm, "Salesforce");
        assert!(selection.selected_crms.is_empty());
    }

    #[test]
    fn toggle_preserves_other_labels() {
        let mut selection = ProjectSelection::default();
        selection.toggle(SelectionCategory::Integration, "Slack");
        selection.toggle(SelectionCategory::Integration, "Jira");
        selection.toggle(SelectionCategory::Integration, "Slack");

        assert_eq!(selection.selected_integrations, vec!["Jira".to_string()]);
    }

    #[test]
    fn total_selections_excludes_modules_and_power_ups() {
        let mut selection = ProjectSelection::default();
        selection.toggle(SelectionCategory::Crm, "Salesforce");
        selection.toggle(SelectionCategory::Cloud, "Sales Cloud");
        selection.toggle(SelectionCategory::Module, "User Training");
        selection.toggle_power_up("Project Manager");

        assert_eq!(selection.total_selections(), 2);
    }

    #[test]
    fn wire_field_names_match_the_estimator_form() {
        let mut selection = ProjectSelection::default();
        selection.first_name = "John".to_string();
        selection.selected_crms = vec!["Salesforce".to_string()];
        selection.selected_ai_tools = vec!["Claude".to_string()];

        let json = serde_json::to_value(&selection).expect("selection serializes");
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["selectedCRMs"][0], "Salesforce");
        assert_eq!(json["selectedAITools"][0], "Claude");
        assert_eq!(json["deliveryTeam"], "nearshore");
        assert_eq!(json["projectType"], "custom");
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let selection: ProjectSelection =
            serde_json::from_str(r#"{"firstName":"Ada"}"#).expect("partial payload parses");

        assert_eq!(selection.first_name, "Ada");
        assert_eq!(selection.project_type, "custom");
        assert_eq!(selection.delivery_team, DeliveryTeam::Nearshore);
        assert!(selection.selected_clouds.is_empty());
    }

    #[test]
    fn apply_patch_resets_team_and_power_ups_unless_present() {
        let mut selection = ProjectSelection::default();
        selection.delivery_team = DeliveryTeam::Onshore;
        selection.power_ups = vec!["Solutions Architect".to_string()];
        selection.selected_clouds = vec!["Sales Cloud".to_string()];

        selection.apply_patch(SelectionPatch {
            selected_crms: Some(vec!["HubSpot".to_string()]),
            ..SelectionPatch::default()
        });

        assert_eq!(selection.selected_crms, vec!["HubSpot".to_string()]);
        // Untouched selection sets survive the merge.
        assert_eq!(selection.selected_clouds, vec!["Sales Cloud".to_string()]);
        assert_eq!(selection.delivery_team, DeliveryTeam::Nearshore);
        assert!(selection.power_ups.is_empty());
    }

    #[test]
    fn patch_requires_at_least_one_selection_key() {
        let empty = SelectionPatch::default();
        assert!(!empty.has_selection_keys());

        let team_only =
            SelectionPatch { delivery_team: Some(DeliveryTeam::Offshore), ..SelectionPatch::default() };
        assert!(!team_only.has_selection_keys());

        let with_modules = SelectionPatch {
            additional_modules: Some(vec!["Data Migration".to_string()]),
            ..SelectionPatch::default()
        };
        assert!(with_modules.has_selection_keys());
    }
}
