use serde::{Deserialize, Serialize};

use crate::catalog::SelectionCategory;
use crate::engine::Quote;

/// 50/50 upfront/midpoint split of the total, with the odd unit landing in
/// the upfront payment so the two always sum back to the total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    pub upfront: u64,
    pub midpoint: u64,
}

impl PaymentSchedule {
    pub fn for_total(total_cost: u64) -> Self {
        let upfront = total_cost / 2 + total_cost % 2;
        Self { upfront, midpoint: total_cost - upfront }
    }
}

/// Render the quote as a printable document. Pure formatting: every number
/// here was fixed when the engine produced the quote.
pub fn render_markdown(quote: &Quote) -> String {
    let selection = &quote.selection;
    let schedule = PaymentSchedule::for_total(quote.total_cost);
    let mut doc = String::new();

    doc.push_str("# Tech Project Quote\n\n");
    doc.push_str(&format!(
        "Prepared for {} {}",
        selection.first_name.trim(),
        selection.last_name.trim()
    ));
    if !selection.work_email.trim().is_empty() {
        doc.push_str(&format!(" <{}>", selection.work_email.trim()));
    } else if !selection.mobile_phone.trim().is_empty() {
        doc.push_str(&format!(" ({})", selection.mobile_phone.trim()));
    }
    doc.push('\n');
    doc.push_str(&format!("Generated {}\n\n", quote.generated_at.format("%Y-%m-%d")));

    doc.push_str("## Selected Stack\n\n");
    let mut any_selection = false;
    for category in SelectionCategory::ALL {
        let labels = selection.selection_set(category);
        if labels.is_empty() {
            continue;
        }
        any_selection = true;
        doc.push_str(&format!("- **{}:** {}\n", category.display_name(), labels.join(", ")));
    }
    if !any_selection {
        doc.push_str("- Custom engagement, no catalog items selected\n");
    }
    doc.push_str(&format!(
        "- **Delivery Team:** {} ({})\n",
        selection.delivery_team.display_name(),
        selection.delivery_team.positioning()
    ));
    if !selection.power_ups.is_empty() {
        doc.push_str(&format!("- **Power-Ups:** {}\n", selection.power_ups.join(", ")));
    }
    doc.push('\n');

    doc.push_str("## Estimate\n\n");
    doc.push_str(&format!("- Scoped hours: {}\n", quote.base_hours));
    doc.push_str(&format!(
        "- Complexity multiplier: x{} -> {} adjusted hours\n",
        quote.complexity_multiplier, quote.adjusted_hours
    ));
    doc.push_str(&format!(
        "- Blended rate: ${}/hr (admin ${}, developer ${})\n",
        quote.base_blended_rate, quote.admin_rate, quote.developer_rate
    ));
    if quote.power_up_rate > 0 {
        doc.push_str(&format!("- Power-up surcharge: +${}/hr\n", quote.power_up_rate));
    }
    doc.push_str(&format!("- Final hourly rate: ${}/hr\n", quote.final_hourly_rate));
    doc.push_str(&format!("- **Total investment: ${}**\n", quote.total_cost));
    doc.push_str(&format!("- Estimated delivery: {} week(s)\n\n", quote.estimated_weeks));

    doc.push_str("## Payment Schedule\n\n");
    doc.push_str(&format!("- Upfront (50%): ${}\n", schedule.upfront));
    doc.push_str(&format!("- At midpoint: ${}\n", schedule.midpoint));

    doc
}
