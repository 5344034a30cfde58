use ratecard_core::catalog::{LabelTable, RateCard, SelectionCategory};

/// Print the active rate card: catalog labels with hour costs, power-up
/// surcharges, and the pricing constants.
pub fn run() -> String {
    let card = RateCard::current();
    let mut lines = vec![format!("rate card {} (hours per label):", card.version)];

    for category in SelectionCategory::ALL {
        lines.push(format!("{}:", category.display_name()));
        push_entries(&mut lines, card.hour_table(category), "h");
    }

    lines.push("Power-Ups:".to_string());
    push_entries(&mut lines, &card.power_up_rates, "/hr");

    lines.push("Constants:".to_string());
    lines.push(format!("- base hours = {}", card.base_hours));
    lines.push(format!("- weekly capacity = {} hours", card.weekly_capacity_hours));
    lines.push(format!(
        "- blended rate = admin {} at {} + developer {} at {}",
        card.admin_rate, card.admin_pct, card.developer_rate, card.developer_pct
    ));
    for tier in &card.complexity_tiers {
        lines.push(format!("- more than {} selections -> x{}", tier.above, tier.multiplier));
    }

    lines.join("\n")
}

fn push_entries(lines: &mut Vec<String>, table: &LabelTable, unit: &str) {
    for (label, value) in table.entries() {
        lines.push(format!("- {label} = {value}{unit}"));
    }
}
