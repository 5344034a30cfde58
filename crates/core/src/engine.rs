use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::catalog::{RateCard, SelectionCategory};
use crate::selection::ProjectSelection;

/// One stage of the pricing computation, kept so a quote can explain
/// itself without re-running the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreakdownStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

/// The computed estimate. Immutable once produced; regenerating a quote
/// always goes back through the full selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub selection: ProjectSelection,
    pub rate_card_version: String,
    pub base_hours: u32,
    pub complexity_multiplier: Decimal,
    pub adjusted_hours: u32,
    pub admin_rate: u32,
    pub developer_rate: u32,
    pub base_blended_rate: u32,
    pub power_up_rate: u32,
    pub final_hourly_rate: u32,
    pub total_cost: u64,
    pub estimated_weeks: u32,
    pub generated_at: DateTime<Utc>,
    pub breakdown: Vec<BreakdownStep>,
}

/// Deterministic quote computation over a fixed rate card. Total: absent
/// or unknown labels contribute zero hours instead of failing, so the
/// engine tolerates catalog evolution in either direction.
#[derive(Clone, Debug)]
pub struct QuoteEngine {
    rate_card: RateCard,
}

impl QuoteEngine {
    pub fn new(rate_card: RateCard) -> Self {
        Self { rate_card }
    }

    pub fn rate_card(&self) -> &RateCard {
        &self.rate_card
    }

    pub fn compute(&self, selection: &ProjectSelection) -> Quote {
        let card = &self.rate_card;
        let mut breakdown = Vec::new();

        let mut base_hours = card.base_hours;
        breakdown.push(BreakdownStep {
            stage: "base".to_string(),
            detail: "fixed project overhead hours".to_string(),
            amount: Decimal::from(card.base_hours),
        });

        for category in SelectionCategory::ALL {
            let table = card.hour_table(category);
            let hours: u32 =
                selection.selection_set(category).iter().map(|label| table.get(label)).sum();
            base_hours += hours;
            if hours > 0 {
                breakdown.push(BreakdownStep {
                    stage: "selection_hours".to_string(),
                    detail: category.display_name().to_string(),
                    amount: Decimal::from(hours),
                });
            }
        }

        let total_selections = selection.total_selections();
        let complexity_multiplier = card.multiplier_for(total_selections);
        let adjusted_hours = round_units(Decimal::from(base_hours) * complexity_multiplier);
        breakdown.push(BreakdownStep {
            stage: "complexity".to_string(),
            detail: format!(
                "{total_selections} breadth selections apply x{complexity_multiplier}"
            ),
            amount: Decimal::from(adjusted_hours),
        });

        let base_blended_rate = round_units(
            Decimal::from(card.admin_rate) * card.admin_pct
                + Decimal::from(card.developer_rate) * card.developer_pct,
        );
        breakdown.push(BreakdownStep {
            stage: "blended_rate".to_string(),
            detail: format!(
                "admin {} at {} and developer {} at {}",
                card.admin_rate, card.admin_pct, card.developer_rate, card.developer_pct
            ),
            amount: Decimal::from(base_blended_rate),
        });

        let power_up_rate: u32 =
            selection.power_ups.iter().map(|label| card.power_up_rates.get(label)).sum();
        if power_up_rate > 0 {
            breakdown.push(BreakdownStep {
                stage: "power_ups".to_string(),
                detail: "hourly surcharge for selected roles".to_string(),
                amount: Decimal::from(power_up_rate),
            });
        }

        let final_hourly_rate = base_blended_rate + power_up_rate;
        let total_cost = u64::from(adjusted_hours) * u64::from(final_hourly_rate);
        breakdown.push(BreakdownStep {
            stage: "total".to_string(),
            detail: format!("{adjusted_hours} hours at {final_hourly_rate}/hr"),
            amount: Decimal::from(total_cost),
        });

        let estimated_weeks = round_units(
            Decimal::from(adjusted_hours) / Decimal::from(card.weekly_capacity_hours),
        )
        .max(1);

        Quote {
            selection: selection.clone(),
            rate_card_version: card.version.to_string(),
            base_hours,
            complexity_multiplier,
            adjusted_hours,
            admin_rate: card.admin_rate,
            developer_rate: card.developer_rate,
            base_blended_rate,
            power_up_rate,
            final_hourly_rate,
            total_cost,
            estimated_weeks,
            generated_at: Utc::now(),
            breakdown,
        }
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(RateCard::current())
    }
}

// Half-away-from-zero, matching how the original form rounded hours and
// rates before multiplying.
fn round_units(value: Decimal) -> u32 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or_default()
}
