use crate::domain::models::EventType;
use crate::domain::FinancialSummary;
use shared::{format_amount, CategoryTotal, FinancialSummaryResponse};

pub struct SummaryMapper;

impl SummaryMapper {
    /// Category lines come out in the fixed enumeration order with their
    /// icons; two-decimal display rounding is applied here only.
    pub fn to_dto(summary: FinancialSummary) -> FinancialSummaryResponse {
        let categories = EventType::ALL
            .iter()
            .map(|event_type| {
                let amount = summary.per_category.get(event_type).copied().unwrap_or(0.0);
                CategoryTotal {
                    category: event_type.as_str().to_string(),
                    icon: event_type.icon().to_string(),
                    amount,
                    formatted_amount: format_amount(amount),
                }
            })
            .collect();

        FinancialSummaryResponse {
            currency: summary.currency.as_str().to_string(),
            total: summary.total,
            formatted_total: format_amount(summary.total),
            per_person: summary.per_person,
            formatted_per_person: format_amount(summary.per_person),
            categories,
        }
    }
}
