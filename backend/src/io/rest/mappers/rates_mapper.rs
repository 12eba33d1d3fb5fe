use crate::domain::models::ConversionRates;
use shared::RatesResponse;

pub struct RatesMapper;

impl RatesMapper {
    pub fn to_dto(rates: ConversionRates) -> RatesResponse {
        RatesResponse {
            usd_to_cop: rates.usd_to_cop,
            eur_to_cop: rates.eur_to_cop,
            eur_to_usd: rates.eur_to_usd,
        }
    }
}
