//! Event model and the closed enumerations it is built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// The three currencies the planner supports. All cross-currency
/// conversions pivot through USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Cop,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Cop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cop => "COP",
        }
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "COP" => Ok(Currency::Cop),
            other => Err(DomainError::InvalidCurrency(other.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit the user entered the duration in. The core normalizes to minutes
/// immediately; the unit survives only as a display and round-trip
/// preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    Hours,
    Minutes,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Hours => "Horas",
            DurationUnit::Minutes => "Minutos",
        }
    }
}

impl FromStr for DurationUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Horas" => Ok(DurationUnit::Hours),
            "Minutos" => Ok(DurationUnit::Minutes),
            other => Err(DomainError::Validation(format!(
                "invalid duration unit: {}",
                other
            ))),
        }
    }
}

/// The fixed set of category tags used for the cost breakdown. An event
/// carries at least one and may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventType {
    Transporte,
    Alimentacion,
    Alojamiento,
    Servicio,
    Evento,
    Lugar,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Transporte,
        EventType::Alimentacion,
        EventType::Alojamiento,
        EventType::Servicio,
        EventType::Evento,
        EventType::Lugar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Transporte => "Transporte",
            EventType::Alimentacion => "Alimentación",
            EventType::Alojamiento => "Alojamiento",
            EventType::Servicio => "Servicio",
            EventType::Evento => "Evento",
            EventType::Lugar => "Lugar",
        }
    }

    /// Display icon for calendar rendering. Total over the closed set.
    pub fn icon(&self) -> &'static str {
        match self {
            EventType::Transporte => "🚗",
            EventType::Alimentacion => "🍽️",
            EventType::Alojamiento => "🏨",
            EventType::Servicio => "🛎️",
            EventType::Evento => "🎭",
            EventType::Lugar => "📍",
        }
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Transporte" => Ok(EventType::Transporte),
            "Alimentación" => Ok(EventType::Alimentacion),
            "Alojamiento" => Ok(EventType::Alojamiento),
            "Servicio" => Ok(EventType::Servicio),
            "Evento" => Ok(EventType::Evento),
            "Lugar" => Ok(EventType::Lugar),
            other => Err(DomainError::InvalidEventType(other.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a transport-tagged event moves between origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Bicycling => "bicycling",
            TransportMode::Transit => "transit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransportMode::Driving => "Conducir",
            TransportMode::Walking => "Caminar",
            TransportMode::Bicycling => "Bicicleta",
            TransportMode::Transit => "Tránsito",
        }
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(TransportMode::Driving),
            "walking" => Ok(TransportMode::Walking),
            "bicycling" => Ok(TransportMode::Bicycling),
            "transit" => Ok(TransportMode::Transit),
            other => Err(DomainError::InvalidTransportMode(other.to_string())),
        }
    }
}

/// A day-scoped event, the unit stored in the trip ledger.
///
/// `start_time` and `end_time` are zero-padded `HH:MM` strings so that
/// lexicographic ordering matches chronological ordering; `end_time` uses
/// the `"24:00"` sentinel for a slice that runs up to midnight. When
/// `is_multi_day` is set, `day_part`, `total_days`, `hours_in_day` and
/// `total_hours` are all present, `price` holds this day's proportional
/// share and `original_price` the pre-split total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub place: String,
    pub origin: String,
    pub destination: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: f64,
    pub duration_unit: DurationUnit,
    pub price: f64,
    pub original_price: Option<f64>,
    pub currency: Currency,
    pub types: Vec<EventType>,
    pub transport_mode: Option<TransportMode>,
    pub estimated_time: String,
    pub comments: String,
    pub is_multi_day: bool,
    pub day_part: Option<u32>,
    pub total_days: Option<u32>,
    pub hours_in_day: Option<f64>,
    pub total_hours: Option<f64>,
}

/// A validated user submission before multi-day splitting.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInput {
    pub place: String,
    pub origin: String,
    pub destination: String,
    /// Validated HH:MM start time
    pub start_time: String,
    pub duration: f64,
    pub duration_unit: DurationUnit,
    pub price: f64,
    pub currency: Currency,
    pub types: Vec<EventType>,
    pub transport_mode: Option<TransportMode>,
    pub estimated_time: String,
    pub comments: String,
}

impl EventInput {
    /// Total duration normalized to whole minutes.
    pub fn total_minutes(&self) -> u32 {
        match self.duration_unit {
            DurationUnit::Hours => (self.duration * 60.0).round() as u32,
            DurationUnit::Minutes => self.duration.round() as u32,
        }
    }

    /// Minutes-since-midnight of the start time.
    pub fn start_minutes(&self) -> u32 {
        parse_time_minutes(&self.start_time).unwrap_or(0)
    }
}

/// Parse an `HH:MM` string into minutes since midnight. Rejects hours
/// above 23 and minutes above 59; `"24:00"` is only ever produced by the
/// splitter, never accepted as input.
pub fn parse_time_minutes(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Format minutes since midnight as a zero-padded `HH:MM` string.
/// 1440 minutes formats as the `"24:00"` sentinel.
pub fn format_time_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(currency.as_str().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_currency_rejects_unknown_code() {
        let err = "GBP".parse::<Currency>().unwrap_err();
        assert_eq!(err, DomainError::InvalidCurrency("GBP".to_string()));
    }

    #[test]
    fn test_event_type_round_trip_and_icons() {
        for event_type in EventType::ALL {
            assert_eq!(event_type.as_str().parse::<EventType>().unwrap(), event_type);
            assert!(!event_type.icon().is_empty());
        }
    }

    #[test]
    fn test_event_type_rejects_unknown_tag() {
        assert!("Compras".parse::<EventType>().is_err());
    }

    #[test]
    fn test_duration_unit_parse() {
        assert_eq!("Horas".parse::<DurationUnit>().unwrap(), DurationUnit::Hours);
        assert_eq!("Minutos".parse::<DurationUnit>().unwrap(), DurationUnit::Minutes);
        assert!("Hours".parse::<DurationUnit>().is_err());
    }

    #[test]
    fn test_transport_mode_display_names() {
        assert_eq!("driving".parse::<TransportMode>().unwrap().display_name(), "Conducir");
        assert_eq!("transit".parse::<TransportMode>().unwrap().display_name(), "Tránsito");
        assert!("flying".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_parse_time_minutes() {
        assert_eq!(parse_time_minutes("00:00"), Some(0));
        assert_eq!(parse_time_minutes("09:30"), Some(570));
        assert_eq!(parse_time_minutes("23:59"), Some(1439));
        assert_eq!(parse_time_minutes("24:00"), None);
        assert_eq!(parse_time_minutes("9:30"), None);
        assert_eq!(parse_time_minutes("12:60"), None);
        assert_eq!(parse_time_minutes("noon"), None);
    }

    #[test]
    fn test_format_time_minutes() {
        assert_eq!(format_time_minutes(0), "00:00");
        assert_eq!(format_time_minutes(570), "09:30");
        assert_eq!(format_time_minutes(1440), "24:00");
    }

    #[test]
    fn test_total_minutes_normalization() {
        let mut input = EventInput {
            place: "Cena".to_string(),
            origin: String::new(),
            destination: String::new(),
            start_time: "20:00".to_string(),
            duration: 2.0,
            duration_unit: DurationUnit::Hours,
            price: 40.0,
            currency: Currency::Eur,
            types: vec![EventType::Alimentacion],
            transport_mode: None,
            estimated_time: String::new(),
            comments: String::new(),
        };
        assert_eq!(input.total_minutes(), 120);

        input.duration = 90.0;
        input.duration_unit = DurationUnit::Minutes;
        assert_eq!(input.total_minutes(), 90);
    }
}
