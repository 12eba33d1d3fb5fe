//! XML plan document storage.
//!
//! A trip and the session's rates serialize to a `planeador_viajes`
//! document that must round-trip bit-for-bit. Writing builds the document
//! by hand so the layout stays under our control; reading goes through
//! roxmltree. Import is all-or-nothing: any malformed section fails the
//! whole document and no state is applied.
//!
//! Durations are always written in minutes. On import a positive multiple
//! of 60 reconstitutes as hours, anything else as minutes — an event
//! entered as "120 Minutos" comes back as "2 Horas". Accepted lossiness,
//! not a bug.

use std::str::FromStr;

use chrono::NaiveDate;
use log::info;

use crate::domain::errors::DomainError;
use crate::domain::models::event::{Currency, DurationUnit, Event, EventType, TransportMode};
use crate::domain::models::{ConversionRates, Trip};

/// Serialize the trip and rates to the plan document.
pub fn write_plan(trip: &Trip, rates: &ConversionRates) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<planeador_viajes>\n");
    xml.push_str(&format!(
        "  <nombre_viaje>{}</nombre_viaje>\n",
        escape_xml(&trip.name)
    ));
    xml.push_str(&format!(
        "  <cantidad_personas>{}</cantidad_personas>\n",
        trip.people_count
    ));
    xml.push_str(&format!(
        "  <fecha_inicio>{}</fecha_inicio>\n",
        trip.start_date.format("%Y-%m-%d")
    ));
    xml.push_str(&format!(
        "  <fecha_fin>{}</fecha_fin>\n",
        trip.end_date.format("%Y-%m-%d")
    ));
    xml.push_str("  <tasas_cambio>\n");
    xml.push_str(&format!("    <usd_cop>{}</usd_cop>\n", rates.usd_to_cop));
    xml.push_str(&format!("    <eur_cop>{}</eur_cop>\n", rates.eur_to_cop));
    xml.push_str("  </tasas_cambio>\n");
    xml.push_str("  <eventos>\n");

    // Ledger iteration is already date-ascending
    for (date, events) in trip.ledger.iter() {
        for event in events {
            write_event(&mut xml, event, *date);
        }
    }

    xml.push_str("  </eventos>\n");
    xml.push_str("</planeador_viajes>");
    xml
}

fn write_event(xml: &mut String, event: &Event, date: NaiveDate) {
    let duration_minutes: i64 = match event.duration_unit {
        DurationUnit::Hours => (event.duration * 60.0).round() as i64,
        DurationUnit::Minutes => event.duration.round() as i64,
    };
    let types = event
        .types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    xml.push_str("    <evento>\n");
    xml.push_str(&format!("      <lugar>{}</lugar>\n", escape_xml(&event.place)));
    xml.push_str(&format!("      <origen>{}</origen>\n", escape_xml(&event.origin)));
    xml.push_str(&format!(
        "      <destino>{}</destino>\n",
        escape_xml(&event.destination)
    ));
    xml.push_str(&format!("      <fecha>{}</fecha>\n", date.format("%Y-%m-%d")));
    xml.push_str(&format!("      <hora_inicio>{}</hora_inicio>\n", event.start_time));
    xml.push_str(&format!(
        "      <duracion_minutos>{}</duracion_minutos>\n",
        duration_minutes
    ));
    xml.push_str(&format!("      <hora_fin>{}</hora_fin>\n", event.end_time));
    xml.push_str(&format!("      <precio>{}</precio>\n", event.price));
    xml.push_str(&format!(
        "      <precio_original>{}</precio_original>\n",
        event.original_price.unwrap_or(event.price)
    ));
    xml.push_str(&format!("      <moneda>{}</moneda>\n", event.currency.as_str()));
    xml.push_str(&format!("      <tipologia>{}</tipologia>\n", types));
    xml.push_str(&format!(
        "      <modo_transporte>{}</modo_transporte>\n",
        event.transport_mode.map(|m| m.as_str()).unwrap_or("")
    ));
    xml.push_str(&format!(
        "      <tiempo_estimado>{}</tiempo_estimado>\n",
        escape_xml(&event.estimated_time)
    ));
    xml.push_str(&format!(
        "      <comentarios>{}</comentarios>\n",
        escape_xml(&event.comments)
    ));
    xml.push_str(&format!("      <es_multidia>{}</es_multidia>\n", event.is_multi_day));
    if event.is_multi_day {
        xml.push_str(&format!(
            "      <dia_parte>{}</dia_parte>\n",
            event.day_part.unwrap_or(1)
        ));
        xml.push_str(&format!(
            "      <total_dias>{}</total_dias>\n",
            event.total_days.unwrap_or(1)
        ));
        xml.push_str(&format!(
            "      <horas_en_dia>{}</horas_en_dia>\n",
            event.hours_in_day.unwrap_or(event.duration)
        ));
        xml.push_str(&format!(
            "      <total_horas>{}</total_horas>\n",
            event.total_hours.unwrap_or(event.duration)
        ));
    }
    xml.push_str("    </evento>\n");
}

/// Download filename for a plan: lowercased trip name with every
/// non-alphanumeric character replaced by an underscore.
pub fn plan_filename(trip_name: &str) -> String {
    let stem: String = trip_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.xml", stem)
}

/// Parse a plan document back into a trip and rates.
///
/// Events are inserted pass-through: no trip date-range filter is applied
/// on import, unlike live submission.
pub fn parse_plan(text: &str) -> Result<(Trip, ConversionRates), DomainError> {
    let doc = roxmltree::Document::parse(text)
        .map_err(|err| DomainError::DocumentParse(err.to_string()))?;
    let root = doc.root_element();
    if root.tag_name().name() != "planeador_viajes" {
        return Err(DomainError::DocumentParse(format!(
            "unexpected root element: {}",
            root.tag_name().name()
        )));
    }

    let name = text_of(root, "nombre_viaje").unwrap_or_default();
    if name.is_empty() {
        return Err(DomainError::DocumentParse(
            "document is missing the trip name".to_string(),
        ));
    }
    let start_date = date_of(root, "fecha_inicio")?;
    let end_date = date_of(root, "fecha_fin")?;
    let people_count = text_of(root, "cantidad_personas")
        .and_then(|t| t.trim().parse::<u32>().ok())
        .filter(|count| *count >= 1)
        .unwrap_or(1);

    let mut rates = ConversionRates::default();
    let usd_cop = text_of(root, "usd_cop").and_then(|t| t.trim().parse::<f64>().ok());
    let eur_cop = text_of(root, "eur_cop").and_then(|t| t.trim().parse::<f64>().ok());
    rates.set_manual(usd_cop, eur_cop);

    let mut trip = Trip::new(name, start_date, end_date, people_count);

    for node in root.descendants().filter(|n| n.tag_name().name() == "evento") {
        let (event, date) = parse_event(node)?;
        trip.ledger.insert(date, event);
    }

    info!(
        "📂 IMPORT: Parsed plan '{}' with {} events",
        trip.name,
        trip.ledger.total_event_count()
    );
    Ok((trip, rates))
}

fn parse_event(node: roxmltree::Node) -> Result<(Event, NaiveDate), DomainError> {
    let date = date_of(node, "fecha")?;
    let duration_minutes: u32 = text_of(node, "duracion_minutos")
        .and_then(|t| t.trim().parse().ok())
        .ok_or_else(|| DomainError::DocumentParse("event is missing duracion_minutos".to_string()))?;

    // Lossy inverse of "always minutes on disk": whole hours come back as
    // hours, everything else as minutes
    let (duration, duration_unit) = if duration_minutes >= 60 && duration_minutes % 60 == 0 {
        ((duration_minutes / 60) as f64, DurationUnit::Hours)
    } else {
        (duration_minutes as f64, DurationUnit::Minutes)
    };

    let price: f64 = text_of(node, "precio")
        .and_then(|t| t.trim().parse().ok())
        .ok_or_else(|| DomainError::DocumentParse("event is missing precio".to_string()))?;
    let original_price = text_of(node, "precio_original").and_then(|t| t.trim().parse().ok());

    let currency_code = text_of(node, "moneda").unwrap_or_default();
    let currency = Currency::from_str(&currency_code)
        .map_err(|_| DomainError::DocumentParse(format!("unknown currency: {}", currency_code)))?;

    let types_text = text_of(node, "tipologia").unwrap_or_default();
    let types = types_text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            EventType::from_str(t)
                .map_err(|_| DomainError::DocumentParse(format!("unknown category tag: {}", t)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if types.is_empty() {
        return Err(DomainError::DocumentParse(
            "event has no category tags".to_string(),
        ));
    }

    let transport_mode = match text_of(node, "modo_transporte") {
        Some(mode) if !mode.is_empty() => Some(TransportMode::from_str(&mode).map_err(|_| {
            DomainError::DocumentParse(format!("unknown transport mode: {}", mode))
        })?),
        _ => None,
    };

    let is_multi_day = text_of(node, "es_multidia").as_deref() == Some("true");
    let (day_part, total_days, hours_in_day, total_hours) = if is_multi_day {
        (
            Some(number_of(node, "dia_parte")?),
            Some(number_of(node, "total_dias")?),
            Some(float_of(node, "horas_en_dia")?),
            Some(float_of(node, "total_horas")?),
        )
    } else {
        (None, None, None, None)
    };

    let event = Event {
        place: text_of(node, "lugar").unwrap_or_default(),
        origin: text_of(node, "origen").unwrap_or_default(),
        destination: text_of(node, "destino").unwrap_or_default(),
        start_time: text_of(node, "hora_inicio").unwrap_or_default(),
        end_time: text_of(node, "hora_fin").unwrap_or_default(),
        duration,
        duration_unit,
        price,
        original_price: original_price.or(Some(price)).filter(|_| is_multi_day),
        currency,
        types,
        transport_mode,
        estimated_time: text_of(node, "tiempo_estimado").unwrap_or_default(),
        comments: text_of(node, "comentarios").unwrap_or_default(),
        is_multi_day,
        day_part,
        total_days,
        hours_in_day,
        total_hours,
    };
    Ok((event, date))
}

fn text_of(node: roxmltree::Node, tag: &str) -> Option<String> {
    node.descendants()
        .find(|n| n.tag_name().name() == tag)
        .map(|n| n.text().unwrap_or_default().to_string())
}

fn date_of(node: roxmltree::Node, tag: &str) -> Result<NaiveDate, DomainError> {
    let text = text_of(node, tag)
        .ok_or_else(|| DomainError::DocumentParse(format!("missing {}", tag)))?;
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::DocumentParse(format!("invalid {}: {}", tag, text)))
}

fn number_of(node: roxmltree::Node, tag: &str) -> Result<u32, DomainError> {
    text_of(node, tag)
        .and_then(|t| t.trim().parse().ok())
        .ok_or_else(|| DomainError::DocumentParse(format!("missing or invalid {}", tag)))
}

fn float_of(node: roxmltree::Node, tag: &str) -> Result<f64, DomainError> {
    text_of(node, tag)
        .and_then(|t| t.trim().parse().ok())
        .ok_or_else(|| DomainError::DocumentParse(format!("missing or invalid {}", tag)))
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::EventInput;
    use crate::domain::{event_splitter, models::TripLedger};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn simple_event(start_time: &str, duration: f64, unit: DurationUnit) -> Event {
        Event {
            place: "Hotel".to_string(),
            origin: String::new(),
            destination: String::new(),
            start_time: start_time.to_string(),
            end_time: "12:00".to_string(),
            duration,
            duration_unit: unit,
            price: 50.0,
            original_price: None,
            currency: Currency::Usd,
            types: vec![EventType::Lugar],
            transport_mode: None,
            estimated_time: String::new(),
            comments: String::new(),
            is_multi_day: false,
            day_part: None,
            total_days: None,
            hours_in_day: None,
            total_hours: None,
        }
    }

    #[test]
    fn test_exact_document_layout() {
        let mut trip = Trip::new("Viaje".to_string(), date("2025-07-01"), date("2025-07-02"), 2);
        trip.ledger
            .insert(date("2025-07-01"), simple_event("10:00", 2.0, DurationUnit::Hours));

        let xml = write_plan(&trip, &ConversionRates::default());
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<planeador_viajes>\n\
\x20 <nombre_viaje>Viaje</nombre_viaje>\n\
\x20 <cantidad_personas>2</cantidad_personas>\n\
\x20 <fecha_inicio>2025-07-01</fecha_inicio>\n\
\x20 <fecha_fin>2025-07-02</fecha_fin>\n\
\x20 <tasas_cambio>\n\
\x20   <usd_cop>4071</usd_cop>\n\
\x20   <eur_cop>4729</eur_cop>\n\
\x20 </tasas_cambio>\n\
\x20 <eventos>\n\
\x20   <evento>\n\
\x20     <lugar>Hotel</lugar>\n\
\x20     <origen></origen>\n\
\x20     <destino></destino>\n\
\x20     <fecha>2025-07-01</fecha>\n\
\x20     <hora_inicio>10:00</hora_inicio>\n\
\x20     <duracion_minutos>120</duracion_minutos>\n\
\x20     <hora_fin>12:00</hora_fin>\n\
\x20     <precio>50</precio>\n\
\x20     <precio_original>50</precio_original>\n\
\x20     <moneda>USD</moneda>\n\
\x20     <tipologia>Lugar</tipologia>\n\
\x20     <modo_transporte></modo_transporte>\n\
\x20     <tiempo_estimado></tiempo_estimado>\n\
\x20     <comentarios></comentarios>\n\
\x20     <es_multidia>false</es_multidia>\n\
\x20   </evento>\n\
\x20 </eventos>\n\
</planeador_viajes>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_round_trip_preserves_trip_and_events() {
        let mut trip = Trip::new(
            "Ruta del Café".to_string(),
            date("2025-07-01"),
            date("2025-07-04"),
            3,
        );

        let mut dinner = simple_event("20:00", 90.0, DurationUnit::Minutes);
        dinner.place = "La Cevichería".to_string();
        dinner.end_time = "21:30".to_string();
        dinner.price = 35.5;
        dinner.currency = Currency::Eur;
        dinner.types = vec![EventType::Alimentacion, EventType::Evento];
        dinner.comments = "Reservar con antelación".to_string();
        trip.ledger.insert(date("2025-07-02"), dinner.clone());

        let mut taxi = simple_event("08:00", 45.0, DurationUnit::Minutes);
        taxi.place = "Taxi al aeropuerto".to_string();
        taxi.origin = "Hotel".to_string();
        taxi.destination = "Aeropuerto José María Córdova".to_string();
        taxi.end_time = "08:45".to_string();
        taxi.types = vec![EventType::Transporte];
        taxi.transport_mode = Some(TransportMode::Driving);
        taxi.estimated_time = "45 min".to_string();
        trip.ledger.insert(date("2025-07-01"), taxi.clone());

        let rates = ConversionRates {
            usd_to_cop: 4000.0,
            eur_to_cop: 4400.0,
            eur_to_usd: 1.1,
        };

        let xml = write_plan(&trip, &rates);
        let (imported, imported_rates) = parse_plan(&xml).unwrap();

        assert_eq!(imported.name, trip.name);
        assert_eq!(imported.start_date, trip.start_date);
        assert_eq!(imported.end_date, trip.end_date);
        assert_eq!(imported.people_count, trip.people_count);
        assert_eq!(imported_rates.usd_to_cop, 4000.0);
        assert_eq!(imported_rates.eur_to_cop, 4400.0);
        assert!((imported_rates.eur_to_usd - 1.1).abs() < 1e-12);

        assert_eq!(imported.ledger.events_for(date("2025-07-01")), &[taxi]);
        assert_eq!(imported.ledger.events_for(date("2025-07-02")), &[dinner]);
    }

    #[test]
    fn test_round_trip_of_multi_day_slices() {
        let input = EventInput {
            place: "Hotel Caribe".to_string(),
            origin: String::new(),
            destination: String::new(),
            start_time: "22:00".to_string(),
            duration: 4.0,
            duration_unit: DurationUnit::Hours,
            price: 100.0,
            currency: Currency::Usd,
            types: vec![EventType::Alojamiento],
            transport_mode: None,
            estimated_time: String::new(),
            comments: String::new(),
        };

        let mut trip = Trip::new("Cartagena".to_string(), date("2025-07-01"), date("2025-07-03"), 2);
        for (event, event_date) in event_splitter::split(&input, date("2025-07-01")) {
            trip.ledger.insert(event_date, event);
        }

        let xml = write_plan(&trip, &ConversionRates::default());
        let (imported, _) = parse_plan(&xml).unwrap();

        let first = &imported.ledger.events_for(date("2025-07-01"))[0];
        assert!(first.is_multi_day);
        assert_eq!(first.day_part, Some(1));
        assert_eq!(first.total_days, Some(2));
        assert_eq!(first.hours_in_day, Some(2.0));
        assert_eq!(first.total_hours, Some(4.0));
        assert_eq!(first.end_time, "24:00");
        assert_eq!(first.price, 50.0);
        assert_eq!(first.original_price, Some(100.0));

        let second = &imported.ledger.events_for(date("2025-07-02"))[0];
        assert_eq!(second.day_part, Some(2));
        assert_eq!(second.start_time, "00:00");
    }

    #[test]
    fn test_escaping_round_trips_special_characters() {
        let mut trip = Trip::new(
            "Sol & Playa <2025>".to_string(),
            date("2025-07-01"),
            date("2025-07-02"),
            1,
        );
        let mut event = simple_event("10:00", 1.0, DurationUnit::Hours);
        event.comments = "\"Llevar efectivo\" & 'paraguas'".to_string();
        trip.ledger.insert(date("2025-07-01"), event.clone());

        let xml = write_plan(&trip, &ConversionRates::default());
        assert!(xml.contains("Sol &amp; Playa &lt;2025&gt;"));
        assert!(xml.contains("&quot;Llevar efectivo&quot; &amp; &#39;paraguas&#39;"));

        let (imported, _) = parse_plan(&xml).unwrap();
        assert_eq!(imported.name, "Sol & Playa <2025>");
        assert_eq!(
            imported.ledger.events_for(date("2025-07-01"))[0].comments,
            event.comments
        );
    }

    #[test]
    fn test_duration_unit_lossiness() {
        let mut trip = Trip::new("Viaje".to_string(), date("2025-07-01"), date("2025-07-02"), 1);
        // Entered as 120 minutes; comes back as 2 hours
        let mut event = simple_event("10:00", 120.0, DurationUnit::Minutes);
        event.end_time = "12:00".to_string();
        trip.ledger.insert(date("2025-07-01"), event);
        // 90 minutes is not a whole number of hours and stays minutes
        trip.ledger
            .insert(date("2025-07-02"), simple_event("09:00", 90.0, DurationUnit::Minutes));

        let xml = write_plan(&trip, &ConversionRates::default());
        let (imported, _) = parse_plan(&xml).unwrap();

        let normalized = &imported.ledger.events_for(date("2025-07-01"))[0];
        assert_eq!(normalized.duration, 2.0);
        assert_eq!(normalized.duration_unit, DurationUnit::Hours);

        let in_minutes = &imported.ledger.events_for(date("2025-07-02"))[0];
        assert_eq!(in_minutes.duration, 90.0);
        assert_eq!(in_minutes.duration_unit, DurationUnit::Minutes);
    }

    #[test]
    fn test_event_outside_trip_range_is_kept_on_import() {
        let mut trip = Trip::new("Viaje".to_string(), date("2025-07-01"), date("2025-07-02"), 1);
        trip.ledger
            .insert(date("2025-08-15"), simple_event("10:00", 1.0, DurationUnit::Hours));

        let xml = write_plan(&trip, &ConversionRates::default());
        let (imported, _) = parse_plan(&xml).unwrap();
        assert_eq!(imported.ledger.events_for(date("2025-08-15")).len(), 1);
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(matches!(
            parse_plan("this is not xml"),
            Err(DomainError::DocumentParse(_))
        ));
        assert!(matches!(
            parse_plan("<otra_cosa></otra_cosa>"),
            Err(DomainError::DocumentParse(_))
        ));

        // Well-formed but missing the trip name
        let xml = "<planeador_viajes><fecha_inicio>2025-07-01</fecha_inicio>\
                   <fecha_fin>2025-07-02</fecha_fin></planeador_viajes>";
        assert!(matches!(parse_plan(xml), Err(DomainError::DocumentParse(_))));
    }

    #[test]
    fn test_unknown_currency_or_tag_fails_the_import() {
        let mut trip = Trip::new("Viaje".to_string(), date("2025-07-01"), date("2025-07-02"), 1);
        trip.ledger
            .insert(date("2025-07-01"), simple_event("10:00", 1.0, DurationUnit::Hours));
        let xml = write_plan(&trip, &ConversionRates::default());

        let bad_currency = xml.replace("<moneda>USD</moneda>", "<moneda>GBP</moneda>");
        assert!(matches!(
            parse_plan(&bad_currency),
            Err(DomainError::DocumentParse(_))
        ));

        let bad_tag = xml.replace("<tipologia>Lugar</tipologia>", "<tipologia>Compras</tipologia>");
        assert!(matches!(parse_plan(&bad_tag), Err(DomainError::DocumentParse(_))));
    }

    #[test]
    fn test_plan_filename() {
        assert_eq!(plan_filename("Ruta del Café"), "ruta_del_caf_.xml");
        assert_eq!(plan_filename("Viaje 2025"), "viaje_2025.xml");
        assert_eq!(plan_filename("CARTAGENA"), "cartagena.xml");
    }

    #[test]
    fn test_empty_ledger_exports_empty_eventos() {
        let trip = Trip {
            name: "Viaje".to_string(),
            start_date: date("2025-07-01"),
            end_date: date("2025-07-02"),
            people_count: 1,
            ledger: TripLedger::new(),
        };
        let xml = write_plan(&trip, &ConversionRates::default());
        assert!(xml.contains("  <eventos>\n  </eventos>\n"));
        let (imported, _) = parse_plan(&xml).unwrap();
        assert!(imported.ledger.is_empty());
    }
}
