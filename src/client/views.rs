//! View models for the public catalog and the admin lists.

use crate::models::{PriceRecord, ServiceRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCard {
    pub icon: String,
    pub name: String,
    pub items: Vec<String>,
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub service: String,
    pub price_label: String,
    pub time: String,
}

/// One line of the admin panel list, carrying the id its buttons act on.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminEntry {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
}

/// Formats an amount with `.` thousands separators and `,` decimals,
/// keeping at most three fraction digits (`15000` -> `15.000`).
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, fraction)
    }
}

/// Decodes a stored item list. Text that is not a JSON string array is
/// split into its non-blank lines instead.
pub fn parse_items(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => items,
        Err(_) => {
            tracing::warn!(items = raw, "Service items are not a JSON list");
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        }
    }
}

/// Encodes newline-separated form text as the JSON list stored server-side.
pub fn encode_items(text: &str) -> String {
    let items: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
}

/// Inverse of [`encode_items`], for filling the edit form.
pub fn items_to_text(raw: &str) -> String {
    parse_items(raw).join("\n")
}

pub fn service_cards(services: &[ServiceRecord]) -> Vec<ServiceCard> {
    services
        .iter()
        .map(|service| ServiceCard {
            icon: service.icon.clone(),
            name: service.name.clone(),
            items: parse_items(&service.items),
            price_label: format!("From ${}", format_price(service.price)),
        })
        .collect()
}

pub fn price_rows(prices: &[PriceRecord]) -> Vec<PriceRow> {
    prices
        .iter()
        .map(|price| PriceRow {
            service: price.service.clone(),
            price_label: format!("${}", format_price(price.price)),
            time: price.time.clone(),
        })
        .collect()
}

pub fn admin_service_entries(services: &[ServiceRecord]) -> Vec<AdminEntry> {
    services
        .iter()
        .map(|service| AdminEntry {
            id: service.id,
            title: format!("{} {}", service.icon, service.name).trim().to_string(),
            subtitle: format!("From ${}", format_price(service.price)),
        })
        .collect()
}

pub fn admin_price_entries(prices: &[PriceRecord]) -> Vec<AdminEntry> {
    prices
        .iter()
        .map(|price| AdminEntry {
            id: price.id,
            title: price.service.clone(),
            subtitle: format!("${} - {}", format_price(price.price), price.time),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_use_dot_grouping() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(950.0), "950");
        assert_eq!(format_price(15000.0), "15.000");
        assert_eq!(format_price(9_999_999.0), "9.999.999");
        assert_eq!(format_price(1234.5), "1.234,5");
        assert_eq!(format_price(-1500.0), "-1.500");
    }

    #[test]
    fn items_fall_back_to_lines() {
        assert_eq!(parse_items(r#"["Glass","Touch"]"#), vec!["Glass", "Touch"]);
        assert_eq!(parse_items("Glass\n\n  Touch \n"), vec!["Glass", "Touch"]);
        assert!(parse_items("").is_empty());
    }

    #[test]
    fn items_text_conversion_drops_blank_lines() {
        let encoded = encode_items("Glass\n\nTouch\n");
        assert_eq!(encoded, r#"["Glass","Touch"]"#);
        assert_eq!(items_to_text(&encoded), "Glass\nTouch");
    }

    #[test]
    fn items_text_conversion_keeps_line_whitespace() {
        let encoded = encode_items("  Glass \n   \n\tTouch");
        assert_eq!(encoded, r#"["  Glass ","\tTouch"]"#);
        assert_eq!(items_to_text(&encoded), "  Glass \n\tTouch");
    }

    #[test]
    fn cards_and_rows_carry_labels() {
        let services = vec![ServiceRecord {
            id: 1,
            name: "Screen repair".into(),
            icon: "📱".into(),
            items: r#"["Original parts"]"#.into(),
            price: 15000.0,
        }];
        let cards = service_cards(&services);
        assert_eq!(cards[0].price_label, "From $15.000");
        assert_eq!(cards[0].items, vec!["Original parts"]);

        let prices = vec![PriceRecord {
            id: 7,
            service: "Battery".into(),
            price: 8000.0,
            time: "1 day".into(),
        }];
        assert_eq!(price_rows(&prices)[0].price_label, "$8.000");
        assert_eq!(admin_price_entries(&prices)[0].subtitle, "$8.000 - 1 day");
        assert_eq!(admin_service_entries(&services)[0].title, "📱 Screen repair");
    }
}
