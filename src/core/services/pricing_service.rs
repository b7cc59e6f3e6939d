//! Price display helpers for the review step and order detail.

use crate::domain::PriceBreakdown;

pub struct PricingService;

impl PricingService {
    /// Formats an amount with the configured currency's symbol, or its code.
    pub fn format_amount(amount: f64, currency: &str) -> String {
        let code = currency.trim().to_ascii_uppercase();
        let symbol = match code.as_str() {
            "USD" | "CAD" | "AUD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "INR" => Some("₹"),
            "NGN" => Some("₦"),
            _ => None,
        };
        let sign = if amount < 0.0 { "-" } else { "" };
        match symbol {
            Some(symbol) => format!("{sign}{symbol}{:.2}", amount.abs()),
            None => format!("{sign}{:.2} {code}", amount.abs()),
        }
    }

    /// Label/amount rows for the review screen. Zero fabric and urgent rows are omitted.
    pub fn lines(prices: &PriceBreakdown, currency: &str) -> Vec<(String, String)> {
        let mut lines = vec![(
            "Base price".to_string(),
            Self::format_amount(prices.base, currency),
        )];
        if prices.fabric > 0.0 {
            lines.push(("Fabric".into(), Self::format_amount(prices.fabric, currency)));
        }
        if prices.urgent > 0.0 {
            lines.push((
                "Urgent delivery".into(),
                Self::format_amount(prices.urgent, currency),
            ));
        }
        lines.push(("Total".into(), Self::format_amount(prices.total, currency)));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingDraft;

    #[test]
    fn formats_known_and_unknown_currencies() {
        assert_eq!(PricingService::format_amount(150.0, "usd"), "$150.00");
        assert_eq!(PricingService::format_amount(12.5, "GBP"), "£12.50");
        assert_eq!(PricingService::format_amount(99.0, "KES"), "99.00 KES");
    }

    #[test]
    fn lines_skip_zero_components() {
        let mut draft = BookingDraft::new(150.0);
        let lines = PricingService::lines(&draft.price_breakdown(), "USD");
        assert_eq!(lines.len(), 2);

        draft.select_fabric("silk", 85.0);
        draft.set_urgent_delivery(true, 50.0);
        let lines = PricingService::lines(&draft.price_breakdown(), "USD");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.last().unwrap().1, "$285.00");
    }
}
