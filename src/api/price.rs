use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Display symbol for the ISO-like currency codes the catalog uses.
fn currency_symbol(currency: &str) -> &str {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => "US$",
        "DOP" => "RD$",
        "EUR" => "€",
        "MXN" => "MX$",
        _ => "$",
    }
}

/// Format a price for display: currency symbol, thousands grouping, cents
/// only when non-zero. Zero or unset prices fall back to the placeholder
/// ("Precio a consultar").
pub fn format_price(amount: Option<Decimal>, currency: &str, placeholder: &str) -> String {
    let amount = match amount {
        Some(a) if a > Decimal::ZERO => a,
        _ => return placeholder.to_string(),
    };

    // Normalize to cents first so a sub-cent amount carries into the whole
    // part instead of rendering as ".100"
    let amount = amount.round_dp(2);
    let cents = (amount.fract() * Decimal::from(100))
        .to_i64()
        .unwrap_or(0);
    let whole = amount.trunc().to_i64().unwrap_or(0);

    let grouped = group_thousands(whole);
    let symbol = currency_symbol(currency);

    if cents > 0 {
        format!("{} {}.{:02}", symbol, grouped, cents)
    } else {
        format!("{} {}", symbol, grouped)
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn formats_usd_with_grouping() {
        let price = format_price(Some(Decimal::from(1_250_000)), "USD", "Precio a consultar");
        assert_eq!(price, "US$ 1,250,000");
    }

    #[test]
    fn formats_dop_symbol() {
        let price = format_price(Some(Decimal::from(85_000)), "DOP", "-");
        assert_eq!(price, "RD$ 85,000");
    }

    #[test]
    fn keeps_nonzero_cents() {
        let price = format_price(Some(Decimal::new(99950, 2)), "USD", "-");
        assert_eq!(price, "US$ 999.50");
    }

    #[test]
    fn zero_and_unset_use_placeholder() {
        assert_eq!(format_price(None, "USD", "Precio a consultar"), "Precio a consultar");
        assert_eq!(
            format_price(Some(Decimal::ZERO), "USD", "Precio a consultar"),
            "Precio a consultar"
        );
    }

    #[test]
    fn sub_cent_amounts_carry_into_the_whole_part() {
        // 999.999 -> 1,000, never "999.100"
        let price = format_price(Some(Decimal::new(999_999, 3)), "USD", "-");
        assert_eq!(price, "US$ 1,000");

        let price = format_price(Some(Decimal::new(1_004, 3)), "USD", "-");
        assert_eq!(price, "US$ 1");
    }

    #[test]
    fn unknown_currency_gets_generic_symbol() {
        assert_eq!(format_price(Some(Decimal::from(100)), "XYZ", "-"), "$ 100");
    }
}
