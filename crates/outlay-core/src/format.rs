/// Renders amounts with a currency symbol, two decimals and grouped thousands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn format(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let fixed = format!("{:.2}", amount.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (index, digit) in whole.chars().enumerate() {
            if index > 0 && (whole.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        format!("{sign}{}{grouped}.{cents}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format(0.0), "$0.00");
        assert_eq!(format.format(1234.5), "$1,234.50");
        assert_eq!(format.format(1_000_000.0), "$1,000,000.00");
        assert_eq!(format.format(-20.0), "-$20.00");
    }

    #[test]
    fn honours_symbol() {
        assert_eq!(CurrencyFormat::new("€").format(99.999), "€100.00");
    }
}
