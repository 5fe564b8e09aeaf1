use super::tables::TaxTables;

/// Flat-rate state income tax. Unknown or empty codes are taxed at 0.
pub fn state_income_tax(net_profit: f64, state_code: &str, tables: &TaxTables) -> f64 {
    if net_profit <= 0.0 {
        return 0.0;
    }
    net_profit * tables.state_rate(state_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_flat_rate() {
        let tables = TaxTables::tax_year_2024();
        assert!((state_income_tax(100_000.0, "CA", tables) - 9_300.0).abs() < 1e-9);
        assert_eq!(state_income_tax(100_000.0, "TX", tables), 0.0);
    }

    #[test]
    fn unknown_state_or_loss_is_zero() {
        let tables = TaxTables::tax_year_2024();
        assert_eq!(state_income_tax(250_000.0, "", tables), 0.0);
        assert_eq!(state_income_tax(250_000.0, "XX", tables), 0.0);
        assert_eq!(state_income_tax(-5.0, "OR", tables), 0.0);
    }
}
