use super::tables::SelfEmploymentRates;

/// Social Security plus Medicare owed on `net_profit`.
///
/// Zero for a loss or break-even year. Social Security stops at the wage
/// base; Medicare has no ceiling and no additional surtax tier is applied.
pub fn self_employment_tax(net_profit: f64, rates: &SelfEmploymentRates) -> f64 {
    if net_profit <= 0.0 {
        return 0.0;
    }
    let taxable_base = net_profit * rates.net_earnings_factor;
    let social_security =
        taxable_base.min(rates.social_security_wage_base) * rates.social_security_rate;
    let medicare = taxable_base * rates.medicare_rate;
    social_security + medicare
}
