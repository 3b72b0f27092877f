//! Print cost estimation.

/// Round to cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimated cost of printing `filament_grams` of material.
///
/// Filament cost is `grams / 1000 * price_per_kg`; electricity is
/// `grams / 1000 * kwh_per_kg * price_per_kwh`. The total is rounded to
/// two decimals.
pub fn estimate_print_cost(
    filament_grams: f64,
    price_per_kg: f64,
    kwh_per_kg: f64,
    price_per_kwh: f64,
) -> f64 {
    let kg = filament_grams / 1000.0;
    let filament_cost = kg * price_per_kg;
    let electricity_cost = kg * kwh_per_kg * price_per_kwh;
    round_cents(filament_cost + electricity_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cost_of_one_kilogram() {
        // 20.00 filament + 1 * 0.05 * 0.15 electricity
        assert_relative_eq!(estimate_print_cost(1000.0, 20.0, 0.05, 0.15), 20.01);
    }

    #[test]
    fn test_cost_rounds_to_cents() {
        assert_relative_eq!(estimate_print_cost(124.0, 20.0, 0.05, 0.15), 2.48);
        assert_relative_eq!(estimate_print_cost(0.0, 20.0, 0.05, 0.15), 0.0);
    }

    #[test]
    fn test_round_cents() {
        assert_relative_eq!(round_cents(1.234), 1.23);
        assert_relative_eq!(round_cents(1.236), 1.24);
    }
}
