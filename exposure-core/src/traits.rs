//! Core traits
//!
//! Kept deliberately small: the engine needs to know which gases qualify
//! and whether a raw number is usable at all.

/// Decides whether a gas gets STEL/TWA values
///
/// Implemented by [`GasTable`](crate::gas::GasTable) and by any
/// `Fn(&str) -> bool`, so callers can inject a table loaded at runtime.
pub trait GasEligibility {
    /// True if exposure computation applies to this gas code
    fn is_stel_twa_eligible(&self, gas_code: &str) -> bool;
}

impl<F> GasEligibility for F
where
    F: Fn(&str) -> bool,
{
    fn is_stel_twa_eligible(&self, gas_code: &str) -> bool {
        self(gas_code)
    }
}

/// Trait for values that can be stored in a datalog
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validatable_floats() {
        assert!(5.0f64.is_valid());
        assert!((-1.0f64).is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(!f64::INFINITY.is_valid());
        assert!(!f32::NEG_INFINITY.is_valid());
    }
}
