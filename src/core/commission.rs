//! Commission calculation.
//!
//! The company keeps a percentage of every reservation; the owner gets the rest.

/// Rate applied when an apartment has no commission rate set.
pub const DEFAULT_COMMISSION_RATE: f64 = 25.0;

/// How a reservation amount divides between the company and the apartment owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionSplit {
    /// Amount retained by the company
    pub company_share: f64,
    /// Amount passed on to the owner
    pub owner_share: f64,
}

/// Returns the rate to use for an apartment, falling back to [`DEFAULT_COMMISSION_RATE`].
#[must_use]
pub fn effective_rate(commission_rate: Option<f64>) -> f64 {
    commission_rate.unwrap_or(DEFAULT_COMMISSION_RATE)
}

/// Splits a reservation amount according to the apartment's commission rate.
///
/// Negative amounts are not rejected here; callers validate their inputs.
#[must_use]
pub fn commission(total_amount: f64, commission_rate: Option<f64>) -> CommissionSplit {
    let company_share = total_amount * effective_rate(commission_rate) / 100.0;
    CommissionSplit {
        company_share,
        owner_share: total_amount - company_share,
    }
}

/// Checks that a commission rate is a finite percentage between 0 and 100.
#[must_use]
pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && (0.0..=100.0).contains(&rate)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_standard_commission() {
        let split = commission(1000.0, Some(25.0));
        assert_eq!(split.company_share, 250.0);
        assert_eq!(split.owner_share, 750.0);
    }

    #[test]
    fn test_unset_rate_defaults_to_25() {
        assert_eq!(commission(400.0, None).company_share, 100.0);
        assert_eq!(effective_rate(None), DEFAULT_COMMISSION_RATE);
    }

    #[test]
    fn test_zero_rate_is_honoured() {
        let split = commission(800.0, Some(0.0));
        assert_eq!(split.company_share, 0.0);
        assert_eq!(split.owner_share, 800.0);
    }

    #[test]
    fn test_shares_always_sum_to_total() {
        let amounts = [0.0, 0.01, 99.99, 1000.0, 1234.56, 98_765.43];
        let rates = [0.0, 12.5, 20.0, 25.0, 33.3, 50.0, 100.0];

        for &amount in &amounts {
            for &rate in &rates {
                let split = commission(amount, Some(rate));
                let sum = split.company_share + split.owner_share;
                assert!(
                    (sum - amount).abs() < 1e-9,
                    "amount {amount} rate {rate} summed to {sum}"
                );
            }
        }
    }

    #[test]
    fn test_negative_amount_passes_through() {
        let split = commission(-100.0, Some(25.0));
        assert_eq!(split.company_share, -25.0);
        assert_eq!(split.owner_share, -75.0);
    }

    #[test]
    fn test_rate_validation() {
        assert!(is_valid_rate(0.0));
        assert!(is_valid_rate(100.0));
        assert!(!is_valid_rate(-0.1));
        assert!(!is_valid_rate(100.5));
        assert!(!is_valid_rate(f64::NAN));
    }
}
