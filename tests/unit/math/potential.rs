//! Tests for the truncated linear smoothness potential

#[cfg(test)]
mod tests {
    use mrf_inpaint::math::{PairwisePotential, TruncatedLinear};

    // Tests symmetry and zero self-compatibility over the whole value domain
    // Verified by using a signed difference instead of abs_diff
    #[test]
    fn test_log_phi_symmetric_with_zero_diagonal() {
        let potential = TruncatedLinear::default();

        for a in 0..256 {
            assert_eq!(potential.log_phi(a, a), 0.0);
            for b in 0..256 {
                assert_eq!(potential.log_phi(a, b), potential.log_phi(b, a));
            }
        }
    }

    // Tests compatibility never increases with distance and flattens at the cap
    // Verified by dropping the min() truncation
    #[test]
    fn test_log_phi_monotone_and_capped() {
        let potential = TruncatedLinear::default();
        assert_eq!(potential.cap(), 50);

        for a in 0..256_usize {
            let mut previous = potential.log_phi(a, a);
            for k in 1..256_usize {
                let Some(b) = a.checked_add(k).filter(|&b| b < 256) else {
                    break;
                };
                let current = potential.log_phi(a, b);
                assert!(current <= previous, "log_phi({a}, {b}) increased");
                if k >= 50 {
                    assert_eq!(current, -50.0);
                }
                previous = current;
            }
        }
    }

    #[test]
    fn test_custom_cap() {
        let potential = TruncatedLinear::new(3);

        assert_eq!(potential.log_phi(10, 12), -2.0);
        assert_eq!(potential.log_phi(10, 13), -3.0);
        assert_eq!(potential.log_phi(10, 200), -3.0);
        assert_eq!(TruncatedLinear::new(0).log_phi(0, 255), 0.0);
    }
}
