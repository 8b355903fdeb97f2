//! Tests for inference configuration defaults and validation

#[cfg(test)]
mod tests {
    use mrf_inpaint::InpaintError;
    use mrf_inpaint::inference::{InferenceConfig, MessageInit};

    #[test]
    fn test_defaults() {
        let config = InferenceConfig::default();

        assert_eq!(config.alphabet_size, 256);
        assert_eq!(config.truncation_cap, 50);
        assert_eq!(config.epoch_count, 17);
        assert!(!config.emit_snapshots);
        assert_eq!(config.message_init, MessageInit::Uniform);
        assert_eq!(MessageInit::default(), MessageInit::Uniform);
    }

    // Tests the alphabet bounds that keep beliefs representable as bytes
    // Verified by accepting alphabets above 256
    #[test]
    fn test_validate_alphabet_bounds() {
        for alphabet_size in [1, 16, 256] {
            let config = InferenceConfig {
                alphabet_size,
                ..InferenceConfig::default()
            };
            assert_eq!(config.validate().unwrap(), config);
        }

        for alphabet_size in [0, 257] {
            let config = InferenceConfig {
                alphabet_size,
                ..InferenceConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(InpaintError::InvalidParameter {
                    parameter: "alphabet_size",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_zero_epochs_is_valid() {
        let config = InferenceConfig {
            epoch_count: 0,
            truncation_cap: 0,
            ..InferenceConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
