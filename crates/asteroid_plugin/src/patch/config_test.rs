use super::*;

#[test]
fn test_default_config() {
  let config = PatchLodConfig::default();
  assert_eq!(config.split_threshold, 0.06);
  assert_eq!(config.merge_threshold, 0.04);
  assert_eq!(config.max_depth, 5);
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_equal_thresholds_rejected() {
  let config = PatchLodConfig::new().with_thresholds(0.05, 0.05);
  assert_eq!(
    config.validate(),
    Err(ConfigError::NoHysteresis {
      split: 0.05,
      merge: 0.05,
    })
  );
}

#[test]
fn test_inverted_thresholds_rejected() {
  let config = PatchLodConfig::new().with_thresholds(0.02, 0.04);
  assert!(matches!(config.validate(), Err(ConfigError::NoHysteresis { .. })));
}

#[test]
fn test_non_positive_merge_rejected() {
  let config = PatchLodConfig::new().with_thresholds(0.06, 0.0);
  assert!(config.validate().is_err());
}

#[test]
fn test_nan_threshold_rejected() {
  let config = PatchLodConfig::new().with_thresholds(f32::NAN, 0.04);
  assert!(config.validate().is_err());
}

#[test]
fn test_zero_depth_rejected() {
  let config = PatchLodConfig::new().with_max_depth(0);
  assert_eq!(config.validate(), Err(ConfigError::InvalidMaxDepth));
}
