use scenecut_core::{ChunkingConfig, ExtractionConfig};

#[test]
fn default_chunking_matches_reference_budgets() {
    let config = ChunkingConfig::default();
    assert_eq!(*config.target_chunk_words(), 5000);
    assert_eq!(*config.slack_words(), 500);
    assert_eq!(*config.min_chunk_words(), 1000);
    assert_eq!(config.slack_bytes(), 3000);
}

#[test]
fn new_keeps_default_chars_per_word() {
    let config = ChunkingConfig::new(800, 100, 200);
    assert_eq!(*config.chars_per_word(), 6);
    assert_eq!(*config.min_chunk_words(), 200);
}

#[test]
fn validate_rejects_zero_target() {
    let config = ChunkingConfig::new(0, 100, 0);
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_minimum_above_target() {
    let config = ChunkingConfig::new(500, 50, 600);
    let err = config.validate().unwrap_err();
    assert!(err.contains("min_chunk_words"));
}

#[test]
fn chunking_deserializes_partial_toml() {
    let config: ChunkingConfig = toml::from_str("target_chunk_words = 1200").unwrap();
    assert_eq!(*config.target_chunk_words(), 1200);
    assert_eq!(*config.slack_words(), 500);
}

#[test]
fn chunking_rejects_unknown_keys() {
    let result = toml::from_str::<ChunkingConfig>("chunk_size = 1200");
    assert!(result.is_err());
}

#[test]
fn extraction_validate() {
    assert!(ExtractionConfig::default().validate().is_ok());

    let zero = ExtractionConfig::default().with_max_concurrent_extractions(0);
    assert!(zero.validate().is_err());

    let hot = ExtractionConfig::default().with_temperature(Some(3.5));
    assert!(hot.validate().is_err());
}
