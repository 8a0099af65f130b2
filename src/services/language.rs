//! Description language detection.

/// Label used when no language can be detected.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Detects the dominant language of a text.
pub trait LanguageDetector: Send + Sync {
    /// Lowercase English name of the most likely language (`"english"`).
    fn detect(&self, text: &str) -> String;
}

/// Trigram-based detection via `whatlang`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> String {
        whatlang::detect(text)
            .map(|info| info.lang().eng_name().to_lowercase())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
    }
}
