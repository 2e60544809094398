use serde::Serialize;
use std::env;
use std::sync::OnceLock;

pub const BANNED_KEYWORDS_KEY: &str = "MODERATION_BANNED_KEYWORDS";
pub const FLAGGED_KEYWORDS_KEY: &str = "MODERATION_FLAGGED_KEYWORDS";
pub const FLAGGED_MIME_PREFIXES_KEY: &str = "MODERATION_FLAGGED_MIME_PREFIXES";
pub const MAX_IMAGE_SIZE_MB_KEY: &str = "MODERATION_MAX_IMAGE_SIZE_MB";

const DEFAULT_BANNED_KEYWORDS: [&str; 5] = ["firearm", "weapon", "fentanyl", "ivory", "counterfeit"];
const DEFAULT_FLAGGED_KEYWORDS: [&str; 4] = ["replica", "adult", "lottery", "knife"];
const DEFAULT_FLAGGED_MIME_PREFIXES: [&str; 2] = ["image/svg", "image/x-icon"];
pub const DEFAULT_MAX_IMAGE_SIZE_MB: i64 = 20;
const BYTES_PER_MB: i64 = 1024 * 1024;

/// Rule set consumed by the moderation engine.
///
/// Keywords and prefixes are stored lowercase with empty tokens removed, so the
/// engine can compare against lowercased listing text directly. The image size
/// threshold is signed: a negative megabyte value is honored as given and marks
/// every sized image as too large.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationSettings {
    banned_keywords: Vec<String>,
    flagged_keywords: Vec<String>,
    flagged_mime_prefixes: Vec<String>,
    max_image_size_bytes: i64,
}

impl ModerationSettings {
    pub fn new<B, F, M>(
        banned_keywords: B,
        flagged_keywords: F,
        flagged_mime_prefixes: M,
        max_image_size_bytes: i64,
    ) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        Self {
            banned_keywords: normalize_tokens(banned_keywords),
            flagged_keywords: normalize_tokens(flagged_keywords),
            flagged_mime_prefixes: normalize_tokens(flagged_mime_prefixes),
            max_image_size_bytes,
        }
    }

    /// Read the rule set from the process environment.
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Read the rule set from any key-value source.
    ///
    /// Missing, empty, or unparsable values fall back to the built-in defaults;
    /// this never fails. Any integer megabyte value is accepted, negative ones
    /// included.
    pub fn from_source<S>(source: S) -> Self
    where
        S: Fn(&str) -> Option<String>,
    {
        let banned_keywords =
            csv_or_default(source(BANNED_KEYWORDS_KEY).as_deref(), &DEFAULT_BANNED_KEYWORDS);
        let flagged_keywords =
            csv_or_default(source(FLAGGED_KEYWORDS_KEY).as_deref(), &DEFAULT_FLAGGED_KEYWORDS);
        let flagged_mime_prefixes = csv_or_default(
            source(FLAGGED_MIME_PREFIXES_KEY).as_deref(),
            &DEFAULT_FLAGGED_MIME_PREFIXES,
        );

        let max_image_size_mb = source(MAX_IMAGE_SIZE_MB_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_MAX_IMAGE_SIZE_MB);

        Self {
            banned_keywords,
            flagged_keywords,
            flagged_mime_prefixes,
            max_image_size_bytes: max_image_size_mb.saturating_mul(BYTES_PER_MB),
        }
    }

    pub fn banned_keywords(&self) -> &[String] {
        &self.banned_keywords
    }

    pub fn flagged_keywords(&self) -> &[String] {
        &self.flagged_keywords
    }

    pub fn flagged_mime_prefixes(&self) -> &[String] {
        &self.flagged_mime_prefixes
    }

    pub fn max_image_size_bytes(&self) -> i64 {
        self.max_image_size_bytes
    }
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_BANNED_KEYWORDS,
            DEFAULT_FLAGGED_KEYWORDS,
            DEFAULT_FLAGGED_MIME_PREFIXES,
            DEFAULT_MAX_IMAGE_SIZE_MB * BYTES_PER_MB,
        )
    }
}

/// Process-wide settings, read from the environment on first use.
pub fn get_settings() -> &'static ModerationSettings {
    static SETTINGS: OnceLock<ModerationSettings> = OnceLock::new();
    SETTINGS.get_or_init(ModerationSettings::from_env)
}

fn normalize_tokens<I>(tokens: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| token.as_ref().trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

fn parse_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| normalize_tokens(value.split(',')))
        .unwrap_or_default()
}

fn csv_or_default(raw: Option<&str>, defaults: &[&str]) -> Vec<String> {
    let parsed = parse_csv(raw);
    if parsed.is_empty() {
        normalize_tokens(defaults)
    } else {
        parsed
    }
}
