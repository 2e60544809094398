use serde::{Deserialize, Serialize};

/// Image attached to a listing. Only metadata is inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingImage {
    pub id: String,
    pub url: String,
    pub mime_type: Option<String>,
    pub file_size_bytes: Option<u64>,
}

/// Purchasable variant of a listing, carried through untouched by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingVariant {
    pub id: Option<String>,
    pub label: String,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
    pub sku: Option<String>,
}

/// Validated listing submission handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRequest {
    pub listing_id: String,
    pub seller_id: String,
    pub reason: String,
    pub title: String,
    pub description: Option<String>,
    pub price_cents: Option<u64>,
    pub currency: Option<String>,
    pub desired_status: Option<String>,
    pub images: Vec<ListingImage>,
    pub variants: Vec<ListingVariant>,
}

impl ModerationRequest {
    /// Lowercased `title` and `description` joined by a single space.
    pub fn normalized_text(&self) -> String {
        format!(
            "{} {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}

/// Automated verdict for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Approved,
    Flagged,
    Rejected,
}

impl ModerationStatus {
    pub fn label(self) -> &'static str {
        match self {
            ModerationStatus::Approved => "approved",
            ModerationStatus::Flagged => "flagged",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

/// Machine-readable signal attached to a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationLabel {
    BannedKeyword,
    TextRequiresReview,
    ImageFlagged,
    ImageTooLarge,
    NoImagesSubmitted,
    ImageryPresent,
}

impl ModerationLabel {
    pub fn tag(self) -> &'static str {
        match self {
            ModerationLabel::BannedKeyword => "banned_keyword",
            ModerationLabel::TextRequiresReview => "text_requires_review",
            ModerationLabel::ImageFlagged => "image_flagged",
            ModerationLabel::ImageTooLarge => "image_too_large",
            ModerationLabel::NoImagesSubmitted => "no_images_submitted",
            ModerationLabel::ImageryPresent => "imagery_present",
        }
    }
}

/// Engine output returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationDecision {
    pub listing_id: String,
    pub status: ModerationStatus,
    pub score: f64,
    pub labels: Vec<ModerationLabel>,
    pub notes: String,
}

impl ModerationDecision {
    pub fn count_label(&self, label: ModerationLabel) -> usize {
        self.labels.iter().filter(|candidate| **candidate == label).count()
    }

    pub fn has_label(&self, label: ModerationLabel) -> bool {
        self.labels.contains(&label)
    }

    pub fn score_within_bounds(&self) -> bool {
        (0.0..=1.0).contains(&self.score)
    }
}
