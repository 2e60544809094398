use super::domain::{ListingImage, ModerationLabel, ModerationRequest, ModerationStatus};
use crate::config::ModerationSettings;

pub(crate) const APPROVED_SCORE: f64 = 0.85;
pub(crate) const TEXT_REVIEW_SCORE: f64 = 0.35;
pub(crate) const REJECTED_SCORE: f64 = 0.0;
pub(crate) const IMAGE_REVIEW_SCORE: f64 = 0.4;
pub(crate) const OVERSIZE_PENALTY: f64 = 0.05;

pub(crate) const APPROVED_NOTES: &str = "No policy violations detected.";
pub(crate) const IMAGE_REVIEW_NOTES: &str = "Image metadata triggered manual review.";

/// Ordered rule stages. Later stages see the draft produced by earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleStage {
    TextKeywords,
    ImageMetadata,
    OversizePenalty,
    FlaggedImageOverride,
}

pub(crate) const PIPELINE: [RuleStage; 4] = [
    RuleStage::TextKeywords,
    RuleStage::ImageMetadata,
    RuleStage::OversizePenalty,
    RuleStage::FlaggedImageOverride,
];

/// Result of a single stage. Present fields replace the draft's value; labels
/// are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct StageOverride {
    pub status: Option<ModerationStatus>,
    pub score: Option<f64>,
    pub notes: Option<String>,
    pub labels: Vec<ModerationLabel>,
}

impl StageOverride {
    fn verdict(status: ModerationStatus, score: f64, notes: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            score: Some(score),
            notes: Some(notes.into()),
            labels: Vec::new(),
        }
    }

    fn with_label(mut self, label: ModerationLabel) -> Self {
        self.labels.push(label);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.score.is_none()
            && self.notes.is_none()
            && self.labels.is_empty()
    }
}

/// Decision state accumulated while stages run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecisionDraft {
    pub status: ModerationStatus,
    pub score: f64,
    pub notes: String,
    pub labels: Vec<ModerationLabel>,
}

impl Default for DecisionDraft {
    fn default() -> Self {
        Self {
            status: ModerationStatus::Approved,
            score: APPROVED_SCORE,
            notes: APPROVED_NOTES.to_string(),
            labels: Vec::new(),
        }
    }
}

impl DecisionDraft {
    pub fn apply(&mut self, stage: StageOverride) {
        if let Some(status) = stage.status {
            self.status = status;
        }
        if let Some(score) = stage.score {
            self.score = score;
        }
        if let Some(notes) = stage.notes {
            self.notes = notes;
        }
        self.labels.extend(stage.labels);
    }
}

impl RuleStage {
    pub fn evaluate(
        self,
        request: &ModerationRequest,
        settings: &ModerationSettings,
        draft: &DecisionDraft,
    ) -> StageOverride {
        match self {
            RuleStage::TextKeywords => text_keywords(request, settings),
            RuleStage::ImageMetadata => image_metadata(&request.images, settings),
            RuleStage::OversizePenalty => oversize_penalty(draft),
            RuleStage::FlaggedImageOverride => flagged_image_override(draft),
        }
    }
}

pub(crate) fn find_hits<'a>(haystack: &str, needles: &'a [String]) -> Vec<&'a str> {
    needles
        .iter()
        .map(String::as_str)
        .filter(|needle| haystack.contains(needle))
        .collect()
}

fn text_keywords(request: &ModerationRequest, settings: &ModerationSettings) -> StageOverride {
    let text = request.normalized_text();

    let banned = find_hits(&text, settings.banned_keywords());
    if !banned.is_empty() {
        return StageOverride::verdict(
            ModerationStatus::Rejected,
            REJECTED_SCORE,
            format!("Blocked terms detected: {}", banned.join(", ")),
        )
        .with_label(ModerationLabel::BannedKeyword);
    }

    let flagged = find_hits(&text, settings.flagged_keywords());
    if !flagged.is_empty() {
        return StageOverride::verdict(
            ModerationStatus::Flagged,
            TEXT_REVIEW_SCORE,
            format!("Sensitive terms present: {}", flagged.join(", ")),
        )
        .with_label(ModerationLabel::TextRequiresReview);
    }

    StageOverride::verdict(ModerationStatus::Approved, APPROVED_SCORE, APPROVED_NOTES)
}

fn image_metadata(images: &[ListingImage], settings: &ModerationSettings) -> StageOverride {
    let mut labels = Vec::with_capacity(images.len() * 2 + 1);

    for image in images {
        if let Some(mime_type) = &image.mime_type {
            let normalized = mime_type.to_lowercase();
            if settings
                .flagged_mime_prefixes()
                .iter()
                .any(|prefix| normalized.starts_with(prefix.as_str()))
            {
                labels.push(ModerationLabel::ImageFlagged);
            }
        }
        if image
            .file_size_bytes
            .is_some_and(|size| exceeds_threshold(size, settings.max_image_size_bytes()))
        {
            labels.push(ModerationLabel::ImageTooLarge);
        }
    }

    labels.push(if images.is_empty() {
        ModerationLabel::NoImagesSubmitted
    } else {
        ModerationLabel::ImageryPresent
    });

    StageOverride {
        labels,
        ..StageOverride::default()
    }
}

/// Image sizes are unsigned while the threshold may be negative.
fn exceeds_threshold(size: u64, threshold: i64) -> bool {
    i128::from(size) > i128::from(threshold)
}

fn oversize_penalty(draft: &DecisionDraft) -> StageOverride {
    let oversized = draft
        .labels
        .iter()
        .filter(|label| **label == ModerationLabel::ImageTooLarge)
        .count();
    if oversized == 0 {
        return StageOverride::default();
    }

    let adjusted = (draft.score - OVERSIZE_PENALTY * oversized as f64).clamp(0.0, 1.0);
    StageOverride {
        score: Some(adjusted),
        ..StageOverride::default()
    }
}

fn flagged_image_override(draft: &DecisionDraft) -> StageOverride {
    if draft.status == ModerationStatus::Approved
        && draft.labels.contains(&ModerationLabel::ImageFlagged)
    {
        StageOverride::verdict(
            ModerationStatus::Flagged,
            IMAGE_REVIEW_SCORE,
            IMAGE_REVIEW_NOTES,
        )
    } else {
        StageOverride::default()
    }
}

pub(crate) fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
