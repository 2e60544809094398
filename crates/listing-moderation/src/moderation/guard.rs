use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::domain::{ListingImage, ListingVariant, ModerationRequest};

/// Validation errors raised before a submission reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestViolation {
    #[error("missing required field '{field}'")]
    MissingField { field: String },
    #[error("'{field}' must be non-negative (found {found})")]
    Negative { field: String, found: i64 },
    #[error("'{field}' must be an integer (found {found})")]
    NotAnInteger { field: String, found: String },
}

impl RequestViolation {
    pub fn field(&self) -> &str {
        match self {
            RequestViolation::MissingField { field }
            | RequestViolation::Negative { field, .. }
            | RequestViolation::NotAnInteger { field, .. } => field,
        }
    }
}

/// Inbound image payload as sent by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSubmission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    #[serde(default, alias = "file_size", alias = "fileSize")]
    pub file_size_bytes: Option<Number>,
}

/// Inbound variant payload as sent by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSubmission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, alias = "price_cents")]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
}

/// Lenient wire shape of a moderation request.
///
/// Every field is optional here so the guard can name the exact field that
/// failed instead of surfacing a generic deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationSubmission {
    #[serde(default, alias = "listing_id")]
    pub listing_id: Option<String>,
    #[serde(default, alias = "seller_id")]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "price_cents")]
    pub price_cents: Option<Number>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, alias = "desired_status")]
    pub desired_status: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ImageSubmission>>,
    #[serde(default)]
    pub variants: Option<Vec<VariantSubmission>>,
}

/// Converts wire submissions into validated requests.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard;

impl RequestGuard {
    pub fn request_from_submission(
        &self,
        submission: ModerationSubmission,
    ) -> Result<ModerationRequest, RequestViolation> {
        let listing_id = required(submission.listing_id, "listingId")?;
        let seller_id = required(submission.seller_id, "sellerId")?;
        let reason = required(submission.reason, "reason")?;
        let title = required(submission.title, "title")?;
        let price_cents = non_negative(submission.price_cents, "priceCents")?;

        let images = submission
            .images
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, image)| image_from_submission(index, image))
            .collect::<Result<Vec<_>, _>>()?;

        let variants = submission
            .variants
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, variant)| variant_from_submission(index, variant))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ModerationRequest {
            listing_id,
            seller_id,
            reason,
            title,
            description: submission.description,
            price_cents,
            currency: submission.currency,
            desired_status: submission.desired_status,
            images,
            variants,
        })
    }
}

fn image_from_submission(
    index: usize,
    image: ImageSubmission,
) -> Result<ListingImage, RequestViolation> {
    Ok(ListingImage {
        id: required(image.id, &format!("images[{index}].id"))?,
        url: required(image.url, &format!("images[{index}].url"))?,
        mime_type: image.mime_type,
        file_size_bytes: non_negative(
            image.file_size_bytes,
            &format!("images[{index}].fileSizeBytes"),
        )?,
    })
}

fn variant_from_submission(
    index: usize,
    variant: VariantSubmission,
) -> Result<ListingVariant, RequestViolation> {
    Ok(ListingVariant {
        id: variant.id,
        label: required(variant.label, &format!("variants[{index}].label"))?,
        price_cents: variant.price_cents,
        currency: variant.currency,
        sku: variant.sku,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, RequestViolation> {
    value.ok_or_else(|| RequestViolation::MissingField {
        field: field.to_string(),
    })
}

/// Sizes and prices arrive as raw JSON numbers so the full `u64` range is
/// accepted and negatives or fractions are reported against their field.
fn non_negative(value: Option<Number>, field: &str) -> Result<Option<u64>, RequestViolation> {
    let Some(number) = value else {
        return Ok(None);
    };

    if let Some(unsigned) = number.as_u64() {
        return Ok(Some(unsigned));
    }

    match number.as_i64() {
        Some(found) => Err(RequestViolation::Negative {
            field: field.to_string(),
            found,
        }),
        None => Err(RequestViolation::NotAnInteger {
            field: field.to_string(),
            found: number.to_string(),
        }),
    }
}
