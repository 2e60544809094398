use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::ModerationSettings;
use crate::moderation::{
    moderation_router, DecisionRecorder, ListingImage, ListingVariant, ModerationDecision,
    ModerationEngine, ModerationRequest, ModerationService, ModerationSubmission,
};

pub(super) const MIB: u64 = 1024 * 1024;

pub(super) fn settings() -> ModerationSettings {
    ModerationSettings::default()
}

pub(super) fn engine() -> ModerationEngine {
    ModerationEngine::new(settings())
}

pub(super) fn request(title: &str, description: Option<&str>) -> ModerationRequest {
    ModerationRequest {
        listing_id: "listing-100".to_string(),
        seller_id: "seller-7".to_string(),
        reason: "listing_created".to_string(),
        title: title.to_string(),
        description: description.map(str::to_string),
        price_cents: Some(12_500),
        currency: Some("USD".to_string()),
        desired_status: Some("ACTIVE".to_string()),
        images: Vec::new(),
        variants: Vec::new(),
    }
}

pub(super) fn image(id: &str, mime_type: Option<&str>, size: Option<u64>) -> ListingImage {
    ListingImage {
        id: id.to_string(),
        url: format!("https://cdn.example.com/{id}.jpg"),
        mime_type: mime_type.map(str::to_string),
        file_size_bytes: size,
    }
}

pub(super) fn variant(label: &str) -> ListingVariant {
    ListingVariant {
        id: Some(format!("variant-{label}")),
        label: label.to_string(),
        price_cents: Some(1_000),
        currency: Some("USD".to_string()),
        sku: Some(format!("SKU-{label}")),
    }
}

pub(super) fn submission() -> ModerationSubmission {
    serde_json::from_value(serde_json::json!({
        "listingId": "listing-100",
        "sellerId": "seller-7",
        "reason": "listing_created",
        "title": "Vintage chair",
        "description": "Solid oak, lightly used",
        "priceCents": 12500,
        "currency": "USD",
        "images": [
            { "id": "img-1", "url": "https://cdn.example.com/img-1.jpg", "mimeType": "image/jpeg", "fileSizeBytes": 2048 }
        ],
        "variants": [
            { "label": "Default", "priceCents": 12500 }
        ]
    }))
    .expect("valid submission fixture")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRecorder {
    pub(super) decisions: Arc<Mutex<Vec<ModerationDecision>>>,
}

impl DecisionRecorder for MemoryRecorder {
    fn record(&self, decision: &ModerationDecision) {
        self.decisions
            .lock()
            .expect("recorder mutex poisoned")
            .push(decision.clone());
    }
}

impl MemoryRecorder {
    pub(super) fn recorded(&self) -> Vec<ModerationDecision> {
        self.decisions
            .lock()
            .expect("recorder mutex poisoned")
            .clone()
    }
}

pub(super) fn build_service() -> (ModerationService<MemoryRecorder>, Arc<MemoryRecorder>) {
    let recorder = Arc::new(MemoryRecorder::default());
    let service = ModerationService::new(engine(), recorder.clone());
    (service, recorder)
}

pub(super) fn router_with_service(service: ModerationService<MemoryRecorder>) -> axum::Router {
    moderation_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
