//! Word list extraction endpoints

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::rate_limit::RateLimitDecision;
use crate::services::vision::ImageUpload;
use crate::AppState;

const IMAGE_FIELD: &str = "image";
const ANONYMOUS_CLIENT: &str = "anonymous";

/// GET /api/extract
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: Status::Ok,
        message: "extract endpoint is up".to_string(),
    })
}

/// POST /api/extract
pub async fn extract(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>> {
    let client = client_key(&headers);

    if let RateLimitDecision::Limited { retry_after_secs } = state.limiter.check(&client).await {
        tracing::warn!(client = %client, retry_after_secs, "extraction rate limited");
        return Err(ApiError::TooManyRequests {
            limit: state.limiter.max_requests(),
            window_secs: state.limiter.window_secs(),
            retry_after_secs,
        });
    }

    let extractor = state
        .extractor
        .clone()
        .ok_or_else(|| ApiError::NotConfigured("OPENAI_API_KEY is not set".to_string()))?;

    let image = read_image(multipart).await?;
    tracing::info!(client = %client, bytes = image.bytes.len(), "extracting word list");

    let text = extractor.extract(&image).await?;
    if text.trim().is_empty() {
        return Err(ApiError::Upstream {
            message: "vision model returned no text".to_string(),
            raw: None,
        });
    }

    let extracted = woordjes_core::parse_extraction(&text).map_err(|e| ApiError::Upstream {
        message: e.to_string(),
        raw: Some(text.clone()),
    })?;

    tracing::info!(
        items = extracted.items.len(),
        a = %extracted.languages.a,
        b = %extracted.languages.b,
        "word list extracted"
    );

    Ok(Json(ExtractResponse {
        status: Status::Ok,
        extracted,
        extracted_at: Utc::now(),
    }))
}

/// First address in `x-forwarded-for`, as set by the hosting proxy.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_string()
}

async fn read_image(mut multipart: Multipart) -> Result<ImageUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if bytes.is_empty() {
            break;
        }

        return Ok(ImageUpload {
            bytes: bytes.to_vec(),
            content_type,
        });
    }

    Err(ApiError::BadRequest(format!(
        "no file received under field '{}'",
        IMAGE_FIELD
    )))
}
