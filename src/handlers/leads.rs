use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::lead_service::{validate_lead, LeadInput, LeadService};
use crate::AppState;

use super::resolve_tenant;

#[derive(Debug, Deserialize)]
pub struct LeadQuery {
    pub tenant: Option<String>,
}

/// POST /api/leads - contact-form intake. Validation failures are 400s;
/// malformed property/agent references are nulled rather than rejected.
pub async fn lead_create(
    State(state): State<AppState>,
    Query(q): Query<LeadQuery>,
    Json(input): Json<LeadInput>,
) -> ApiResult<Value> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;

    let lead = validate_lead(&input)?;

    let id = LeadService::new(state.pool.clone())
        .create(tenant.id, lead)
        .await?;

    Ok(ApiResponse::created(json!({
        "id": id,
        "status": "new",
    })))
}
