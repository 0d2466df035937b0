use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::advisor::AdvisorRow;
use crate::database::models::property::PropertyRow;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::proposal_service::ProposalService;
use crate::AppState;

use super::content::lang_or_default;
use super::content::properties::{property_view, PROPERTY_COLUMNS};

#[derive(Debug, Deserialize)]
pub struct ProposalQuery {
    pub lang: Option<String>,
}

/// GET /api/proposals/:code - open an agent-curated proposal by its public
/// code. Missing codes are a real 404 and expired ones a 410; proposals are
/// ephemeral by design and carry no SEO weight.
pub async fn proposal_get(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(q): Query<ProposalQuery>,
) -> ApiResult<Value> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(ApiError::validation("Missing proposal code"));
    }

    let lang = lang_or_default(q.lang.as_deref());
    let service = ProposalService::new(state.pool.clone());

    let proposal = service.find_by_code(&code).await?;

    let mut properties: Vec<PropertyRow> = sqlx::query_as(&format!(
        "SELECT {} FROM propiedades WHERE id = ANY($1) AND activa = true",
        PROPERTY_COLUMNS
    ))
    .bind(&proposal.property_ids)
    .fetch_all(&state.pool)
    .await?;

    // Keep the agent's curation order
    let position = |id: Uuid| {
        proposal
            .property_ids
            .iter()
            .position(|p| *p == id)
            .unwrap_or(usize::MAX)
    };
    properties.sort_by_key(|p| position(p.id));

    let advisor: Option<AdvisorRow> = match proposal.asesor_id {
        Some(asesor_id) => {
            sqlx::query_as(
                "SELECT id, tenant_id, slug, nombre, cargo, biografia, foto, telefono, email,
                        traducciones, activo, orden
                 FROM asesores WHERE id = $1",
            )
            .bind(asesor_id)
            .fetch_optional(&state.pool)
            .await?
        }
        None => None,
    };

    service.record_view(proposal.id);

    Ok(ApiResponse::success(json!({
        "proposal": {
            "code": proposal.codigo,
            "title": proposal.titulo,
            "message": proposal.mensaje,
            "expiresAt": proposal.expira_en,
            "views": proposal.vistas,
            "createdAt": proposal.created_at,
        },
        "properties": properties.iter().map(|p| property_view(p, &lang)).collect::<Vec<_>>(),
        "advisor": advisor.map(|a| json!({
            "id": a.id,
            "name": a.nombre,
            "photo": a.foto,
            "phone": a.telefono,
            "email": a.email,
        })),
    })))
}
