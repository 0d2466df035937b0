use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::i18n;
use crate::api::seo::SeoBlock;
use crate::database::models::advisor::AdvisorRow;
use crate::error::ApiError;
use crate::handlers::resolve_tenant;
use crate::AppState;

use super::lang_or_default;

#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    pub tenant: Option<String>,
    pub lang: Option<String>,
}

/// GET /api/content/contact - office info and the advisor roster
pub async fn contact_get(
    State(state): State<AppState>,
    Query(q): Query<ContactQuery>,
) -> Result<Json<Value>, ApiError> {
    let tenant = resolve_tenant(&state.pool, q.tenant.as_deref()).await?;
    let lang = lang_or_default(q.lang.as_deref());

    let advisors: Vec<AdvisorRow> = sqlx::query_as(
        "SELECT id, tenant_id, slug, nombre, cargo, biografia, foto, telefono, email,
                traducciones, activo, orden
         FROM asesores
         WHERE tenant_id = $1 AND activo = true
         ORDER BY orden, nombre",
    )
    .bind(tenant.id)
    .fetch_all(&state.pool)
    .await?;

    let seo = SeoBlock::new(
        &tenant.nombre,
        &tenant.dominio,
        "Contacto",
        format!("Contacta a {} por teléfono, correo o visítanos", tenant.nombre),
        "/contacto",
    );

    Ok(Json(json!({
        "type": "contact",
        "office": {
            "name": tenant.nombre,
            "phone": tenant.telefono,
            "email": tenant.email_contacto,
            "address": tenant.direccion,
            "schedule": tenant.horario,
            "social": tenant.redes,
        },
        "advisors": advisors.iter().map(|a| advisor_entry(a, &lang)).collect::<Vec<_>>(),
        "seo": seo,
    })))
}

fn advisor_entry(a: &AdvisorRow, lang: &str) -> Value {
    json!({
        "id": a.id,
        "slug": a.slug,
        "name": a.nombre,
        "role": a.cargo.as_deref().map(|c| {
            i18n::resolve_field(&a.traducciones, lang, "cargo", Some(c))
        }),
        "photo": a.foto,
        "phone": a.telefono,
        "email": a.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn advisor() -> AdvisorRow {
        AdvisorRow {
            id: Uuid::from_u128(1),
            tenant_id: Uuid::from_u128(2),
            slug: "maria-gomez".to_string(),
            nombre: "María Gómez".to_string(),
            cargo: Some("Directora comercial".to_string()),
            biografia: None,
            foto: None,
            telefono: Some("809-555-0100".to_string()),
            email: None,
            traducciones: json!({"en": {"cargo": "Sales director"}}),
            activo: true,
            orden: 0,
        }
    }

    #[test]
    fn roster_entry_localizes_the_role() {
        let entry = advisor_entry(&advisor(), "en");
        assert_eq!(entry["role"], json!("Sales director"));
        assert_eq!(entry["name"], json!("María Gómez"));
    }

    #[test]
    fn roster_entry_keeps_base_role_without_translation() {
        let entry = advisor_entry(&advisor(), "es");
        assert_eq!(entry["role"], json!("Directora comercial"));
    }
}
