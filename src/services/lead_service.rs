use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::api::text::{plausible_email, sanitize_text};
use crate::config::config;

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("{0}")]
    Invalid(String),

    #[error("Referenced record does not exist")]
    InvalidReference,

    #[error("Failed to save lead")]
    SaveFailed,
}

/// Raw contact-form submission, field names as the front end sends them.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub property_id: Option<String>,
    pub agent_id: Option<String>,
    pub source: Option<String>,
}

/// Validated, sanitized lead ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub mensaje: Option<String>,
    pub propiedad_id: Option<Uuid>,
    pub asesor_id: Option<Uuid>,
    pub origen: Option<String>,
}

/// Validates and sanitizes a submission. Free text is HTML-escaped and
/// bounded; malformed UUID foreign keys are nulled out silently rather than
/// rejecting the whole submission.
pub fn validate_lead(input: &LeadInput) -> Result<NewLead, LeadError> {
    let cfg = &config().leads;

    let nombre = required_text(input.name.as_deref(), "name", cfg.max_name_length)?;
    let email = required_text(input.email.as_deref(), "email", 254)?;
    let telefono = required_text(input.phone.as_deref(), "phone", 30)?;

    if !plausible_email(&email) {
        return Err(LeadError::Invalid("Invalid email address".to_string()));
    }
    if !is_plausible_phone(&telefono) {
        return Err(LeadError::Invalid("Invalid phone number".to_string()));
    }

    let mensaje = input
        .message
        .as_deref()
        .map(|m| sanitize_text(m, cfg.max_message_length))
        .filter(|m| !m.is_empty());

    Ok(NewLead {
        nombre,
        email,
        telefono,
        mensaje,
        propiedad_id: parse_uuid_or_null(input.property_id.as_deref()),
        asesor_id: parse_uuid_or_null(input.agent_id.as_deref()),
        origen: input
            .source
            .as_deref()
            .map(|s| sanitize_text(s, 60))
            .filter(|s| !s.is_empty()),
    })
}

fn required_text(value: Option<&str>, field: &str, max: usize) -> Result<String, LeadError> {
    let text = value.map(|v| sanitize_text(v, max)).unwrap_or_default();
    if text.is_empty() {
        return Err(LeadError::Invalid(format!("Missing required field: {}", field)));
    }
    Ok(text)
}

fn is_plausible_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= 7
}

fn parse_uuid_or_null(value: Option<&str>) -> Option<Uuid> {
    value.and_then(|v| Uuid::parse_str(v.trim()).ok())
}

pub struct LeadService {
    pool: PgPool,
}

impl LeadService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one row with estado `new`. Foreign-key violations become the
    /// domain "invalid reference" error; everything else collapses to a
    /// generic save failure.
    pub async fn create(&self, tenant_id: Uuid, lead: NewLead) -> Result<Uuid, LeadError> {
        let result: Result<(Uuid,), sqlx::Error> = sqlx::query_as(
            "INSERT INTO leads (tenant_id, nombre, email, telefono, mensaje,
                                propiedad_id, asesor_id, origen, estado)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'new')
             RETURNING id",
        )
        .bind(tenant_id)
        .bind(&lead.nombre)
        .bind(&lead.email)
        .bind(&lead.telefono)
        .bind(&lead.mensaje)
        .bind(lead.propiedad_id)
        .bind(lead.asesor_id)
        .bind(&lead.origen)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok((id,)) => Ok(id),
            Err(sqlx::Error::Database(db_err)) if is_fk_violation(db_err.as_ref()) => {
                Err(LeadError::InvalidReference)
            }
            Err(e) => {
                tracing::error!(component = "leads", "insert failed: {}", e);
                Err(LeadError::SaveFailed)
            }
        }
    }
}

// SQLSTATE 23503 = foreign_key_violation
fn is_fk_violation(err: &dyn sqlx::error::DatabaseError) -> bool {
    err.code().as_deref() == Some("23503")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> LeadInput {
        LeadInput {
            name: Some("Ana Pérez".to_string()),
            email: Some("ana@example.com".to_string()),
            phone: Some("809-555-0123".to_string()),
            message: Some("Me interesa la propiedad".to_string()),
            property_id: None,
            agent_id: None,
            source: Some("web".to_string()),
        }
    }

    #[test]
    fn accepts_a_complete_submission() {
        let lead = validate_lead(&input()).unwrap();
        assert_eq!(lead.nombre, "Ana Pérez");
        assert_eq!(lead.origen.as_deref(), Some("web"));
    }

    #[test]
    fn rejects_missing_required_fields() {
        for field in ["name", "email", "phone"] {
            let mut i = input();
            match field {
                "name" => i.name = None,
                "email" => i.email = Some("   ".to_string()),
                _ => i.phone = Some(String::new()),
            }
            assert!(matches!(validate_lead(&i), Err(LeadError::Invalid(_))));
        }
    }

    #[test]
    fn rejects_malformed_email_and_phone() {
        let mut i = input();
        i.email = Some("not-an-email".to_string());
        assert!(validate_lead(&i).is_err());

        let mut i = input();
        i.phone = Some("12-34".to_string());
        assert!(validate_lead(&i).is_err());
    }

    #[test]
    fn malformed_foreign_keys_are_nulled_not_rejected() {
        let mut i = input();
        i.property_id = Some("not-a-uuid".to_string());
        i.agent_id = Some("".to_string());

        let lead = validate_lead(&i).unwrap();
        assert_eq!(lead.propiedad_id, None);
        assert_eq!(lead.asesor_id, None);
    }

    #[test]
    fn well_formed_foreign_keys_are_kept() {
        let id = Uuid::new_v4();
        let mut i = input();
        i.property_id = Some(id.to_string());

        let lead = validate_lead(&i).unwrap();
        assert_eq!(lead.propiedad_id, Some(id));
    }

    #[test]
    fn message_is_escaped_and_bounded() {
        let mut i = input();
        i.message = Some("<b>hola</b>".to_string());

        let lead = validate_lead(&i).unwrap();
        let mensaje = lead.mensaje.unwrap();
        assert!(!mensaje.contains('<'));
        assert!(mensaje.contains("&lt;b&gt;"));
    }
}
