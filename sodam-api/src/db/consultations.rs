//! Consultation bookings

use sodam_common::db::ConsultationRecord;
use sodam_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_id, parse_timestamp};

pub async fn insert(pool: &SqlitePool, record: &ConsultationRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO consultations (
            id, expert_id, requester_name, contact, consultation_type,
            preferred_time, message, status, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.id.to_string())
    .bind(&record.expert_id)
    .bind(&record.requester_name)
    .bind(&record.contact)
    .bind(&record.consultation_type)
    .bind(&record.preferred_time)
    .bind(&record.message)
    .bind(&record.status)
    .bind(record.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a booking by id
///
/// **Returns:** `Error::NotFound` when no booking has this id
pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<ConsultationRecord> {
    let row = sqlx::query(
        r#"
        SELECT id, expert_id, requester_name, contact, consultation_type,
               preferred_time, message, status, created_at
        FROM consultations
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("상담 신청을 찾을 수 없습니다: {}", id)))?;

    let stored_id: String = row.get("id");
    let created_at: String = row.get("created_at");

    Ok(ConsultationRecord {
        id: parse_id(&stored_id)?,
        expert_id: row.get("expert_id"),
        requester_name: row.get("requester_name"),
        contact: row.get("contact"),
        consultation_type: row.get("consultation_type"),
        preferred_time: row.get("preferred_time"),
        message: row.get("message"),
        status: row.get("status"),
        created_at: parse_timestamp("created_at", &created_at)?,
    })
}
