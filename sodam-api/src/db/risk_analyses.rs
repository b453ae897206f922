//! Risk classification history

use sodam_common::db::RiskAnalysisRecord;
use sodam_common::{Error, Result};
use sqlx::{Row, SqlitePool};

use super::{parse_id, parse_timestamp};

/// Save one classification run
pub async fn save_analysis(pool: &SqlitePool, record: &RiskAnalysisRecord) -> Result<()> {
    let analysis_data = serde_json::to_string(&record.analysis_data)
        .map_err(|e| Error::Internal(format!("Failed to serialize analysis data: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO risk_analyses (
            id, market_code, industry, risk_type, risk_score,
            health_score, analysis_data, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.id.to_string())
    .bind(&record.market_code)
    .bind(&record.industry)
    .bind(&record.risk_type)
    .bind(record.risk_score)
    .bind(record.health_score)
    .bind(&analysis_data)
    .bind(record.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Classifications for a market, newest first
pub async fn list_for_market(
    pool: &SqlitePool,
    market_code: &str,
    limit: u32,
) -> Result<Vec<RiskAnalysisRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT id, market_code, industry, risk_type, risk_score,
               health_score, analysis_data, created_at
        FROM risk_analyses
        WHERE market_code = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(market_code)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let id: String = row.get("id");
            let analysis_data: String = row.get("analysis_data");
            let analysis_data = serde_json::from_str(&analysis_data).map_err(|e| {
                Error::Internal(format!("Failed to deserialize analysis data: {}", e))
            })?;
            let created_at: String = row.get("created_at");

            Ok(RiskAnalysisRecord {
                id: parse_id(&id)?,
                market_code: row.get("market_code"),
                industry: row.get("industry"),
                risk_type: row.get("risk_type"),
                risk_score: row.get("risk_score"),
                health_score: row.get("health_score"),
                analysis_data,
                created_at: parse_timestamp("created_at", &created_at)?,
            })
        })
        .collect()
}
