//! Risk archetype classification
//!
//! Each market's indicators are bucketed into 0–100 sub-scores, which feed
//! four archetype formulas. The archetype with the highest score is the
//! primary risk; the next two are reported as secondary risks.

mod playbook;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sodam_common::db::RiskAnalysisRecord;
use sodam_common::{Error, Result};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub use playbook::{Mitigation, RiskCase, RiskFactor};

use super::diagnosis::{DiagnosisService, HealthScoreParams};
use super::stats::round2;
use crate::catalog::{Catalog, RiskProfile};

/// The four market risk archetypes, in tie-breaking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskType {
    #[serde(rename = "유입 저조형", alias = "inflow_weak")]
    InflowWeak,
    #[serde(rename = "과포화 경쟁형", alias = "over_saturated")]
    OverSaturated,
    #[serde(rename = "소비력 약형", alias = "low_spending")]
    LowSpending,
    #[serde(rename = "성장 잠재형", alias = "growth_limited")]
    GrowthLimited,
}

impl RiskType {
    pub const ALL: [RiskType; 4] = [
        RiskType::InflowWeak,
        RiskType::OverSaturated,
        RiskType::LowSpending,
        RiskType::GrowthLimited,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskType::InflowWeak => "유입 저조형",
            RiskType::OverSaturated => "과포화 경쟁형",
            RiskType::LowSpending => "소비력 약형",
            RiskType::GrowthLimited => "성장 잠재형",
        }
    }

    fn key(self) -> &'static str {
        match self {
            RiskType::InflowWeak => "inflow_weak",
            RiskType::OverSaturated => "over_saturated",
            RiskType::LowSpending => "low_spending",
            RiskType::GrowthLimited => "growth_limited",
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskType {
    type Err = Error;

    /// Accepts the Korean label or the snake_case key
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        RiskType::ALL
            .into_iter()
            .find(|t| t.label() == s || t.key() == s)
            .ok_or_else(|| Error::InvalidInput(format!("지원하지 않는 리스크 유형입니다: {}", s)))
    }
}

/// Severity label for an archetype score
pub fn risk_level(score: f64) -> &'static str {
    match score {
        s if s >= 80.0 => "매우 높음",
        s if s >= 60.0 => "높음",
        s if s >= 40.0 => "보통",
        _ => "낮음",
    }
}

/// Bucketed indicator scores (higher is healthier)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorScores {
    pub foot_traffic: f64,
    pub card_sales: f64,
    pub competition: f64,
    pub consumption: f64,
    pub growth: f64,
}

impl IndicatorScores {
    pub fn from_profile(profile: &RiskProfile) -> Self {
        let change = |value: f64, threshold: f64| {
            if value > threshold {
                100.0
            } else if value > 0.0 {
                80.0
            } else if value > -threshold {
                60.0
            } else {
                40.0
            }
        };

        let competition = match profile.same_industry_ratio {
            r if r > 30.0 => 20.0,
            r if r > 20.0 => 40.0,
            r if r > 10.0 => 60.0,
            _ => 80.0,
        };
        let consumption = match profile.average_income {
            i if i > 40_000_000.0 => 100.0,
            i if i > 30_000_000.0 => 80.0,
            i if i > 20_000_000.0 => 60.0,
            _ => 40.0,
        };
        let growth = match profile.growth_potential {
            g if g > 80.0 => 100.0,
            g if g > 60.0 => 80.0,
            g if g > 40.0 => 60.0,
            _ => 40.0,
        };

        Self {
            foot_traffic: change(profile.foot_traffic_change, 5.0),
            card_sales: change(profile.card_sales_change, 3.0),
            competition,
            consumption,
            growth,
        }
    }

    /// Archetype score for these indicators
    pub fn archetype_score(&self, risk_type: RiskType, same_industry_ratio: f64) -> f64 {
        match risk_type {
            RiskType::InflowWeak => {
                (100.0 - self.foot_traffic) * 0.6 + (100.0 - self.card_sales) * 0.4
            }
            RiskType::OverSaturated => {
                (100.0 - self.competition) * 0.8 + (same_industry_ratio * 2.0).min(100.0) * 0.2
            }
            RiskType::LowSpending => {
                (100.0 - self.consumption) * 0.7 + (100.0 - self.card_sales) * 0.3
            }
            RiskType::GrowthLimited => {
                (100.0 - self.growth) * 0.5
                    + (100.0 - self.foot_traffic) * 0.3
                    + (100.0 - self.card_sales) * 0.2
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskScore {
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub score: f64,
}

impl RiskScore {
    fn rounded(self) -> Self {
        Self {
            score: round2(self.score),
            ..self
        }
    }
}

/// Highest score first, compared unrounded.
///
/// The sort is stable, so equal scores keep declaration order.
fn rank(scores: &[RiskScore]) -> Vec<RiskScore> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskClassification {
    pub market_code: String,
    pub market_name: &'static str,
    pub industry: Option<String>,
    pub primary_risk_type: RiskType,
    pub primary_risk_score: f64,
    pub secondary_risks: Vec<RiskScore>,
    pub risk_breakdown: Vec<RiskScore>,
    pub risk_level: &'static str,
    pub indicator_scores: IndicatorScores,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub health_score: Option<f64>,
    pub analyzed_at: DateTime<Utc>,
}

impl RiskClassification {
    /// History row for this classification
    pub fn to_record(&self) -> Result<RiskAnalysisRecord> {
        let analysis_data = serde_json::to_value(self)
            .map_err(|e| Error::Internal(format!("Failed to serialize classification: {}", e)))?;

        Ok(RiskAnalysisRecord {
            id: Uuid::new_v4(),
            market_code: self.market_code.clone(),
            industry: self.industry.clone(),
            risk_type: self.primary_risk_type.label().to_string(),
            risk_score: self.primary_risk_score,
            health_score: self.health_score,
            analysis_data,
            created_at: self.analyzed_at,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskDetail {
    pub market_code: String,
    pub industry: Option<String>,
    pub risk_type: RiskType,
    pub current_score: f64,
    pub risk_level: &'static str,
    pub risk_factors: &'static [RiskFactor],
    pub success_cases: &'static [RiskCase],
    pub action_plan: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskTypeInfo {
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub description: &'static str,
    pub key_indicators: Vec<&'static str>,
    pub severity_levels: [&'static str; 4],
}

#[derive(Debug, Clone, Serialize)]
pub struct MitigationGroup {
    pub risk_type: RiskType,
    pub strategies: &'static [Mitigation],
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailParams {
    pub risk_type: String,
    #[serde(default)]
    pub industry: Option<String>,
}

fn analysis_text(risk_type: RiskType, score: f64) -> String {
    format!(
        "{}: {}입니다. (리스크 점수: {:.1})",
        risk_type.label(),
        playbook::playbook(risk_type).description,
        score
    )
}

fn recommendations(risk_type: RiskType, score: f64) -> Vec<String> {
    let mut items: Vec<String> = playbook::playbook(risk_type)
        .recommendations
        .iter()
        .map(|r| r.to_string())
        .collect();

    if score >= 80.0 {
        items.insert(0, "⚠️ 높은 리스크로 인해 신중한 검토가 필요합니다.".to_string());
    } else if score >= 60.0 {
        items.insert(0, "⚠️ 중간 리스크로 인해 개선 방안이 필요합니다.".to_string());
    }
    items
}

pub struct RiskService<'a> {
    catalog: &'a Catalog,
}

impl<'a> RiskService<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Unrounded archetype scores in declaration order
    fn scores(&self, market_code: &str) -> Result<(IndicatorScores, Vec<RiskScore>)> {
        let profile = self.catalog.risk_profile(market_code)?;
        let indicators = IndicatorScores::from_profile(profile);
        let scores = RiskType::ALL
            .into_iter()
            .map(|risk_type| RiskScore {
                risk_type,
                score: indicators.archetype_score(risk_type, profile.same_industry_ratio),
            })
            .collect();
        Ok((indicators, scores))
    }

    pub fn classify(
        &self,
        market_code: &str,
        industry: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<RiskClassification> {
        let market = self.catalog.market(market_code)?;
        let (indicator_scores, raw_scores) = self.scores(market_code)?;

        let mut ranked = rank(&raw_scores).into_iter().map(RiskScore::rounded);
        let primary = ranked
            .next()
            .ok_or_else(|| Error::Internal("No risk archetypes scored".to_string()))?;
        let secondary_risks = ranked.take(2).collect();
        let risk_breakdown = raw_scores.into_iter().map(RiskScore::rounded).collect();

        let health_score = DiagnosisService::new(self.catalog)
            .health_score(
                market_code,
                &HealthScoreParams {
                    industry: industry.map(str::to_string),
                    ..Default::default()
                },
            )
            .ok()
            .map(|h| h.total_score);

        Ok(RiskClassification {
            market_code: market_code.to_string(),
            market_name: market.name,
            industry: industry.map(str::to_string),
            primary_risk_type: primary.risk_type,
            primary_risk_score: primary.score,
            secondary_risks,
            risk_breakdown,
            risk_level: risk_level(primary.score),
            indicator_scores,
            analysis: analysis_text(primary.risk_type, primary.score),
            recommendations: recommendations(primary.risk_type, primary.score),
            health_score,
            analyzed_at: now,
        })
    }

    pub fn detailed_analysis(
        &self,
        market_code: &str,
        risk_type: RiskType,
        industry: Option<&str>,
    ) -> Result<RiskDetail> {
        let (_, scores) = self.scores(market_code)?;
        let current_score = scores
            .iter()
            .find(|s| s.risk_type == risk_type)
            .map(|s| round2(s.score))
            .unwrap_or(0.0);
        let book = playbook::playbook(risk_type);

        Ok(RiskDetail {
            market_code: market_code.to_string(),
            industry: industry.map(str::to_string),
            risk_type,
            current_score,
            risk_level: risk_level(current_score),
            risk_factors: &book.factors,
            success_cases: &book.cases,
            action_plan: &book.action_plan,
        })
    }
}

pub fn risk_types() -> Vec<RiskTypeInfo> {
    RiskType::ALL
        .into_iter()
        .map(|risk_type| {
            let book = playbook::playbook(risk_type);
            RiskTypeInfo {
                risk_type,
                description: book.description,
                key_indicators: book.factors.iter().map(|f| f.factor).collect(),
                severity_levels: ["낮음", "보통", "높음", "매우 높음"],
            }
        })
        .collect()
}

/// Mitigation strategies for one archetype, or for all of them
pub fn mitigation_strategies(risk_type: Option<RiskType>) -> Vec<MitigationGroup> {
    RiskType::ALL
        .into_iter()
        .filter(|t| risk_type.map_or(true, |wanted| wanted == *t))
        .map(|t| MitigationGroup {
            risk_type: t,
            strategies: &playbook::playbook(t).mitigations,
        })
        .collect()
}
