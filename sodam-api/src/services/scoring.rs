//! Location scoring
//!
//! Scores a (region, industry, optional market) combination on three factor
//! groups and blends them into a single 0–100 score:
//!
//! | Group    | Weight | Factors |
//! |----------|--------|---------|
//! | market   | 0.40   | population density, competition, accessibility, rent, foot traffic |
//! | industry | 0.35   | survival, growth, stability, competition |
//! | regional | 0.25   | economy, demographics, infrastructure |

use serde::{Deserialize, Serialize};
use sodam_common::{Error, Result};
use tracing::debug;

use super::grade::{RiskBand, ScoreGrade};
use super::stats::{clamp_score, mean, round1};
use crate::catalog::{Catalog, IndustryProfile, Level, Market, RegionProfile, RiskProfile};

const MARKET_WEIGHT: f64 = 0.40;
const INDUSTRY_WEIGHT: f64 = 0.35;
const REGIONAL_WEIGHT: f64 = 0.25;

/// Below this a factor group triggers a recommendation
const WEAK_FACTOR: f64 = 50.0;
/// Below this a group gets specific advice in detailed recommendations
const DETAIL_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringParams {
    #[serde(default)]
    pub market_code: Option<String>,
    pub industry: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonParams {
    pub industry: String,
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorScore {
    pub factor: &'static str,
    pub score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorGroup {
    pub total: f64,
    pub factors: Vec<FactorScore>,
}

impl FactorGroup {
    fn from_factors(factors: Vec<FactorScore>) -> Self {
        let total = factors.iter().map(|f| f.score * f.weight).sum::<f64>();
        Self {
            total: round1(total),
            factors,
        }
    }

    fn score(&self, factor: &str) -> Option<f64> {
        self.factors
            .iter()
            .find(|f| f.factor == factor)
            .map(|f| f.score)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub market: FactorGroup,
    pub industry: FactorGroup,
    pub regional: FactorGroup,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorRisk {
    pub factor: &'static str,
    pub score: f64,
    pub risk_level: RiskBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub risk_level: RiskBand,
    pub risk_factors: Vec<FactorRisk>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationScore {
    pub market_code: Option<String>,
    pub industry: String,
    pub region: String,
    pub total_score: f64,
    pub grade: ScoreGrade,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<String>,
    pub risk_assessment: RiskAssessment,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionComparison {
    pub rank: usize,
    pub region: String,
    pub market_code: Option<String>,
    pub total_score: f64,
    pub grade: ScoreGrade,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub score_range: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub industry: String,
    pub comparisons: Vec<RegionComparison>,
    pub best_location: String,
    pub summary: ComparisonSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionStep {
    pub step: usize,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedRecommendations {
    pub market_code: Option<String>,
    pub industry: String,
    pub region: String,
    pub total_score: f64,
    pub grade: ScoreGrade,
    pub overall: &'static str,
    pub market_specific: Vec<&'static str>,
    pub industry_specific: Vec<&'static str>,
    pub regional_specific: Vec<&'static str>,
    pub action_plan: Vec<ActionStep>,
}

fn level_score(level: Level) -> f64 {
    match level {
        Level::High => 40.0,
        Level::Medium => 60.0,
        Level::Low => 80.0,
    }
}

fn factor(factor: &'static str, score: f64, weight: f64) -> FactorScore {
    FactorScore {
        factor,
        score: round1(clamp_score(score)),
        weight,
    }
}

const GO_PLAN: [(&str, &str); 5] = [
    ("시장 조사", "목표 고객층과 경쟁 업체의 가격, 상품 구성을 조사합니다"),
    ("사업 계획 수립", "예상 매출과 비용을 바탕으로 손익분기점을 계산합니다"),
    ("자금 조달", "정책자금과 금융기관 대출 조건을 비교하여 자금을 마련합니다"),
    ("점포 확보", "임대 조건을 협상하고 인테리어와 설비를 준비합니다"),
    ("개업 및 홍보", "오픈 이벤트와 온라인 홍보로 초기 고객을 확보합니다"),
];

const CAUTION_PLAN: [(&str, &str); 4] = [
    ("정밀 상권 분석", "시간대별 유동인구와 주변 업종 구성을 직접 확인합니다"),
    ("대안 입지 검토", "인근 지역과 점수를 비교하여 더 나은 입지를 찾습니다"),
    ("전문가 상담", "소상공인 지원센터 컨설팅으로 사업 타당성을 점검합니다"),
    ("리스크 관리 계획", "초기 투자를 최소화하고 철수 기준을 미리 정합니다"),
];

pub struct ScoringService<'a> {
    catalog: &'a Catalog,
}

impl<'a> ScoringService<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Industry characteristics scaled by the industry's spend share
    fn industry_data(&self, industry: &str) -> IndustryProfile {
        let base = self.catalog.industry_profile(industry);
        let ratio = self.catalog.major_ratio(industry);
        let mean_ratio = self.catalog.mean_major_ratio();
        let adj = if ratio > 0.0 && mean_ratio > 0.0 {
            (ratio / mean_ratio).clamp(0.5, 1.5)
        } else {
            1.0
        };

        IndustryProfile {
            survival_rate: base.survival_rate * adj,
            growth_potential: base.growth_potential * adj,
            risk_level: base.risk_level / adj,
            competition_intensity: base.competition_intensity * adj,
        }
    }

    /// Regional characteristics scaled by the regional spend index
    fn regional_data(&self, region: &str) -> RegionProfile {
        let base = self.catalog.region_profile(region);
        let index = self.catalog.regional_index(region);
        let adj = if index > 0.0 { index / 100.0 } else { 1.0 };

        RegionProfile {
            population_density: base.population_density * adj,
            economic_growth: base.economic_growth * adj,
            unemployment_rate: base.unemployment_rate / adj,
            average_income: base.average_income * adj,
            infrastructure_score: base.infrastructure_score * adj,
        }
    }

    fn market_factors(
        &self,
        region: &RegionProfile,
        market: Option<(&Market, &RiskProfile)>,
    ) -> FactorGroup {
        let population = (region.population_density / 5000.0 * 100.0).min(100.0);
        let (competition, accessibility, rent, foot_traffic) = match market {
            Some((m, profile)) => (
                level_score(m.competition_level),
                profile.accessibility,
                level_score(profile.rent_level),
                (m.foot_traffic as f64 / 200_000.0 * 100.0).min(100.0),
            ),
            None => (70.0, 75.0, 60.0, 65.0),
        };

        FactorGroup::from_factors(vec![
            factor("population_density", population, 0.25),
            factor("competition_level", competition, 0.20),
            factor("accessibility", accessibility, 0.15),
            factor("rent_cost", rent, 0.20),
            factor("foot_traffic", foot_traffic, 0.20),
        ])
    }

    fn industry_factors(&self, data: &IndustryProfile) -> FactorGroup {
        FactorGroup::from_factors(vec![
            factor("survival_rate", data.survival_rate, 0.30),
            factor("growth_potential", data.growth_potential * 100.0, 0.25),
            factor("stability", (1.0 - data.risk_level) * 100.0, 0.25),
            factor("competition", (1.0 - data.competition_intensity) * 100.0, 0.20),
        ])
    }

    fn regional_factors(&self, data: &RegionProfile) -> FactorGroup {
        let growth = (data.economic_growth / 3.0 * 100.0).min(100.0);
        let employment = ((5.0 - data.unemployment_rate) / 5.0 * 100.0).max(0.0);
        let income = (data.average_income / 5_000_000.0 * 100.0).min(100.0);
        let economic = growth * 0.4 + employment * 0.3 + income * 0.3;

        FactorGroup::from_factors(vec![
            factor("economic", economic, 0.40),
            factor("demographics", 70.0, 0.30),
            factor("infrastructure", data.infrastructure_score * 100.0, 0.30),
        ])
    }

    pub fn calculate(&self, params: &ScoringParams) -> Result<LocationScore> {
        if params.industry.trim().is_empty() || params.region.trim().is_empty() {
            return Err(Error::InvalidInput("industry and region are required".to_string()));
        }

        let market = match params.market_code.as_deref() {
            Some(code) => Some((
                self.catalog.market(code)?,
                self.catalog.risk_profile(code)?,
            )),
            None => None,
        };

        let regional_data = self.regional_data(&params.region);
        let industry_data = self.industry_data(&params.industry);

        let breakdown = ScoreBreakdown {
            market: self.market_factors(&regional_data, market),
            industry: self.industry_factors(&industry_data),
            regional: self.regional_factors(&regional_data),
        };

        let total_score = round1(
            breakdown.market.total * MARKET_WEIGHT
                + breakdown.industry.total * INDUSTRY_WEIGHT
                + breakdown.regional.total * REGIONAL_WEIGHT,
        );

        debug!(
            industry = %params.industry,
            region = %params.region,
            total_score,
            "location score"
        );

        Ok(LocationScore {
            market_code: params.market_code.clone(),
            industry: params.industry.clone(),
            region: params.region.clone(),
            total_score,
            grade: ScoreGrade::from_score(total_score),
            recommendations: recommendations(&breakdown),
            risk_assessment: risk_assessment(total_score, &breakdown),
            breakdown,
        })
    }

    /// Score every region for one industry and rank them
    pub fn compare(&self, params: &ComparisonParams) -> Result<Comparison> {
        if params.regions.len() < 2 {
            return Err(Error::InvalidInput(
                "비교하려면 최소 2개 지역이 필요합니다".to_string(),
            ));
        }

        let mut comparisons = Vec::with_capacity(params.regions.len());
        for region in &params.regions {
            let market_code = self
                .catalog
                .representative_market(region)
                .map(|m| m.code.to_string());
            let score = self.calculate(&ScoringParams {
                market_code: market_code.clone(),
                industry: params.industry.clone(),
                region: region.clone(),
            })?;
            comparisons.push(RegionComparison {
                rank: 0,
                region: region.clone(),
                market_code,
                total_score: score.total_score,
                grade: score.grade,
            });
        }

        // Stable: equal scores keep request order
        comparisons.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        for (i, c) in comparisons.iter_mut().enumerate() {
            c.rank = i + 1;
        }

        let scores: Vec<f64> = comparisons.iter().map(|c| c.total_score).collect();
        let highest = scores.iter().cloned().fold(f64::MIN, f64::max);
        let lowest = scores.iter().cloned().fold(f64::MAX, f64::min);

        Ok(Comparison {
            industry: params.industry.clone(),
            best_location: comparisons[0].region.clone(),
            summary: ComparisonSummary {
                average_score: round1(mean(&scores)),
                highest_score: highest,
                lowest_score: lowest,
                score_range: round1(highest - lowest),
            },
            comparisons,
        })
    }

    pub fn detailed_recommendations(&self, params: &ScoringParams) -> Result<DetailedRecommendations> {
        let score = self.calculate(params)?;
        let b = &score.breakdown;

        let overall = if score.total_score >= 80.0 {
            "매우 우수한 입지로 적극적인 창업을 권장합니다"
        } else if score.total_score >= 60.0 {
            "양호한 입지이나 일부 조건의 보완이 필요합니다"
        } else {
            "입지 조건이 불리하므로 신중한 검토가 필요합니다"
        };

        let market_specific = if b.market.total < DETAIL_THRESHOLD {
            vec![
                "유동인구를 끌어들일 수 있는 간판과 외관 개선을 검토하세요",
                "배달과 온라인 주문으로 상권 한계를 보완하세요",
            ]
        } else {
            vec!["상권의 높은 유동인구를 활용한 오프라인 프로모션을 진행하세요"]
        };

        let industry_specific = if b.industry.total < DETAIL_THRESHOLD {
            vec![
                "업종 생존율이 낮으므로 초기 고정비를 최소화하세요",
                "유사 업종 성공 사례를 분석하여 차별화 포인트를 찾으세요",
            ]
        } else {
            vec!["업종 성장세를 활용하여 신규 고객층을 확보하세요"]
        };

        let regional_specific = if b.regional.total < DETAIL_THRESHOLD {
            vec![
                "지역 경기 여건을 고려하여 가격 경쟁력을 확보하세요",
                "지자체 소상공인 지원사업을 적극 활용하세요",
            ]
        } else {
            vec!["지역 인프라를 활용한 접근성 홍보를 강화하세요"]
        };

        let plan: &[(&str, &str)] = if score.total_score >= 70.0 {
            &GO_PLAN
        } else {
            &CAUTION_PLAN
        };
        let action_plan = plan
            .iter()
            .enumerate()
            .map(|(i, &(title, description))| ActionStep {
                step: i + 1,
                title,
                description,
            })
            .collect();

        Ok(DetailedRecommendations {
            market_code: score.market_code.clone(),
            industry: score.industry.clone(),
            region: score.region.clone(),
            total_score: score.total_score,
            grade: score.grade,
            overall,
            market_specific,
            industry_specific,
            regional_specific,
            action_plan,
        })
    }
}

fn recommendations(breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut items = Vec::new();

    if breakdown
        .market
        .score("population_density")
        .is_some_and(|s| s < WEAK_FACTOR)
    {
        items.push("인구 밀도가 낮은 지역이므로 배달과 온라인 판매 채널을 함께 운영하세요".to_string());
    }
    if breakdown
        .market
        .score("competition_level")
        .is_some_and(|s| s < WEAK_FACTOR)
    {
        items.push("경쟁이 치열한 상권이므로 차별화된 서비스 전략이 필요합니다".to_string());
    }
    if breakdown.industry.total < WEAK_FACTOR {
        items.push("업종 전망이 불리하므로 사업 계획을 보수적으로 수립하세요".to_string());
    }
    if breakdown.regional.total < WEAK_FACTOR {
        items.push("지역 경제 여건이 좋지 않으므로 초기 투자를 최소화하세요".to_string());
    }

    if items.is_empty() {
        items.push("전반적으로 양호한 입지입니다. 세부 운영 전략에 집중하세요".to_string());
    }
    items
}

fn risk_assessment(total_score: f64, breakdown: &ScoreBreakdown) -> RiskAssessment {
    let groups = [
        ("market", breakdown.market.total),
        ("industry", breakdown.industry.total),
        ("regional", breakdown.regional.total),
    ];

    RiskAssessment {
        risk_score: total_score,
        risk_level: RiskBand::from_score(total_score),
        risk_factors: groups
            .iter()
            .map(|&(factor, score)| FactorRisk {
                factor,
                score,
                risk_level: RiskBand::from_score(score),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ScoringService<'static> {
        ScoringService::new(Catalog::builtin())
    }

    fn params(market_code: Option<&str>, industry: &str, region: &str) -> ScoringParams {
        ScoringParams {
            market_code: market_code.map(str::to_string),
            industry: industry.to_string(),
            region: region.to_string(),
        }
    }

    #[test]
    fn test_daejeon_food_without_market() {
        let score = service().calculate(&params(None, "식음료업", "대전광역시")).unwrap();

        assert_eq!(score.breakdown.market.score("population_density"), Some(47.9));
        assert!((score.breakdown.market.total - 62.2).abs() <= 0.1);
        // Share adjustment clamps at 1.5: survival and growth saturate, competition floors
        assert_eq!(score.breakdown.industry.total, 75.0);
        assert_eq!(score.breakdown.industry.score("competition"), Some(0.0));
        assert_eq!(score.breakdown.regional.total, 62.7);
        assert!((score.total_score - 66.8).abs() <= 0.1);
        assert_eq!(score.grade, ScoreGrade::B);
        assert_eq!(score.risk_assessment.risk_level, RiskBand::Medium);
    }

    #[test]
    fn test_market_code_changes_market_factors() {
        let svc = service();
        let generic = svc.calculate(&params(None, "숙박업", "대전광역시")).unwrap();
        let station = svc
            .calculate(&params(Some("10000"), "숙박업", "대전광역시"))
            .unwrap();

        assert_eq!(generic.breakdown.industry.total, station.breakdown.industry.total);
        assert_eq!(station.breakdown.market.score("competition_level"), Some(40.0));
        assert_eq!(station.breakdown.market.score("accessibility"), Some(90.0));
        assert_eq!(station.breakdown.market.score("foot_traffic"), Some(97.5));
    }

    #[test]
    fn test_unknown_market_code_is_rejected() {
        let result = service().calculate(&params(Some("99999"), "숙박업", "대전광역시"));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let result = service().calculate(&params(None, " ", "대전광역시"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_scores_are_bounded_for_unknown_inputs() {
        let score = service().calculate(&params(None, "우주항공업", "제주특별자치도")).unwrap();
        assert!((0.0..=100.0).contains(&score.total_score));
        assert!(!score.recommendations.is_empty());
        assert_eq!(score.risk_assessment.risk_factors.len(), 3);
    }

    #[test]
    fn test_compare_ranks_descending() {
        let comparison = service()
            .compare(&ComparisonParams {
                industry: "여가서비스업".to_string(),
                regions: vec![
                    "광주광역시".to_string(),
                    "서울특별시".to_string(),
                    "대전광역시".to_string(),
                ],
            })
            .unwrap();

        let ranks: Vec<usize> = comparison.comparisons.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(comparison
            .comparisons
            .windows(2)
            .all(|w| w[0].total_score >= w[1].total_score));
        assert_eq!(comparison.best_location, comparison.comparisons[0].region);
        assert_eq!(
            comparison.summary.highest_score,
            comparison.comparisons[0].total_score
        );
        let daejeon = comparison
            .comparisons
            .iter()
            .find(|c| c.region == "대전광역시")
            .unwrap();
        assert_eq!(daejeon.market_code.as_deref(), Some("10000"));
    }

    #[test]
    fn test_compare_requires_two_regions() {
        let result = service().compare(&ComparisonParams {
            industry: "여행업".to_string(),
            regions: vec!["대전광역시".to_string()],
        });
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_detailed_recommendations_action_plan() {
        let detail = service()
            .detailed_recommendations(&params(None, "식음료업", "대전광역시"))
            .unwrap();

        // Total is below the 70 point go threshold
        assert_eq!(detail.action_plan.len(), 4);
        assert_eq!(detail.action_plan[0].step, 1);
        assert_eq!(detail.overall, "양호한 입지이나 일부 조건의 보완이 필요합니다");
    }
}
