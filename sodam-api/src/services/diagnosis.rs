//! Core market diagnosis
//!
//! Five indicators are derived from the regional consumption series of a
//! market: foot traffic, card sales, same-industry competition, business
//! churn (startup/closure) and dwell time. The health score combines the
//! grade points of four of them and the business-rate score itself, scaled
//! by category-specific factors.

use serde::{Deserialize, Serialize};
use sodam_common::{Error, Result};
use tracing::debug;

use super::grade::Grade;
use super::stats::{
    clamp_score, market_adjustment, mean, pct_changes, round1, round2, std_dev, total_change,
};
use crate::catalog::{Catalog, CategoryFactors, ConsumptionPoint, Market};

const FOOT_TRAFFIC_THRESHOLD: f64 = 5.0;
const CARD_SALES_THRESHOLD: f64 = 3.0;

const WEIGHT_FOOT_TRAFFIC: f64 = 0.25;
const WEIGHT_CARD_SALES: f64 = 0.25;
const WEIGHT_BUSINESS_RATES: f64 = 0.25;
const WEIGHT_DWELL_TIME: f64 = 0.15;
const WEIGHT_COMPETITION: f64 = 0.10;

/// Direction of a monthly series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    #[serde(rename = "증가")]
    Rising,
    #[serde(rename = "감소")]
    Falling,
    #[serde(rename = "안정")]
    Stable,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTraffic {
    pub month: &'static str,
    /// Thousands of visits
    pub traffic: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FootTrafficAnalysis {
    pub market_code: String,
    pub market_name: &'static str,
    pub industry: Option<String>,
    /// Latest month, in thousands of visits
    pub current_monthly_traffic: i64,
    pub average_change_rate: f64,
    pub total_change_rate: f64,
    pub trend: Trend,
    pub grade: Grade,
    pub analysis: String,
    pub monthly_data: Vec<MonthlyTraffic>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySales {
    pub month: &'static str,
    pub sales: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardSalesAnalysis {
    pub market_code: String,
    pub market_name: &'static str,
    pub industry: Option<String>,
    pub current_monthly_sales: i64,
    pub average_change_rate: f64,
    pub total_change_rate: f64,
    pub trend: Trend,
    pub grade: Grade,
    pub analysis: String,
    pub monthly_data: Vec<MonthlySales>,
}

/// Competition density for one industry
#[derive(Debug, Clone, Serialize)]
pub struct IndustryCompetition {
    pub market_code: String,
    pub industry: String,
    pub major_category: &'static str,
    pub business_count: i64,
    pub total_businesses: i64,
    pub ratio: f64,
    pub competition_level: &'static str,
    pub grade: Grade,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndustryShare {
    pub major_category: &'static str,
    pub category: &'static str,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndustryBreakdown {
    pub market_code: String,
    pub industry_breakdown: Vec<IndustryShare>,
    pub analysis: String,
}

/// Same-industry analysis: one industry's density, or the full breakdown
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SameIndustryAnalysis {
    Industry(IndustryCompetition),
    Breakdown(IndustryBreakdown),
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessRatesAnalysis {
    pub market_code: String,
    pub startup_rate: f64,
    pub closure_rate: f64,
    pub survival_rate: f64,
    pub total_score: f64,
    pub grade: Grade,
    pub status: &'static str,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DwellTimeAnalysis {
    pub market_code: String,
    /// Minutes
    pub average_dwell_time: f64,
    pub peak_hours: Vec<&'static str>,
    pub weekend_ratio: f64,
    pub grade: Grade,
    pub status: &'static str,
    pub analysis: String,
}

/// Body of health-score and comprehensive requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthScoreParams {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentScore {
    pub grade: Grade,
    /// Component points after category adjustment
    pub score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthBreakdown {
    pub foot_traffic: ComponentScore,
    pub card_sales: ComponentScore,
    pub business_rates: ComponentScore,
    pub dwell_time: ComponentScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<ComponentScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthScore {
    pub market_code: String,
    pub market_name: &'static str,
    pub industry: Option<String>,
    pub total_score: f64,
    pub grade: Grade,
    pub health_status: &'static str,
    pub breakdown: HealthBreakdown,
    pub category_factors: CategoryFactors,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Indicator {
    pub key: &'static str,
    pub name: &'static str,
    pub grade: Grade,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComprehensiveDiagnosis {
    pub market_code: String,
    pub market_name: &'static str,
    pub industry: Option<String>,
    pub overall_score: f64,
    pub final_grade: Grade,
    pub health_status: &'static str,
    pub indicators: Vec<Indicator>,
    pub strengths: Vec<&'static str>,
    pub weaknesses: Vec<&'static str>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

struct TrendSummary {
    months: Vec<&'static str>,
    values: Vec<f64>,
    average_change: f64,
    total_change: f64,
    trend: Trend,
}

fn summarize(points: &[ConsumptionPoint], scale: f64) -> TrendSummary {
    let months = points.iter().map(|p| p.month).collect();
    let values: Vec<f64> = points.iter().map(|p| p.amount * scale).collect();

    if values.len() < 2 {
        return TrendSummary {
            months,
            values,
            average_change: 0.0,
            total_change: 0.0,
            trend: Trend::Stable,
        };
    }

    let average_change = mean(&pct_changes(&values));
    let trend = if average_change > 0.0 {
        Trend::Rising
    } else if average_change < 0.0 {
        Trend::Falling
    } else {
        Trend::Stable
    };

    TrendSummary {
        months,
        total_change: total_change(&values),
        values,
        average_change,
        trend,
    }
}

/// `None` for absent, empty or `전체` industry filters
fn specific(industry: Option<&str>) -> Option<&str> {
    industry
        .map(str::trim)
        .filter(|i| !i.is_empty() && *i != "전체")
}

fn health_grade(score: f64) -> (Grade, &'static str) {
    match score {
        s if s >= 90.0 => (Grade::A, "매우 건강"),
        s if s >= 80.0 => (Grade::B, "건강"),
        s if s >= 70.0 => (Grade::C, "보통"),
        s if s >= 60.0 => (Grade::D, "주의"),
        _ => (Grade::F, "위험"),
    }
}

fn health_recommendations(grade: Grade) -> Vec<String> {
    let texts: [&str; 3] = match grade {
        Grade::A | Grade::B => [
            "현재의 우수한 상권 환경을 유지하며 고객 충성도 프로그램을 운영하세요",
            "성과가 좋은 상품과 서비스를 중심으로 확장 가능성을 검토하세요",
            "주변 상권 변화를 정기적으로 모니터링하세요",
        ],
        Grade::C => [
            "유동인구 유입을 위한 지역 마케팅을 강화하세요",
            "경쟁 업체와 차별화되는 상품과 서비스를 개발하세요",
            "운영 비용을 점검하여 수익 구조를 개선하세요",
        ],
        _ => [
            "매출 하락 요인을 면밀히 분석하고 비용 구조를 재점검하세요",
            "업종 전환이나 입지 변경 가능성을 검토하세요",
            "소상공인 지원센터의 전문가 상담을 받아보세요",
        ],
    };
    texts.iter().map(|t| t.to_string()).collect()
}

pub struct DiagnosisService<'a> {
    catalog: &'a Catalog,
}

impl<'a> DiagnosisService<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Regional index relative to the national average (1.0 when unknown)
    fn regional_adjustment(&self, region: &str) -> f64 {
        let index = self.catalog.regional_index(region);
        if index > 0.0 {
            index / 100.0
        } else {
            1.0
        }
    }

    /// Major category share as a fraction (1.0 without a known industry)
    fn industry_weight(&self, industry: Option<&str>) -> f64 {
        industry
            .map(|i| self.catalog.major_ratio(i) / 100.0)
            .filter(|w| *w > 0.0)
            .unwrap_or(1.0)
    }

    fn series(
        &self,
        market: &Market,
        industry: Option<&str>,
        period_months: usize,
    ) -> Result<Vec<ConsumptionPoint>> {
        if period_months == 0 {
            return Err(Error::InvalidInput("period_months must be at least 1".to_string()));
        }

        let mut points = match industry {
            Some(i) => self.catalog.tourism_trend_by_industry(market.city, i),
            None => self.catalog.tourism_trend(market.city),
        };
        if points.is_empty() {
            return Err(Error::NotFound(format!(
                "소비 데이터가 없습니다: {}",
                market.city
            )));
        }

        let start = points.len().saturating_sub(period_months);
        Ok(points.split_off(start))
    }

    fn trend_for(
        &self,
        market: &Market,
        industry: Option<&str>,
        period_months: usize,
    ) -> Result<TrendSummary> {
        let points = self.series(market, industry, period_months)?;
        let scale = self.regional_adjustment(market.city) * self.industry_weight(industry);
        Ok(summarize(&points, scale))
    }

    pub fn foot_traffic(
        &self,
        market_code: &str,
        industry: Option<&str>,
        period_months: usize,
    ) -> Result<FootTrafficAnalysis> {
        let market = self.catalog.market(market_code)?;
        let industry = specific(industry);
        let summary = self.trend_for(market, industry, period_months)?;

        let grade = Grade::from_change(summary.average_change, FOOT_TRAFFIC_THRESHOLD);
        let avg = summary.average_change;
        let analysis = match grade {
            Grade::A => format!("유동인구가 월평균 {:.1}% 증가하여 매우 활발한 상권입니다.", avg),
            Grade::B => format!("유동인구가 월평균 {:.1}% 완만하게 증가하고 있습니다.", avg),
            Grade::C => format!("유동인구가 월평균 {:.1}% 소폭 감소하고 있어 주의가 필요합니다.", avg),
            _ => format!("유동인구가 월평균 {:.1}% 크게 감소하고 있어 대책이 필요합니다.", avg),
        };

        Ok(FootTrafficAnalysis {
            market_code: market_code.to_string(),
            market_name: market.name,
            industry: industry.map(str::to_string),
            current_monthly_traffic: summary.values.last().map_or(0, |v| (*v / 1000.0) as i64),
            average_change_rate: round2(summary.average_change),
            total_change_rate: round2(summary.total_change),
            trend: summary.trend,
            grade,
            analysis,
            monthly_data: summary
                .months
                .iter()
                .zip(summary.values.iter())
                .map(|(&month, v)| MonthlyTraffic {
                    month,
                    traffic: (*v / 1000.0) as i64,
                })
                .collect(),
        })
    }

    pub fn card_sales(
        &self,
        market_code: &str,
        industry: Option<&str>,
        period_months: usize,
    ) -> Result<CardSalesAnalysis> {
        let market = self.catalog.market(market_code)?;
        let industry = specific(industry);
        let summary = self.trend_for(market, industry, period_months)?;

        let grade = Grade::from_change(summary.average_change, CARD_SALES_THRESHOLD);
        let avg = summary.average_change;
        let analysis = match grade {
            Grade::A => format!("카드매출이 월평균 {:.1}% 증가하여 소비가 활발합니다.", avg),
            Grade::B => format!("카드매출이 월평균 {:.1}% 안정적으로 증가하고 있습니다.", avg),
            Grade::C => format!("카드매출이 월평균 {:.1}% 소폭 감소하고 있습니다.", avg),
            _ => format!("카드매출이 월평균 {:.1}% 크게 감소하여 소비 위축이 우려됩니다.", avg),
        };

        Ok(CardSalesAnalysis {
            market_code: market_code.to_string(),
            market_name: market.name,
            industry: industry.map(str::to_string),
            current_monthly_sales: summary.values.last().map_or(0, |v| *v as i64),
            average_change_rate: round2(summary.average_change),
            total_change_rate: round2(summary.total_change),
            trend: summary.trend,
            grade,
            analysis,
            monthly_data: summary
                .months
                .iter()
                .zip(summary.values.iter())
                .map(|(&month, v)| MonthlySales {
                    month,
                    sales: *v as i64,
                })
                .collect(),
        })
    }

    /// Competition density of one industry in a market
    pub fn competition(&self, market_code: &str, industry: &str) -> Result<IndustryCompetition> {
        self.catalog.market(market_code)?;
        let matched = self
            .catalog
            .find_industry(industry)
            .ok_or_else(|| Error::NotFound(format!("업종 정보를 찾을 수 없습니다: {}", industry)))?;

        let ratio = matched.ratio();
        let (competition_level, grade) = match ratio {
            r if r > 30.0 => ("매우 높음", Grade::D),
            r if r > 20.0 => ("높음", Grade::C),
            r if r > 10.0 => ("보통", Grade::B),
            _ => ("낮음", Grade::A),
        };

        Ok(IndustryCompetition {
            market_code: market_code.to_string(),
            industry: industry.to_string(),
            major_category: matched.row.major,
            business_count: (ratio * 10.0) as i64,
            total_businesses: 100,
            ratio,
            competition_level,
            grade,
            analysis: format!(
                "{} 업종 비율은 {:.1}%로 경쟁 강도가 {} 수준입니다.",
                industry, ratio, competition_level
            ),
        })
    }

    pub fn same_industry(
        &self,
        market_code: &str,
        industry: Option<&str>,
    ) -> Result<SameIndustryAnalysis> {
        if let Some(industry) = specific(industry) {
            return self
                .competition(market_code, industry)
                .map(SameIndustryAnalysis::Industry);
        }

        self.catalog.market(market_code)?;
        let industry_breakdown: Vec<IndustryShare> = self
            .catalog
            .industry_ratios()
            .iter()
            .map(|r| IndustryShare {
                major_category: r.major,
                category: r.minor,
                ratio: r.minor_ratio,
            })
            .collect();

        Ok(SameIndustryAnalysis::Breakdown(IndustryBreakdown {
            market_code: market_code.to_string(),
            analysis: format!("{}개 세부 업종의 지출 비중입니다.", industry_breakdown.len()),
            industry_breakdown,
        }))
    }

    pub fn business_rates(&self, market_code: &str) -> Result<BusinessRatesAnalysis> {
        let market = self.catalog.market(market_code)?;
        let values: Vec<f64> = self
            .catalog
            .tourism_trend(market.city)
            .iter()
            .map(|p| p.amount)
            .collect();
        let adj = market_adjustment(market_code);

        let avg = mean(&values);
        let (startup_rate, closure_rate) = if values.len() >= 2 && avg > 0.0 {
            let cv = std_dev(&values) / avg * 100.0;
            ((cv * 0.5 * adj).min(20.0), (cv * 0.3 * adj).min(15.0))
        } else {
            (12.0 * adj, 8.0 * adj)
        };
        let survival_rate = (100.0 - closure_rate).max(70.0);

        let startup_score = (startup_rate / 15.0 * 100.0).min(100.0);
        let closure_score = (100.0 - closure_rate / 10.0 * 100.0).max(0.0);
        let total_score = startup_score * 0.3 + closure_score * 0.3 + survival_rate * 0.4;

        let (grade, status) = match total_score {
            s if s >= 90.0 => (Grade::A, "매우 양호"),
            s if s >= 80.0 => (Grade::B, "양호"),
            s if s >= 70.0 => (Grade::C, "보통"),
            _ => (Grade::D, "우려"),
        };

        debug!(market_code, startup_rate, closure_rate, total_score, "business rates");

        Ok(BusinessRatesAnalysis {
            market_code: market_code.to_string(),
            startup_rate: round2(startup_rate),
            closure_rate: round2(closure_rate),
            survival_rate: round2(survival_rate),
            total_score: round1(total_score),
            grade,
            status,
            analysis: format!(
                "창업률 {:.1}%, 폐업률 {:.1}%로 사업 안정성이 {} 수준입니다.",
                startup_rate, closure_rate, status
            ),
        })
    }

    pub fn dwell_time(&self, market_code: &str) -> Result<DwellTimeAnalysis> {
        let market = self.catalog.market(market_code)?;
        let values: Vec<f64> = self
            .catalog
            .tourism_trend(market.city)
            .iter()
            .map(|p| p.amount)
            .collect();
        let adj = market_adjustment(market_code);

        let avg = mean(&values);
        let average_dwell_time = if values.len() >= 2 && avg > 0.0 {
            let stability = 1.0 - std_dev(&values) / avg;
            (30.0 + stability * 30.0) * adj
        } else {
            45.0 * adj
        };

        let (grade, status) = match average_dwell_time {
            t if t >= 60.0 => (Grade::A, "매우 우수"),
            t if t >= 45.0 => (Grade::B, "우수"),
            t if t >= 30.0 => (Grade::C, "보통"),
            _ => (Grade::D, "부족"),
        };

        Ok(DwellTimeAnalysis {
            market_code: market_code.to_string(),
            average_dwell_time: round1(average_dwell_time),
            peak_hours: vec!["12:00-14:00", "18:00-20:00"],
            weekend_ratio: 1.3,
            grade,
            status,
            analysis: format!(
                "평균 체류시간은 {:.1}분으로 {} 수준입니다.",
                average_dwell_time, status
            ),
        })
    }

    pub fn health_score(&self, market_code: &str, params: &HealthScoreParams) -> Result<HealthScore> {
        let market = self.catalog.market(market_code)?;
        let industry = specific(params.industry.as_deref());
        let factors = self
            .catalog
            .category_factors(params.category.as_deref(), params.sub_category.as_deref());

        let foot = self.foot_traffic(market_code, industry, 12)?;
        let card = self.card_sales(market_code, industry, 12)?;
        let rates = self.business_rates(market_code)?;
        let dwell = self.dwell_time(market_code)?;
        let competition = industry.and_then(|i| match self.competition(market_code, i) {
            Ok(c) => Some(c),
            Err(e) => {
                debug!("Competition unavailable for {}: {}", i, e);
                None
            }
        });

        // Indicator grades convert to points; business rates carry their own score
        let foot_score = foot.grade.points() * factors.traffic_factor;
        let card_score = card.grade.points() * factors.weight;
        let rates_score = rates.total_score * factors.weight;
        let dwell_score = dwell.grade.points() * factors.weight;
        let competition_score = competition
            .as_ref()
            .map(|c| (c.grade, c.grade.points() * factors.competition_factor));

        let component = |grade: Grade, score: f64, weight: f64| ComponentScore {
            grade,
            score: round1(score),
            weight,
        };

        let breakdown = HealthBreakdown {
            foot_traffic: component(foot.grade, foot_score, WEIGHT_FOOT_TRAFFIC),
            card_sales: component(card.grade, card_score, WEIGHT_CARD_SALES),
            business_rates: component(rates.grade, rates_score, WEIGHT_BUSINESS_RATES),
            dwell_time: component(dwell.grade, dwell_score, WEIGHT_DWELL_TIME),
            competition: competition_score
                .map(|(grade, score)| component(grade, score, WEIGHT_COMPETITION)),
        };

        let mut total = foot_score * WEIGHT_FOOT_TRAFFIC
            + card_score * WEIGHT_CARD_SALES
            + rates_score * WEIGHT_BUSINESS_RATES
            + dwell_score * WEIGHT_DWELL_TIME;
        match competition_score {
            Some((_, score)) => total += score * WEIGHT_COMPETITION,
            // Without competition the remaining weights sum to 0.9
            None => total /= 1.0 - WEIGHT_COMPETITION,
        }

        let total_score = round1(clamp_score(total));
        let (grade, health_status) = health_grade(total_score);

        Ok(HealthScore {
            market_code: market_code.to_string(),
            market_name: market.name,
            industry: industry.map(str::to_string),
            total_score,
            grade,
            health_status,
            breakdown,
            category_factors: factors,
            recommendations: health_recommendations(grade),
        })
    }

    pub fn comprehensive(
        &self,
        market_code: &str,
        params: &HealthScoreParams,
    ) -> Result<ComprehensiveDiagnosis> {
        let health = self.health_score(market_code, params)?;
        let b = &health.breakdown;

        let mut indicators = vec![
            Indicator {
                key: "foot_traffic",
                name: "유동인구",
                grade: b.foot_traffic.grade,
                score: b.foot_traffic.score,
            },
            Indicator {
                key: "card_sales",
                name: "카드매출",
                grade: b.card_sales.grade,
                score: b.card_sales.score,
            },
            Indicator {
                key: "business_rates",
                name: "창업·폐업 안정성",
                grade: b.business_rates.grade,
                score: b.business_rates.score,
            },
            Indicator {
                key: "dwell_time",
                name: "체류시간",
                grade: b.dwell_time.grade,
                score: b.dwell_time.score,
            },
        ];
        if let Some(c) = &b.competition {
            indicators.push(Indicator {
                key: "competition",
                name: "동일업종 경쟁도",
                grade: c.grade,
                score: c.score,
            });
        }

        let strengths = indicators
            .iter()
            .filter(|i| i.grade.is_strength())
            .map(|i| i.name)
            .collect();
        let weaknesses = indicators
            .iter()
            .filter(|i| !i.grade.is_strength())
            .map(|i| i.name)
            .collect();

        let summary = format!(
            "{}의 종합 건강도는 {:.1}점({:?}, {})입니다.",
            health.market_name, health.total_score, health.grade, health.health_status
        );

        Ok(ComprehensiveDiagnosis {
            market_code: health.market_code,
            market_name: health.market_name,
            industry: health.industry,
            overall_score: health.total_score,
            final_grade: health.grade,
            health_status: health.health_status,
            indicators,
            strengths,
            weaknesses,
            recommendations: health.recommendations,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> DiagnosisService<'static> {
        DiagnosisService::new(Catalog::builtin())
    }

    #[test]
    fn test_foot_traffic_total_series() {
        let result = service().foot_traffic("10000", None, 12).unwrap();

        assert_eq!(result.grade, Grade::B);
        assert_eq!(result.trend, Trend::Rising);
        assert_eq!(result.monthly_data.len(), 12);
        assert_eq!(result.monthly_data[0].month, "2024-01");
        assert!(result.current_monthly_traffic > 0);
        assert!(result.industry.is_none());
    }

    #[test]
    fn test_foot_traffic_grades_follow_industry_series() {
        let svc = service();
        assert_eq!(svc.foot_traffic("10000", Some("식음료업"), 12).unwrap().grade, Grade::A);
        assert_eq!(svc.foot_traffic("10000", Some("쇼핑업"), 12).unwrap().grade, Grade::C);
        assert_eq!(svc.foot_traffic("10000", Some("숙박업"), 12).unwrap().grade, Grade::D);
        // `전체` behaves like no filter
        let all = svc.foot_traffic("10000", Some("전체"), 12).unwrap();
        assert!(all.industry.is_none());
    }

    #[test]
    fn test_period_limits_series() {
        let result = service().foot_traffic("20000", None, 3).unwrap();
        assert_eq!(result.monthly_data.len(), 3);
        assert_eq!(result.monthly_data[2].month, "2024-12");

        let single = service().card_sales("20000", None, 1).unwrap();
        assert_eq!(single.trend, Trend::Stable);
        assert_eq!(single.average_change_rate, 0.0);

        assert!(matches!(
            service().foot_traffic("20000", None, 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_card_sales_thresholds() {
        let svc = service();
        assert_eq!(svc.card_sales("10000", None, 12).unwrap().grade, Grade::B);
        assert_eq!(svc.card_sales("10000", Some("식음료업"), 12).unwrap().grade, Grade::A);
        assert_eq!(svc.card_sales("10000", Some("숙박업"), 12).unwrap().grade, Grade::D);
    }

    #[test]
    fn test_unknown_market_is_not_found() {
        let svc = service();
        assert!(matches!(svc.foot_traffic("99999", None, 12), Err(Error::NotFound(_))));
        assert!(matches!(svc.business_rates("99999"), Err(Error::NotFound(_))));
        assert!(matches!(
            svc.health_score("99999", &HealthScoreParams::default()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_same_industry_levels() {
        let svc = service();

        let hotel = svc.competition("10000", "호텔").unwrap();
        assert_eq!(hotel.grade, Grade::A);
        assert_eq!(hotel.competition_level, "낮음");
        assert_eq!(hotel.business_count, 59);
        assert_eq!(hotel.major_category, "숙박업");

        let mall = svc.competition("10000", "대형쇼핑몰").unwrap();
        assert_eq!(mall.grade, Grade::B);

        let food = svc.competition("10000", "식음료업").unwrap();
        assert_eq!(food.grade, Grade::D);
        assert_eq!(food.competition_level, "매우 높음");

        assert!(matches!(svc.competition("10000", "우주여행"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_same_industry_breakdown_without_industry() {
        match service().same_industry("10000", None).unwrap() {
            SameIndustryAnalysis::Breakdown(b) => assert_eq!(b.industry_breakdown.len(), 16),
            other => panic!("expected breakdown, got {:?}", other),
        }
    }

    #[test]
    fn test_business_rates_bounds() {
        let svc = service();
        for market in Catalog::builtin().markets() {
            let rates = svc.business_rates(market.code).unwrap();
            assert!(rates.startup_rate <= 20.0);
            assert!(rates.closure_rate <= 15.0);
            assert!(rates.survival_rate >= 70.0);
            assert!((0.0..=100.0).contains(&rates.total_score));
        }
    }

    #[test]
    fn test_dwell_time_is_deterministic() {
        let svc = service();
        let first = svc.dwell_time("30000").unwrap();
        let second = svc.dwell_time("30000").unwrap();
        assert_eq!(first.average_dwell_time, second.average_dwell_time);
        assert_eq!(first.weekend_ratio, 1.3);
        assert_eq!(first.peak_hours.len(), 2);
    }

    #[test]
    fn test_health_score_without_industry_is_renormalized() {
        let health = service()
            .health_score("10000", &HealthScoreParams::default())
            .unwrap();

        assert!(health.breakdown.competition.is_none());
        assert!((0.0..=100.0).contains(&health.total_score));
        assert_eq!(health.category_factors, CategoryFactors::NEUTRAL);
        assert_eq!(health.recommendations.len(), 3);
        assert_eq!(health.grade, health_grade(health.total_score).0);
    }

    #[test]
    fn test_health_score_with_industry_includes_competition() {
        let params = HealthScoreParams {
            industry: Some("식음료업".to_string()),
            category: Some("식음료업".to_string()),
            sub_category: Some("식음료".to_string()),
        };
        let health = service().health_score("10000", &params).unwrap();

        let competition = health.breakdown.competition.unwrap();
        assert_eq!(competition.grade, Grade::D);
        assert_eq!(competition.score, 44.0);
        assert_eq!(health.breakdown.foot_traffic.score, 130.0);
        assert!(health.total_score <= 100.0);
    }

    #[test]
    fn test_monthly_traffic_uses_thousands() {
        let result = service().foot_traffic("10000", None, 12).unwrap();
        let last = result.monthly_data.last().unwrap();
        assert_eq!(last.traffic, result.current_monthly_traffic);
        // 219,460,000 scaled by the 95.8 regional index
        assert_eq!(result.current_monthly_traffic, 210_242);
    }

    #[test]
    fn test_business_rates_component_uses_total_score() {
        let svc = service();
        let rates = svc.business_rates("10000").unwrap();
        assert_eq!(rates.total_score, 69.9);

        let health = svc.health_score("10000", &HealthScoreParams::default()).unwrap();
        assert_eq!(health.breakdown.business_rates.score, rates.total_score);
        assert_eq!(health.breakdown.business_rates.grade, rates.grade);

        let params = HealthScoreParams {
            category: Some("숙박업".to_string()),
            sub_category: Some("호텔".to_string()),
            ..Default::default()
        };
        let weighted = svc.health_score("10000", &params).unwrap();
        assert_eq!(weighted.breakdown.business_rates.score, round1(rates.total_score * 1.2));
    }

    #[test]
    fn test_health_score_total_without_industry() {
        let health = service()
            .health_score("10000", &HealthScoreParams::default())
            .unwrap();

        // Foot B, card B, rates 69.9, dwell C, divided by the remaining 0.9
        let b = &health.breakdown;
        assert_eq!(b.foot_traffic.grade, Grade::B);
        assert_eq!(b.card_sales.grade, Grade::B);
        assert_eq!(b.dwell_time.grade, Grade::C);
        let expected = (80.0 * 0.25 + 80.0 * 0.25 + 69.9 * 0.25 + 60.0 * 0.15) / 0.9;
        assert_eq!(health.total_score, round1(expected));
        assert_eq!(health.total_score, 73.9);
        assert_eq!(health.grade, Grade::C);
    }

    #[test]
    fn test_health_score_total_with_industry() {
        let params = HealthScoreParams {
            industry: Some("식음료업".to_string()),
            ..Default::default()
        };
        let health = service().health_score("10000", &params).unwrap();

        // Foot A, card A, rates 69.9, dwell C, competition D, no renormalisation
        let expected = 100.0 * 0.25 + 100.0 * 0.25 + 69.9 * 0.25 + 60.0 * 0.15 + 40.0 * 0.10;
        assert!((health.total_score - expected).abs() <= 0.05 + 1e-9);
        assert_eq!(health.grade, Grade::B);
    }

    #[test]
    fn test_health_score_clamps_at_100() {
        // 식음료 factors (1.2, 1.3, 1.1) push the raw total to 102.27
        let params = HealthScoreParams {
            industry: Some("식음료업".to_string()),
            category: Some("식음료업".to_string()),
            sub_category: Some("식음료".to_string()),
        };
        let health = service().health_score("20000", &params).unwrap();

        assert_eq!(health.breakdown.foot_traffic.score, 130.0);
        assert_eq!(health.breakdown.dwell_time.grade, Grade::B);
        assert_eq!(health.total_score, 100.0);
        assert_eq!(health.grade, Grade::A);
        assert_eq!(health.health_status, "매우 건강");
    }

    #[test]
    fn test_health_grade_buckets() {
        assert_eq!(health_grade(90.0), (Grade::A, "매우 건강"));
        assert_eq!(health_grade(79.9), (Grade::C, "보통"));
        assert_eq!(health_grade(60.0), (Grade::D, "주의"));
        assert_eq!(health_grade(10.0), (Grade::F, "위험"));
    }

    #[test]
    fn test_comprehensive_partitions_indicators() {
        let params = HealthScoreParams {
            industry: Some("호텔".to_string()),
            ..Default::default()
        };
        let diagnosis = service().comprehensive("20000", &params).unwrap();

        assert_eq!(diagnosis.indicators.len(), 5);
        assert_eq!(
            diagnosis.strengths.len() + diagnosis.weaknesses.len(),
            diagnosis.indicators.len()
        );
        assert!(diagnosis.strengths.contains(&"동일업종 경쟁도"));
        assert!(diagnosis.summary.contains("유성온천역 상권"));
    }
}
