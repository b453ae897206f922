//! Map views: heatmaps, radius search, clustering, traffic flow and
//! accessibility

use serde::Serialize;
use sodam_common::{Error, Result};
use std::str::FromStr;
use tracing::debug;

use super::stats::{mean, round2};
use crate::catalog::{AccessProfile, Catalog, Level, Market};

const EARTH_RADIUS_KM: f64 = 6371.0;

const WEIGHT_TRANSPORT: f64 = 0.4;
const WEIGHT_PARKING: f64 = 0.3;
const WEIGHT_PEDESTRIAN: f64 = 0.3;

fn unsupported(kind: &str, value: &str) -> Error {
    Error::InvalidInput(format!("지원하지 않는 {}입니다: {}", kind, value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapType {
    HealthScore,
    FootTraffic,
    Competition,
    GrowthPotential,
}

impl FromStr for HeatmapType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "health_score" => Ok(HeatmapType::HealthScore),
            "foot_traffic" => Ok(HeatmapType::FootTraffic),
            "competition" => Ok(HeatmapType::Competition),
            "growth_potential" => Ok(HeatmapType::GrowthPotential),
            other => Err(unsupported("분석 유형", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusType {
    Comprehensive,
    Competition,
    Opportunity,
}

impl FromStr for RadiusType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "comprehensive" => Ok(RadiusType::Comprehensive),
            "competition" => Ok(RadiusType::Competition),
            "opportunity" => Ok(RadiusType::Opportunity),
            other => Err(unsupported("분석 유형", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterType {
    Performance,
    Characteristics,
    GrowthStage,
}

impl FromStr for ClusterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "performance" => Ok(ClusterType::Performance),
            "characteristics" => Ok(ClusterType::Characteristics),
            "growth_stage" => Ok(ClusterType::GrowthStage),
            other => Err(unsupported("클러스터 유형", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Daily,
    Weekly,
}

impl FromStr for TimePeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(TimePeriod::Daily),
            "weekly" => Ok(TimePeriod::Weekly),
            other => Err(unsupported("기간 유형", other)),
        }
    }
}

/// Great-circle distance in kilometres
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

fn map_grade(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "A+",
        s if s >= 80.0 => "A",
        s if s >= 70.0 => "B",
        s if s >= 60.0 => "C",
        _ => "D",
    }
}

fn traffic_level(traffic: u64) -> &'static str {
    match traffic {
        t if t >= 150_000 => "매우 높음",
        t if t >= 100_000 => "높음",
        t if t >= 50_000 => "보통",
        _ => "낮음",
    }
}

fn potential_level(potential: f64) -> &'static str {
    match potential {
        p if p >= 80.0 => "매우 높음",
        p if p >= 60.0 => "높음",
        p if p >= 40.0 => "보통",
        _ => "낮음",
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HeatDetail {
    Health { health_score: f64, grade: &'static str },
    Traffic { foot_traffic: u64, traffic_level: &'static str },
    Competition { competition_level: Level },
    Growth { growth_potential: f64, potential_level: &'static str },
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    pub market_code: &'static str,
    pub market_name: &'static str,
    #[serde(flatten)]
    pub detail: HeatDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub level: &'static str,
    pub color: &'static str,
    pub range: &'static str,
    pub description: &'static str,
}

static HEALTH_LEGEND: [LegendEntry; 4] = [
    LegendEntry { level: "high", color: "#00FF00", range: "80-100", description: "매우 건강" },
    LegendEntry { level: "medium", color: "#FFFF00", range: "70-79", description: "건강" },
    LegendEntry { level: "low", color: "#FFA500", range: "60-69", description: "보통" },
    LegendEntry { level: "poor", color: "#FF0000", range: "0-59", description: "주의" },
];

#[derive(Debug, Clone, Serialize)]
pub struct Heatmap {
    pub analysis_type: HeatmapType,
    pub region: Option<String>,
    pub total_markets: usize,
    pub heatmap_data: Vec<HeatPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_traffic: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<&'static [LegendEntry]>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitionDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl CompetitionDistribution {
    fn of(markets: &[Nearby]) -> Self {
        let count = |level| markets.iter().filter(|n| n.market.competition_level == level).count();
        Self {
            high: count(Level::High),
            medium: count(Level::Medium),
            low: count(Level::Low),
        }
    }

    /// Most common level; ties go to the more competitive level
    fn dominant(&self) -> Level {
        if self.high >= self.medium && self.high >= self.low {
            Level::High
        } else if self.medium >= self.low {
            Level::Medium
        } else {
            Level::Low
        }
    }

    fn intensity(&self) -> &'static str {
        let total = self.high + self.medium + self.low;
        if total == 0 {
            return "낮음";
        }
        match self.high as f64 / total as f64 {
            r if r > 0.5 => "매우 높음",
            r if r > 0.3 => "높음",
            r if r > 0.1 => "보통",
            _ => "낮음",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RadiusSummary {
    pub total_markets: usize,
    pub average_health_score: f64,
    pub average_foot_traffic: f64,
    pub average_growth_potential: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitionOverview {
    pub distribution: CompetitionDistribution,
    pub dominant_level: Level,
    pub competition_intensity: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendedMarket {
    pub market_code: &'static str,
    pub market_name: &'static str,
    pub health_score: f64,
    pub distance_km: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketFlag {
    pub market_code: &'static str,
    pub market_name: &'static str,
    pub label: &'static str,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComprehensiveRadius {
    pub analysis_summary: RadiusSummary,
    pub competition_analysis: CompetitionOverview,
    pub recommended_markets: Vec<RecommendedMarket>,
    pub market_opportunities: Vec<MarketFlag>,
    pub risk_factors: Vec<MarketFlag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedScore {
    pub name: &'static str,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitionGroup {
    pub count: usize,
    pub markets: Vec<NamedScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitionRadius {
    pub high_competition: CompetitionGroup,
    pub medium_competition: CompetitionGroup,
    pub low_competition: CompetitionGroup,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Opportunity {
    pub market_code: &'static str,
    pub market_name: &'static str,
    pub opportunity_score: f64,
    pub competition_level: Level,
    pub growth_potential: f64,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpportunityRadius {
    pub total_opportunities: usize,
    pub top_opportunities: Vec<Opportunity>,
    pub average_opportunity_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RadiusDetail {
    Comprehensive(ComprehensiveRadius),
    Competition(CompetitionRadius),
    Opportunity(OpportunityRadius),
}

#[derive(Debug, Clone, Serialize)]
pub struct RadiusAnalysis {
    pub analysis_type: RadiusType,
    pub center: Coordinates,
    pub radius_km: f64,
    #[serde(flatten)]
    pub detail: RadiusDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredMarket {
    #[serde(flatten)]
    pub market: &'static Market,
    pub performance_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceGroup {
    pub count: usize,
    pub markets: Vec<ScoredMarket>,
    pub characteristics: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceClusters {
    pub high_performance: PerformanceGroup,
    pub medium_performance: PerformanceGroup,
    pub low_performance: PerformanceGroup,
    pub insights: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketGroup {
    pub description: &'static str,
    pub markets: Vec<&'static Market>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacteristicClusters {
    pub high_traffic_low_competition: MarketGroup,
    pub high_growth_potential: MarketGroup,
    pub stable_markets: MarketGroup,
    pub emerging_markets: MarketGroup,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageGroup {
    pub markets: Vec<&'static Market>,
    pub recommendations: [&'static str; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthStageClusters {
    pub growth: StageGroup,
    pub mature: StageGroup,
    pub decline: StageGroup,
    pub emerging: StageGroup,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Clusters {
    Performance(PerformanceClusters),
    Characteristics(CharacteristicClusters),
    GrowthStage(GrowthStageClusters),
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterAnalysis {
    pub cluster_type: ClusterType,
    pub region: Option<String>,
    pub total_markets: usize,
    pub clusters: Clusters,
}

/// Hour of day or day of week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Slot {
    Hour(u32),
    Day(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrafficSample {
    pub time: Slot,
    pub traffic: u64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeakType {
    Morning,
    Afternoon,
    Evening,
    Weekday,
    Weekend,
}

impl PeakType {
    fn of(slot: Slot) -> Self {
        match slot {
            Slot::Hour(h) if (6..=10).contains(&h) => PeakType::Morning,
            Slot::Hour(h) if (12..=16).contains(&h) => PeakType::Afternoon,
            Slot::Hour(_) => PeakType::Evening,
            Slot::Day("토") | Slot::Day("일") => PeakType::Weekend,
            Slot::Day(_) => PeakType::Weekday,
        }
    }

    fn advice(self) -> &'static str {
        match self {
            PeakType::Morning => "아침 시간대 유동인구가 높으므로 조식 메뉴나 커피 서비스를 고려하세요.",
            PeakType::Afternoon => "오후 시간대 유동인구가 높으므로 점심 메뉴나 쇼핑 서비스를 강화하세요.",
            PeakType::Evening => {
                "저녁 시간대 유동인구가 높으므로 저녁 메뉴나 엔터테인먼트 서비스를 고려하세요."
            }
            PeakType::Weekday => "평일 유동인구가 높으므로 직장인 대상 서비스를 강화하세요.",
            PeakType::Weekend => "주말 유동인구가 높으므로 가족 단위 고객 대상 프로모션을 고려하세요.",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Peak {
    pub time: Slot,
    pub traffic: u64,
    pub peak_type: PeakType,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowPattern {
    pub inbound_traffic: u64,
    pub outbound_traffic: u64,
    pub net_flow: i64,
    pub flow_balance: &'static str,
    pub peak_inbound_time: Option<Slot>,
    pub peak_outbound_time: Option<Slot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrafficFlow {
    pub market_code: &'static str,
    pub market_name: &'static str,
    pub time_period: TimePeriod,
    pub traffic_flow: Vec<TrafficSample>,
    pub peak_hours: Vec<Peak>,
    pub flow_patterns: FlowPattern,
    pub recommendations: Vec<&'static str>,
}

const WEEKDAYS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

fn traffic_pattern(period: TimePeriod) -> Vec<TrafficSample> {
    let slots: Vec<(Slot, f64)> = match period {
        TimePeriod::Daily => (0..24u32)
            .map(|hour| {
                let factor = match hour {
                    7..=9 => 1.5,
                    12..=14 => 2.0,
                    18..=20 => 1.8,
                    21..=23 => 1.2,
                    _ => 0.5,
                };
                (Slot::Hour(hour), 1000.0 * factor)
            })
            .collect(),
        TimePeriod::Weekly => WEEKDAYS
            .iter()
            .map(|&day| {
                let factor = match day {
                    "토" => 1.3,
                    "일" => 0.8,
                    _ => 1.0,
                };
                (Slot::Day(day), 5000.0 * factor)
            })
            .collect(),
    };

    slots
        .into_iter()
        .enumerate()
        .map(|(i, (time, traffic))| TrafficSample {
            time,
            traffic: traffic.round() as u64,
            direction: if i % 2 == 0 {
                Direction::Inbound
            } else {
                Direction::Outbound
            },
        })
        .collect()
}

/// Busiest slot for a direction, the earliest one on ties
fn busiest(samples: &[TrafficSample], direction: Direction) -> Option<Slot> {
    samples
        .iter()
        .filter(|s| s.direction == direction)
        .rev()
        .max_by_key(|s| s.traffic)
        .map(|s| s.time)
}

fn flow_pattern(samples: &[TrafficSample]) -> FlowPattern {
    let total = |direction| {
        samples
            .iter()
            .filter(|s| s.direction == direction)
            .map(|s| s.traffic)
            .sum::<u64>()
    };
    let inbound = total(Direction::Inbound);
    let outbound = total(Direction::Outbound);

    FlowPattern {
        inbound_traffic: inbound,
        outbound_traffic: outbound,
        net_flow: inbound as i64 - outbound as i64,
        flow_balance: if inbound > outbound { "positive" } else { "negative" },
        peak_inbound_time: busiest(samples, Direction::Inbound),
        peak_outbound_time: busiest(samples, Direction::Outbound),
    }
}

fn peaks(samples: &[TrafficSample]) -> Vec<Peak> {
    let mut sorted: Vec<&TrafficSample> = samples.iter().collect();
    sorted.sort_by(|a, b| b.traffic.cmp(&a.traffic));
    sorted
        .into_iter()
        .take(3)
        .map(|s| Peak {
            time: s.time,
            traffic: s.traffic,
            peak_type: PeakType::of(s.time),
        })
        .collect()
}

struct Nearby {
    market: &'static Market,
    distance_km: f64,
}

fn validate_center(lat: f64, lng: f64, radius_km: f64) -> Result<()> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidInput(format!("위도 값이 올바르지 않습니다: {}", lat)));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(Error::InvalidInput(format!("경도 값이 올바르지 않습니다: {}", lng)));
    }
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "반경은 0보다 커야 합니다: {}",
            radius_km
        )));
    }
    Ok(())
}

fn comprehensive(nearby: &[Nearby]) -> ComprehensiveRadius {
    let health: Vec<f64> = nearby.iter().map(|n| n.market.health_score).collect();
    let traffic: Vec<f64> = nearby.iter().map(|n| n.market.foot_traffic as f64).collect();
    let growth: Vec<f64> = nearby.iter().map(|n| n.market.growth_potential).collect();
    let distribution = CompetitionDistribution::of(nearby);

    let mut by_health: Vec<&Nearby> = nearby.iter().collect();
    by_health.sort_by(|a, b| b.market.health_score.total_cmp(&a.market.health_score));

    let flags = |predicate: fn(&Market) -> bool, label, reason| -> Vec<MarketFlag> {
        nearby
            .iter()
            .filter(|n| predicate(n.market))
            .map(|n| MarketFlag {
                market_code: n.market.code,
                market_name: n.market.name,
                label,
                reason,
            })
            .collect()
    };

    ComprehensiveRadius {
        analysis_summary: RadiusSummary {
            total_markets: nearby.len(),
            average_health_score: round2(mean(&health)),
            average_foot_traffic: mean(&traffic).round(),
            average_growth_potential: round2(mean(&growth)),
        },
        competition_analysis: CompetitionOverview {
            dominant_level: distribution.dominant(),
            competition_intensity: distribution.intensity(),
            distribution,
        },
        recommended_markets: by_health
            .into_iter()
            .take(3)
            .map(|n| RecommendedMarket {
                market_code: n.market.code,
                market_name: n.market.name,
                health_score: n.market.health_score,
                distance_km: n.distance_km,
                reason: format!("건강 점수 {}점으로 우수", n.market.health_score),
            })
            .collect(),
        market_opportunities: flags(
            |m| m.competition_level == Level::Low && m.growth_potential > 70.0,
            "저경쟁 고성장",
            "경쟁이 낮고 성장 잠재력이 높음",
        ),
        risk_factors: flags(
            |m| m.competition_level == Level::High && m.health_score < 70.0,
            "고경쟁 저성과",
            "경쟁이 치열하고 성과가 낮음",
        ),
    }
}

fn competition(nearby: &[Nearby]) -> CompetitionRadius {
    let group = |level| {
        let markets: Vec<NamedScore> = nearby
            .iter()
            .filter(|n| n.market.competition_level == level)
            .map(|n| NamedScore {
                name: n.market.name,
                score: n.market.health_score,
            })
            .collect();
        CompetitionGroup {
            count: markets.len(),
            markets,
        }
    };
    let high = group(Level::High);
    let medium = group(Level::Medium);
    let low = group(Level::Low);

    let mut recommendations = Vec::new();
    if high.count > medium.count + low.count {
        recommendations.push("고경쟁 지역이 많으므로 차별화 전략이 필수입니다.".to_string());
    }
    if low.count > 0 {
        recommendations.push("저경쟁 지역이 있어 진입 기회가 있습니다.".to_string());
    }

    CompetitionRadius {
        high_competition: high,
        medium_competition: medium,
        low_competition: low,
        recommendations,
    }
}

fn opportunity(nearby: &[Nearby]) -> OpportunityRadius {
    let mut opportunities: Vec<Opportunity> = nearby
        .iter()
        .map(|n| {
            let competition_points = match n.market.competition_level {
                Level::Low => 40.0,
                Level::Medium => 20.0,
                Level::High => 0.0,
            };
            Opportunity {
                market_code: n.market.code,
                market_name: n.market.name,
                opportunity_score: round2(competition_points + n.market.growth_potential * 0.6),
                competition_level: n.market.competition_level,
                growth_potential: n.market.growth_potential,
                distance_km: n.distance_km,
            }
        })
        .collect();
    opportunities.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));

    let scores: Vec<f64> = opportunities.iter().map(|o| o.opportunity_score).collect();
    let recommendations = opportunities
        .first()
        .map(|top| vec![format!("{}이 가장 높은 기회를 제공합니다.", top.market_name)])
        .unwrap_or_default();

    OpportunityRadius {
        total_opportunities: opportunities.len(),
        average_opportunity_score: round2(mean(&scores)),
        top_opportunities: opportunities.into_iter().take(5).collect(),
        recommendations,
    }
}

fn performance_clusters(markets: &[&'static Market]) -> PerformanceClusters {
    let max_traffic = markets.iter().map(|m| m.foot_traffic).max().unwrap_or(0).max(1) as f64;

    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();
    for &market in markets {
        let score = round2(
            market.health_score * 0.7 + market.foot_traffic as f64 / max_traffic * 100.0 * 0.3,
        );
        let scored = ScoredMarket {
            market,
            performance_score: score,
        };
        match score {
            s if s >= 80.0 => high.push(scored),
            s if s >= 60.0 => medium.push(scored),
            _ => low.push(scored),
        }
    }

    let mut insights = Vec::new();
    if !high.is_empty() {
        insights.push("고성과 상권들의 공통점을 분석하여 성공 요인을 파악하세요.");
    }
    if !low.is_empty() {
        insights.push("저성과 상권들의 개선점을 분석하여 발전 방안을 모색하세요.");
    }

    let group = |markets: Vec<ScoredMarket>, characteristics| PerformanceGroup {
        count: markets.len(),
        markets,
        characteristics,
    };

    PerformanceClusters {
        high_performance: group(high, "높은 건강 점수와 유동인구를 보유한 우수 상권"),
        medium_performance: group(medium, "보통 수준의 성과를 보이는 상권"),
        low_performance: group(low, "개선이 필요한 상권"),
        insights,
    }
}

fn characteristic_clusters(markets: &[&'static Market]) -> CharacteristicClusters {
    let group = |description, predicate: fn(&Market) -> bool| MarketGroup {
        description,
        markets: markets.iter().copied().filter(|m| predicate(m)).collect(),
    };

    CharacteristicClusters {
        high_traffic_low_competition: group(
            "유동인구는 많지만 경쟁이 낮은 이상적인 상권",
            |m| m.foot_traffic > 150_000 && m.competition_level == Level::Low,
        ),
        high_growth_potential: group(
            "성장 잠재력이 높아 미래 발전 가능성이 큰 상권",
            |m| m.growth_potential > 80.0,
        ),
        stable_markets: group(
            "안정적인 성과를 보이는 신뢰할 수 있는 상권",
            |m| (70.0..=80.0).contains(&m.health_score),
        ),
        emerging_markets: group(
            "새롭게 떠오르는 기회가 많은 상권",
            |m| m.competition_level == Level::Low && (60.0..=80.0).contains(&m.growth_potential),
        ),
    }
}

fn growth_stage_clusters(markets: &[&'static Market]) -> GrowthStageClusters {
    let mut growth = Vec::new();
    let mut mature = Vec::new();
    let mut decline = Vec::new();
    let mut emerging = Vec::new();

    for &m in markets {
        if m.growth_potential > 80.0 && m.health_score > 75.0 {
            growth.push(m);
        } else if m.health_score > 70.0 && m.competition_level != Level::Low {
            mature.push(m);
        } else if m.health_score < 60.0 {
            decline.push(m);
        } else {
            emerging.push(m);
        }
    }

    GrowthStageClusters {
        growth: StageGroup {
            markets: growth,
            recommendations: [
                "성장기에 집중하여 시장 점유율을 확대하세요.",
                "브랜드 인지도 향상에 투자하세요.",
            ],
        },
        mature: StageGroup {
            markets: mature,
            recommendations: [
                "기존 고객 유지에 집중하세요.",
                "차별화 전략으로 경쟁 우위를 확보하세요.",
            ],
        },
        decline: StageGroup {
            markets: decline,
            recommendations: ["신규 고객 유치 전략이 필요합니다.", "사업 모델 혁신을 고려하세요."],
        },
        emerging: StageGroup {
            markets: emerging,
            recommendations: [
                "초기 투자와 마케팅에 집중하세요.",
                "고객 피드백을 적극 수집하세요.",
            ],
        },
    }
}

/// Entry of the supported analysis type listing
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisTypeInfo {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<&'static str>,
}

const fn info(
    kind: &'static str,
    name: &'static str,
    description: &'static str,
    color_scheme: Option<&'static str>,
) -> AnalysisTypeInfo {
    AnalysisTypeInfo {
        kind,
        name,
        description,
        color_scheme,
    }
}

static HEATMAP_TYPES: [AnalysisTypeInfo; 4] = [
    info(
        "health_score",
        "건강 점수",
        "상권의 종합적인 건강 상태를 점수로 표시",
        Some("녹색(우수) → 노란색(보통) → 빨간색(주의)"),
    ),
    info(
        "foot_traffic",
        "유동인구",
        "상권별 유동인구 수준을 강도로 표시",
        Some("진한 색(높음) → 연한 색(낮음)"),
    ),
    info(
        "competition",
        "경쟁도",
        "상권별 경쟁 수준을 색상으로 표시",
        Some("빨간색(높음) → 주황색(보통) → 녹색(낮음)"),
    ),
    info(
        "growth_potential",
        "성장 잠재력",
        "상권의 성장 가능성을 강도로 표시",
        Some("진한 색(높음) → 연한 색(낮음)"),
    ),
];

static RADIUS_TYPES: [AnalysisTypeInfo; 3] = [
    info("comprehensive", "종합 분석", "반경 내 상권들의 종합적인 분석 결과", None),
    info("competition", "경쟁도 분석", "반경 내 상권들의 경쟁 상황 분석", None),
    info("opportunity", "기회 분석", "반경 내 상권들의 진입 기회 분석", None),
];

static CLUSTER_TYPES: [AnalysisTypeInfo; 3] = [
    info("performance", "성과별 클러스터", "상권의 성과 수준에 따른 그룹화", None),
    info("characteristics", "특성별 클러스터", "상권의 특성에 따른 그룹화", None),
    info("growth_stage", "성장 단계별 클러스터", "상권의 성장 단계에 따른 그룹화", None),
];

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisTypes {
    pub heatmap: &'static [AnalysisTypeInfo],
    pub radius_analysis: &'static [AnalysisTypeInfo],
    pub cluster_analysis: &'static [AnalysisTypeInfo],
    pub traffic_periods: [TimePeriod; 2],
}

pub fn analysis_types() -> AnalysisTypes {
    AnalysisTypes {
        heatmap: &HEATMAP_TYPES,
        radius_analysis: &RADIUS_TYPES,
        cluster_analysis: &CLUSTER_TYPES,
        traffic_periods: [TimePeriod::Daily, TimePeriod::Weekly],
    }
}

/// A region filter accepted by the map views
#[derive(Debug, Clone, Serialize)]
pub struct RegionEntry {
    pub code: String,
    pub name: String,
    pub districts: Vec<&'static str>,
    pub market_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionList {
    pub total_regions: usize,
    pub regions: Vec<RegionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubwayAccess {
    pub available: bool,
    pub stations: &'static [&'static str],
    pub walking_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusAccess {
    pub available: bool,
    pub routes: &'static [&'static str],
    pub walking_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transportation {
    pub subway: SubwayAccess,
    pub bus: BusAccess,
    pub accessibility_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParkingAccess {
    pub public_capacity: u32,
    pub private_capacity: u32,
    pub total_capacity: u32,
    pub street_parking: bool,
    pub accessibility_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PedestrianAccess {
    pub sidewalk_width_m: f64,
    pub crosswalks: u32,
    pub pedestrian_zone: bool,
    pub barrier_free: bool,
    pub accessibility_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Accessibility {
    pub market_code: &'static str,
    pub market_name: &'static str,
    pub accessibility_score: f64,
    pub grade: &'static str,
    pub transportation: Transportation,
    pub parking: ParkingAccess,
    pub pedestrian: PedestrianAccess,
    pub improvement_suggestions: Vec<&'static str>,
}

/// Subway access is worth 80 (60 without), a bus stop adds 10
fn transport_score(access: &AccessProfile) -> f64 {
    let base = if access.subway_stations.is_empty() { 60.0 } else { 80.0 };
    if access.bus_routes.is_empty() {
        base
    } else {
        base + 10.0
    }
}

fn improvement_suggestions(score: f64, access: &AccessProfile) -> Vec<&'static str> {
    let mut suggestions = Vec::new();
    if score < 70.0 {
        suggestions.push("전반적인 접근성 개선이 필요합니다.");
    }
    if access.subway_stations.is_empty() {
        suggestions.push("지하철 접근성 개선을 위한 교통편 확충이 필요합니다.");
    }
    if access.parking_score < 70.0 {
        suggestions.push("주차 시설 확충 및 접근성 개선이 필요합니다.");
    }
    if access.pedestrian_score < 80.0 {
        suggestions.push("보행자 접근성 개선을 위한 인프라 구축이 필요합니다.");
    }
    suggestions
}

pub struct MapService<'a> {
    catalog: &'a Catalog,
}

impl<'a> MapService<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn heatmap(&self, region: Option<&str>, analysis_type: HeatmapType) -> Heatmap {
        let markets = self.catalog.markets_in_region(region);
        let max_traffic = markets.iter().map(|m| m.foot_traffic).max().unwrap_or(0);

        let heatmap_data = markets
            .iter()
            .map(|m| {
                let (intensity, color, detail) = match analysis_type {
                    HeatmapType::HealthScore => {
                        let (intensity, color) = match m.health_score {
                            s if s >= 80.0 => (1.0, "#00FF00"),
                            s if s >= 70.0 => (0.8, "#FFFF00"),
                            s if s >= 60.0 => (0.6, "#FFA500"),
                            _ => (0.4, "#FF0000"),
                        };
                        let detail = HeatDetail::Health {
                            health_score: m.health_score,
                            grade: map_grade(m.health_score),
                        };
                        (intensity, Some(color), detail)
                    }
                    HeatmapType::FootTraffic => {
                        let intensity = m.foot_traffic as f64 / max_traffic.max(1) as f64;
                        let detail = HeatDetail::Traffic {
                            foot_traffic: m.foot_traffic,
                            traffic_level: traffic_level(m.foot_traffic),
                        };
                        (round2(intensity), None, detail)
                    }
                    HeatmapType::Competition => {
                        let (intensity, color) = match m.competition_level {
                            Level::High => (1.0, "#FF0000"),
                            Level::Medium => (0.6, "#FFA500"),
                            Level::Low => (0.3, "#00FF00"),
                        };
                        let detail = HeatDetail::Competition {
                            competition_level: m.competition_level,
                        };
                        (intensity, Some(color), detail)
                    }
                    HeatmapType::GrowthPotential => {
                        let detail = HeatDetail::Growth {
                            growth_potential: m.growth_potential,
                            potential_level: potential_level(m.growth_potential),
                        };
                        (m.growth_potential / 100.0, None, detail)
                    }
                };
                HeatPoint {
                    lat: m.lat,
                    lng: m.lng,
                    intensity,
                    color,
                    market_code: m.code,
                    market_name: m.name,
                    detail,
                }
            })
            .collect::<Vec<_>>();

        Heatmap {
            analysis_type,
            region: region.map(str::to_string),
            total_markets: heatmap_data.len(),
            heatmap_data,
            max_traffic: (analysis_type == HeatmapType::FootTraffic).then_some(max_traffic),
            legend: (analysis_type == HeatmapType::HealthScore).then_some(&HEALTH_LEGEND[..]),
        }
    }

    pub fn radius_analysis(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
        analysis_type: RadiusType,
    ) -> Result<RadiusAnalysis> {
        validate_center(lat, lng, radius_km)?;

        let nearby: Vec<Nearby> = self
            .catalog
            .markets()
            .iter()
            .filter_map(|market| {
                let distance = haversine_km(lat, lng, market.lat, market.lng);
                (distance <= radius_km).then(|| Nearby {
                    market,
                    distance_km: round2(distance),
                })
            })
            .collect();

        if nearby.is_empty() {
            return Err(Error::NotFound(format!(
                "반경 {}km 내 상권이 없습니다.",
                radius_km
            )));
        }
        debug!(lat, lng, radius_km, found = nearby.len(), "Radius search");

        let detail = match analysis_type {
            RadiusType::Comprehensive => RadiusDetail::Comprehensive(comprehensive(&nearby)),
            RadiusType::Competition => RadiusDetail::Competition(competition(&nearby)),
            RadiusType::Opportunity => RadiusDetail::Opportunity(opportunity(&nearby)),
        };

        Ok(RadiusAnalysis {
            analysis_type,
            center: Coordinates { lat, lng },
            radius_km,
            detail,
        })
    }

    pub fn cluster_analysis(&self, region: Option<&str>, cluster_type: ClusterType) -> ClusterAnalysis {
        let markets = self.catalog.markets_in_region(region);
        let clusters = match cluster_type {
            ClusterType::Performance => Clusters::Performance(performance_clusters(&markets)),
            ClusterType::Characteristics => {
                Clusters::Characteristics(characteristic_clusters(&markets))
            }
            ClusterType::GrowthStage => Clusters::GrowthStage(growth_stage_clusters(&markets)),
        };

        ClusterAnalysis {
            cluster_type,
            region: region.map(str::to_string),
            total_markets: markets.len(),
            clusters,
        }
    }

    pub fn traffic_flow(&self, market_code: &str, time_period: TimePeriod) -> Result<TrafficFlow> {
        let market = self.catalog.market(market_code)?;
        let samples = traffic_pattern(time_period);
        let peak_hours = peaks(&samples);

        let mut recommendations: Vec<&'static str> = Vec::new();
        for peak in &peak_hours {
            let advice = peak.peak_type.advice();
            if !recommendations.contains(&advice) {
                recommendations.push(advice);
            }
        }

        Ok(TrafficFlow {
            market_code: market.code,
            market_name: market.name,
            time_period,
            flow_patterns: flow_pattern(&samples),
            traffic_flow: samples,
            peak_hours,
            recommendations,
        })
    }

    /// Transit, parking and pedestrian access of one market
    pub fn accessibility(&self, market_code: &str) -> Result<Accessibility> {
        let market = self.catalog.market(market_code)?;
        let access = self.catalog.access_profile(market_code)?;

        let transport = transport_score(access);
        let score = round2(
            transport * WEIGHT_TRANSPORT
                + access.parking_score * WEIGHT_PARKING
                + access.pedestrian_score * WEIGHT_PEDESTRIAN,
        );
        debug!(market_code, transport, score, "Accessibility");

        let has_subway = !access.subway_stations.is_empty();
        let has_bus = !access.bus_routes.is_empty();

        Ok(Accessibility {
            market_code: market.code,
            market_name: market.name,
            accessibility_score: score,
            grade: map_grade(score),
            transportation: Transportation {
                subway: SubwayAccess {
                    available: has_subway,
                    stations: access.subway_stations,
                    walking_minutes: has_subway.then_some(access.subway_walk_minutes),
                },
                bus: BusAccess {
                    available: has_bus,
                    routes: access.bus_routes,
                    walking_minutes: has_bus.then_some(access.bus_walk_minutes),
                },
                accessibility_score: transport,
            },
            parking: ParkingAccess {
                public_capacity: access.public_parking_capacity,
                private_capacity: access.private_parking_capacity,
                total_capacity: access.public_parking_capacity + access.private_parking_capacity,
                street_parking: access.street_parking,
                accessibility_score: access.parking_score,
            },
            pedestrian: PedestrianAccess {
                sidewalk_width_m: access.sidewalk_width_m,
                crosswalks: access.crosswalks,
                pedestrian_zone: access.pedestrian_zone,
                barrier_free: access.barrier_free,
                accessibility_score: access.pedestrian_score,
            },
            improvement_suggestions: improvement_suggestions(score, access),
        })
    }

    /// The whole city first, then each district, in catalog order
    pub fn regions(&self) -> RegionList {
        let markets = self.catalog.markets();
        let mut regions = Vec::new();

        let mut cities: Vec<&'static str> = Vec::new();
        for market in markets {
            if !cities.contains(&market.city) {
                cities.push(market.city);
            }
        }

        for city in cities {
            let in_city: Vec<&Market> = markets.iter().filter(|m| m.city == city).collect();
            let mut districts: Vec<&'static str> = Vec::new();
            for market in &in_city {
                if !districts.contains(&market.district) {
                    districts.push(market.district);
                }
            }

            regions.push(RegionEntry {
                code: city.to_string(),
                name: city.to_string(),
                districts: districts.clone(),
                market_count: in_city.len(),
            });
            for district in districts {
                let label = format!("{} {}", city, district);
                regions.push(RegionEntry {
                    code: label.clone(),
                    name: label,
                    districts: vec![district],
                    market_count: in_city.iter().filter(|m| m.district == district).count(),
                });
            }
        }

        RegionList {
            total_regions: regions.len(),
            regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MapService<'static> {
        MapService::new(Catalog::builtin())
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("growth_potential".parse::<HeatmapType>().unwrap(), HeatmapType::GrowthPotential);
        assert!(matches!("density".parse::<HeatmapType>(), Err(Error::InvalidInput(_))));
        assert!(matches!("hourly".parse::<TimePeriod>(), Err(Error::InvalidInput(_))));
        assert!(matches!("random".parse::<ClusterType>(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_haversine() {
        assert_eq!(haversine_km(36.35, 127.38, 36.35, 127.38), 0.0);
        // One degree of latitude is roughly 111 km
        let d = haversine_km(36.0, 127.0, 37.0, 127.0);
        assert!((d - 111.19).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn test_health_heatmap() {
        let map = service().heatmap(None, HeatmapType::HealthScore);
        assert_eq!(map.total_markets, 5);
        let station = &map.heatmap_data[0];
        assert_eq!(station.market_code, "10000");
        assert_eq!(station.color, Some("#00FF00"));
        assert_eq!(station.intensity, 1.0);
        assert!(map.legend.is_some());

        let json = serde_json::to_value(station).unwrap();
        assert_eq!(json["grade"], "A");
        assert_eq!(json["health_score"], 85.5);
    }

    #[test]
    fn test_traffic_heatmap_normalises_by_max() {
        let map = service().heatmap(Some("유성구"), HeatmapType::FootTraffic);
        assert_eq!(map.total_markets, 1);
        assert_eq!(map.heatmap_data[0].intensity, 1.0);
        assert_eq!(map.max_traffic, Some(142_000));

        let empty = service().heatmap(Some("부산"), HeatmapType::FootTraffic);
        assert_eq!(empty.total_markets, 0);
    }

    #[test]
    fn test_radius_analysis_finds_nearby_markets() {
        let svc = service();
        let result = svc
            .radius_analysis(36.3316, 127.4342, 2.0, RadiusType::Comprehensive)
            .unwrap();
        match result.detail {
            RadiusDetail::Comprehensive(c) => {
                assert_eq!(c.analysis_summary.total_markets, 2);
                assert_eq!(c.recommended_markets[0].market_code, "10000");
                assert_eq!(c.recommended_markets[0].distance_km, 0.0);
                assert_eq!(c.competition_analysis.distribution.high, 1);
                assert_eq!(c.competition_analysis.dominant_level, Level::High);
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_radius_validation() {
        let svc = service();
        assert!(matches!(
            svc.radius_analysis(95.0, 127.0, 1.0, RadiusType::Comprehensive),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            svc.radius_analysis(36.3, 127.4, 0.0, RadiusType::Comprehensive),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            svc.radius_analysis(37.5665, 126.978, 1.0, RadiusType::Opportunity),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_opportunity_ranking() {
        let result = service()
            .radius_analysis(36.35, 127.40, 50.0, RadiusType::Opportunity)
            .unwrap();
        match result.detail {
            RadiusDetail::Opportunity(o) => {
                assert_eq!(o.total_opportunities, 5);
                // 대덕: low competition (40) + 85 * 0.6
                assert_eq!(o.top_opportunities[0].market_code, "50000");
                assert_eq!(o.top_opportunities[0].opportunity_score, 91.0);
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_performance_clusters() {
        let result = service().cluster_analysis(None, ClusterType::Performance);
        match result.clusters {
            Clusters::Performance(p) => {
                assert_eq!(p.high_performance.count, 1);
                assert_eq!(p.high_performance.markets[0].market.code, "10000");
                assert_eq!(p.medium_performance.count, 4);
                assert_eq!(p.low_performance.count, 0);
            }
            other => panic!("unexpected clusters: {:?}", other),
        }
    }

    #[test]
    fn test_growth_stage_clusters() {
        let result = service().cluster_analysis(None, ClusterType::GrowthStage);
        match result.clusters {
            Clusters::GrowthStage(g) => {
                let codes = |group: &StageGroup| group.markets.iter().map(|m| m.code).collect::<Vec<_>>();
                assert_eq!(codes(&g.growth), vec!["50000"]);
                assert_eq!(codes(&g.mature), vec!["10000", "20000", "30000"]);
                assert_eq!(codes(&g.emerging), vec!["40000"]);
                assert!(g.decline.markets.is_empty());
            }
            other => panic!("unexpected clusters: {:?}", other),
        }
    }

    #[test]
    fn test_daily_traffic_flow() {
        let flow = service().traffic_flow("10000", TimePeriod::Daily).unwrap();
        assert_eq!(flow.traffic_flow.len(), 24);
        assert_eq!(flow.peak_hours[0].time, Slot::Hour(12));
        assert!(flow.peak_hours.iter().all(|p| p.peak_type == PeakType::Afternoon));
        assert_eq!(flow.recommendations.len(), 1);
        assert_eq!(flow.flow_patterns.inbound_traffic, 13_300);
        assert_eq!(flow.flow_patterns.outbound_traffic, 12_200);
        assert_eq!(flow.flow_patterns.flow_balance, "positive");
        assert_eq!(flow.flow_patterns.peak_inbound_time, Some(Slot::Hour(12)));
        assert_eq!(flow.flow_patterns.peak_outbound_time, Some(Slot::Hour(13)));
    }

    #[test]
    fn test_accessibility_scores() {
        let svc = service();
        let expected = [
            ("10000", 84.0, 0),
            ("20000", 84.0, 1),
            ("30000", 80.4, 1),
            ("40000", 87.0, 0),
            ("50000", 65.8, 4),
        ];
        for (code, score, suggestions) in expected {
            let result = svc.accessibility(code).unwrap();
            assert_eq!(result.accessibility_score, score, "{}", code);
            assert_eq!(result.improvement_suggestions.len(), suggestions, "{}", code);
        }
    }

    #[test]
    fn test_accessibility_without_subway() {
        let result = service().accessibility("50000").unwrap();
        assert!(!result.transportation.subway.available);
        assert_eq!(result.transportation.subway.walking_minutes, None);
        assert_eq!(result.transportation.accessibility_score, 70.0);
        assert_eq!(result.parking.total_capacity, 90);
        assert_eq!(result.grade, "D");
        assert_eq!(result.improvement_suggestions[0], "전반적인 접근성 개선이 필요합니다.");

        assert!(matches!(service().accessibility("99999"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_listed_analysis_types_parse() {
        let types = analysis_types();
        assert_eq!(types.heatmap.len(), 4);
        for t in types.heatmap {
            assert!(t.kind.parse::<HeatmapType>().is_ok(), "{}", t.kind);
            assert!(t.color_scheme.is_some());
        }
        for t in types.radius_analysis {
            assert!(t.kind.parse::<RadiusType>().is_ok(), "{}", t.kind);
        }
        for t in types.cluster_analysis {
            assert!(t.kind.parse::<ClusterType>().is_ok(), "{}", t.kind);
        }
    }

    #[test]
    fn test_regions_city_then_districts() {
        let list = service().regions();
        assert_eq!(list.total_regions, 6);
        assert_eq!(list.regions[0].code, "대전광역시");
        assert_eq!(list.regions[0].market_count, 5);
        assert_eq!(list.regions[0].districts, vec!["동구", "유성구", "중구", "서구", "대덕구"]);

        assert_eq!(list.regions[1].code, "대전광역시 동구");
        assert_eq!(list.regions[1].market_count, 1);
        // Every listed code works as a heatmap region filter
        for region in &list.regions {
            let map = service().heatmap(Some(&region.code), HeatmapType::HealthScore);
            assert_eq!(map.total_markets, region.market_count, "{}", region.code);
        }
    }

    #[test]
    fn test_weekly_traffic_flow() {
        let flow = service().traffic_flow("20000", TimePeriod::Weekly).unwrap();
        assert_eq!(flow.traffic_flow.len(), 7);
        assert_eq!(flow.peak_hours[0].time, Slot::Day("토"));
        assert_eq!(flow.peak_hours[0].peak_type, PeakType::Weekend);
        assert_eq!(flow.recommendations.len(), 2);
        assert!(matches!(
            service().traffic_flow("99999", TimePeriod::Daily),
            Err(Error::NotFound(_))
        ));
    }
}
