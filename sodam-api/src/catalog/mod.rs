//! Reference catalog of markets, consumption series and weight tables
//!
//! The catalog is built once from compiled-in tables and shared read-only by
//! every handler. All lookups are infallible except market lookups, which
//! report unknown codes as `NotFound`.

mod tables;

use once_cell::sync::Lazy;
use serde::Serialize;
use sodam_common::{Error, Result};
use std::collections::{BTreeMap, HashMap};

use tables::{
    ACCESS_PROFILES, CATEGORY_FACTORS, DEFAULT_INDUSTRY_PROFILE, DEFAULT_REGION_PROFILE,
    INDUSTRY_PROFILES, INDUSTRY_RATIOS, MARKETS, MONTHS, REGIONAL_INDEX, REGION_PROFILES,
    REPRESENTATIVE_CATEGORIES, RISK_PROFILES, TOTAL_CATEGORY, TOURISM_CONSUMPTION,
};

pub use tables::DAEJEON as DEFAULT_REGION;

static BUILTIN: Lazy<Catalog> = Lazy::new(Catalog::from_tables);

/// Three-step qualitative level (competition, rent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::High => "high",
            Level::Medium => "medium",
            Level::Low => "low",
        }
    }
}

/// A commercial district (상권)
#[derive(Debug, Clone, Serialize)]
pub struct Market {
    pub code: &'static str,
    pub name: &'static str,
    pub market_type: &'static str,
    pub city: &'static str,
    pub district: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub health_score: f64,
    /// Monthly foot traffic (people)
    pub foot_traffic: u64,
    pub competition_level: Level,
    pub growth_potential: f64,
}

impl Market {
    /// `"대전광역시 동구"` style region label
    pub fn region(&self) -> String {
        format!("{} {}", self.city, self.district)
    }
}

/// Indicators used by risk classification and location scoring
#[derive(Debug, Clone, Serialize)]
pub struct RiskProfile {
    /// Monthly foot traffic change (%)
    pub foot_traffic_change: f64,
    /// Monthly card sales change (%)
    pub card_sales_change: f64,
    /// Share of same-industry businesses (%)
    pub same_industry_ratio: f64,
    /// Annual average income of the catchment (KRW)
    pub average_income: f64,
    pub growth_potential: f64,
    pub population_density: f64,
    pub rent_level: Level,
    pub accessibility: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionPoint {
    pub month: &'static str,
    pub amount: f64,
}

/// Industry expenditure row: major/minor category shares (%)
#[derive(Debug, Clone, Serialize)]
pub struct IndustryRatio {
    pub major: &'static str,
    pub minor: &'static str,
    pub major_ratio: f64,
    pub minor_ratio: f64,
}

/// How a requested industry name matched the expenditure table
#[derive(Debug, Clone)]
pub struct IndustryMatch {
    pub row: &'static IndustryRatio,
    pub by_minor: bool,
}

impl IndustryMatch {
    /// Share of the matched level: minor ratio for a minor match, major otherwise
    pub fn ratio(&self) -> f64 {
        if self.by_minor {
            self.row.minor_ratio
        } else {
            self.row.major_ratio
        }
    }
}

/// Multipliers applied to health score components
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryFactors {
    pub weight: f64,
    pub traffic_factor: f64,
    pub competition_factor: f64,
}

impl CategoryFactors {
    pub const NEUTRAL: CategoryFactors = CategoryFactors {
        weight: 1.0,
        traffic_factor: 1.0,
        competition_factor: 1.0,
    };
}

/// How a market is reached: transit, parking and walkability
#[derive(Debug, Clone, Serialize)]
pub struct AccessProfile {
    pub subway_stations: &'static [&'static str],
    /// Walk from the nearest station (minutes)
    pub subway_walk_minutes: u32,
    pub bus_routes: &'static [&'static str],
    pub bus_walk_minutes: u32,
    pub public_parking_capacity: u32,
    pub private_parking_capacity: u32,
    pub street_parking: bool,
    pub parking_score: f64,
    pub sidewalk_width_m: f64,
    pub crosswalks: u32,
    pub pedestrian_zone: bool,
    pub barrier_free: bool,
    pub pedestrian_score: f64,
}

/// Markets grouped by district
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictSummary {
    pub district_name: &'static str,
    pub city: &'static str,
    pub market_count: usize,
    pub market_type_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndustryProfile {
    pub survival_rate: f64,
    pub growth_potential: f64,
    pub risk_level: f64,
    pub competition_intensity: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegionProfile {
    pub population_density: f64,
    pub economic_growth: f64,
    pub unemployment_rate: f64,
    /// Monthly average income (KRW)
    pub average_income: f64,
    pub infrastructure_score: f64,
}

/// Indexed view over the reference tables
#[derive(Debug)]
pub struct Catalog {
    market_index: HashMap<&'static str, usize>,
    risk_profiles: HashMap<&'static str, &'static RiskProfile>,
    /// region → category → monthly series
    consumption: HashMap<&'static str, HashMap<&'static str, Vec<ConsumptionPoint>>>,
}

impl Catalog {
    /// Shared catalog built from the compiled-in tables
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    fn from_tables() -> Self {
        let market_index = MARKETS
            .iter()
            .enumerate()
            .map(|(i, m)| (m.code, i))
            .collect();

        let risk_profiles = RISK_PROFILES
            .iter()
            .map(|(code, profile)| (*code, profile))
            .collect();

        let mut consumption: HashMap<&'static str, HashMap<&'static str, Vec<ConsumptionPoint>>> =
            HashMap::new();
        for (region, category, amounts) in TOURISM_CONSUMPTION {
            let series = MONTHS
                .iter()
                .zip(amounts.iter())
                .map(|(month, amount)| ConsumptionPoint {
                    month: *month,
                    amount: *amount,
                })
                .collect();
            consumption.entry(*region).or_default().insert(*category, series);
        }

        Self {
            market_index,
            risk_profiles,
            consumption,
        }
    }

    pub fn markets(&self) -> &'static [Market] {
        MARKETS
    }

    pub fn market(&self, code: &str) -> Result<&'static Market> {
        self.market_index
            .get(code)
            .map(|&i| &MARKETS[i])
            .ok_or_else(|| Error::NotFound(format!("상권 정보를 찾을 수 없습니다: {}", code)))
    }

    /// Markets whose region label contains `region` (all markets when `None`)
    pub fn markets_in_region(&self, region: Option<&str>) -> Vec<&'static Market> {
        MARKETS
            .iter()
            .filter(|m| region.map_or(true, |r| m.region().contains(r)))
            .collect()
    }

    /// Markets in one district (구), matched exactly
    pub fn markets_by_district(&self, district: &str) -> Vec<&'static Market> {
        MARKETS.iter().filter(|m| m.district == district).collect()
    }

    /// Districts ordered by name, with market and market-type counts
    pub fn districts(&self) -> Vec<DistrictSummary> {
        let mut groups: BTreeMap<&'static str, Vec<&'static Market>> = BTreeMap::new();
        for market in MARKETS {
            groups.entry(market.district).or_default().push(market);
        }

        groups
            .into_iter()
            .map(|(district_name, markets)| {
                let mut types: Vec<&str> = markets.iter().map(|m| m.market_type).collect();
                types.sort_unstable();
                types.dedup();
                DistrictSummary {
                    district_name,
                    city: markets[0].city,
                    market_count: markets.len(),
                    market_type_count: types.len(),
                }
            })
            .collect()
    }

    pub fn access_profile(&self, code: &str) -> Result<&'static AccessProfile> {
        self.market(code)?;
        ACCESS_PROFILES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, profile)| profile)
            .ok_or_else(|| Error::NotFound(format!("상권 접근성 정보가 없습니다: {}", code)))
    }

    /// First market located in the given city/region
    pub fn representative_market(&self, region: &str) -> Option<&'static Market> {
        MARKETS
            .iter()
            .find(|m| m.region().contains(region) || region.starts_with(m.city))
    }

    pub fn risk_profile(&self, code: &str) -> Result<&'static RiskProfile> {
        self.market(code)?;
        self.risk_profiles
            .get(code)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("상권 리스크 지표가 없습니다: {}", code)))
    }

    /// Last 12 months of total tourism consumption for a region
    pub fn tourism_trend(&self, region: &str) -> Vec<ConsumptionPoint> {
        self.series(region, TOTAL_CATEGORY)
    }

    /// Last 12 months for the category representing a major industry
    pub fn tourism_trend_by_industry(&self, region: &str, industry: &str) -> Vec<ConsumptionPoint> {
        self.series(region, representative_category(industry))
    }

    fn series(&self, region: &str, category: &str) -> Vec<ConsumptionPoint> {
        let Some(points) = self.consumption.get(region).and_then(|c| c.get(category)) else {
            return Vec::new();
        };
        let start = points.len().saturating_sub(12);
        points[start..].to_vec()
    }

    pub fn industry_ratios(&self) -> &'static [IndustryRatio] {
        INDUSTRY_RATIOS
    }

    /// Match an industry name against minor categories first, then majors
    pub fn find_industry(&self, name: &str) -> Option<IndustryMatch> {
        if let Some(row) = INDUSTRY_RATIOS.iter().find(|r| r.minor == name) {
            return Some(IndustryMatch { row, by_minor: true });
        }
        INDUSTRY_RATIOS
            .iter()
            .find(|r| r.major == name)
            .map(|row| IndustryMatch {
                row,
                by_minor: false,
            })
    }

    /// Major category share (%); 0 when the industry is unknown
    pub fn major_ratio(&self, industry: &str) -> f64 {
        self.find_industry(industry)
            .map(|m| m.row.major_ratio)
            .unwrap_or(0.0)
    }

    /// Mean share across distinct major categories
    pub fn mean_major_ratio(&self) -> f64 {
        let mut seen: Vec<(&str, f64)> = Vec::new();
        for row in INDUSTRY_RATIOS {
            if !seen.iter().any(|(major, _)| *major == row.major) {
                seen.push((row.major, row.major_ratio));
            }
        }
        if seen.is_empty() {
            return 0.0;
        }
        seen.iter().map(|(_, r)| r).sum::<f64>() / seen.len() as f64
    }

    /// Regional spend index (100 = national average); 0 when unknown
    pub fn regional_index(&self, region: &str) -> f64 {
        REGIONAL_INDEX
            .iter()
            .find(|(name, _)| *name == region || name.starts_with(region) || region.starts_with(name))
            .map(|(_, index)| *index)
            .unwrap_or(0.0)
    }

    /// Factors for a category and optional sub-category.
    ///
    /// Missing or `전체` category and unknown categories are neutral. A known
    /// category without a matching sub-category averages its sub-categories.
    pub fn category_factors(&self, category: Option<&str>, sub_category: Option<&str>) -> CategoryFactors {
        let category = match category {
            Some(c) if c != "전체" => c,
            _ => return CategoryFactors::NEUTRAL,
        };

        let rows: Vec<(&str, CategoryFactors)> = CATEGORY_FACTORS
            .iter()
            .filter(|(major, _, _)| *major == category)
            .map(|(_, minor, f)| (*minor, *f))
            .collect();

        if rows.is_empty() {
            return CategoryFactors::NEUTRAL;
        }

        if let Some(sub) = sub_category {
            if let Some((_, f)) = rows.iter().find(|(minor, _)| *minor == sub) {
                return *f;
            }
        }

        let n = rows.len() as f64;
        CategoryFactors {
            weight: rows.iter().map(|(_, f)| f.weight).sum::<f64>() / n,
            traffic_factor: rows.iter().map(|(_, f)| f.traffic_factor).sum::<f64>() / n,
            competition_factor: rows.iter().map(|(_, f)| f.competition_factor).sum::<f64>() / n,
        }
    }

    pub fn industry_profile(&self, industry: &str) -> IndustryProfile {
        INDUSTRY_PROFILES
            .iter()
            .find(|(name, _)| *name == industry)
            .map(|(_, p)| *p)
            .unwrap_or(DEFAULT_INDUSTRY_PROFILE)
    }

    pub fn region_profile(&self, region: &str) -> RegionProfile {
        REGION_PROFILES
            .iter()
            .find(|(name, _)| region.starts_with(name))
            .map(|(_, p)| *p)
            .unwrap_or(DEFAULT_REGION_PROFILE)
    }
}

/// Category whose consumption series stands in for a major industry
pub fn representative_category(industry: &str) -> &'static str {
    REPRESENTATIVE_CATEGORIES
        .iter()
        .find(|(major, _)| *major == industry)
        .map(|(_, category)| *category)
        .unwrap_or(TOTAL_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_lookup() {
        let catalog = Catalog::builtin();
        let market = catalog.market("10000").unwrap();
        assert_eq!(market.district, "동구");
        assert_eq!(market.region(), "대전광역시 동구");

        assert!(matches!(catalog.market("99999"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_markets_by_district() {
        let catalog = Catalog::builtin();
        let codes: Vec<&str> = catalog
            .markets_by_district("동구")
            .iter()
            .map(|m| m.code)
            .collect();
        assert_eq!(codes, vec!["10000"]);
        assert!(catalog.markets_by_district("강남구").is_empty());
    }

    #[test]
    fn test_every_market_has_risk_and_access_profiles() {
        let catalog = Catalog::builtin();
        for market in catalog.markets() {
            assert!(catalog.risk_profile(market.code).is_ok(), "{}", market.code);
            assert!(catalog.access_profile(market.code).is_ok(), "{}", market.code);
        }
        assert!(matches!(catalog.access_profile("99999"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_districts_sorted_by_name() {
        let districts = Catalog::builtin().districts();
        let names: Vec<&str> = districts.iter().map(|d| d.district_name).collect();
        assert_eq!(names, vec!["대덕구", "동구", "서구", "유성구", "중구"]);
        assert!(districts.iter().all(|d| d.market_count == 1 && d.market_type_count == 1));
        assert_eq!(districts[0].city, DEFAULT_REGION);
    }

    #[test]
    fn test_industry_shares_sum_to_hundred() {
        let catalog = Catalog::builtin();
        let minor_total: f64 = catalog.industry_ratios().iter().map(|r| r.minor_ratio).sum();
        assert!((minor_total - 100.0).abs() < 1e-6);
        assert!((catalog.mean_major_ratio() - 100.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_find_industry_prefers_minor() {
        let catalog = Catalog::builtin();

        let hotel = catalog.find_industry("호텔").unwrap();
        assert!(hotel.by_minor);
        assert_eq!(hotel.ratio(), 5.9);

        let lodging = catalog.find_industry("숙박업").unwrap();
        assert!(!lodging.by_minor);
        assert_eq!(lodging.ratio(), 12.3);

        assert!(catalog.find_industry("우주여행").is_none());
    }

    #[test]
    fn test_trend_falls_back_to_total_category() {
        let catalog = Catalog::builtin();
        let total = catalog.tourism_trend(DEFAULT_REGION);
        let unknown = catalog.tourism_trend_by_industry(DEFAULT_REGION, "기타업");

        assert_eq!(total.len(), 12);
        assert_eq!(unknown.len(), 12);
        assert_eq!(total[0].amount, unknown[0].amount);
        assert!(catalog.tourism_trend("제주특별자치도").is_empty());
    }

    #[test]
    fn test_category_factors() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.category_factors(None, None), CategoryFactors::NEUTRAL);
        assert_eq!(catalog.category_factors(Some("전체"), Some("호텔")), CategoryFactors::NEUTRAL);
        assert_eq!(catalog.category_factors(Some("없는업종"), None), CategoryFactors::NEUTRAL);

        let hotel = catalog.category_factors(Some("숙박업"), Some("호텔"));
        assert_eq!(hotel.weight, 1.2);

        // Average of 관광기념품, 대형쇼핑몰, 레저용품쇼핑
        let shopping = catalog.category_factors(Some("쇼핑업"), None);
        assert!((shopping.weight - (0.8 + 1.3 + 1.0) / 3.0).abs() < 1e-9);
        assert!((shopping.traffic_factor - (1.2 + 1.4 + 1.1) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_regional_index_and_profiles() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.regional_index("대전광역시"), 95.8);
        assert_eq!(catalog.regional_index("서울"), 131.4);
        assert_eq!(catalog.regional_index("제주"), 0.0);

        assert_eq!(catalog.region_profile("부산광역시").population_density, 4500.0);
        assert_eq!(catalog.region_profile("제주").population_density, 2000.0);
        assert_eq!(catalog.industry_profile("미분류").survival_rate, 70.0);
    }

    #[test]
    fn test_representative_market() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.representative_market("대전광역시").map(|m| m.code), Some("10000"));
        assert_eq!(catalog.representative_market("유성구").map(|m| m.code), Some("20000"));
        assert!(catalog.representative_market("서울특별시").is_none());
    }
}
