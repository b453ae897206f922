//! Compiled-in reference tables
//!
//! Monthly amounts are in thousand KRW. Ratios are percentages of total
//! tourism spend.

use super::{
    AccessProfile, CategoryFactors, IndustryProfile, IndustryRatio, Level, Market, RegionProfile,
    RiskProfile,
};

pub const DAEJEON: &str = "대전광역시";

pub(super) const MONTHS: [&str; 12] = [
    "2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06", "2024-07", "2024-08",
    "2024-09", "2024-10", "2024-11", "2024-12",
];

/// Category holding the whole-region total
pub(super) const TOTAL_CATEGORY: &str = "관광총소비";

pub(super) const MARKETS: &[Market] = &[
    Market {
        code: "10000",
        name: "대전역 상권",
        market_type: "주요상권",
        city: DAEJEON,
        district: "동구",
        lat: 36.3316,
        lng: 127.4342,
        health_score: 85.5,
        foot_traffic: 195_000,
        competition_level: Level::High,
        growth_potential: 80.0,
    },
    Market {
        code: "20000",
        name: "유성온천역 상권",
        market_type: "주요상권",
        city: DAEJEON,
        district: "유성구",
        lat: 36.3536,
        lng: 127.3450,
        health_score: 78.2,
        foot_traffic: 142_000,
        competition_level: Level::Medium,
        growth_potential: 75.0,
    },
    Market {
        code: "30000",
        name: "으능정이 상권",
        market_type: "일반상권",
        city: DAEJEON,
        district: "중구",
        lat: 36.3250,
        lng: 127.4200,
        health_score: 72.8,
        foot_traffic: 125_000,
        competition_level: Level::Medium,
        growth_potential: 70.0,
    },
    Market {
        code: "40000",
        name: "둔산 상권",
        market_type: "일반상권",
        city: DAEJEON,
        district: "서구",
        lat: 36.3500,
        lng: 127.3800,
        health_score: 68.5,
        foot_traffic: 98_000,
        competition_level: Level::Low,
        growth_potential: 65.0,
    },
    Market {
        code: "50000",
        name: "대덕 상권",
        market_type: "일반상권",
        city: DAEJEON,
        district: "대덕구",
        lat: 36.3800,
        lng: 127.4500,
        health_score: 75.3,
        foot_traffic: 110_000,
        competition_level: Level::Low,
        growth_potential: 85.0,
    },
];

pub(super) const RISK_PROFILES: &[(&str, RiskProfile)] = &[
    (
        "10000",
        RiskProfile {
            foot_traffic_change: 5.2,
            card_sales_change: 3.8,
            same_industry_ratio: 25.5,
            average_income: 35_000_000.0,
            growth_potential: 85.0,
            population_density: 1500.0,
            rent_level: Level::High,
            accessibility: 90.0,
        },
    ),
    (
        "20000",
        RiskProfile {
            foot_traffic_change: 2.1,
            card_sales_change: 1.5,
            same_industry_ratio: 35.2,
            average_income: 42_000_000.0,
            growth_potential: 75.0,
            population_density: 1200.0,
            rent_level: Level::Medium,
            accessibility: 85.0,
        },
    ),
    (
        "30000",
        RiskProfile {
            foot_traffic_change: -1.4,
            card_sales_change: -0.8,
            same_industry_ratio: 18.0,
            average_income: 31_000_000.0,
            growth_potential: 70.0,
            population_density: 1100.0,
            rent_level: Level::Medium,
            accessibility: 80.0,
        },
    ),
    (
        "40000",
        RiskProfile {
            foot_traffic_change: -3.2,
            card_sales_change: -4.1,
            same_industry_ratio: 12.5,
            average_income: 27_000_000.0,
            growth_potential: 65.0,
            population_density: 900.0,
            rent_level: Level::Low,
            accessibility: 70.0,
        },
    ),
    (
        "50000",
        RiskProfile {
            foot_traffic_change: 0.8,
            card_sales_change: 1.2,
            same_industry_ratio: 8.5,
            average_income: 24_000_000.0,
            growth_potential: 88.0,
            population_density: 800.0,
            rent_level: Level::Low,
            accessibility: 65.0,
        },
    ),
];

pub(super) const ACCESS_PROFILES: &[(&str, AccessProfile)] = &[
    (
        "10000",
        AccessProfile {
            subway_stations: &["대전역", "중앙로역"],
            subway_walk_minutes: 5,
            bus_routes: &["101", "102", "201", "202"],
            bus_walk_minutes: 2,
            public_parking_capacity: 150,
            private_parking_capacity: 50,
            street_parking: false,
            parking_score: 75.0,
            sidewalk_width_m: 3.0,
            crosswalks: 4,
            pedestrian_zone: true,
            barrier_free: true,
            pedestrian_score: 85.0,
        },
    ),
    (
        "20000",
        AccessProfile {
            subway_stations: &["유성온천역"],
            subway_walk_minutes: 3,
            bus_routes: &["102", "103", "104", "113"],
            bus_walk_minutes: 3,
            public_parking_capacity: 300,
            private_parking_capacity: 120,
            street_parking: true,
            parking_score: 82.0,
            sidewalk_width_m: 4.0,
            crosswalks: 6,
            pedestrian_zone: false,
            barrier_free: true,
            pedestrian_score: 78.0,
        },
    ),
    (
        "30000",
        AccessProfile {
            subway_stations: &["중앙로역"],
            subway_walk_minutes: 4,
            bus_routes: &["301", "311", "513", "612"],
            bus_walk_minutes: 2,
            public_parking_capacity: 80,
            private_parking_capacity: 60,
            street_parking: false,
            parking_score: 58.0,
            sidewalk_width_m: 5.0,
            crosswalks: 8,
            pedestrian_zone: true,
            barrier_free: true,
            pedestrian_score: 90.0,
        },
    ),
    (
        "40000",
        AccessProfile {
            subway_stations: &["시청역", "정부청사역"],
            subway_walk_minutes: 7,
            bus_routes: &["106", "604", "606", "618", "911"],
            bus_walk_minutes: 2,
            public_parking_capacity: 400,
            private_parking_capacity: 200,
            street_parking: true,
            parking_score: 88.0,
            sidewalk_width_m: 3.5,
            crosswalks: 10,
            pedestrian_zone: false,
            barrier_free: true,
            pedestrian_score: 82.0,
        },
    ),
    (
        "50000",
        AccessProfile {
            subway_stations: &[],
            subway_walk_minutes: 0,
            bus_routes: &["301", "314", "711"],
            bus_walk_minutes: 4,
            public_parking_capacity: 60,
            private_parking_capacity: 30,
            street_parking: true,
            parking_score: 62.0,
            sidewalk_width_m: 2.0,
            crosswalks: 3,
            pedestrian_zone: false,
            barrier_free: false,
            pedestrian_score: 64.0,
        },
    ),
];

/// (region, category, monthly amounts aligned with `MONTHS`)
pub(super) const TOURISM_CONSUMPTION: &[(&str, &str, [f64; 12])] = &[
    (
        DAEJEON,
        TOTAL_CATEGORY,
        [
            182_450_000.0, 176_320_000.0, 189_870_000.0, 197_540_000.0, 205_110_000.0,
            199_860_000.0, 214_370_000.0, 221_950_000.0, 208_640_000.0, 216_280_000.0,
            203_790_000.0, 219_460_000.0,
        ],
    ),
    (
        DAEJEON,
        "대형쇼핑몰",
        [
            52_800_000.0, 52_100_000.0, 51_900_000.0, 51_200_000.0, 50_600_000.0,
            50_300_000.0, 49_700_000.0, 49_200_000.0, 48_900_000.0, 48_300_000.0,
            47_800_000.0, 47_400_000.0,
        ],
    ),
    (
        DAEJEON,
        "호텔",
        [
            31_200_000.0, 29_400_000.0, 28_100_000.0, 26_300_000.0, 25_000_000.0,
            23_400_000.0, 22_200_000.0, 20_900_000.0, 19_600_000.0, 18_500_000.0,
            17_300_000.0, 16_400_000.0,
        ],
    ),
    (
        DAEJEON,
        "식음료",
        [
            40_000_000.0, 42_600_000.0, 45_100_000.0, 47_900_000.0, 50_700_000.0,
            53_800_000.0, 57_000_000.0, 60_400_000.0, 64_000_000.0, 67_900_000.0,
            72_000_000.0, 76_300_000.0,
        ],
    ),
    (
        DAEJEON,
        "관광유원시설",
        [
            18_200_000.0, 17_500_000.0, 21_300_000.0, 24_800_000.0, 27_900_000.0,
            25_100_000.0, 30_600_000.0, 33_200_000.0, 26_400_000.0, 27_800_000.0,
            21_900_000.0, 19_700_000.0,
        ],
    ),
    (
        DAEJEON,
        "여행업",
        [
            9_800_000.0, 9_500_000.0, 10_200_000.0, 10_600_000.0, 11_300_000.0,
            10_900_000.0, 12_400_000.0, 13_100_000.0, 11_700_000.0, 12_200_000.0,
            11_000_000.0, 11_800_000.0,
        ],
    ),
    (
        DAEJEON,
        "육상운송",
        [
            24_100_000.0, 23_600_000.0, 24_900_000.0, 25_300_000.0, 26_000_000.0,
            25_700_000.0, 27_200_000.0, 27_900_000.0, 26_500_000.0, 27_000_000.0,
            26_100_000.0, 27_400_000.0,
        ],
    ),
];

/// Major industry → category carrying its consumption series
pub(super) const REPRESENTATIVE_CATEGORIES: &[(&str, &str)] = &[
    ("쇼핑업", "대형쇼핑몰"),
    ("숙박업", "호텔"),
    ("식음료업", "식음료"),
    ("여가서비스업", "관광유원시설"),
    ("여행업", "여행업"),
    ("운송업", "육상운송"),
];

const fn ratio(
    major: &'static str,
    minor: &'static str,
    major_ratio: f64,
    minor_ratio: f64,
) -> IndustryRatio {
    IndustryRatio {
        major,
        minor,
        major_ratio,
        minor_ratio,
    }
}

pub(super) const INDUSTRY_RATIOS: &[IndustryRatio] = &[
    ratio("쇼핑업", "관광기념품", 18.5, 3.2),
    ratio("쇼핑업", "대형쇼핑몰", 18.5, 11.8),
    ratio("쇼핑업", "레저용품쇼핑", 18.5, 3.5),
    ratio("숙박업", "기타숙박", 12.3, 2.1),
    ratio("숙박업", "캠핑장/펜션", 12.3, 1.9),
    ratio("숙박업", "콘도", 12.3, 2.4),
    ratio("숙박업", "호텔", 12.3, 5.9),
    ratio("식음료업", "식음료", 35.2, 35.2),
    ratio("여가서비스업", "골프장", 14.6, 4.8),
    ratio("여가서비스업", "관광유원시설", 14.6, 4.1),
    ratio("여가서비스업", "기타레저", 14.6, 2.6),
    ratio("여가서비스업", "문화서비스", 14.6, 3.1),
    ratio("여행업", "여행업", 6.1, 6.1),
    ratio("운송업", "렌터카", 13.3, 4.2),
    ratio("운송업", "수상운송", 13.3, 0.9),
    ratio("운송업", "육상운송", 13.3, 8.2),
];

/// Regional tourism spend index (100 = national average)
pub(super) const REGIONAL_INDEX: &[(&str, f64)] = &[
    ("서울특별시", 131.4),
    ("부산광역시", 104.2),
    ("대구광역시", 92.7),
    ("인천광역시", 97.5),
    ("광주광역시", 88.3),
    ("대전광역시", 95.8),
    ("울산광역시", 90.1),
    ("세종특별자치시", 84.6),
];

const fn factors(weight: f64, traffic_factor: f64, competition_factor: f64) -> CategoryFactors {
    CategoryFactors {
        weight,
        traffic_factor,
        competition_factor,
    }
}

/// (major, minor, factors)
pub(super) const CATEGORY_FACTORS: &[(&str, &str, CategoryFactors)] = &[
    ("쇼핑업", "관광기념품", factors(0.8, 1.2, 0.9)),
    ("쇼핑업", "대형쇼핑몰", factors(1.3, 1.4, 1.2)),
    ("쇼핑업", "레저용품쇼핑", factors(1.0, 1.1, 1.0)),
    ("숙박업", "기타숙박", factors(1.0, 0.8, 0.9)),
    ("숙박업", "캠핑장/펜션", factors(0.7, 0.6, 0.8)),
    ("숙박업", "콘도", factors(0.8, 0.7, 0.8)),
    ("숙박업", "호텔", factors(1.2, 1.0, 0.9)),
    ("식음료업", "식음료", factors(1.2, 1.3, 1.1)),
    ("여가서비스업", "골프장", factors(0.9, 0.7, 0.8)),
    ("여가서비스업", "관광유원시설", factors(1.1, 1.2, 1.0)),
    ("여가서비스업", "기타레저", factors(1.0, 1.0, 1.0)),
    ("여가서비스업", "문화서비스", factors(1.0, 0.9, 1.0)),
    ("여행업", "여행업", factors(1.0, 0.8, 1.0)),
    ("운송업", "렌터카", factors(0.8, 0.7, 0.9)),
    ("운송업", "수상운송", factors(0.7, 0.6, 0.8)),
    ("운송업", "육상운송", factors(1.1, 1.0, 1.0)),
];

pub(super) const INDUSTRY_PROFILES: &[(&str, IndustryProfile)] = &[
    (
        "쇼핑업",
        IndustryProfile {
            survival_rate: 68.0,
            growth_potential: 0.5,
            risk_level: 0.5,
            competition_intensity: 0.6,
        },
    ),
    (
        "숙박업",
        IndustryProfile {
            survival_rate: 72.0,
            growth_potential: 0.6,
            risk_level: 0.4,
            competition_intensity: 0.5,
        },
    ),
    (
        "식음료업",
        IndustryProfile {
            survival_rate: 75.0,
            growth_potential: 0.7,
            risk_level: 0.3,
            competition_intensity: 0.7,
        },
    ),
    (
        "여가서비스업",
        IndustryProfile {
            survival_rate: 70.0,
            growth_potential: 0.8,
            risk_level: 0.4,
            competition_intensity: 0.4,
        },
    ),
    (
        "여행업",
        IndustryProfile {
            survival_rate: 65.0,
            growth_potential: 0.6,
            risk_level: 0.5,
            competition_intensity: 0.5,
        },
    ),
    (
        "운송업",
        IndustryProfile {
            survival_rate: 78.0,
            growth_potential: 0.5,
            risk_level: 0.3,
            competition_intensity: 0.4,
        },
    ),
];

pub(super) const DEFAULT_INDUSTRY_PROFILE: IndustryProfile = IndustryProfile {
    survival_rate: 70.0,
    growth_potential: 0.6,
    risk_level: 0.4,
    competition_intensity: 0.5,
};

/// Keyed by short region name; matched as a prefix of the requested region
pub(super) const REGION_PROFILES: &[(&str, RegionProfile)] = &[
    (
        "대전",
        RegionProfile {
            population_density: 2500.0,
            economic_growth: 2.0,
            unemployment_rate: 3.0,
            average_income: 3_000_000.0,
            infrastructure_score: 0.7,
        },
    ),
    (
        "서울",
        RegionProfile {
            population_density: 16000.0,
            economic_growth: 2.5,
            unemployment_rate: 4.0,
            average_income: 4_000_000.0,
            infrastructure_score: 0.9,
        },
    ),
    (
        "부산",
        RegionProfile {
            population_density: 4500.0,
            economic_growth: 1.8,
            unemployment_rate: 3.5,
            average_income: 3_200_000.0,
            infrastructure_score: 0.8,
        },
    ),
    (
        "인천",
        RegionProfile {
            population_density: 2800.0,
            economic_growth: 2.2,
            unemployment_rate: 3.8,
            average_income: 3_100_000.0,
            infrastructure_score: 0.75,
        },
    ),
    (
        "광주",
        RegionProfile {
            population_density: 2900.0,
            economic_growth: 1.9,
            unemployment_rate: 3.2,
            average_income: 2_800_000.0,
            infrastructure_score: 0.7,
        },
    ),
    (
        "대구",
        RegionProfile {
            population_density: 2800.0,
            economic_growth: 1.7,
            unemployment_rate: 3.6,
            average_income: 2_900_000.0,
            infrastructure_score: 0.72,
        },
    ),
];

pub(super) const DEFAULT_REGION_PROFILE: RegionProfile = RegionProfile {
    population_density: 2000.0,
    economic_growth: 2.0,
    unemployment_rate: 3.5,
    average_income: 3_000_000.0,
    infrastructure_score: 0.7,
};
