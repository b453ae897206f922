//! Support tools: centers, experts, policy matching, policy applications and
//! consultation booking

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sodam_common::db::ConsultationRecord;
use sodam_common::{Error, Result};
use tracing::{debug, warn};
use uuid::Uuid;

use super::strategy::UserProfile;
use crate::catalog::DEFAULT_REGION;

const DEFAULT_BUSINESS_TYPE: &str = "식음료업";
const MAX_POLICIES: usize = 10;
const MAX_CASES: usize = 20;
const REVIEW_TIME: &str = "14-30일";
/// Policies closing within this many days raise an alert
const DEADLINE_WINDOW_DAYS: i64 = 30;
const URGENT_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize)]
pub struct SupportCenter {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub website: &'static str,
    pub services: &'static [&'static str],
    pub operating_hours: &'static str,
    pub specialties: &'static [&'static str],
}

static CENTERS: [SupportCenter; 3] = [
    SupportCenter {
        id: "center_001",
        name: "대전광역시 소상공인지원센터",
        region: "대전광역시",
        address: "대전광역시 중구 중앙로 101",
        phone: "042-123-4567",
        email: "daejeon@sbc.or.kr",
        website: "https://daejeon.sbc.or.kr",
        services: &["창업상담", "자금지원", "교육프로그램", "마케팅지원"],
        operating_hours: "평일 09:00-18:00",
        specialties: &["창업지원", "자금조달", "경영컨설팅"],
    },
    SupportCenter {
        id: "center_002",
        name: "유성구 소상공인지원센터",
        region: "대전광역시 유성구",
        address: "대전광역시 유성구 대학로 291",
        phone: "042-234-5678",
        email: "yuseong@sbc.or.kr",
        website: "https://yuseong.sbc.or.kr",
        services: &["창업상담", "자금지원", "교육프로그램", "기술지원"],
        operating_hours: "평일 09:00-18:00",
        specialties: &["기술창업", "R&D지원", "특허상담"],
    },
    SupportCenter {
        id: "center_003",
        name: "동구 소상공인지원센터",
        region: "대전광역시 동구",
        address: "대전광역시 동구 중앙로 200",
        phone: "042-345-6789",
        email: "donggu@sbc.or.kr",
        website: "https://donggu.sbc.or.kr",
        services: &["창업상담", "자금지원", "교육프로그램", "마케팅지원"],
        operating_hours: "평일 09:00-18:00",
        specialties: &["전통시장활성화", "관광상품개발", "지역특화상품"],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct Expert {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub organization: &'static str,
    pub region: &'static str,
    pub expertise: &'static [&'static str],
    pub experience: &'static str,
    pub specialties: &'static [&'static str],
    pub consultation_available: bool,
    pub next_available: Option<&'static str>,
    pub rating: f64,
    pub consultation_count: u32,
}

static EXPERTS: [Expert; 4] = [
    Expert {
        id: "expert_001",
        name: "김창업",
        title: "창업컨설턴트",
        organization: "대전광역시 소상공인지원센터",
        region: "대전광역시",
        expertise: &["창업상담", "사업계획서작성", "자금조달"],
        experience: "15년",
        specialties: &["식음료업", "의류업"],
        consultation_available: true,
        next_available: Some("2024-01-15 14:00"),
        rating: 4.8,
        consultation_count: 150,
    },
    Expert {
        id: "expert_002",
        name: "이마케팅",
        title: "마케팅전문가",
        organization: "유성구 소상공인지원센터",
        region: "대전광역시 유성구",
        expertise: &["마케팅전략", "SNS마케팅", "브랜딩"],
        experience: "12년",
        specialties: &["화장품", "생활용품"],
        consultation_available: true,
        next_available: Some("2024-01-16 10:00"),
        rating: 4.9,
        consultation_count: 200,
    },
    Expert {
        id: "expert_003",
        name: "박기술",
        title: "기술컨설턴트",
        organization: "대전테크노파크",
        region: "대전광역시",
        expertise: &["기술창업", "특허상담", "R&D지원"],
        experience: "20년",
        specialties: &["전자제품", "화장품"],
        consultation_available: true,
        next_available: Some("2024-01-17 15:00"),
        rating: 4.7,
        consultation_count: 120,
    },
    Expert {
        id: "expert_004",
        name: "최상권",
        title: "상권분석전문가",
        organization: "서구 소상공인지원센터",
        region: "대전광역시 서구",
        expertise: &["상권분석", "입지선정", "창업상담"],
        experience: "10년",
        specialties: &["식음료업", "생활용품"],
        consultation_available: false,
        next_available: None,
        rating: 4.6,
        consultation_count: 90,
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConsultationType {
    #[serde(rename = "type")]
    pub name: &'static str,
    pub duration: &'static str,
    pub cost: &'static str,
}

pub static CONSULTATION_TYPES: [ConsultationType; 3] = [
    ConsultationType { name: "온라인 상담", duration: "30분", cost: "무료" },
    ConsultationType { name: "방문 상담", duration: "1시간", cost: "무료" },
    ConsultationType { name: "전화 상담", duration: "20분", cost: "무료" },
];

/// A kind of help offered by the support centers
#[derive(Debug, Clone, Serialize)]
pub struct ServiceType {
    pub id: &'static str,
    pub description: &'static str,
    pub target_users: &'static [&'static str],
    pub duration: &'static str,
    pub cost: &'static str,
}

static SERVICE_TYPES: [ServiceType; 5] = [
    ServiceType {
        id: "창업상담",
        description: "창업 계획 수립 및 사업계획서 작성 지원",
        target_users: &["ENTREPRENEUR"],
        duration: "1-2시간",
        cost: "무료",
    },
    ServiceType {
        id: "자금지원",
        description: "창업 자금 및 운영 자금 지원",
        target_users: &["ENTREPRENEUR"],
        duration: "신청 후 심사",
        cost: "무료",
    },
    ServiceType {
        id: "교육프로그램",
        description: "창업 및 경영 관련 교육 프로그램",
        target_users: &["ENTREPRENEUR", "INVESTOR"],
        duration: "1-3개월",
        cost: "무료",
    },
    ServiceType {
        id: "마케팅지원",
        description: "마케팅 전략 수립 및 홍보 지원",
        target_users: &["ENTREPRENEUR"],
        duration: "2-4개월",
        cost: "무료",
    },
    ServiceType {
        id: "기술지원",
        description: "기술 개발 및 특허 지원",
        target_users: &["ENTREPRENEUR"],
        duration: "3-6개월",
        cost: "무료",
    },
];

/// (area, description)
const EXPERTISE_AREAS: [(&str, &str); 11] = [
    ("창업상담", "창업 계획 수립 및 사업계획서 작성"),
    ("사업계획서작성", "투자 유치를 위한 사업계획서 작성 지원"),
    ("자금조달", "창업 자금 및 운영 자금 조달 방법 안내"),
    ("마케팅전략", "마케팅 전략 수립 및 실행 방안"),
    ("SNS마케팅", "소셜미디어 마케팅 전략 및 실행"),
    ("브랜딩", "브랜드 아이덴티티 및 브랜딩 전략"),
    ("기술창업", "기술 기반 창업 및 R&D 전략"),
    ("특허상담", "특허 출원 및 지적재산권 보호"),
    ("R&D지원", "연구개발 프로젝트 기획 및 실행"),
    ("상권분석", "상권 데이터 기반 입지 및 수요 분석"),
    ("입지선정", "업종에 맞는 점포 입지 선정"),
];

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationPeriod {
    pub start: &'static str,
    pub end: &'static str,
}

impl ApplicationPeriod {
    fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.end, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Policy {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub organization: &'static str,
    pub support_amount: &'static str,
    pub support_type: &'static str,
    pub target_business: &'static [&'static str],
    pub target_stage: &'static [&'static str],
    pub target_user: &'static [&'static str],
    pub application_period: ApplicationPeriod,
    pub priority: u32,
    pub description: &'static str,
    pub requirements: &'static [&'static str],
    pub contact: &'static str,
}

impl Policy {
    fn matches(&self, region: &str, business_type: &str, user_type: &str, stage: &str) -> bool {
        self.region.contains(region)
            && self.target_business.iter().any(|&b| b == business_type)
            && self.target_user.iter().any(|&u| u == user_type)
            && self.target_stage.iter().any(|&s| s == stage)
    }
}

static POLICIES: [Policy; 4] = [
    Policy {
        id: "policy_001",
        name: "대전광역시 창업지원금",
        region: "대전광역시",
        organization: "대전광역시청",
        support_amount: "최대 1000만원",
        support_type: "자금지원",
        target_business: &["식음료업", "의류업", "생활용품"],
        target_stage: &["PLANNING", "STARTUP"],
        target_user: &["ENTREPRENEUR"],
        application_period: ApplicationPeriod { start: "2024-01-01", end: "2024-12-31" },
        priority: 95,
        description: "창업 초기 자금 지원을 위한 정책",
        requirements: &["사업자등록증", "사업계획서", "재정상태증명서"],
        contact: "042-123-4567",
    },
    Policy {
        id: "policy_002",
        name: "유성구 기술창업 지원사업",
        region: "대전광역시 유성구",
        organization: "유성구청",
        support_amount: "최대 2000만원",
        support_type: "자금지원",
        target_business: &["전자제품", "화장품"],
        target_stage: &["PLANNING", "STARTUP"],
        target_user: &["ENTREPRENEUR"],
        application_period: ApplicationPeriod { start: "2024-03-01", end: "2024-11-30" },
        priority: 90,
        description: "기술 기반 창업을 위한 지원사업",
        requirements: &["기술개발계획서", "특허출원서", "사업계획서"],
        contact: "042-234-5678",
    },
    Policy {
        id: "policy_003",
        name: "대전광역시 마케팅 지원사업",
        region: "대전광역시",
        organization: "대전광역시청",
        support_amount: "최대 500만원",
        support_type: "마케팅지원",
        target_business: &["식음료업", "의류업", "화장품", "생활용품"],
        target_stage: &["STARTUP", "GROWTH"],
        target_user: &["ENTREPRENEUR"],
        application_period: ApplicationPeriod { start: "2024-02-01", end: "2024-10-31" },
        priority: 85,
        description: "온라인 마케팅 및 홍보 지원",
        requirements: &["마케팅계획서", "사업자등록증", "매출증빙서류"],
        contact: "042-123-4567",
    },
    Policy {
        id: "policy_004",
        name: "동구 전통시장 활성화 지원",
        region: "대전광역시 동구",
        organization: "동구청",
        support_amount: "최대 300만원",
        support_type: "자금지원",
        target_business: &["식음료업", "생활용품"],
        target_stage: &["STARTUP", "GROWTH"],
        target_user: &["ENTREPRENEUR"],
        application_period: ApplicationPeriod { start: "2024-04-01", end: "2024-09-30" },
        priority: 80,
        description: "전통시장 내 창업 및 사업 확장 지원",
        requirements: &["전통시장 입점계약서", "사업계획서", "재정상태증명서"],
        contact: "042-345-6789",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct GuideStep {
    pub step: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
}

static APPLICATION_GUIDE: [GuideStep; 5] = [
    GuideStep {
        step: 1,
        title: "정책 조회 및 검토",
        description: "본인에게 해당하는 정책을 찾고 자격 요건을 확인합니다.",
        duration: "1-2일",
    },
    GuideStep {
        step: 2,
        title: "필요 서류 준비",
        description: "신청에 필요한 서류들을 미리 준비합니다.",
        duration: "3-7일",
    },
    GuideStep {
        step: 3,
        title: "온라인 신청",
        description: "정책 담당 기관 홈페이지에서 온라인 신청을 진행합니다.",
        duration: "1일",
    },
    GuideStep {
        step: 4,
        title: "서류 제출",
        description: "필요한 서류를 제출하고 심사 결과를 기다립니다.",
        duration: "7-14일",
    },
    GuideStep {
        step: 5,
        title: "심사 및 선정",
        description: "심사 과정을 거쳐 선정 여부가 결정됩니다.",
        duration: "14-30일",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct CaseMetric {
    pub metric: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalCase {
    pub id: &'static str,
    pub title: &'static str,
    pub industry: &'static str,
    pub region: &'static str,
    pub strategy_type: &'static str,
    pub market_code: &'static str,
    pub challenge: &'static str,
    pub solution: &'static str,
    pub results: &'static [CaseMetric],
    pub key_factors: &'static [&'static str],
    pub duration: &'static str,
    pub investment: &'static str,
    pub lessons_learned: &'static str,
}

static LOCAL_CASES: [LocalCase; 3] = [
    LocalCase {
        id: "case_001",
        title: "대전역 카페 '커피앤북' 성공 사례",
        industry: "식음료업",
        region: "대전광역시 동구",
        strategy_type: "differentiation",
        market_code: "10000",
        challenge: "과포화된 카페 시장에서 차별화 필요",
        solution: "독서 카페 컨셉으로 전환하고 도서 대여 서비스 추가",
        results: &[
            CaseMetric { metric: "revenue_increase", value: "45%" },
            CaseMetric { metric: "customer_retention", value: "60%" },
            CaseMetric { metric: "average_dwell_time", value: "90분" },
        ],
        key_factors: &["독특한 컨셉", "고객 체류시간 연장", "부가 서비스"],
        duration: "6개월",
        investment: "500만원",
        lessons_learned: "차별화된 컨셉이 고객 유치의 핵심",
    },
    LocalCase {
        id: "case_002",
        title: "유성온천역 의류점 '스타일랩' 성공 사례",
        industry: "의류업",
        region: "대전광역시 유성구",
        strategy_type: "online_expansion",
        market_code: "20000",
        challenge: "오프라인 매출 감소로 온라인 진출 필요",
        solution: "인스타그램 쇼핑몰 구축과 인플루언서 마케팅",
        results: &[
            CaseMetric { metric: "online_revenue", value: "200%" },
            CaseMetric { metric: "total_revenue", value: "80%" },
            CaseMetric { metric: "new_customers", value: "150%" },
        ],
        key_factors: &["SNS 마케팅", "인플루언서 협업", "온라인 쇼핑몰"],
        duration: "4개월",
        investment: "300만원",
        lessons_learned: "온라인 채널 확장이 매출 증대의 핵심",
    },
    LocalCase {
        id: "case_003",
        title: "중구 화장품점 '뷰티허브' 성공 사례",
        industry: "화장품",
        region: "대전광역시 중구",
        strategy_type: "customer_loyalty",
        market_code: "30000",
        challenge: "고객 충성도 부족과 낮은 재방문율",
        solution: "맞춤형 뷰티 컨설팅 서비스와 멤버십 프로그램",
        results: &[
            CaseMetric { metric: "customer_retention", value: "70%" },
            CaseMetric { metric: "average_purchase", value: "35%" },
            CaseMetric { metric: "repeat_customers", value: "85%" },
        ],
        key_factors: &["개인 맞춤 서비스", "멤버십 혜택", "전문 컨설팅"],
        duration: "3개월",
        investment: "200만원",
        lessons_learned: "고객 맞춤 서비스가 충성도 향상의 핵심",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct CenterFilters {
    pub region: Option<String>,
    pub service_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupportCenterList {
    pub total_centers: usize,
    pub support_centers: Vec<&'static SupportCenter>,
    pub filters: CenterFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpertFilters {
    pub region: Option<String>,
    pub expertise: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpertList {
    pub total_experts: usize,
    pub experts: Vec<&'static Expert>,
    pub consultation_types: &'static [ConsultationType],
    pub filters: ExpertFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeadlineAlert {
    pub policy_id: &'static str,
    pub policy_name: &'static str,
    pub deadline: &'static str,
    pub days_remaining: i64,
    pub urgency: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyRecommendations {
    pub user_profile: UserProfile,
    pub total_policies: usize,
    pub recommended_policies: Vec<&'static Policy>,
    pub application_guide: &'static [GuideStep],
    pub deadline_alerts: Vec<DeadlineAlert>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCase {
    #[serde(flatten)]
    pub case: &'static LocalCase,
    pub relevance_score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseCategory {
    pub category: &'static str,
    pub count: usize,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalCaseFilters {
    pub industry: Option<String>,
    pub region: Option<String>,
    pub strategy_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalCaseList {
    pub total_cases: usize,
    pub success_cases: Vec<RankedCase>,
    pub filters: LocalCaseFilters,
    pub case_categories: Vec<CaseCategory>,
}

/// Consultation booking request
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub expert_id: String,
    pub requester_name: String,
    pub consultation_type: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub consultation: ConsultationRecord,
    pub expert_name: &'static str,
    pub estimated_duration: &'static str,
    pub cost: &'static str,
    pub next_steps: [&'static str; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceTypeEntry {
    #[serde(flatten)]
    pub service: &'static ServiceType,
    /// Support centers offering this service
    pub center_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceTypeList {
    pub total_service_types: usize,
    pub service_types: Vec<ServiceTypeEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpertiseArea {
    pub id: &'static str,
    pub description: &'static str,
    pub expert_count: usize,
    /// Experts in this area currently taking bookings
    pub available_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpertiseAreaList {
    pub total_areas: usize,
    pub expertise_areas: Vec<ExpertiseArea>,
}

/// Policy application request
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyApplicationRequest {
    pub policy_id: String,
    pub applicant_name: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub submitted_documents: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Every required document is attached
    Submitted,
    /// Accepted, but documents must be supplemented before review
    Incomplete,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyApplication {
    pub application_id: Uuid,
    pub policy_id: &'static str,
    pub policy_name: &'static str,
    pub organization: &'static str,
    pub applicant_name: String,
    pub business_name: Option<String>,
    pub contact: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_documents: Vec<String>,
    pub missing_documents: Vec<&'static str>,
    pub estimated_review_time: &'static str,
    pub contact_info: &'static str,
    pub submitted_at: DateTime<Utc>,
    pub next_steps: Vec<&'static str>,
}

pub fn support_centers(region: Option<&str>, service_type: Option<&str>) -> SupportCenterList {
    let centers: Vec<&'static SupportCenter> = CENTERS
        .iter()
        .filter(|c| region.map_or(true, |r| c.region.contains(r)))
        .filter(|c| service_type.map_or(true, |s| c.services.iter().any(|&x| x == s)))
        .collect();

    SupportCenterList {
        total_centers: centers.len(),
        support_centers: centers,
        filters: CenterFilters {
            region: region.map(str::to_string),
            service_type: service_type.map(str::to_string),
        },
    }
}

pub fn experts(region: Option<&str>, expertise: Option<&str>) -> ExpertList {
    let experts: Vec<&'static Expert> = EXPERTS
        .iter()
        .filter(|e| region.map_or(true, |r| e.region.contains(r)))
        .filter(|e| expertise.map_or(true, |x| e.expertise.iter().any(|&e| e == x)))
        .collect();

    ExpertList {
        total_experts: experts.len(),
        experts,
        consultation_types: &CONSULTATION_TYPES,
        filters: ExpertFilters {
            region: region.map(str::to_string),
            expertise: expertise.map(str::to_string),
        },
    }
}

fn deadline_alert(policy: &'static Policy, today: NaiveDate) -> Option<DeadlineAlert> {
    let Some(end) = policy.application_period.end_date() else {
        warn!(policy = policy.id, "Unparseable application deadline");
        return None;
    };
    let days_remaining = (end - today).num_days();
    if !(0..=DEADLINE_WINDOW_DAYS).contains(&days_remaining) {
        return None;
    }

    Some(DeadlineAlert {
        policy_id: policy.id,
        policy_name: policy.name,
        deadline: policy.application_period.end,
        days_remaining,
        urgency: if days_remaining <= URGENT_DAYS { "high" } else { "medium" },
    })
}

/// Policies matching the owner's first preferred area and business type
pub fn policy_recommendations(profile: &UserProfile, today: NaiveDate) -> PolicyRecommendations {
    let region = profile
        .preferred_areas
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_REGION);
    let business_type = profile
        .interested_business_types
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_BUSINESS_TYPE);

    let mut matching: Vec<&'static Policy> = POLICIES
        .iter()
        .filter(|p| p.matches(region, business_type, &profile.user_type, &profile.business_stage))
        .collect();
    matching.sort_by(|a, b| b.priority.cmp(&a.priority));

    let deadline_alerts = matching
        .iter()
        .filter_map(|&p| deadline_alert(p, today))
        .collect();

    debug!(region, business_type, matched = matching.len(), "Policy recommendations");

    PolicyRecommendations {
        user_profile: profile.clone(),
        total_policies: matching.len(),
        recommended_policies: matching.into_iter().take(MAX_POLICIES).collect(),
        application_guide: &APPLICATION_GUIDE,
        deadline_alerts,
    }
}

fn relevance(
    case: &LocalCase,
    industry: Option<&str>,
    region: Option<&str>,
    strategy_type: Option<&str>,
) -> u32 {
    let mut score = 0;
    if industry.is_some_and(|i| case.industry == i) {
        score += 40;
    }
    if region.is_some_and(|r| case.region.contains(r)) {
        score += 30;
    }
    if strategy_type.is_some_and(|s| case.strategy_type == s) {
        score += 30;
    }
    score
}

fn distinct<F>(key: F) -> usize
where
    F: Fn(&LocalCase) -> &'static str,
{
    let mut seen: Vec<&str> = LOCAL_CASES.iter().map(key).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

fn case_categories() -> Vec<CaseCategory> {
    vec![
        CaseCategory {
            category: "업종별",
            count: distinct(|c| c.industry),
            description: "업종별 성공 사례",
        },
        CaseCategory {
            category: "지역별",
            count: distinct(|c| c.region),
            description: "지역별 성공 사례",
        },
        CaseCategory {
            category: "전략별",
            count: distinct(|c| c.strategy_type),
            description: "전략별 성공 사례",
        },
        CaseCategory {
            category: "투자규모별",
            count: distinct(|c| c.investment),
            description: "투자 규모별 성공 사례",
        },
    ]
}

/// Local success cases, most relevant first
pub fn success_cases(
    industry: Option<&str>,
    region: Option<&str>,
    strategy_type: Option<&str>,
) -> LocalCaseList {
    let mut ranked: Vec<RankedCase> = LOCAL_CASES
        .iter()
        .filter(|c| industry.map_or(true, |i| c.industry == i))
        .filter(|c| region.map_or(true, |r| c.region.contains(r)))
        .filter(|c| strategy_type.map_or(true, |s| c.strategy_type == s))
        .map(|case| RankedCase {
            case,
            relevance_score: relevance(case, industry, region, strategy_type),
        })
        .collect();
    ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

    LocalCaseList {
        total_cases: ranked.len(),
        success_cases: ranked.into_iter().take(MAX_CASES).collect(),
        filters: LocalCaseFilters {
            industry: industry.map(str::to_string),
            region: region.map(str::to_string),
            strategy_type: strategy_type.map(str::to_string),
        },
        case_categories: case_categories(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Validate a booking request and build the row to persist
pub fn book_consultation(request: BookingRequest, now: DateTime<Utc>) -> Result<Booking> {
    let expert = EXPERTS
        .iter()
        .find(|e| e.id == request.expert_id)
        .ok_or_else(|| Error::NotFound(format!("전문가를 찾을 수 없습니다: {}", request.expert_id)))?;

    if !expert.consultation_available {
        return Err(Error::Conflict(format!(
            "현재 상담 예약이 불가능한 전문가입니다: {}",
            expert.name
        )));
    }

    let consultation_type = CONSULTATION_TYPES
        .iter()
        .find(|t| t.name == request.consultation_type)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "지원하지 않는 상담 유형입니다: {}",
                request.consultation_type
            ))
        })?;

    let requester_name = request.requester_name.trim();
    if requester_name.is_empty() {
        return Err(Error::InvalidInput("신청자 이름이 필요합니다.".to_string()));
    }

    let consultation = ConsultationRecord {
        id: Uuid::new_v4(),
        expert_id: expert.id.to_string(),
        requester_name: requester_name.to_string(),
        contact: non_empty(request.contact),
        consultation_type: consultation_type.name.to_string(),
        preferred_time: non_empty(request.preferred_time),
        message: non_empty(request.message),
        status: ConsultationRecord::STATUS_REQUESTED.to_string(),
        created_at: now,
    };

    Ok(Booking {
        consultation,
        expert_name: expert.name,
        estimated_duration: consultation_type.duration,
        cost: consultation_type.cost,
        next_steps: [
            "예약 확인을 위해 담당자가 연락드릴 예정입니다.",
            "상담 1일 전에 리마인더 메시지를 발송드립니다.",
            "상담 당일 준비사항을 안내드립니다.",
        ],
    })
}

pub fn service_types() -> ServiceTypeList {
    let service_types: Vec<ServiceTypeEntry> = SERVICE_TYPES
        .iter()
        .map(|service| ServiceTypeEntry {
            service,
            center_count: CENTERS
                .iter()
                .filter(|c| c.services.contains(&service.id))
                .count(),
        })
        .collect();

    ServiceTypeList {
        total_service_types: service_types.len(),
        service_types,
    }
}

pub fn expertise_areas() -> ExpertiseAreaList {
    let expertise_areas: Vec<ExpertiseArea> = EXPERTISE_AREAS
        .iter()
        .map(|&(id, description)| {
            let experts: Vec<&Expert> = EXPERTS.iter().filter(|e| e.expertise.contains(&id)).collect();
            ExpertiseArea {
                id,
                description,
                expert_count: experts.len(),
                available_count: experts.iter().filter(|e| e.consultation_available).count(),
            }
        })
        .collect();

    ExpertiseAreaList {
        total_areas: expertise_areas.len(),
        expertise_areas,
    }
}

/// Validate a policy application and check its documents against the
/// policy requirements
pub fn apply_for_policy(
    request: PolicyApplicationRequest,
    now: DateTime<Utc>,
) -> Result<PolicyApplication> {
    let policy = POLICIES
        .iter()
        .find(|p| p.id == request.policy_id.trim())
        .ok_or_else(|| Error::NotFound(format!("정책을 찾을 수 없습니다: {}", request.policy_id)))?;

    let applicant_name = request.applicant_name.trim();
    if applicant_name.is_empty() {
        return Err(Error::InvalidInput("신청자 이름이 필요합니다.".to_string()));
    }

    let submitted_documents: Vec<String> = request
        .submitted_documents
        .iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    let missing_documents: Vec<&'static str> = policy
        .requirements
        .iter()
        .copied()
        .filter(|required| !submitted_documents.iter().any(|d| d == required))
        .collect();

    let (status, next_steps) = if missing_documents.is_empty() {
        (
            ApplicationStatus::Submitted,
            vec!["신청서 검토 및 보완 요청 (필요시)", "심사 과정 진행", "선정 결과 통보"],
        )
    } else {
        (
            ApplicationStatus::Incomplete,
            vec!["누락된 서류를 준비하여 제출하세요", "서류 보완 후 심사 진행", "선정 결과 통보"],
        )
    };
    debug!(policy = policy.id, missing = missing_documents.len(), "Policy application");

    Ok(PolicyApplication {
        application_id: Uuid::new_v4(),
        policy_id: policy.id,
        policy_name: policy.name,
        organization: policy.organization,
        applicant_name: applicant_name.to_string(),
        business_name: non_empty(request.business_name),
        contact: non_empty(request.contact),
        status,
        submitted_documents,
        missing_documents,
        estimated_review_time: REVIEW_TIME,
        contact_info: policy.contact,
        submitted_at: now,
        next_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking(expert_id: &str, name: &str, kind: &str) -> BookingRequest {
        BookingRequest {
            expert_id: expert_id.to_string(),
            requester_name: name.to_string(),
            consultation_type: kind.to_string(),
            contact: Some("010-1234-5678".to_string()),
            preferred_time: Some("  ".to_string()),
            message: None,
        }
    }

    #[test]
    fn test_center_filters() {
        assert_eq!(support_centers(None, None).total_centers, 3);
        assert_eq!(support_centers(Some("유성구"), None).total_centers, 1);
        assert_eq!(support_centers(None, Some("마케팅지원")).total_centers, 2);
        assert_eq!(support_centers(Some("동구"), Some("기술지원")).total_centers, 0);
    }

    #[test]
    fn test_expert_filters() {
        let all = experts(None, None);
        assert_eq!(all.total_experts, 4);
        assert_eq!(all.consultation_types.len(), 3);
        let found = experts(Some("대전광역시"), Some("특허상담"));
        assert_eq!(found.experts.len(), 1);
        assert_eq!(found.experts[0].id, "expert_003");
    }

    #[test]
    fn test_default_profile_matches_startup_fund() {
        let result = policy_recommendations(&UserProfile::default(), date("2024-06-01"));
        let ids: Vec<&str> = result.recommended_policies.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["policy_001"]);
        assert!(result.deadline_alerts.is_empty());
        assert_eq!(result.application_guide.len(), 5);
    }

    #[test]
    fn test_growth_stage_policies_sorted_by_priority() {
        let profile = UserProfile {
            business_stage: "GROWTH".to_string(),
            preferred_areas: vec!["대전광역시 동구".to_string()],
            interested_business_types: vec!["생활용품".to_string()],
            ..Default::default()
        };
        let result = policy_recommendations(&profile, date("2024-06-01"));
        let ids: Vec<&str> = result.recommended_policies.iter().map(|p| p.id).collect();
        // policy_003 is city-wide and its region does not contain 동구
        assert_eq!(ids, vec!["policy_004"]);
    }

    #[test]
    fn test_deadline_alerts() {
        let profile = UserProfile {
            business_stage: "STARTUP".to_string(),
            ..Default::default()
        };
        let result = policy_recommendations(&profile, date("2024-10-25"));
        assert_eq!(result.total_policies, 3);
        let alerts: Vec<(&str, i64, &str)> = result
            .deadline_alerts
            .iter()
            .map(|a| (a.policy_id, a.days_remaining, a.urgency))
            .collect();
        assert_eq!(alerts, vec![("policy_003", 6, "high")]);

        let result = policy_recommendations(&profile, date("2024-12-10"));
        assert_eq!(result.deadline_alerts.len(), 1);
        assert_eq!(result.deadline_alerts[0].policy_id, "policy_001");
        assert_eq!(result.deadline_alerts[0].urgency, "medium");
    }

    #[test]
    fn test_success_case_relevance() {
        let result = success_cases(None, Some("대전광역시"), None);
        assert_eq!(result.total_cases, 3);
        assert!(result.success_cases.iter().all(|c| c.relevance_score == 30));

        let result = success_cases(Some("의류업"), Some("유성구"), None);
        assert_eq!(result.total_cases, 1);
        assert_eq!(result.success_cases[0].relevance_score, 70);
        assert_eq!(result.case_categories[0].count, 3);
    }

    #[test]
    fn test_book_consultation() {
        let now = Utc::now();
        let booking = book_consultation(booking("expert_001", " 홍길동 ", "온라인 상담"), now).unwrap();
        assert_eq!(booking.consultation.requester_name, "홍길동");
        assert_eq!(booking.consultation.status, "requested");
        assert_eq!(booking.consultation.preferred_time, None);
        assert_eq!(booking.estimated_duration, "30분");
    }

    fn application(policy_id: &str, documents: &[&str]) -> PolicyApplicationRequest {
        PolicyApplicationRequest {
            policy_id: policy_id.to_string(),
            applicant_name: "홍길동".to_string(),
            business_name: Some("커피앤북".to_string()),
            contact: None,
            submitted_documents: documents.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_policy_application_with_all_documents() {
        let result = apply_for_policy(
            application("policy_001", &["사업자등록증", " 사업계획서 ", "재정상태증명서"]),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(result.status, ApplicationStatus::Submitted);
        assert!(result.missing_documents.is_empty());
        assert_eq!(result.submitted_documents[1], "사업계획서");
        assert_eq!(result.contact_info, "042-123-4567");
        assert_eq!(result.estimated_review_time, "14-30일");
    }

    #[test]
    fn test_policy_application_lists_missing_documents() {
        let result = apply_for_policy(application("policy_002", &["사업계획서"]), Utc::now()).unwrap();

        assert_eq!(result.status, ApplicationStatus::Incomplete);
        assert_eq!(result.missing_documents, vec!["기술개발계획서", "특허출원서"]);
        assert_eq!(serde_json::to_value(result.status).unwrap(), "incomplete");
    }

    #[test]
    fn test_policy_application_rejections() {
        assert!(matches!(
            apply_for_policy(application("policy_999", &[]), Utc::now()),
            Err(Error::NotFound(_))
        ));

        let mut blank = application("policy_001", &[]);
        blank.applicant_name = "  ".to_string();
        assert!(matches!(apply_for_policy(blank, Utc::now()), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_service_types_count_offering_centers() {
        let list = service_types();
        assert_eq!(list.total_service_types, 5);

        let counts: Vec<(&str, usize)> = list
            .service_types
            .iter()
            .map(|s| (s.service.id, s.center_count))
            .collect();
        assert_eq!(
            counts,
            vec![("창업상담", 3), ("자금지원", 3), ("교육프로그램", 3), ("마케팅지원", 2), ("기술지원", 1)]
        );
    }

    #[test]
    fn test_expertise_areas_count_experts() {
        let list = expertise_areas();
        assert_eq!(list.total_areas, 11);

        let startup = &list.expertise_areas[0];
        assert_eq!(startup.id, "창업상담");
        assert_eq!(startup.expert_count, 2);
        // expert_004 is not taking bookings
        assert_eq!(startup.available_count, 1);

        let siting = list.expertise_areas.iter().find(|a| a.id == "입지선정").unwrap();
        assert_eq!((siting.expert_count, siting.available_count), (1, 0));
    }

    #[test]
    fn test_book_consultation_rejections() {
        let now = Utc::now();
        assert!(matches!(
            book_consultation(booking("expert_999", "홍길동", "온라인 상담"), now),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            book_consultation(booking("expert_004", "홍길동", "온라인 상담"), now),
            Err(Error::Conflict(_))
        ));
        assert!(matches!(
            book_consultation(booking("expert_002", "홍길동", "화상 상담"), now),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            book_consultation(booking("expert_002", "   ", "전화 상담"), now),
            Err(Error::InvalidInput(_))
        ));
    }
}
