//! Strategy cards
//!
//! Strategies are picked from the archetype's priority list, preferring the
//! ones that also suit the requested industry, then filtered by what the
//! owner can afford at their business stage.

use serde::{Deserialize, Serialize};
use sodam_common::{Error, Result};
use tracing::debug;

use super::risk::RiskType;

const MAX_CARDS: usize = 3;
const MAX_SUCCESS_CASES: usize = 10;

/// Difficulty and cost share the same four-step scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    #[serde(rename = "낮음")]
    Low,
    #[serde(rename = "중간")]
    Medium,
    #[serde(rename = "높음")]
    High,
    #[serde(rename = "매우 높음")]
    VeryHigh,
}

impl Effort {
    pub const ALL: [Effort; 4] = [Effort::Low, Effort::Medium, Effort::High, Effort::VeryHigh];

    pub fn label(self) -> &'static str {
        match self {
            Effort::Low => "낮음",
            Effort::Medium => "중간",
            Effort::High => "높음",
            Effort::VeryHigh => "매우 높음",
        }
    }

    /// Capital (KRW) a strategy at this cost level needs
    pub fn required_capital(self) -> u64 {
        match self {
            Effort::Low => 1_000_000,
            Effort::Medium => 5_000_000,
            Effort::High => 15_000_000,
            Effort::VeryHigh => 30_000_000,
        }
    }

    fn is_expensive(self) -> bool {
        matches!(self, Effort::High | Effort::VeryHigh)
    }

    /// Whether the owner's capital sits in the band this cost level targets
    fn fits_capital(self, capital: u64) -> bool {
        match self {
            Effort::Low => capital < 5_000_000,
            Effort::Medium => (5_000_000..20_000_000).contains(&capital),
            Effort::High | Effort::VeryHigh => capital >= 20_000_000,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub target_risks: &'static [RiskType],
    pub target_industries: &'static [&'static str],
    pub difficulty: Effort,
    pub duration: &'static str,
    pub cost_level: Effort,
    pub expected_impact: &'static str,
}

static TEMPLATES: [StrategyTemplate; 6] = [
    StrategyTemplate {
        id: "marketing_boost",
        name: "마케팅 부스터",
        category: "마케팅",
        description: "유동인구 증가를 위한 마케팅 전략",
        target_risks: &[RiskType::InflowWeak],
        target_industries: &["식음료업", "의류업", "생활용품"],
        difficulty: Effort::Medium,
        duration: "2-3개월",
        cost_level: Effort::Medium,
        expected_impact: "유동인구 20-30% 증가",
    },
    StrategyTemplate {
        id: "differentiation",
        name: "차별화 전략",
        category: "경쟁력",
        description: "경쟁 우위 확보를 위한 차별화 전략",
        target_risks: &[RiskType::OverSaturated],
        target_industries: &["식음료업", "의류업", "화장품"],
        difficulty: Effort::High,
        duration: "3-6개월",
        cost_level: Effort::High,
        expected_impact: "고객 충성도 30-40% 향상",
    },
    StrategyTemplate {
        id: "price_optimization",
        name: "가격 최적화",
        category: "운영",
        description: "소비력에 맞는 가격 정책 수립",
        target_risks: &[RiskType::LowSpending],
        target_industries: &["식음료업", "생활용품", "전자제품"],
        difficulty: Effort::Low,
        duration: "1-2개월",
        cost_level: Effort::Low,
        expected_impact: "매출 15-25% 증가",
    },
    StrategyTemplate {
        id: "innovation",
        name: "혁신 모델",
        category: "혁신",
        description: "혁신적 비즈니스 모델 도입",
        target_risks: &[RiskType::GrowthLimited],
        target_industries: &["전자제품", "화장품", "생활용품"],
        difficulty: Effort::VeryHigh,
        duration: "6-12개월",
        cost_level: Effort::VeryHigh,
        expected_impact: "시장 점유율 50% 이상 확대",
    },
    StrategyTemplate {
        id: "online_expansion",
        name: "온라인 확장",
        category: "채널",
        description: "온라인 판매 채널 구축 및 확대",
        target_risks: &[RiskType::LowSpending, RiskType::InflowWeak],
        target_industries: &["의류업", "화장품", "전자제품"],
        difficulty: Effort::Medium,
        duration: "3-4개월",
        cost_level: Effort::Medium,
        expected_impact: "온라인 매출 100-200% 증가",
    },
    StrategyTemplate {
        id: "customer_loyalty",
        name: "고객 충성도",
        category: "고객관리",
        description: "고객 충성도 향상 프로그램",
        target_risks: &[RiskType::OverSaturated, RiskType::InflowWeak],
        target_industries: &["식음료업", "화장품", "생활용품"],
        difficulty: Effort::Medium,
        duration: "2-4개월",
        cost_level: Effort::Medium,
        expected_impact: "재방문율 40-50% 향상",
    },
];

fn template(id: &str) -> Option<&'static StrategyTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Priority strategies per archetype, best first
fn risk_strategies(risk_type: RiskType) -> [&'static str; 3] {
    match risk_type {
        RiskType::InflowWeak => ["marketing_boost", "online_expansion", "customer_loyalty"],
        RiskType::OverSaturated => ["differentiation", "customer_loyalty", "price_optimization"],
        RiskType::LowSpending => ["price_optimization", "online_expansion", "marketing_boost"],
        RiskType::GrowthLimited => ["innovation", "differentiation", "marketing_boost"],
    }
}

fn industry_strategies(industry: &str) -> &'static [&'static str] {
    match industry {
        "식음료업" => &["marketing_boost", "customer_loyalty", "differentiation"],
        "의류업" => &["online_expansion", "differentiation", "marketing_boost"],
        "화장품" => &["customer_loyalty", "differentiation", "online_expansion"],
        "생활용품" => &["price_optimization", "online_expansion", "marketing_boost"],
        "전자제품" => &["innovation", "online_expansion", "price_optimization"],
        _ => &[],
    }
}

fn action_tips(strategy_id: &str) -> &'static [&'static str] {
    match strategy_id {
        "marketing_boost" => &[
            "SNS 계정을 활발히 운영하여 브랜드 인지도를 높이세요",
            "지역 이벤트에 참여하여 커뮤니티와 관계를 쌓으세요",
            "인플루언서와 협업하여 타겟 고객에게 다가가세요",
        ],
        "differentiation" => &[
            "고객 피드백을 적극 수집하여 차별화 포인트를 찾으세요",
            "경쟁사와 다른 독특한 서비스나 상품을 개발하세요",
            "브랜드 스토리를 강화하여 감정적 연결을 만드세요",
        ],
        "price_optimization" => &[
            "고객의 가격 민감도를 정확히 파악하세요",
            "가격을 바꿀 때는 고객에게 충분히 설명하세요",
            "할인보다는 가치 제공에 집중하세요",
        ],
        _ => &["전략 실행을 위한 구체적인 계획 수립이 필요합니다."],
    }
}

fn next_steps(strategy_id: &str) -> &'static [&'static str] {
    match strategy_id {
        "marketing_boost" => &[
            "1. 타겟 고객 분석 및 페르소나 설정",
            "2. 마케팅 예산 계획 수립",
            "3. SNS 계정 개설 및 브랜드 아이덴티티 개발",
        ],
        "differentiation" => &[
            "1. 경쟁사 분석 및 시장 조사",
            "2. 차별화 포인트 발굴 및 검증",
            "3. 고유 상품/서비스 개발 계획 수립",
        ],
        "price_optimization" => &[
            "1. 현재 가격 구조 분석",
            "2. 경쟁사 가격 조사",
            "3. 고객 가격 민감도 분석",
        ],
        _ => &["전략 실행을 위한 상세 계획 수립이 필요합니다."],
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItem {
    pub step: u32,
    pub task: &'static str,
    pub duration: &'static str,
    pub status: &'static str,
}

const fn item(step: u32, task: &'static str, duration: &'static str) -> ChecklistItem {
    ChecklistItem {
        step,
        task,
        duration,
        status: "pending",
    }
}

struct ChecklistTemplate {
    strategy_id: &'static str,
    resources: &'static [&'static str],
    items: &'static [ChecklistItem],
}

static CHECKLISTS: [ChecklistTemplate; 3] = [
    ChecklistTemplate {
        strategy_id: "marketing_boost",
        resources: &["마케팅 예산", "디자인 리소스", "SNS 계정"],
        items: &[
            item(1, "타겟 고객 분석 및 페르소나 설정", "1주"),
            item(2, "브랜드 아이덴티티 및 메시지 개발", "2주"),
            item(3, "SNS 마케팅 채널 구축 및 콘텐츠 기획", "2주"),
            item(4, "지역 이벤트 및 프로모션 기획", "1주"),
            item(5, "온라인 광고 캠페인 실행", "4주"),
            item(6, "오프라인 이벤트 개최", "2주"),
            item(7, "성과 측정 및 개선 방안 수립", "1주"),
        ],
    },
    ChecklistTemplate {
        strategy_id: "differentiation",
        resources: &["R&D 예산", "전문 인력", "시장 조사 리소스"],
        items: &[
            item(1, "경쟁사 분석 및 시장 포지셔닝", "2주"),
            item(2, "차별화 포인트 발굴 및 검증", "3주"),
            item(3, "고유 상품/서비스 개발", "8주"),
            item(4, "브랜드 스토리 및 메시지 개발", "2주"),
            item(5, "차별화 요소 마케팅 전략 수립", "2주"),
            item(6, "고객 피드백 수집 및 개선", "4주"),
        ],
    },
    ChecklistTemplate {
        strategy_id: "price_optimization",
        resources: &["가격 분석 도구", "시장 조사 데이터"],
        items: &[
            item(1, "현재 가격 구조 분석", "3일"),
            item(2, "경쟁사 가격 조사", "1주"),
            item(3, "고객 가격 민감도 분석", "1주"),
            item(4, "최적 가격 모델 수립", "3일"),
            item(5, "가격 정책 적용 및 모니터링", "2주"),
        ],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct CaseMetric {
    pub metric: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyCase {
    pub id: &'static str,
    pub title: &'static str,
    pub industry: &'static str,
    pub strategy_type: &'static str,
    pub location: &'static str,
    pub challenge: &'static str,
    pub solution: &'static str,
    pub results: &'static [CaseMetric],
    pub key_factors: &'static [&'static str],
    pub duration: &'static str,
    pub investment: &'static str,
}

static CASES: [StrategyCase; 3] = [
    StrategyCase {
        id: "case_001",
        title: "강남역 카페 '커피앤북' 성공 사례",
        industry: "식음료업",
        strategy_type: "differentiation",
        location: "강남역 상권",
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
    },
    StrategyCase {
        id: "case_002",
        title: "홍대 의류점 '스타일랩' 성공 사례",
        industry: "의류업",
        strategy_type: "online_expansion",
        location: "홍대 상권",
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
    },
    StrategyCase {
        id: "case_003",
        title: "명동 화장품점 '뷰티허브' 성공 사례",
        industry: "화장품",
        strategy_type: "customer_loyalty",
        location: "명동 상권",
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
    },
];

fn default_user_type() -> String {
    "ENTREPRENEUR".to_string()
}

fn default_business_stage() -> String {
    "PLANNING".to_string()
}

fn default_experience() -> String {
    "beginner".to_string()
}

/// Owner profile as sent by the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default = "default_user_type")]
    pub user_type: String,
    #[serde(default = "default_business_stage")]
    pub business_stage: String,
    /// Available capital in KRW
    #[serde(default)]
    pub capital: u64,
    #[serde(default = "default_experience")]
    pub experience: String,
    #[serde(default)]
    pub preferred_areas: Vec<String>,
    #[serde(default)]
    pub interested_business_types: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_type: default_user_type(),
            business_stage: default_business_stage(),
            capital: 0,
            experience: default_experience(),
            preferred_areas: Vec::new(),
            interested_business_types: Vec::new(),
        }
    }
}

impl UserProfile {
    fn is_planning(&self) -> bool {
        self.business_stage == "PLANNING"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub market_code: String,
    pub industry: String,
    pub risk_type: String,
    #[serde(default)]
    pub user_profile: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyCard {
    pub strategy_id: &'static str,
    pub strategy_name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub difficulty: Effort,
    pub duration: &'static str,
    pub cost_level: Effort,
    pub expected_impact: &'static str,
    pub priority: u8,
    pub action_tips: &'static [&'static str],
    pub success_probability: u8,
    pub next_steps: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyCards {
    pub market_code: String,
    pub industry: String,
    pub risk_type: RiskType,
    pub user_profile: UserProfile,
    pub strategy_cards: Vec<StrategyCard>,
    pub total_strategies: usize,
    pub priority_order: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Checklist {
    pub strategy_id: &'static str,
    pub strategy_name: &'static str,
    pub checklist: &'static [ChecklistItem],
    pub estimated_duration: &'static str,
    pub difficulty: Effort,
    pub required_resources: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseFilters {
    pub industry: Option<String>,
    pub strategy_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyCaseList {
    pub total_cases: usize,
    pub success_cases: Vec<&'static StrategyCase>,
    pub filters: CaseFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateFilters {
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateList {
    pub total_templates: usize,
    pub templates: Vec<&'static StrategyTemplate>,
    pub filters: TemplateFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub template_count: usize,
}

const CATEGORIES: [(&str, &str, &str); 6] = [
    ("marketing", "마케팅", "유동인구 증가 및 브랜드 인지도 향상"),
    ("competition", "경쟁력", "경쟁 우위 확보 및 차별화"),
    ("operations", "운영", "운영 효율성 및 비용 최적화"),
    ("innovation", "혁신", "혁신적 비즈니스 모델 도입"),
    ("channels", "채널", "판매 채널 확대 및 다각화"),
    ("customer_management", "고객관리", "고객 충성도 향상 및 관계 관리"),
];

/// One step of the difficulty scale with what it takes to execute
#[derive(Debug, Clone, Serialize)]
pub struct DifficultyLevel {
    pub level: Effort,
    pub description: &'static str,
    pub required_experience: &'static str,
    pub estimated_time: &'static str,
    pub success_rate: &'static str,
    /// Capital a template at the same cost level needs (KRW)
    pub required_capital: u64,
    pub template_count: usize,
}

fn is_affordable(template: &StrategyTemplate, profile: &UserProfile) -> bool {
    if profile.is_planning() && template.cost_level.is_expensive() {
        return false;
    }
    // 30% of the required capital is enough to get started
    profile.capital as f64 >= template.cost_level.required_capital() as f64 * 0.3
}

/// Candidate strategies: industry-suited priorities first, then up to two more
fn select(industry: &str, risk_type: RiskType, profile: &UserProfile) -> Vec<&'static StrategyTemplate> {
    let priorities = risk_strategies(risk_type);
    let suited = industry_strategies(industry);

    let (common, remaining): (Vec<&str>, Vec<&str>) =
        priorities.into_iter().partition(|id| suited.contains(id));

    common
        .into_iter()
        .chain(remaining.into_iter().take(2))
        .filter_map(template)
        .filter(|t| is_affordable(t, profile))
        .take(MAX_CARDS)
        .collect()
}

fn priority(template: &StrategyTemplate, industry: &str, risk_type: RiskType, capital: u64) -> u8 {
    let mut priority = 3;
    if template.target_risks.contains(&risk_type) {
        priority += 1;
    }
    if template.target_industries.iter().any(|&i| i == industry) {
        priority += 1;
    }
    if template.cost_level.fits_capital(capital) {
        priority += 1;
    }
    priority.min(5)
}

fn success_probability(profile: &UserProfile) -> u8 {
    let mut probability: u8 = 60;
    probability += match profile.experience.as_str() {
        "expert" => 20,
        "intermediate" => 10,
        _ => 0,
    };
    probability += match profile.capital {
        c if c >= 20_000_000 => 15,
        c if c >= 10_000_000 => 10,
        c if c >= 5_000_000 => 5,
        _ => 0,
    };
    if matches!(profile.business_stage.as_str(), "GROWTH" | "MATURE") {
        probability += 10;
    }
    probability.min(95)
}

/// Build the cards for a market, industry and archetype
pub fn generate(
    market_code: &str,
    industry: &str,
    risk_type: RiskType,
    profile: &UserProfile,
) -> StrategyCards {
    let cards: Vec<StrategyCard> = select(industry, risk_type, profile)
        .into_iter()
        .map(|t| StrategyCard {
            strategy_id: t.id,
            strategy_name: t.name,
            category: t.category,
            description: t.description,
            difficulty: t.difficulty,
            duration: t.duration,
            cost_level: t.cost_level,
            expected_impact: t.expected_impact,
            priority: priority(t, industry, risk_type, profile.capital),
            action_tips: action_tips(t.id),
            success_probability: success_probability(profile),
            next_steps: next_steps(t.id),
        })
        .collect();

    let mut ordered: Vec<&StrategyCard> = cards.iter().collect();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
    let priority_order = ordered.iter().map(|c| c.strategy_id).collect();

    debug!(
        market_code,
        industry,
        risk_type = %risk_type,
        cards = cards.len(),
        "Generated strategy cards"
    );

    StrategyCards {
        market_code: market_code.to_string(),
        industry: industry.to_string(),
        risk_type,
        user_profile: profile.clone(),
        total_strategies: cards.len(),
        strategy_cards: cards,
        priority_order,
    }
}

pub fn checklist(strategy_id: &str) -> Result<Checklist> {
    let list = CHECKLISTS
        .iter()
        .find(|c| c.strategy_id == strategy_id)
        .ok_or_else(|| {
            Error::NotFound(format!("해당 전략의 체크리스트가 없습니다: {}", strategy_id))
        })?;
    let template = template(strategy_id)
        .ok_or_else(|| Error::Internal(format!("Checklist without template: {}", strategy_id)))?;

    Ok(Checklist {
        strategy_id: template.id,
        strategy_name: template.name,
        checklist: list.items,
        estimated_duration: template.duration,
        difficulty: template.difficulty,
        required_resources: list.resources,
    })
}

pub fn success_cases(industry: Option<&str>, strategy_type: Option<&str>) -> StrategyCaseList {
    let matching: Vec<&'static StrategyCase> = CASES
        .iter()
        .filter(|c| industry.map_or(true, |i| c.industry == i))
        .filter(|c| strategy_type.map_or(true, |s| c.strategy_type == s))
        .collect();

    StrategyCaseList {
        total_cases: matching.len(),
        success_cases: matching.into_iter().take(MAX_SUCCESS_CASES).collect(),
        filters: CaseFilters {
            industry: industry.map(str::to_string),
            strategy_type: strategy_type.map(str::to_string),
        },
    }
}

/// Templates, optionally filtered by category name and difficulty label
pub fn templates(category: Option<&str>, difficulty: Option<&str>) -> TemplateList {
    let templates: Vec<&'static StrategyTemplate> = TEMPLATES
        .iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .filter(|t| difficulty.map_or(true, |d| t.difficulty.label() == d))
        .collect();

    TemplateList {
        total_templates: templates.len(),
        templates,
        filters: TemplateFilters {
            category: category.map(str::to_string),
            difficulty: difficulty.map(str::to_string),
        },
    }
}

pub fn categories() -> Vec<StrategyCategory> {
    CATEGORIES
        .iter()
        .map(|&(id, name, description)| StrategyCategory {
            id,
            name,
            description,
            template_count: TEMPLATES.iter().filter(|t| t.category == name).count(),
        })
        .collect()
}

pub fn difficulty_levels() -> Vec<DifficultyLevel> {
    Effort::ALL
        .into_iter()
        .map(|level| {
            let (description, required_experience, estimated_time, success_rate) = match level {
                Effort::Low => ("초보자도 쉽게 실행할 수 있는 전략", "경험 불필요", "1-2개월", "80-90%"),
                Effort::Medium => ("일정한 경험과 자원이 필요한 전략", "1-3년", "2-4개월", "60-80%"),
                Effort::High => ("상당한 전문성과 자원이 필요한 전략", "3-5년", "3-6개월", "40-60%"),
                Effort::VeryHigh => {
                    ("높은 전문성과 상당한 자원이 필요한 전략", "5년 이상", "6-12개월", "20-40%")
                }
            };
            DifficultyLevel {
                level,
                description,
                required_experience,
                estimated_time,
                success_rate,
                required_capital: level.required_capital(),
                template_count: TEMPLATES.iter().filter(|t| t.difficulty == level).count(),
            }
        })
        .collect()
}
