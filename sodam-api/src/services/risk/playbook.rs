//! Static guidance per risk archetype

use serde::Serialize;

use super::RiskType;

#[derive(Debug, Clone, Serialize)]
pub struct RiskFactor {
    pub factor: &'static str,
    pub impact: &'static str,
    pub description: &'static str,
    pub mitigation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskCase {
    pub location: &'static str,
    pub solution: &'static str,
    pub result: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mitigation {
    pub strategy: &'static str,
    pub description: &'static str,
    pub effectiveness: &'static str,
    pub cost: &'static str,
    pub duration: &'static str,
}

pub(crate) struct Playbook {
    pub description: &'static str,
    pub recommendations: [&'static str; 4],
    pub factors: [RiskFactor; 3],
    pub cases: [RiskCase; 2],
    pub action_plan: [&'static str; 4],
    pub mitigations: [Mitigation; 3],
}

pub(crate) fn playbook(risk_type: RiskType) -> &'static Playbook {
    match risk_type {
        RiskType::InflowWeak => &INFLOW_WEAK,
        RiskType::OverSaturated => &OVER_SATURATED,
        RiskType::LowSpending => &LOW_SPENDING,
        RiskType::GrowthLimited => &GROWTH_LIMITED,
    }
}

static INFLOW_WEAK: Playbook = Playbook {
    description: "유동인구와 매출 증가율이 낮아 상권 활성화가 저조한 상태",
    recommendations: [
        "마케팅 강화를 통해 유동인구를 늘릴 방안을 찾으세요",
        "이벤트와 프로모션으로 상권에 활기를 불어넣으세요",
        "대중교통과 주차 등 접근성 개선 가능성을 검토하세요",
        "대안 상권도 함께 비교 검토하세요",
    ],
    factors: [
        RiskFactor {
            factor: "유동인구 감소",
            impact: "높음",
            description: "월평균 유동인구 증가율이 낮아 상권 활성화가 저조합니다.",
            mitigation: "마케팅과 이벤트로 방문객 유입을 늘립니다",
        },
        RiskFactor {
            factor: "매출 증가율 둔화",
            impact: "높음",
            description: "카드매출 증가율이 낮아 소비 활동이 위축되고 있습니다.",
            mitigation: "할인과 묶음 상품으로 소비를 촉진합니다",
        },
        RiskFactor {
            factor: "접근성 부족",
            impact: "중간",
            description: "교통편과 주차 공간이 부족해 방문이 불편합니다.",
            mitigation: "주차 제휴와 찾아오는 길 안내를 강화합니다",
        },
    ],
    cases: [
        RiskCase {
            location: "강남역 상권",
            solution: "지하 연결 통로 개선과 쇼핑몰 리뉴얼",
            result: "유동인구 30% 증가, 매출 25% 상승",
        },
        RiskCase {
            location: "홍대 상권",
            solution: "야간 문화 이벤트와 거리 공연 활성화",
            result: "야간 유동인구 40% 증가, 체류시간 20% 연장",
        },
    ],
    action_plan: [
        "1단계: 유동인구 확대 마케팅 전략 수립 (1개월)",
        "2단계: 이벤트와 프로모션 기획 및 실행 (2-3개월)",
        "3단계: 접근성 개선 방안 실행 (3-6개월)",
        "4단계: 효과 측정 및 전략 보완 (6개월 후)",
    ],
    mitigations: [
        Mitigation {
            strategy: "마케팅 강화",
            description: "유동인구 증가를 위한 지역 마케팅 전략 수립",
            effectiveness: "높음",
            cost: "중간",
            duration: "2-3개월",
        },
        Mitigation {
            strategy: "이벤트 개최",
            description: "상권 활성화를 위한 이벤트와 프로모션",
            effectiveness: "중간",
            cost: "낮음",
            duration: "1-2개월",
        },
        Mitigation {
            strategy: "접근성 개선",
            description: "교통편 확충과 주차 시설 개선",
            effectiveness: "높음",
            cost: "높음",
            duration: "6-12개월",
        },
    ],
};

static OVER_SATURATED: Playbook = Playbook {
    description: "동일업종 사업체가 과도하게 많아 경쟁이 치열한 상태",
    recommendations: [
        "차별화된 상품과 서비스를 개발하세요",
        "틈새 고객층을 겨냥한 전략을 세우세요",
        "단골 고객 프로그램으로 충성도를 높이세요",
        "경쟁 업체를 분석하여 우위 요소를 찾으세요",
    ],
    factors: [
        RiskFactor {
            factor: "동일업종 과밀",
            impact: "매우 높음",
            description: "같은 업종 사업체가 많아 경쟁이 치열합니다.",
            mitigation: "차별화된 상품과 서비스로 경쟁 우위를 확보합니다",
        },
        RiskFactor {
            factor: "가격 경쟁 심화",
            impact: "높음",
            description: "가격 인하 경쟁으로 수익성이 악화될 수 있습니다.",
            mitigation: "가치 중심 마케팅으로 가격 경쟁을 피합니다",
        },
        RiskFactor {
            factor: "고객 분산",
            impact: "중간",
            description: "고객이 여러 업체로 분산되어 재방문율이 낮습니다.",
            mitigation: "멤버십과 적립 프로그램을 도입합니다",
        },
    ],
    cases: [
        RiskCase {
            location: "명동 상권",
            solution: "브랜드 차별화와 프리미엄 전략",
            result: "객단가 30% 상승, 고객 충성도 40% 향상",
        },
        RiskCase {
            location: "신촌 상권",
            solution: "틈새 고객층 특화 서비스",
            result: "전문성 인지도 50% 향상, 재방문율 35% 증가",
        },
    ],
    action_plan: [
        "1단계: 경쟁 업체 분석 및 차별화 포인트 발굴 (1개월)",
        "2단계: 차별화 전략 수립 및 실행 (2-3개월)",
        "3단계: 고객 충성도 프로그램 도입 (3-4개월)",
        "4단계: 브랜드 강화 및 점유율 확대 (6개월 후)",
    ],
    mitigations: [
        Mitigation {
            strategy: "차별화 전략",
            description: "경쟁 우위를 위한 차별화된 상품과 서비스 개발",
            effectiveness: "높음",
            cost: "높음",
            duration: "3-6개월",
        },
        Mitigation {
            strategy: "고객 충성도 향상",
            description: "멤버십과 적립 프로그램 도입",
            effectiveness: "중간",
            cost: "중간",
            duration: "2-4개월",
        },
        Mitigation {
            strategy: "가치 기반 가격 정책",
            description: "가치 중심 마케팅으로 가격 경쟁 회피",
            effectiveness: "중간",
            cost: "낮음",
            duration: "1-2개월",
        },
    ],
};

static LOW_SPENDING: Playbook = Playbook {
    description: "지역 소비력이 부족하여 매출 창출이 어려운 상태",
    recommendations: [
        "가격 경쟁력을 높일 방안을 검토하세요",
        "고객층을 넓히기 위한 마케팅 전략을 세우세요",
        "온라인 판매 채널 확대를 고려하세요",
        "지역 소득 수준에 맞게 상품 구성을 조정하세요",
    ],
    factors: [
        RiskFactor {
            factor: "지역 소득 수준 낮음",
            impact: "높음",
            description: "지역 평균 소득이 낮아 소비력이 제한적입니다.",
            mitigation: "소득 수준에 맞는 상품 구성과 가격 정책을 수립합니다",
        },
        RiskFactor {
            factor: "소비 패턴 변화",
            impact: "중간",
            description: "온라인 구매 증가로 오프라인 소비가 줄고 있습니다.",
            mitigation: "온라인 연계 서비스와 체험형 상품을 개발합니다",
        },
        RiskFactor {
            factor: "인구 감소",
            impact: "중간",
            description: "지역 인구 감소로 소비 시장이 축소되고 있습니다.",
            mitigation: "외부 방문객 유치 상품을 개발합니다",
        },
    ],
    cases: [
        RiskCase {
            location: "부산 자갈치 시장",
            solution: "관광 상품화와 온라인 판매 채널 확대",
            result: "외부 고객 60% 증가, 온라인 매출 200% 상승",
        },
        RiskCase {
            location: "전주 한옥마을",
            solution: "체험형 관광 상품과 문화 콘텐츠 강화",
            result: "체류시간 50% 연장, 평균 소비액 40% 증가",
        },
    ],
    action_plan: [
        "1단계: 고객 소득 수준 분석 및 목표 고객 설정 (1개월)",
        "2단계: 가격 경쟁력 강화 및 상품 구성 조정 (2-3개월)",
        "3단계: 온라인 판매 채널 구축 (3-4개월)",
        "4단계: 외부 고객 유치 상품 개발 (6개월 후)",
    ],
    mitigations: [
        Mitigation {
            strategy: "가격 최적화",
            description: "소득 수준에 맞는 가격 정책 수립",
            effectiveness: "높음",
            cost: "낮음",
            duration: "1-2개월",
        },
        Mitigation {
            strategy: "온라인 확장",
            description: "온라인 판매 채널 구축과 확대",
            effectiveness: "높음",
            cost: "중간",
            duration: "3-4개월",
        },
        Mitigation {
            strategy: "외부 고객 유치",
            description: "관광 상품 개발과 외부 고객 유치",
            effectiveness: "중간",
            cost: "높음",
            duration: "6-12개월",
        },
    ],
};

static GROWTH_LIMITED: Playbook = Playbook {
    description: "성장 잠재력이 제한적이어서 장기적 발전이 어려운 상태",
    recommendations: [
        "상권 발전 계획 수립에 참여하세요",
        "지역 상생 프로그램에 참여하세요",
        "새로운 비즈니스 모델 도입을 검토하세요",
        "장기적인 관점에서 투자 계획을 세우세요",
    ],
    factors: [
        RiskFactor {
            factor: "성장 동력 부족",
            impact: "높음",
            description: "상권 성장을 이끌 동력이 부족합니다.",
            mitigation: "새로운 비즈니스 모델로 신규 수요를 만듭니다",
        },
        RiskFactor {
            factor: "인프라 부족",
            impact: "중간",
            description: "성장을 뒷받침할 기반 시설이 부족합니다.",
            mitigation: "지역 발전 계획에 참여하여 인프라 개선을 요구합니다",
        },
        RiskFactor {
            factor: "정책 지원 부족",
            impact: "중간",
            description: "상권 발전을 위한 정책 지원이 부족합니다.",
            mitigation: "상생 프로그램 참여와 정책 제안을 추진합니다",
        },
    ],
    cases: [
        RiskCase {
            location: "판교 테크노밸리",
            solution: "기업 유치와 혁신 생태계 구축",
            result: "직장인 유입 300% 증가, 상권 매출 150% 상승",
        },
        RiskCase {
            location: "제주 중문 관광단지",
            solution: "관광 인프라 구축과 해외 관광객 유치",
            result: "관광객 200% 증가, 상권 매출 180% 상승",
        },
    ],
    action_plan: [
        "1단계: 상권 발전 계획 수립 및 참여자 모집 (1-2개월)",
        "2단계: 신규 비즈니스 모델 도입 (3-4개월)",
        "3단계: 지역 상생 협력 체계 구축 (4-6개월)",
        "4단계: 장기 투자 계획 수립 및 실행 (6개월 후)",
    ],
    mitigations: [
        Mitigation {
            strategy: "혁신 모델 도입",
            description: "새로운 비즈니스 모델로 신규 수요 창출",
            effectiveness: "높음",
            cost: "매우 높음",
            duration: "6-12개월",
        },
        Mitigation {
            strategy: "지역 상생 참여",
            description: "지역 발전 계획과 상생 프로그램 참여",
            effectiveness: "중간",
            cost: "중간",
            duration: "3-6개월",
        },
        Mitigation {
            strategy: "인프라 개선 요구",
            description: "지역 인프라 개선을 위한 정책 제안",
            effectiveness: "낮음",
            cost: "낮음",
            duration: "12개월 이상",
        },
    ],
};
