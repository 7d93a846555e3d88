//! Welfare/activity inquiry analysis.
//!
//! Deterministic keyword detection, no LLM in the loop: the external
//! recommendation service only sees requests this module has already
//! accepted and categorized.

use serde::{Deserialize, Serialize};

/// Welfare program areas the inquiry analyzer can pin down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WelfareCategory {
    #[serde(rename = "건강")]
    Health,
    #[serde(rename = "문화")]
    Culture,
    #[serde(rename = "교육")]
    Education,
    #[serde(rename = "사회")]
    Social,
    #[serde(rename = "돌봄")]
    Care,
    #[serde(rename = "취업")]
    Employment,
}

impl WelfareCategory {
    const ALL: [WelfareCategory; 6] = [
        WelfareCategory::Health,
        WelfareCategory::Culture,
        WelfareCategory::Education,
        WelfareCategory::Social,
        WelfareCategory::Care,
        WelfareCategory::Employment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WelfareCategory::Health => "건강",
            WelfareCategory::Culture => "문화",
            WelfareCategory::Education => "교육",
            WelfareCategory::Social => "사회",
            WelfareCategory::Care => "돌봄",
            WelfareCategory::Employment => "취업",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            WelfareCategory::Health => {
                &["건강", "운동", "체조", "걷기", "산책", "스포츠", "헬스", "의료"]
            }
            WelfareCategory::Culture => {
                &["문화", "음악", "미술", "독서", "영화", "공연", "예술", "취미"]
            }
            WelfareCategory::Education => {
                &["교육", "배우기", "공부", "강의", "수업", "학습", "스마트폰", "컴퓨터"]
            }
            WelfareCategory::Social => &["봉사", "모임", "커뮤니티", "만남", "사회", "참여", "활동"],
            WelfareCategory::Care => &["돌봄", "지원", "도움", "케어", "관리", "상담", "치료"],
            WelfareCategory::Employment => &["일자리", "취업", "일", "직업", "근무", "고용", "구직"],
        }
    }
}

/// Phrases that signal "recommend me something to do".
const ACTIVITY_KEYWORDS: &[&str] = &[
    "오늘 뭐할까",
    "오늘 뭐하지",
    "오늘 할일",
    "오늘 뭐해",
    "뭐할까",
    "뭐하지",
    "심심해",
    "심심하다",
    "할게 없어",
    "할게없어",
    "할일없어",
    "할일 없어",
    "추천해줘",
    "추천해주세요",
    "뭐 좋은거 있나",
    "뭐 좋은거 있을까",
    "오늘 프로그램",
    "오늘 서비스",
    "이용할 수 있는",
    "할 수 있는",
    "복지서비스",
    "복지 서비스",
    "서비스 추천",
    "프로그램 추천",
    "건강",
    "운동",
    "문화",
    "교육",
    "봉사",
    "취미",
    "여가",
    "일자리",
    "취업",
];

/// Follow-up phrases asking for more detail on the last recommendation.
const DETAIL_KEYWORDS: &[&str] = &[
    "자세히",
    "상세히",
    "더 알려줘",
    "더 알고 싶어",
    "정보 알려줘",
    "어떤 서비스",
    "무슨 서비스",
    "뭔가요",
    "뭐예요",
    "설명해줘",
    "알려주세요",
    "궁금해",
];

/// Requests to open the national welfare portal.
const PORTAL_KEYWORDS: &[&str] = &[
    "복지로",
    "복지로 사이트",
    "복지 사이트",
    "복지로 이동",
    "복지로 가기",
    "복지로 웹사이트",
    "복지포털",
    "복지 포털",
    "복지로 홈페이지",
];

pub const WELFARE_PORTAL_URL: &str = "https://www.bokjiro.go.kr";

/// An accepted activity/welfare inquiry.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityInquiry {
    /// First category whose keywords matched, if any.
    pub specific_category: Option<WelfareCategory>,
    pub original_message: String,
}

/// A recommendable welfare service, normalized to the three fields every
/// upstream source provides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WelfareService {
    pub service_name: String,
    pub service_summary: String,
    pub organization_name: String,
}

fn normalize(message: &str) -> String {
    message
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Detect a "recommend me an activity/service" request and, when
/// possible, the specific program area asked about.
pub fn analyze_activity_inquiry(message: &str) -> Option<ActivityInquiry> {
    let text = normalize(message);

    if !ACTIVITY_KEYWORDS.iter().any(|k| text.contains(k)) {
        return None;
    }

    let specific_category = WelfareCategory::ALL
        .iter()
        .copied()
        .find(|c| c.keywords().iter().any(|k| text.contains(k)));

    Some(ActivityInquiry {
        specific_category,
        original_message: message.to_string(),
    })
}

/// Detail requests are only meaningful right after a recommendation.
pub fn is_detail_request(message: &str, has_recommendations: bool) -> bool {
    if !has_recommendations {
        return false;
    }
    let text = normalize(message);
    DETAIL_KEYWORDS.iter().any(|k| text.contains(k))
}

pub fn is_portal_request(message: &str) -> bool {
    let text = normalize(message);
    PORTAL_KEYWORDS.iter().any(|k| text.contains(k))
}

/// Canned services surfaced when the recommendation backend is
/// unreachable.
pub fn fallback_services() -> Vec<WelfareService> {
    vec![
        WelfareService {
            service_name: "건강한 산책".to_string(),
            service_summary: "날씨가 좋으니 근처 공원에서 가벼운 산책은 어떠세요?".to_string(),
            organization_name: "지역보건소".to_string(),
        },
        WelfareService {
            service_name: "독서 시간".to_string(),
            service_summary: "좋아하는 책을 읽으며 여유로운 시간을 보내보세요!".to_string(),
            organization_name: "지역도서관".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_boredom_is_an_inquiry() {
        let inquiry = analyze_activity_inquiry("심심해").unwrap();
        assert_eq!(inquiry.specific_category, None);
        assert_eq!(inquiry.original_message, "심심해");
    }

    #[test]
    fn test_category_is_pinned_when_named() {
        let inquiry = analyze_activity_inquiry("오늘 뭐할까? 운동 같은 거").unwrap();
        assert_eq!(inquiry.specific_category, Some(WelfareCategory::Health));
    }

    #[test]
    fn test_first_matching_category_wins() {
        // 건강 precedes 문화 in the scan order.
        let inquiry = analyze_activity_inquiry("건강이랑 문화 프로그램 추천해줘").unwrap();
        assert_eq!(inquiry.specific_category, Some(WelfareCategory::Health));
    }

    #[test]
    fn test_unrelated_chatter_is_not_an_inquiry() {
        assert_eq!(analyze_activity_inquiry("오늘 날씨 어때"), None);
    }

    #[test]
    fn test_detail_requires_prior_recommendation() {
        assert!(is_detail_request("자세히 알려줘", true));
        assert!(!is_detail_request("자세히 알려줘", false));
        assert!(!is_detail_request("고마워", true));
    }

    #[test]
    fn test_portal_request() {
        assert!(is_portal_request("복지로 사이트로 가줘"));
        assert!(is_portal_request("복지포털 열어줘"));
        assert!(!is_portal_request("복지 혜택이 뭐가 있지"));
    }

    #[test]
    fn test_whitespace_is_collapsed_before_matching() {
        assert!(analyze_activity_inquiry("오늘   뭐할까").is_some());
    }
}
