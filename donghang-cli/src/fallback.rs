//! Canned 금복 replies used when the assistant service is unreachable
//! (or disabled). Keyword checks run in order; first hit wins.

pub fn fallback_reply(message: &str) -> String {
    let m = message.to_lowercase();

    if m.contains("가계부") {
        return "가계부 기능이 궁금하시군요! \"5000원 점심 먹었어\" 이런 식으로 말씀해주시면 자동으로 가계부에 기록해드려요 📝".to_string();
    }

    if m.contains("안녕") || m.contains("반가") {
        return "안녕하세요! 무엇을 도와드릴까요? 소비 내역을 말씀해주시거나 '오늘 뭐할까?'라고 물어보시면 복지서비스를 추천해드려요! 💰".to_string();
    }

    if m.contains("이름") || m.contains("누구") {
        return "저는 금복이라고 합니다. 가계부 관리와 복지서비스 추천을 도와드릴 수 있어요!".to_string();
    }

    if m.contains("도움") || m.contains("도와") {
        return "네, 어떤 도움이 필요하신가요? 가계부 기록이나 복지서비스 추천을 도와드릴 수 있어요!".to_string();
    }

    if m.contains("고마") || m.contains("감사") {
        return "천만에요! 언제든 도움이 필요하시면 말씀해주세요!".to_string();
    }

    if m.contains("날씨") {
        return "날씨 정보는 직접 제공해드릴 수 없지만, '오늘 뭐할까?'라고 물어보시면 날씨 좋은 날 하기 좋은 활동을 추천해드려요!".to_string();
    }

    if m.contains("돈") || m.contains("소비") || m.contains("지출") {
        return "돈 관리가 고민이시군요! '얼마 어디서 썼다'고 말씀해주시면 자동으로 기록해드려요!".to_string();
    }

    if m.contains("복지") || m.contains("서비스") {
        return "복지서비스에 관심이 있으시군요! '오늘 뭐할까?' 또는 '복지서비스 추천해줘'라고 말씀해주시면 맞춤형 서비스를 추천해드려요!".to_string();
    }

    "네, 말씀해주세요! 어떤 것을 도와드릴까요?".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_replies() {
        assert!(fallback_reply("가계부 어떻게 써").contains("가계부"));
        assert!(fallback_reply("안녕하세요").contains("안녕하세요"));
        assert!(fallback_reply("너 이름이 뭐야").contains("금복"));
        assert!(fallback_reply("고마워요").contains("천만에요"));
    }

    #[test]
    fn test_unmatched_gets_generic_prompt() {
        assert_eq!(fallback_reply("음"), "네, 말씀해주세요! 어떤 것을 도와드릴까요?");
    }

    #[test]
    fn test_first_keyword_wins() {
        // "가계부" is checked before "도움".
        assert!(fallback_reply("가계부 도움이 필요해").contains("가계부 기능"));
    }
}
