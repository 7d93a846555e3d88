//! Keyword category classifiers.
//!
//! Two call sites, two keyword tables: the interactive chat flow and the
//! offline fallback flow assign categories differently, and the tables
//! are kept separate so existing inputs keep their observed categories.
//! Groups are evaluated in order, first match wins, 기타 is the
//! closed-world fallback.

use crate::expense::Category;

struct KeywordGroup {
    category: Category,
    keywords: &'static [&'static str],
}

const INTERACTIVE_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        category: Category::Food,
        keywords: &["점심", "저녁", "아침", "먹었"],
    },
    KeywordGroup {
        category: Category::Shopping,
        keywords: &["쇼핑", "옷", "샀"],
    },
];

const OFFLINE_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        category: Category::Food,
        keywords: &["밥", "먹", "식사"],
    },
    KeywordGroup {
        category: Category::Transport,
        keywords: &["교통", "버스", "지하철"],
    },
    KeywordGroup {
        category: Category::Shopping,
        keywords: &["쇼핑", "옷", "샀"],
    },
    KeywordGroup {
        category: Category::Medical,
        keywords: &["병원", "약"],
    },
    KeywordGroup {
        category: Category::Household,
        keywords: &["마트", "편의점"],
    },
];

pub struct CategoryClassifier {
    groups: &'static [KeywordGroup],
}

impl CategoryClassifier {
    /// Table used by the interactive chat flow (food and shopping only).
    pub fn interactive() -> Self {
        Self {
            groups: INTERACTIVE_GROUPS,
        }
    }

    /// Extended table used by the offline fallback flow.
    pub fn offline() -> Self {
        Self {
            groups: OFFLINE_GROUPS,
        }
    }

    pub fn classify(&self, text: &str) -> Category {
        for group in self.groups {
            if group.keywords.iter().any(|k| text.contains(k)) {
                return group.category;
            }
        }
        Category::Other
    }
}
