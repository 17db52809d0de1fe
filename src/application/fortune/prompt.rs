use std::borrow::Cow;

use crate::domain::zodiac::{Category, Subject};

const SUBJECT_PLACEHOLDER: &str = "{subject}";
const CATEGORY_PLACEHOLDER: &str = "{category}";

const DEFAULT_TEMPLATE: &str = r#"오늘의 {subject} {category}를 생성해주세요.

요구사항:
- 친근하고 가벼운 톤으로 작성
- 재미로 보는 운세라는 느낌
- 2-3문장으로 간결하게
- 구체적이면서도 긍정적인 내용
- 과도하게 무겁거나 진지하지 않게
- 운세 내용만 작성 (인사말이나 부가 설명 없이)

카테고리별 가이드:
- 종합운: 오늘 하루 전반적인 운세
- 재물운: 금전, 재테크, 수입 관련
- 직장/사업운: 업무, 사업, 커리어 관련
- 가정/건강운: 가족, 건강, 집안일 관련
- 이성/대인관계: 연애, 인간관계, 소통 관련

예시 스타일:
"오늘은 예상치 못한 곳에서 기쁜 소식이 들려올 수 있어요. 주변 사람들의 말에 귀 기울이면 좋은 기회를 발견할 거예요. 긍정적인 마인드를 유지하세요!"
"#;

/// Prompt sent for every cell. `{subject}` and `{category}` are replaced by
/// the display labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: Cow<'static, str>,
}

impl PromptTemplate {
    pub fn new(template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, subject: Subject, category: Category) -> String {
        self.template
            .replace(SUBJECT_PLACEHOLDER, subject.label())
            .replace(CATEGORY_PLACEHOLDER, category.label())
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}
