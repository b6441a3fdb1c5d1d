use serde::{Deserialize, Serialize};

use crate::extraction::section::SECTION_PLACEHOLDER;

/// AI 解析的固定章节
///
/// 每个字段始终存在，提取不到时为占位文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationSections {
    pub core_knowledge: String,
    pub answer_analysis: String,
    pub common_mistakes: String,
    pub solving_tips: String,
    pub related_knowledge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ExplanationSections {
    /// AI 服务不可用时返回的固定提示
    pub fn unavailable() -> Self {
        Self {
            core_knowledge: "AI解析服务暂时不可用，请检查网络连接。".to_string(),
            answer_analysis: "建议您：1.检查网络 2.验证API密钥 3.稍后重试".to_string(),
            common_mistakes: "常见错误：网络连接问题、API密钥无效".to_string(),
            solving_tips: "如多次失败，请尝试重启服务器".to_string(),
            related_knowledge: SECTION_PLACEHOLDER.to_string(),
            raw_response: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_has_every_section() {
        let sections = ExplanationSections::unavailable();
        let json = serde_json::to_value(&sections).unwrap();

        for key in [
            "coreKnowledge",
            "answerAnalysis",
            "commonMistakes",
            "solvingTips",
            "relatedKnowledge",
        ] {
            assert!(
                json[key].as_str().is_some_and(|s| !s.is_empty()),
                "missing section {}",
                key
            );
        }
        assert!(json.get("rawResponse").is_none());
    }
}
