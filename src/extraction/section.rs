//! 章节提取
//!
//! 从 AI 返回的解析文本中按标题提取指定章节内容。
//! 这是尽力而为的文本恢复，找不到匹配是正常结果，永远不会返回错误。

use regex::Regex;

use crate::models::explanation::ExplanationSections;

/// 无法提取任何内容时返回的占位文本
pub const SECTION_PLACEHOLDER: &str = "AI解析内容生成中...";

/// 章节内容被接受的最短长度（去除首尾空白后，需严格大于此值）
const MIN_SECTION_CHARS: usize = 5;
/// 兜底取行时，行内容需严格大于此长度
const MIN_FALLBACK_LINE_CHARS: usize = 10;
/// "有意义的一行"需严格大于此长度
const MIN_MEANINGFUL_LINE_CHARS: usize = 20;
/// 找不到有意义的行时截取的最大长度
const MEANINGFUL_PREFIX_CHARS: usize = 100;

pub const CORE_KNOWLEDGE: &str = "核心知识点";
pub const ANSWER_ANALYSIS: &str = "答案分析";
pub const COMMON_MISTAKES: &str = "易错点";
pub const SOLVING_TIPS: &str = "解题技巧";
pub const EXTENDED_KNOWLEDGE: &str = "拓展延伸";
pub const EXTENDED_KNOWLEDGE_ALIAS: &str = "拓展知识";

/// 章节标题的匹配形式，按优先级从高到低排列
///
/// `Inline` 的冒号可省略，凡是 `Heading` 能匹配的文本 `Inline` 都会先匹配到同样的内容，
/// 所以 `Heading` 在 [`find_section`] 中不会胜出。保留它是为了与既有服务的匹配顺序一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPattern {
    /// `【名称】内容`，内容截止到下一个 `【`
    Bracketed,
    /// `名称：内容`，内容截止到行尾
    Inline,
    /// `## 名称：内容`，内容截止到行尾
    Heading,
}

impl SectionPattern {
    pub const ALL: [SectionPattern; 3] = [
        SectionPattern::Bracketed,
        SectionPattern::Inline,
        SectionPattern::Heading,
    ];

    fn regex_for(self, name: &str) -> Option<Regex> {
        let name = regex::escape(name);
        let pattern = match self {
            SectionPattern::Bracketed => format!(r"(?i)【{}】[：:]*\s*([^【]*)", name),
            SectionPattern::Inline => format!(r"(?i){}[：:]*\s*([^\n]*)", name),
            SectionPattern::Heading => format!(r"(?i)#{{1,2}}\s*{}[：:]*\s*([^\n]*)", name),
        };
        Regex::new(&pattern).ok()
    }

    /// 尝试用本形式提取章节，内容过短视为未匹配
    pub fn capture(self, text: &str, name: &str) -> Option<String> {
        let re = self.regex_for(name)?;
        let captures = re.captures(text)?;
        let content = captures.get(1)?.as_str().trim();

        if content.chars().count() > MIN_SECTION_CHARS {
            Some(content.to_string())
        } else {
            None
        }
    }
}

/// 只按标题形式查找章节，找不到返回 `None`
pub fn find_section(text: &str, name: &str) -> Option<String> {
    if text.trim().is_empty() || name.trim().is_empty() {
        return None;
    }

    SectionPattern::ALL
        .iter()
        .find_map(|pattern| pattern.capture(text, name))
}

/// 提取指定章节
///
/// 依次尝试三种标题形式；都不匹配时取第一行长度足够的文本；仍然没有则返回占位文本
pub fn extract_section(text: &str, name: &str) -> String {
    find_section(text, name)
        .or_else(|| first_long_line(text, MIN_FALLBACK_LINE_CHARS))
        .unwrap_or_else(|| SECTION_PLACEHOLDER.to_string())
}

/// 提取第一行"有意义"的内容
///
/// 跳过代码块标记和 JSON 对象开头；都不满足时截取文本前 100 个字符
pub fn first_meaningful_line(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.lines()
        .map(str::trim)
        .find(|line| {
            line.chars().count() > MIN_MEANINGFUL_LINE_CHARS
                && !line.starts_with("```")
                && !line.starts_with('{')
        })
        .map(str::to_string)
        .unwrap_or_else(|| text.chars().take(MEANINGFUL_PREFIX_CHARS).collect())
}

/// 把完整的 AI 解析文本拆分为固定的五个章节
pub fn extract_explanation(text: &str) -> ExplanationSections {
    let mut core_knowledge = extract_section(text, CORE_KNOWLEDGE);
    if core_knowledge == SECTION_PLACEHOLDER || core_knowledge.contains("暂无") {
        let line = first_meaningful_line(text);
        core_knowledge = if line.trim().is_empty() {
            "核心知识点解析".to_string()
        } else {
            line
        };
    }

    let related_knowledge = find_section(text, EXTENDED_KNOWLEDGE)
        .or_else(|| find_section(text, EXTENDED_KNOWLEDGE_ALIAS))
        .unwrap_or_else(|| extract_section(text, EXTENDED_KNOWLEDGE));

    ExplanationSections {
        core_knowledge,
        answer_analysis: extract_section(text, ANSWER_ANALYSIS),
        common_mistakes: extract_section(text, COMMON_MISTAKES),
        solving_tips: extract_section(text, SOLVING_TIPS),
        related_knowledge,
        raw_response: Some(text.to_string()),
    }
}

fn first_long_line(text: &str, min_chars: usize) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| line.chars().count() > min_chars)
        .map(str::to_string)
}
