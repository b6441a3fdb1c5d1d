//! 结构化内容定位
//!
//! 在自由文本中寻找疑似 JSON 数组/对象的片段。
//! 显式的代码块标记优先，其次才是按形状猜测。

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static RE_JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("static regex")
});
static RE_ANY_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[\w-]*[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("static regex")
});
static RE_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("static regex"));
static RE_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex"));

/// 定位策略，按优先级排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocateStrategy {
    /// ```json 标记的代码块
    JsonFence,
    /// 任意代码块
    AnyFence,
    /// 第一个 `[{` 到最后一个 `}]`
    ArrayShape,
    /// 第一个 `{` 到最后一个 `}`
    ObjectShape,
}

impl LocateStrategy {
    pub const ALL: [LocateStrategy; 4] = [
        LocateStrategy::JsonFence,
        LocateStrategy::AnyFence,
        LocateStrategy::ArrayShape,
        LocateStrategy::ObjectShape,
    ];

    /// 用单个策略查找，空内容视为未命中
    pub fn locate(self, text: &str) -> Option<&str> {
        let found = match self {
            LocateStrategy::JsonFence => RE_JSON_FENCE.captures(text)?.get(1)?.as_str(),
            LocateStrategy::AnyFence => RE_ANY_FENCE.captures(text)?.get(1)?.as_str(),
            LocateStrategy::ArrayShape => RE_ARRAY.find(text)?.as_str(),
            LocateStrategy::ObjectShape => RE_OBJECT.find(text)?.as_str(),
        };

        if found.trim().is_empty() {
            None
        } else {
            Some(found)
        }
    }
}

/// 定位到的结构化片段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedPayload<'a> {
    pub strategy: LocateStrategy,
    pub text: &'a str,
}

/// 按优先级依次尝试所有策略，返回第一个命中的片段
pub fn locate_payload(text: &str) -> Option<LocatedPayload<'_>> {
    LocateStrategy::ALL.iter().find_map(|&strategy| {
        strategy
            .locate(text)
            .map(|found| LocatedPayload { strategy, text: found })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_fence_preferred() {
        let text = "先看一个例子 ```\n[1]\n``` 然后是结果：\n```json\n[{\"stem\":\"x\"}]\n```";
        let found = locate_payload(text).unwrap();
        assert_eq!(found.strategy, LocateStrategy::JsonFence);
        assert_eq!(found.text, "[{\"stem\":\"x\"}]");
    }

    #[test]
    fn test_untagged_fence() {
        let text = "结果如下\n```\n{\"stem\": \"y\"}\n```\n以上";
        let found = locate_payload(text).unwrap();
        assert_eq!(found.strategy, LocateStrategy::AnyFence);
        assert_eq!(found.text, "{\"stem\": \"y\"}");
    }

    #[test]
    fn test_array_spans_to_last_bracket() {
        let text = "题目：[{\"stem\":\"a\",\"options\":[{\"key\":\"A\",\"text\":\"1\"}]},{\"stem\":\"b\"}] 完毕";
        let found = locate_payload(text).unwrap();
        assert_eq!(found.strategy, LocateStrategy::ArrayShape);
        assert!(found.text.ends_with("{\"stem\":\"b\"}]"));
        assert!(serde_json::from_str::<serde_json::Value>(found.text).is_ok());
    }

    #[test]
    fn test_object_shape() {
        let text = "answer => {\"stem\": \"z\"} <= end";
        let found = locate_payload(text).unwrap();
        assert_eq!(found.strategy, LocateStrategy::ObjectShape);
        assert_eq!(found.text, "{\"stem\": \"z\"}");
    }

    #[test]
    fn test_truncated_fence_falls_through_to_shape() {
        let text = "```json\n[{\"stem\": \"cut\"}]\n";
        let found = locate_payload(text).unwrap();
        assert_eq!(found.strategy, LocateStrategy::ArrayShape);
    }

    #[test]
    fn test_no_structure() {
        assert!(locate_payload("no structure here").is_none());
        assert!(locate_payload("").is_none());
        assert!(locate_payload("```json\n\n```").is_none());
    }
}
