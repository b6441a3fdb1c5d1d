//! 宽松 JSON 解析
//!
//! 先严格解析；失败后做一次语法修复再解析一次。修复只做一次，不循环。

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static RE_BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:").expect("static regex")
});
static RE_TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([\]\}])").expect("static regex"));

/// 修复后仍无法解析
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("JSON无法解析: 严格解析失败 ({strict})，修复后仍失败 ({repaired})")]
pub struct PayloadError {
    pub strict: String,
    pub repaired: String,
}

/// 解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPayload {
    pub value: Value,
    /// 是否经过修复才解析成功
    pub repaired: bool,
}

/// 解析定位到的片段
pub fn parse_lenient(payload: &str) -> Result<ParsedPayload, PayloadError> {
    let cleaned = payload.replace("```", "");
    let cleaned = cleaned.trim();

    let strict_err = match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => {
            return Ok(ParsedPayload {
                value,
                repaired: false,
            })
        }
        Err(e) => e,
    };

    let fixed = repair(cleaned);
    serde_json::from_str::<Value>(&fixed)
        .map(|value| ParsedPayload {
            value,
            repaired: true,
        })
        .map_err(|e| PayloadError {
            strict: strict_err.to_string(),
            repaired: e.to_string(),
        })
}

/// 一次性语法修复：给裸键名加引号、单引号换双引号、去掉结尾多余的逗号
///
/// 替换不区分键和字符串值：值里的撇号（`'it's'`）或 `, 词:` 片段也会被改写，
/// 这类输入修复后仍无法解析，交给兜底处理。
pub fn repair(json_str: &str) -> String {
    let quoted = RE_BARE_KEY.replace_all(json_str, r#"${1}"${2}":"#);
    let double_quoted = quoted.replace('\'', "\"");
    RE_TRAILING_COMMA
        .replace_all(&double_quoted, "${1}")
        .into_owned()
}
