/// 按字符（而非字节）截取 `text` 中从 `start` 开始、最多 `len` 个字符的片段
///
/// 越界时返回空字符串，不会在多字节字符中间截断
pub fn char_window(text: &str, start: usize, len: usize) -> String {
    text.chars().skip(start).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_window() {
        assert_eq!(char_window("光合作用", 1, 2), "合作");
        assert_eq!(char_window("abc", 2, 10), "c");
        assert_eq!(char_window("abc", 5, 3), "");
    }
}
