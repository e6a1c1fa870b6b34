//! 文本辅助函数
//!
//! 所有长度限制都按字符计数，避免在多字节字符中间截断。

/// 取前 `max_chars` 个字符
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
