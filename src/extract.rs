//! 텍스트 추출 모듈 — 마커 검색, 경계 검사가 있는 트림/절단, 선언형 추출 규칙
//!
//! 응답 본문을 JSON으로 파싱하지 않고, 마커 문자열 위치와 고정 폭 오프셋만으로
//! 필드 하나를 잘라냅니다.
//!
//! ## 경계 규칙
//!
//! 모든 오프셋은 **바이트** 단위입니다. 어떤 트림/절단도 텍스트 끝을 넘어 읽지 않습니다.
//!
//! - [`truncate_after`] — 텍스트가 먼저 끝나면 끝을 절단 지점으로 삼음
//! - [`strip_leading`], [`strip_trailing`] — 길이를 초과하면 `None`
//! - UTF-8 문자 중간을 자르게 되는 오프셋도 `None`
//!
//! ## 추출 규칙
//!
//! [`ExtractionRule`]은 `마커 검색 → 앞부분 트림 → 종결자 절단 → 뒷부분 트림` 파이프라인을
//! 값으로 표현합니다. 엔드포인트별 규칙은 [`scrape`](crate::scrape)에 상수로 정의되어 있습니다.

/// 추출 실패 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// 마커가 본문에 없음
    #[error("marker not found")]
    MarkerNotFound,
    /// 트림 폭이 남은 텍스트 길이를 초과하거나 문자 경계를 벗어남
    #[error("trim offset out of range")]
    OutOfRange,
}

/// `haystack`에서 `marker`가 처음 나타나는 바이트 위치를 찾습니다.
///
/// 대소문자를 구분하는 리터럴 검색입니다. 빈 마커는 위치 0에서 일치합니다.
///
/// # 예시
///
/// ```
/// use tiki_iot::extract::find_marker;
///
/// assert_eq!(find_marker(r#"{"itemId":482}"#, "itemId"), Some(2));
/// assert_eq!(find_marker("no id here", "itemId"), None);
/// ```
pub fn find_marker(haystack: &str, marker: &str) -> Option<usize> {
    haystack.find(marker)
}

/// `text`의 앞 `keep_len` 바이트를 반환합니다.
///
/// 텍스트가 `keep_len`보다 짧으면 텍스트 끝이 절단 지점이 되어 전체를 그대로 반환합니다.
/// 절단 지점이 UTF-8 문자 중간이면 `None`을 반환합니다.
pub fn truncate_after(text: &str, keep_len: usize) -> Option<&str> {
    if keep_len >= text.len() {
        return Some(text);
    }
    text.get(..keep_len)
}

/// `terminator` 문자가 처음 나타나기 직전까지의 접두사를 반환합니다.
///
/// 종결자가 없으면 텍스트를 그대로 반환합니다.
pub fn truncate_at(text: &str, terminator: char) -> &str {
    match text.find(terminator) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// `terminator` 문자열이 처음 나타나기 직전까지의 접두사를 반환합니다.
///
/// 종결자가 없으면 텍스트를 그대로 반환합니다.
pub fn truncate_at_str<'a>(text: &'a str, terminator: &str) -> &'a str {
    match text.find(terminator) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// 앞 `count` 바이트를 버립니다. 길이를 초과하면 `None`.
pub fn strip_leading(text: &str, count: usize) -> Option<&str> {
    text.get(count..)
}

/// 뒤 `count` 바이트를 버립니다. 길이를 초과하면 `None`.
pub fn strip_trailing(text: &str, count: usize) -> Option<&str> {
    let end = text.len().checked_sub(count)?;
    text.get(..end)
}

/// `index`부터 `len` 바이트를 제거한 새 문자열을 반환합니다.
///
/// - `index`가 텍스트 끝 이후면 변경 없음
/// - 제거 구간이 텍스트 끝을 넘으면 `index`에서 절단
/// - 그 외에는 구간만 제거
///
/// 구간 경계가 UTF-8 문자 중간이면 가장 가까운 앞쪽 문자 경계로 맞춥니다.
///
/// # 예시
///
/// ```
/// use tiki_iot::extract::remove_span;
///
/// assert_eq!(remove_span("hello world", 5, 6), "hello");
/// assert_eq!(remove_span("hello world", 0, 6), "world");
/// assert_eq!(remove_span("hello", 2, 100), "he");
/// assert_eq!(remove_span("hello", 9, 1), "hello");
/// ```
pub fn remove_span(text: &str, index: usize, len: usize) -> String {
    if index >= text.len() {
        return text.to_string();
    }
    let start = floor_char_boundary(text, index);
    let end = match index.checked_add(len) {
        Some(end) if end <= text.len() => floor_char_boundary(text, end).max(start),
        // NOTE: Removal window runs off the end, so cut at index
        _ => return text[..start].to_string(),
    };

    let mut out = String::with_capacity(text.len() - (end - start));
    out.push_str(&text[..start]);
    out.push_str(&text[end..]);
    out
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// 값의 끝을 결정하는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator<'a> {
    /// 이 문자 직전에서 절단 (없으면 절단하지 않음)
    Char(char),
    /// 이 문자열 직전에서 절단 (없으면 절단하지 않음)
    Text(&'a str),
    /// 고정 길이로 절단 ([`truncate_after`] 규칙)
    Length(usize),
    /// 절단하지 않음
    None,
}

impl Terminator<'_> {
    fn cut<'t>(&self, text: &'t str) -> Option<&'t str> {
        match *self {
            Terminator::Char(c) => Some(truncate_at(text, c)),
            Terminator::Text(s) => Some(truncate_at_str(text, s)),
            Terminator::Length(n) => truncate_after(text, n),
            Terminator::None => Some(text),
        }
    }
}

/// 선언형 필드 추출 규칙
///
/// `leading_trim`은 마커 일치 **시작** 위치부터 센 바이트 수입니다.
/// 즉 필드 이름과 그 뒤 구두점(`itemId":`)을 함께 덮습니다.
///
/// # 예시
///
/// ```
/// use tiki_iot::extract::{ExtractionRule, Terminator};
///
/// let rule = ExtractionRule {
///     marker: "itemId",
///     leading_trim: 8,
///     terminator: Terminator::Char(','),
///     trailing_trim: 0,
/// };
/// assert_eq!(rule.apply(r#"{"itemId":482,"status":"open"}"#), Ok("482"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRule<'a> {
    /// 필드 시작을 나타내는 마커
    pub marker: &'a str,
    /// 마커 시작부터 버릴 바이트 수
    pub leading_trim: usize,
    /// 값의 끝
    pub terminator: Terminator<'a>,
    /// 절단 후 끝에서 버릴 바이트 수 (닫는 따옴표 등)
    pub trailing_trim: usize,
}

impl<'a> ExtractionRule<'a> {
    /// 마커만 찾고 아무것도 자르지 않는 규칙을 생성합니다.
    pub const fn marker_only(marker: &'a str) -> Self {
        Self {
            marker,
            leading_trim: 0,
            terminator: Terminator::None,
            trailing_trim: 0,
        }
    }

    /// 규칙을 적용해 `haystack`에서 값을 잘라냅니다.
    ///
    /// 마커가 없으면 [`ExtractError::MarkerNotFound`]를 반환하고 이후 단계는 수행하지 않습니다.
    /// 트림이 남은 길이를 넘으면 [`ExtractError::OutOfRange`]를 반환합니다.
    pub fn apply<'t>(&self, haystack: &'t str) -> Result<&'t str, ExtractError> {
        let start = find_marker(haystack, self.marker).ok_or(ExtractError::MarkerNotFound)?;
        let matched = &haystack[start..];
        let value = strip_leading(matched, self.leading_trim).ok_or(ExtractError::OutOfRange)?;
        let value = self.terminator.cut(value).ok_or(ExtractError::OutOfRange)?;
        strip_trailing(value, self.trailing_trim).ok_or(ExtractError::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_marker_first_occurrence() {
        assert_eq!(find_marker("abc abc", "abc"), Some(0));
        assert_eq!(find_marker("xx abc abc", "abc"), Some(3));
    }

    #[test]
    fn test_find_marker_case_sensitive() {
        assert_eq!(find_marker("SUCCESS", "Success"), None);
    }

    #[test]
    fn test_find_marker_empty_marker_matches_start() {
        assert_eq!(find_marker("anything", ""), Some(0));
    }

    #[test]
    fn test_truncate_after_shorter_text_keeps_all() {
        assert_eq!(truncate_after("abc", 10), Some("abc"));
        assert_eq!(truncate_after("abc", 3), Some("abc"));
        assert_eq!(truncate_after("abcdef", 2), Some("ab"));
    }

    #[test]
    fn test_truncate_after_char_boundary() {
        // "é" is two bytes
        assert_eq!(truncate_after("é1", 1), None);
        assert_eq!(truncate_after("é1", 2), Some("é"));
    }

    #[test]
    fn test_truncate_at_char() {
        assert_eq!(truncate_at("482,\"x\"", ','), "482");
        assert_eq!(truncate_at("482", ','), "482");
        assert_eq!(truncate_at(",lead", ','), "");
    }

    #[test]
    fn test_truncate_at_str() {
        assert_eq!(truncate_at_str("a,b,nextTicket", "nextTicket"), "a,b,");
        assert_eq!(truncate_at_str("a,b", "nextTicket"), "a,b");
    }

    #[test]
    fn test_strip_leading_bounds() {
        assert_eq!(strip_leading("abcdef", 2), Some("cdef"));
        assert_eq!(strip_leading("ab", 2), Some(""));
        assert_eq!(strip_leading("ab", 3), None);
    }

    #[test]
    fn test_strip_trailing_bounds() {
        assert_eq!(strip_trailing("abc\"", 1), Some("abc"));
        assert_eq!(strip_trailing("a", 1), Some(""));
        assert_eq!(strip_trailing("", 1), None);
    }

    #[test]
    fn test_remove_span_middle() {
        assert_eq!(remove_span("0123456789", 2, 3), "0156789");
    }

    #[test]
    fn test_remove_span_window_past_end_cuts_at_index() {
        assert_eq!(remove_span("marker date and more", 6, 1000), "marker");
        assert_eq!(remove_span("abc", 0, 5), "");
    }

    #[test]
    fn test_remove_span_index_past_end_is_noop() {
        assert_eq!(remove_span("abc", 3, 2), "abc");
        assert_eq!(remove_span("abc", 50, usize::MAX), "abc");
    }

    #[test]
    fn test_remove_span_overflowing_length() {
        assert_eq!(remove_span("abcdef", 1, usize::MAX), "a");
    }

    #[test]
    fn test_remove_span_multibyte() {
        // index 1 falls inside "é" and is floored to 0
        assert_eq!(remove_span("éabc", 1, 3), "c");
    }

    #[test]
    fn test_rule_marker_not_found_skips_trims() {
        let rule = ExtractionRule {
            marker: "fileId",
            leading_trim: 9,
            terminator: Terminator::Text("galleryId"),
            trailing_trim: 3,
        };
        assert_eq!(rule.apply(""), Err(ExtractError::MarkerNotFound));
        assert_eq!(rule.apply("{\"error\":1}"), Err(ExtractError::MarkerNotFound));
    }

    #[test]
    fn test_rule_leading_trim_out_of_range() {
        let rule = ExtractionRule {
            marker: "mes",
            leading_trim: 7,
            terminator: Terminator::Char(']'),
            trailing_trim: 1,
        };
        assert_eq!(rule.apply("xx mes"), Err(ExtractError::OutOfRange));
    }

    #[test]
    fn test_rule_trailing_trim_out_of_range() {
        let rule = ExtractionRule {
            marker: "mes",
            leading_trim: 7,
            terminator: Terminator::Char(']'),
            trailing_trim: 1,
        };
        // value between the leading trim and `]` is empty
        assert_eq!(rule.apply(r#"{"mes":["]}"#), Err(ExtractError::OutOfRange));
    }

    #[test]
    fn test_rule_full_pipeline() {
        let rule = ExtractionRule {
            marker: "mes",
            leading_trim: 7,
            terminator: Terminator::Char(']'),
            trailing_trim: 1,
        };
        let body = r#"{"feedback":{"mes":["Tracker item 12 updated"]},"status":"Success"}"#;
        assert_eq!(rule.apply(body), Ok("Tracker item 12 updated"));
    }

    #[test]
    fn test_rule_fixed_length_terminator() {
        let rule = ExtractionRule {
            marker: "Updated:",
            leading_trim: "Updated: ".len(),
            terminator: Terminator::Length(10),
            trailing_trim: 0,
        };
        assert_eq!(rule.apply("Page Updated: 2024-04-03 and more"), Ok("2024-04-03"));
    }

    #[test]
    fn test_marker_only_rule() {
        let rule = ExtractionRule::marker_only("hello");
        assert_eq!(rule.apply("say hello world"), Ok("hello world"));
        assert_eq!(rule.apply("say goodbye"), Err(ExtractError::MarkerNotFound));
    }
}
