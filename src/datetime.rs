//! 날짜/시간 비교 모듈 — 타임스탬프 파싱, 본문에서 날짜 분리, 기준 시각과 비교
//!
//! 기준 텍스트와 본문에서 찾은 텍스트는 **같은** 형식 패턴으로 파싱합니다.
//! 패턴은 chrono의 strftime 문법(`%a %d %b %Y %H:%M:%S %Z` 등)을 따릅니다.
//!
//! ## 날짜 분리
//!
//! 본문에서 날짜를 떼어내는 오프셋 계산은 호출자와의 계약입니다.
//!
//! 1. 마커 시작부터 `datelen + 마커 길이` 바이트만 남김
//! 2. 앞에서 `마커 길이 + 1` 바이트를 버림 (마커와 날짜 사이 공백 1개 가정)
//!
//! 따라서 `datelen`은 실제 날짜 길이보다 1 커야 합니다.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::constants::DATE_SEPARATOR_WIDTH;
use crate::error::{Result, TikiError};
use crate::extract::{find_marker, remove_span, truncate_after};
use crate::types::DateCheck;

/// `text`를 `format` 패턴으로 파싱하여 절대 시각으로 변환합니다.
///
/// - 패턴에 오프셋(`%z`)이 있으면 그 오프셋을 적용합니다.
/// - 없으면 벽시계 시각을 UTC로 간주합니다. 양쪽을 같은 방식으로 해석하므로 비교 결과는 같습니다.
/// - 패턴에 없는 시/분/초는 0입니다. `%Y-%m-%d %H`는 정시, 날짜만 있는 패턴은 자정이 됩니다.
/// - `%Z` 시간대 이름은 건너뜁니다.
/// - 요일(`%a`)이 날짜와 맞지 않으면 실패합니다.
///
/// # 예시
///
/// ```
/// use tiki_iot::datetime::parse_timestamp;
///
/// let t = parse_timestamp("Tue 28 Dec 2021 12:25:00 GMT", "%a %d %b %Y %H:%M:%S %Z").unwrap();
/// assert_eq!(t.timestamp(), 1_640_694_300);
/// ```
///
/// # 에러
///
/// - [`TikiError::TimestampParse`] — 텍스트가 패턴과 맞지 않음
pub fn parse_timestamp(text: &str, format: &str) -> Result<DateTime<Utc>> {
    let parse_error = |source| TikiError::TimestampParse {
        text: text.to_string(),
        format: format.to_string(),
        source,
    };

    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(format)).map_err(parse_error)?;

    // NOTE: set_* only fills a field the pattern left empty; a parsed value is kept
    let _ = parsed.set_hour(0);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);

    match parsed.offset() {
        Some(_) => parsed
            .to_datetime()
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(parse_error),
        None => parsed
            .to_naive_datetime_with_offset(0)
            .map(|naive| naive.and_utc())
            .map_err(parse_error),
    }
}

/// 찾은 시각이 기준 시각보다 **엄격하게** 나중이면 [`DateCheck::Later`]를 반환합니다.
///
/// 같은 시각은 [`DateCheck::NotLater`]입니다.
pub fn compare(reference: DateTime<Utc>, found: DateTime<Utc>) -> DateCheck {
    if found > reference {
        DateCheck::Later
    } else {
        DateCheck::NotLater
    }
}

/// 같은 패턴을 공유하는 기준/발견 타임스탬프 쌍
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampSpec<'a> {
    /// 두 텍스트 모두에 적용할 형식 패턴
    pub format: &'a str,
    /// 기준 시각 텍스트
    pub reference: &'a str,
    /// 본문에서 분리한 시각 텍스트
    pub found: &'a str,
}

impl TimestampSpec<'_> {
    /// 두 텍스트를 파싱하여 비교합니다. 어느 한쪽이라도 파싱에 실패하면
    /// [`DateCheck::ParseFailure`]를 반환합니다.
    pub fn evaluate(&self) -> DateCheck {
        let parsed = parse_timestamp(self.reference, self.format).and_then(|reference| {
            parse_timestamp(self.found, self.format).map(|found| (reference, found))
        });
        match parsed {
            Ok((reference, found)) => {
                debug!(
                    reference = reference.timestamp(),
                    found = found.timestamp(),
                    "timestamps parsed"
                );
                compare(reference, found)
            }
            Err(err) => {
                debug!(%err, "timestamp parse failed");
                DateCheck::ParseFailure {
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// 본문에서 날짜 앞에 오는 마커와 기대하는 날짜 길이
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMarker<'a> {
    /// 날짜 바로 앞의 마커 텍스트
    pub marker: &'a str,
    /// 구분 공백을 포함한 날짜 길이 (바이트)
    pub datelen: usize,
}

impl<'a> DateMarker<'a> {
    /// 새 날짜 마커를 생성합니다.
    pub const fn new(marker: &'a str, datelen: usize) -> Self {
        Self { marker, datelen }
    }

    /// 본문에서 날짜 텍스트를 분리합니다.
    ///
    /// 마커가 없으면 `None`을 반환합니다. 마커 뒤 텍스트가 너무 짧으면
    /// 빈 문자열이 되어 이후 파싱에서 실패합니다.
    pub fn isolate(&self, body: &str) -> Option<String> {
        let start = find_marker(body, self.marker)?;
        let found = &body[start..];

        let window = self.datelen.saturating_add(self.marker.len());
        let cropped = match truncate_after(found, window) {
            Some(cropped) => cropped.to_string(),
            None => remove_span(found, window, found.len()),
        };
        let infront = self.marker.len() + DATE_SEPARATOR_WIDTH;
        Some(remove_span(&cropped, 0, infront))
    }

    /// 본문에서 날짜를 분리해 기준 시각과 비교합니다.
    ///
    /// - 마커 없음 → [`DateCheck::MarkerNotFound`] (파싱 시도 안 함)
    /// - 파싱 실패 → [`DateCheck::ParseFailure`]
    /// - 그 외 → [`DateCheck::Later`] / [`DateCheck::NotLater`]
    pub fn check(&self, body: &str, reference: &str, format: &str) -> DateCheck {
        let Some(found) = self.isolate(body) else {
            debug!(marker = self.marker, "date marker not found");
            return DateCheck::MarkerNotFound;
        };
        debug!(found = found.as_str(), "date text isolated");

        TimestampSpec {
            format,
            reference,
            found: &found,
        }
        .evaluate()
    }
}

/// [`DateMarker::check`]의 함수 형태입니다.
///
/// # 예시
///
/// ```
/// use tiki_iot::datetime::check_timestamp;
/// use tiki_iot::DateCheck;
///
/// let body = "<p>Updated Wed 29 Dec 2021 00:00:00 GMT</p>";
/// let result = check_timestamp(
///     body,
///     "Updated",
///     29,
///     "Tue 28 Dec 2021 12:25:00 GMT",
///     "%a %d %b %Y %H:%M:%S %Z",
/// );
/// assert_eq!(result, DateCheck::Later);
/// ```
pub fn check_timestamp(
    body: &str,
    marker: &str,
    datelen: usize,
    reference: &str,
    format: &str,
) -> DateCheck {
    DateMarker::new(marker, datelen).check(body, reference, format)
}
