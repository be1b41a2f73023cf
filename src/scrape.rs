//! 필드 스크레이퍼 — 엔드포인트별 추출 레시피
//!
//! 각 레시피는 `성공 마커 확인 → 필드 규칙 적용` 순서의 고정 파이프라인입니다.
//! 어느 단계에서든 마커가 없으면 그 호출은 거기서 끝나고, 단계별 고정 에러 문구를 반환합니다.
//!
//! | 레시피 | 성공 마커 | 필드 마커 | 앞 트림 | 종결자 | 뒤 트림 |
//! |---|---|---|---|---|---|
//! | [`NEW_ITEM_ID`] | – | `itemId` | 8 | `,` | 0 |
//! | [`UPDATE_MESSAGE`] | `Success` | `mes` | 7 | `]` | 1 |
//! | [`ITEM_FIELDS`] | `Success` | `fields` | 8 | `nextTicket` | 2 |
//! | [`NEW_FILE_ID`] | – | `fileId` | 9 | `galleryId` | 3 |

use std::path::Path;

use tracing::debug;

use crate::constants::{
    ATTACHMENT_TOKEN, FIELDS_LEADING_TRIM, FIELDS_MARKER, FIELDS_TRAILING_TRIM,
    FILENAME_LEADING_TRIM, FILE_ID_LEADING_TRIM, FILE_ID_MARKER, FILE_ID_TRAILING_TRIM,
    GALLERY_ID_MARKER, ITEM_ID_LEADING_TRIM, ITEM_ID_MARKER, MESSAGE_LEADING_TRIM,
    MESSAGE_MARKER, MESSAGE_TRAILING_TRIM, NEXT_TICKET_MARKER, SUCCESS_MARKER,
};
use crate::error::{Result, TikiError};
use crate::extract::{find_marker, truncate_after, ExtractionRule, Terminator};

/// 엔드포인트 하나의 응답에서 필드 하나를 뽑는 레시피
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// 먼저 확인할 성공 표시 마커
    pub guard: Option<&'static str>,
    /// 필드 추출 규칙 (본문 전체에 적용)
    pub rule: ExtractionRule<'static>,
}

/// 새 트래커 아이템 ID — 정수라 따옴표가 없음
pub const NEW_ITEM_ID: Recipe = Recipe {
    guard: None,
    rule: ExtractionRule {
        marker: ITEM_ID_MARKER,
        leading_trim: ITEM_ID_LEADING_TRIM,
        terminator: Terminator::Char(','),
        trailing_trim: 0,
    },
};

/// 트래커 아이템 업데이트 응답 메시지 (`"mes":["..."]`)
pub const UPDATE_MESSAGE: Recipe = Recipe {
    guard: Some(SUCCESS_MARKER),
    rule: ExtractionRule {
        marker: MESSAGE_MARKER,
        leading_trim: MESSAGE_LEADING_TRIM,
        terminator: Terminator::Char(']'),
        trailing_trim: MESSAGE_TRAILING_TRIM,
    },
};

/// 트래커 아이템 필드 목록 (`"fields":{...},"nextTicket"`)
pub const ITEM_FIELDS: Recipe = Recipe {
    guard: Some(SUCCESS_MARKER),
    rule: ExtractionRule {
        marker: FIELDS_MARKER,
        leading_trim: FIELDS_LEADING_TRIM,
        terminator: Terminator::Text(NEXT_TICKET_MARKER),
        trailing_trim: FIELDS_TRAILING_TRIM,
    },
};

/// 새 파일 갤러리 파일 ID (`"fileId":"...","galleryId"`)
pub const NEW_FILE_ID: Recipe = Recipe {
    guard: None,
    rule: ExtractionRule {
        marker: FILE_ID_MARKER,
        leading_trim: FILE_ID_LEADING_TRIM,
        terminator: Terminator::Text(GALLERY_ID_MARKER),
        trailing_trim: FILE_ID_TRAILING_TRIM,
    },
};

/// `Content-Disposition` 줄의 `="` 뒤 파일명
const ATTACHMENT_FILENAME: ExtractionRule<'static> = ExtractionRule {
    marker: "=",
    leading_trim: FILENAME_LEADING_TRIM,
    terminator: Terminator::Char('"'),
    trailing_trim: 0,
};

impl Recipe {
    /// 레시피를 본문에 적용하여 필드 값의 독립 사본을 반환합니다.
    ///
    /// # 에러
    ///
    /// - [`TikiError::NotFound`] (`label = "Success"`) — 성공 마커 없음
    /// - [`TikiError::NotFound`] (`label = 필드 마커`) — 필드 마커 없음 또는 트림 범위 초과
    pub fn scrape(&self, body: &str) -> Result<String> {
        if let Some(guard) = self.guard {
            if find_marker(body, guard).is_none() {
                return Err(TikiError::NotFound { label: guard });
            }
        }

        match self.rule.apply(body) {
            Ok(value) => {
                debug!(marker = self.rule.marker, value, "field extracted");
                Ok(value.to_string())
            }
            Err(reason) => {
                debug!(marker = self.rule.marker, %reason, "field extraction failed");
                Err(TikiError::NotFound {
                    label: self.rule.marker,
                })
            }
        }
    }
}

/// 본문에 `check_text`가 있는지 확인합니다.
///
/// 결과는 마커 검색 성공 여부만으로 결정됩니다.
pub fn contains_text(body: &str, check_text: &str) -> bool {
    match find_marker(body, check_text) {
        Some(pos) => {
            // NOTE: Cropped text is for the debug log only
            let cropped = truncate_after(&body[pos..], check_text.len()).unwrap_or(check_text);
            debug!(cropped, "check text found");
            true
        }
        None => {
            debug!(check_text, "check text not found");
            false
        }
    }
}

/// 파일 업데이트 응답에 `fileId`가 있으면 응답 전체를 반환합니다.
///
/// # 에러
///
/// - [`TikiError::UpdateNotConfirmed`] — `fileId` 없음
pub fn confirm_file_update(body: &str) -> Result<String> {
    ExtractionRule::marker_only(FILE_ID_MARKER)
        .apply(body)
        .map_err(|_| TikiError::UpdateNotConfirmed)?;
    Ok(body.to_string())
}

/// 응답 헤더 텍스트에서 서버가 지정한 파일명을 찾습니다.
///
/// 줄 단위로 읽으며 `attachment`가 처음 나오는 줄에서 `=`를 찾고,
/// 바로 뒤 두 글자(`="`)를 버린 다음 다음 `"`에서 자릅니다.
/// `=`가 없는 `attachment` 줄은 건너뜁니다.
///
/// 경로 구분자가 들어간 이름은 마지막 구성 요소만 사용합니다.
///
/// # 예시
///
/// ```
/// use tiki_iot::scrape::filename_from_headers;
///
/// let headers = "HTTP/1.1 200 OK\r\n\
///                content-disposition: attachment; filename=\"report.pdf\"\r\n";
/// assert_eq!(filename_from_headers(headers).unwrap(), "report.pdf");
/// ```
///
/// # 에러
///
/// - [`TikiError::FilenameNotFound`] — 일치하는 줄이 없거나 파일명이 비어 있음
pub fn filename_from_headers(header_text: &str) -> Result<String> {
    for line in header_text.lines() {
        let Some(pos) = find_marker(line, ATTACHMENT_TOKEN) else {
            continue;
        };
        let Ok(raw) = ATTACHMENT_FILENAME.apply(&line[pos..]) else {
            debug!(line, "attachment line without filename");
            continue;
        };

        let name = Path::new(raw)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if name.is_empty() {
            break;
        }
        debug!(name, "filename found in response headers");
        return Ok(name.to_string());
    }
    Err(TikiError::FilenameNotFound)
}
