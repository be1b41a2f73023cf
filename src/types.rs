//! 클라이언트 작업 전반에서 공유하는 타입 정의입니다.
//!
//! [`Operation`], [`DateCheck`], 파일 갤러리 요청/결과 타입 등
//! 스크레이퍼와 클라이언트 모듈이 함께 쓰는 타입을 정의합니다.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::TEMP_DOWNLOAD_NAME;

/// 공개 API 작업 종류
///
/// 전송 실패 시 에러 문구 `"curl access to the Tiki site for <operation> failed"`의
/// `<operation>` 부분을 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// 위키 페이지 전체 다운로드
    PageDownload,
    /// 위키 페이지 텍스트 포함 여부 확인
    ContentCheck,
    /// 위키 페이지 날짜/시간 비교
    DateTimeCheck,
    /// 새 트래커 아이템 등록
    TrackerItemPost,
    /// 기존 트래커 아이템 업데이트
    TrackerItemUpdate,
    /// 트래커 아이템 필드 조회
    TrackerItemGet,
    /// 파일 갤러리 파일 다운로드
    FileDownload,
    /// 파일 갤러리 새 파일 업로드
    FileUpload,
    /// 파일 갤러리 기존 파일 업데이트
    FileUpdate,
}

impl Operation {
    /// 에러 문구에 들어가는 작업 설명을 반환합니다.
    pub fn description(self) -> &'static str {
        match self {
            Operation::PageDownload => "the web page download function",
            Operation::ContentCheck => "web page content check",
            Operation::DateTimeCheck => "web page date-time check",
            Operation::TrackerItemPost => "tracker item post",
            Operation::TrackerItemUpdate => "tracker item update",
            Operation::TrackerItemGet => "tracker item download",
            Operation::FileDownload => "File gallery file download",
            Operation::FileUpload => "File gallery file upload",
            Operation::FileUpdate => "File gallery file update",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// 날짜/시간 비교 결과 (비교 호출의 종료 상태)
///
/// `Idle → Fetching → {MarkerNotFound, Parsing} → {ParseFailure, Compared}` 상태 머신의
/// 종료 상태를 나타냅니다. `Compared`는 [`Later`](Self::Later)/[`NotLater`](Self::NotLater)로 나뉩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCheck {
    /// 찾은 시각이 기준 시각보다 엄격하게 나중 (`"true"`)
    Later,
    /// 찾은 시각이 기준 시각과 같거나 이전 (`"false"`)
    NotLater,
    /// 날짜 앞 마커가 본문에 없음 (`"not found"`)
    MarkerNotFound,
    /// 기준 또는 찾은 텍스트가 형식 패턴과 맞지 않음
    ParseFailure { reason: String },
}

impl DateCheck {
    /// 호출자 계약 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateCheck::Later => "true",
            DateCheck::NotLater => "false",
            DateCheck::MarkerNotFound => "not found",
            DateCheck::ParseFailure { .. } => "date-time text could not be parsed",
        }
    }

    /// 비교가 끝까지 수행되어 `"true"`인지 확인합니다.
    pub fn is_later(&self) -> bool {
        matches!(self, DateCheck::Later)
    }
}

impl fmt::Display for DateCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 파일 갤러리 다운로드 요청
///
/// 헤더 파일과 본문 파일은 모두 `directory` 안에 만들어집니다.
/// `body_filename`이 `None`이면 본문은 임시 이름으로 저장되고,
/// 응답 헤더의 파일명으로 바뀝니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// 저장 디렉터리
    pub directory: PathBuf,
    /// 응답 헤더를 기록할 파일명 (호출마다 덮어씀)
    pub header_filename: String,
    /// 호출자가 지정한 본문 파일명
    pub body_filename: Option<String>,
}

impl DownloadRequest {
    /// 서버가 알려주는 파일명을 사용하는 다운로드 요청을 생성합니다.
    pub fn new(directory: impl Into<PathBuf>, header_filename: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            header_filename: header_filename.into(),
            body_filename: None,
        }
    }

    /// 본문 파일명을 지정합니다. 빈 문자열은 지정하지 않은 것으로 취급합니다.
    pub fn with_body_filename(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.body_filename = (!name.is_empty()).then_some(name);
        self
    }

    /// 응답 헤더 파일 경로
    pub fn header_path(&self) -> PathBuf {
        self.directory.join(&self.header_filename)
    }

    /// 다운로드 직후 본문 파일 경로 (지정 이름 또는 임시 이름)
    pub fn body_path(&self) -> PathBuf {
        let name = self.body_filename.as_deref().unwrap_or(TEMP_DOWNLOAD_NAME);
        self.directory.join(name)
    }
}

/// 다운로드 완료 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// 최종 본문 파일 경로
    pub path: PathBuf,
    /// 응답 헤더 파일 경로
    pub header_path: PathBuf,
    /// 서버 파일명으로 이름을 바꿨는지 여부
    pub renamed: bool,
}

impl DownloadedFile {
    /// 최종 본문 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for DownloadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} downloaded OK", self.path.display())
    }
}

/// 파일 갤러리 새 파일 업로드 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// 업로드할 로컬 파일 경로 (`data` 필드)
    pub path: PathBuf,
    /// 대상 갤러리 ID (`galleryId` 필드)
    pub gallery_id: String,
    /// 경로 없는 파일명 (`name` 필드)
    pub name: String,
    /// 짧은 제목 (`title` 필드)
    pub title: String,
    /// 긴 설명 (`description` 필드)
    pub description: String,
}

/// 파일 갤러리 기존 파일 업데이트 요청
///
/// `None`이거나 빈 값인 항목은 폼에 넣지 않으며, 서버의 해당 속성은 바뀌지 않습니다.
///
/// > **참고**: 이름만 바꾸고 제목을 지정하지 않으면 서버가 제목도 새 이름과 비슷하게 바꿉니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUpdate {
    /// 교체할 파일 내용
    pub path: Option<PathBuf>,
    /// 새 파일명
    pub name: Option<String>,
    /// 새 제목
    pub title: Option<String>,
    /// 새 설명
    pub description: Option<String>,
}

impl FileUpdate {
    /// 변경할 항목이 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        let path_empty = self
            .path
            .as_ref()
            .is_none_or(|p| p.as_os_str().is_empty());
        path_empty
            && [&self.name, &self.title, &self.description]
                .iter()
                .all(|v| v.as_deref().is_none_or(str::is_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_descriptions() {
        assert_eq!(
            Operation::PageDownload.to_string(),
            "the web page download function"
        );
        assert_eq!(Operation::TrackerItemPost.to_string(), "tracker item post");
        assert_eq!(
            Operation::TrackerItemGet.to_string(),
            "tracker item download"
        );
        assert_eq!(
            Operation::FileDownload.to_string(),
            "File gallery file download"
        );
    }

    #[test]
    fn test_date_check_strings() {
        assert_eq!(DateCheck::Later.as_str(), "true");
        assert_eq!(DateCheck::NotLater.as_str(), "false");
        assert_eq!(DateCheck::MarkerNotFound.to_string(), "not found");
        let failure = DateCheck::ParseFailure {
            reason: "bad".to_string(),
        };
        assert_ne!(failure.as_str(), "false");
        assert!(!failure.is_later());
        assert!(DateCheck::Later.is_later());
    }

    #[test]
    fn test_download_request_default_uses_temp_name() {
        let req = DownloadRequest::new("/data/files", "headers.txt");
        assert_eq!(req.body_path(), PathBuf::from("/data/files/tempdownload"));
        assert_eq!(req.header_path(), PathBuf::from("/data/files/headers.txt"));
    }

    #[test]
    fn test_download_request_explicit_body_name() {
        let req = DownloadRequest::new("/data/files", "h.txt").with_body_filename("report.pdf");
        assert_eq!(req.body_path(), PathBuf::from("/data/files/report.pdf"));

        let blank = DownloadRequest::new("/data/files", "h.txt").with_body_filename("");
        assert_eq!(blank.body_filename, None);
    }

    #[test]
    fn test_downloaded_file_display() {
        let file = DownloadedFile {
            path: PathBuf::from("/data/files/report.pdf"),
            header_path: PathBuf::from("/data/files/h.txt"),
            renamed: true,
        };
        assert_eq!(file.to_string(), "/data/files/report.pdf downloaded OK");
    }

    #[test]
    fn test_file_update_is_empty() {
        assert!(FileUpdate::default().is_empty());

        let blank = FileUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.is_empty());

        let titled = FileUpdate {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        assert!(!titled.is_empty());
    }
}
