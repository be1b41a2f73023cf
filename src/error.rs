//! Tiki API 클라이언트의 에러 타입 계층 구조를 정의합니다.
//!
//! 모든 에러는 [`TikiError`] enum으로 표현되며, [`thiserror`]를 통해
//! `Display` 및 `Error` 트레이트가 자동 구현됩니다.
//!
//! `Display` 문자열은 호출자와의 공개 계약입니다. 기존 호출자는 실패 시
//! 이 문자열을 그대로 비교하므로 문구를 바꾸면 안 됩니다.

use std::path::PathBuf;

use crate::types::Operation;

/// Tiki API 클라이언트의 최상위 에러 타입
///
/// 전송 실패, 빈 응답, 마커 누락, 날짜 파싱 실패, 다운로드 파일 I/O 실패를 포괄합니다.
/// 전송 에러 변형은 feature `"client"` 활성화 시에만 포함됩니다.
#[derive(Debug, thiserror::Error)]
pub enum TikiError {
    /// 네트워크/HTTP 호출 자체가 실패함 (연결, TLS, 타임아웃)
    #[cfg(feature = "client")]
    #[error("curl access to the Tiki site for {operation} failed")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// reqwest 클라이언트 생성 실패 (TLS 백엔드 초기화 등)
    #[cfg(feature = "client")]
    #[error("HTTP client could not be built: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// 호출은 성공했지만 응답 본문 길이가 0
    #[error("no response from the curl request sent to the server API")]
    EmptyResponse,

    /// 응답에 기대한 마커가 없음 (`label`은 누락된 마커)
    #[error("{label} text not found")]
    NotFound { label: &'static str },

    /// 파일 업데이트 응답에 `fileId`가 없음
    #[error("fileId text not found - so update was not successful")]
    UpdateNotConfirmed,

    /// 날짜/시간 텍스트가 형식 패턴과 맞지 않음
    #[error("date-time text {text:?} does not match format {format:?}: {source}")]
    TimestampParse {
        text: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    /// 응답 헤더 파일을 생성할 수 없음
    #[error("response header file location could not be opened")]
    HeaderFileOpen(#[source] std::io::Error),

    /// 다운로드 본문 파일을 생성할 수 없음
    #[error("download file location could not be opened")]
    BodyFileOpen(#[source] std::io::Error),

    /// 다운로드 후 헤더 파일 상태를 확인할 수 없음
    #[error("header file size is zero or some other error")]
    HeaderFileSize,

    /// 다운로드 후 본문 파일 상태를 확인할 수 없음
    #[error("body file size is zero or some other error")]
    BodyFileSize,

    /// 본문은 저장했지만 파일명을 얻기 위해 헤더 파일을 다시 열 수 없음
    #[error("{} downloaded as header file could not be reopened", path.display())]
    HeaderFileReopen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 응답 헤더 파일에 기록할 수 없음
    #[error("response header file {} could not be written", path.display())]
    HeaderFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 다운로드 본문 파일에 기록할 수 없음 (디스크 가득 참 등)
    #[error("download file {} could not be written", path.display())]
    BodyFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 본문 수신 도중 연결이 끊김
    #[error("curl access to the Tiki site for File gallery file download failed")]
    BodyTransfer(#[source] std::io::Error),

    /// 임시 이름으로 받은 파일을 서버 파일명으로 바꿀 수 없음
    #[error("{} downloaded but could not be renamed to {}", from.display(), to.display())]
    DownloadRename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 응답 헤더에 `attachment` 파일명 줄이 없음
    #[error("could not determine filename from headers")]
    FilenameNotFound,

    /// 업로드할 로컬 파일을 읽을 수 없음
    #[error("upload file {} could not be read", path.display())]
    UploadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 접근 토큰을 HTTP 헤더 값으로 쓸 수 없음
    #[error("access token is not a valid authorization header value")]
    InvalidAccessToken,

    /// 필수 설정 값이 없음
    #[error("missing configuration value: {name}")]
    MissingConfig { name: &'static str },

    /// 표준 I/O 에러 래핑
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// [`TikiError`]를 사용하는 편의 Result 타입 별칭
pub type Result<T> = std::result::Result<T, TikiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TikiError = io_err.into();
        assert!(matches!(err, TikiError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_empty_response_display() {
        assert_eq!(
            TikiError::EmptyResponse.to_string(),
            "no response from the curl request sent to the server API"
        );
    }

    #[test]
    fn test_not_found_display_per_label() {
        for label in ["itemId", "mes", "Success", "fields", "fileId"] {
            let err = TikiError::NotFound { label };
            assert_eq!(err.to_string(), format!("{label} text not found"));
        }
    }

    #[test]
    fn test_update_not_confirmed_display() {
        assert_eq!(
            TikiError::UpdateNotConfirmed.to_string(),
            "fileId text not found - so update was not successful"
        );
    }

    #[test]
    fn test_download_file_errors_display() {
        let open_err = || std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(
            TikiError::HeaderFileOpen(open_err()).to_string(),
            "response header file location could not be opened"
        );
        assert_eq!(
            TikiError::BodyFileOpen(open_err()).to_string(),
            "download file location could not be opened"
        );
        assert_eq!(
            TikiError::HeaderFileSize.to_string(),
            "header file size is zero or some other error"
        );
        assert_eq!(
            TikiError::BodyFileSize.to_string(),
            "body file size is zero or some other error"
        );
        assert_eq!(
            TikiError::FilenameNotFound.to_string(),
            "could not determine filename from headers"
        );
    }

    #[test]
    fn test_header_reopen_display_names_body_path() {
        let err = TikiError::HeaderFileReopen {
            path: PathBuf::from("/tmp/files/tempdownload"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(
            err.to_string(),
            "/tmp/files/tempdownload downloaded as header file could not be reopened"
        );
    }

    #[test]
    fn test_download_write_errors_name_the_file() {
        let full = || std::io::Error::new(std::io::ErrorKind::Other, "no space left on device");
        let header = TikiError::HeaderFileWrite {
            path: PathBuf::from("/tmp/files/headers.txt"),
            source: full(),
        };
        assert_eq!(
            header.to_string(),
            "response header file /tmp/files/headers.txt could not be written"
        );
        let body = TikiError::BodyFileWrite {
            path: PathBuf::from("/tmp/files/tempdownload"),
            source: full(),
        };
        assert_eq!(
            body.to_string(),
            "download file /tmp/files/tempdownload could not be written"
        );
        let rename = TikiError::DownloadRename {
            from: PathBuf::from("/tmp/files/tempdownload"),
            to: PathBuf::from("/tmp/files/report.pdf"),
            source: full(),
        };
        assert_eq!(
            rename.to_string(),
            "/tmp/files/tempdownload downloaded but could not be renamed to /tmp/files/report.pdf"
        );
        assert_eq!(
            TikiError::BodyTransfer(full()).to_string(),
            "curl access to the Tiki site for File gallery file download failed"
        );
    }

    #[test]
    fn test_missing_config_display() {
        let err = TikiError::MissingConfig {
            name: "TIKI_DOMAIN",
        };
        assert_eq!(err.to_string(), "missing configuration value: TIKI_DOMAIN");
    }
}
