//! HTTP 클라이언트 모듈 — Tiki API 호출과 응답 스크레이핑 연결
//!
//! [`TikiClient`]는 `reqwest::blocking` 기반 클라이언트입니다. 공개 메서드 하나가
//! 요청 한 번을 보내고, 응답 본문을 [`scrape`](crate::scrape) 레시피나
//! [`datetime`](crate::datetime) 비교기에 넘긴 뒤 결과를 돌려줍니다.
//!
//! ## 작업 목록
//!
//! | 메서드 | HTTP | 결과 |
//! |---|---|---|
//! | [`download_page`](TikiClient::download_page) | `GET /api/wiki/page{page}` | 본문 전체 |
//! | [`check_content`](TikiClient::check_content) | `GET` | `bool` |
//! | [`check_datetime`](TikiClient::check_datetime) | `GET` | [`DateCheck`] |
//! | [`post_tracker_item`](TikiClient::post_tracker_item) | `POST` 폼 | 새 `itemId` |
//! | [`update_tracker_item`](TikiClient::update_tracker_item) | `POST` 폼 | `mes` 텍스트 |
//! | [`get_tracker_item`](TikiClient::get_tracker_item) | `POST` 빈 폼 | `fields` 텍스트 |
//! | [`download_file`](TikiClient::download_file) | `GET` | [`DownloadedFile`] |
//! | [`upload_file`](TikiClient::upload_file) | `POST` 멀티파트 | 새 `fileId` |
//! | [`update_file`](TikiClient::update_file) | `POST` 멀티파트 | 본문 전체 |
//!
//! HTTP 상태 코드는 에러로 취급하지 않습니다. 성공 여부는 본문 마커로 판단하고,
//! 2xx가 아닌 상태는 `warn` 로그만 남깁니다.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Version};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::constants::{ACCEPT_JSON, FORM_CONTENT_TYPE, LIBRARY_VERSION};
use crate::datetime::DateMarker;
use crate::error::{Result, TikiError};
use crate::request::{
    authorization_value, gallery_download_url, gallery_update_url, gallery_upload_url,
    tracker_item_url, tracker_items_url, update_form, upload_form, wiki_page_url,
};
use crate::scrape::{
    confirm_file_update, contains_text, filename_from_headers, ITEM_FIELDS, NEW_FILE_ID,
    NEW_ITEM_ID, UPDATE_MESSAGE,
};
use crate::types::{DateCheck, DownloadRequest, DownloadedFile, FileUpdate, FileUpload, Operation};

/// Tiki API HTTP 클라이언트
///
/// 설정과 reqwest 연결 풀만 가지므로 여러 스레드에서 공유해도 됩니다.
///
/// # 예시
///
/// ```no_run
/// use tiki_iot::client::TikiClient;
/// use tiki_iot::config::ClientConfig;
///
/// # fn example() -> tiki_iot::Result<()> {
/// let config = ClientConfig::new("https://tiki.example.com", "Bearer abc");
/// let client = TikiClient::new(config)?;
/// let found = client.check_content("/IoT%20testing%20homepage", "Sensor online")?;
/// println!("found: {found}");
/// # Ok(())
/// # }
/// ```
pub struct TikiClient {
    /// reqwest blocking 클라이언트 (`accept`, `Authorization` 기본 헤더 포함)
    http: Client,
    /// 호출 설정
    config: ClientConfig,
}

impl TikiClient {
    /// 새 TikiClient를 생성합니다.
    ///
    /// `accept: application/json`과 Authorization 헤더를 모든 요청의 기본 헤더로 등록하고,
    /// 라이브러리 버전을 `info` 로그로 한 번 남깁니다.
    ///
    /// # 에러
    ///
    /// - [`TikiError::InvalidAccessToken`] — 토큰에 헤더 값으로 쓸 수 없는 문자가 있음
    /// - [`TikiError::ClientBuild`] — reqwest 클라이언트 생성 실패
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(authorization_value(&config.access_token))
            .map_err(|_| TikiError::InvalidAccessToken)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(AUTHORIZATION, authorization);

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(TikiError::ClientBuild)?;

        info!(
            version = LIBRARY_VERSION,
            domain = config.domain.as_str(),
            "tiki client ready"
        );

        Ok(Self { http, config })
    }

    /// 현재 설정을 반환합니다.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 사이트 주소 (끝 `/` 없음)
    pub fn domain(&self) -> &str {
        &self.config.domain
    }

    /// 요청을 보내고 본문을 문자열로 받습니다.
    ///
    /// - 전송 실패 → [`TikiError::Transport`]
    /// - 본문 길이 0 → [`TikiError::EmptyResponse`]
    fn fetch_text(&self, operation: Operation, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .map_err(|source| TikiError::Transport { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%operation, status = status.as_u16(), "non-success HTTP status");
        }

        let bytes = response
            .bytes()
            .map_err(|source| TikiError::Transport { operation, source })?;
        if bytes.is_empty() {
            debug!(%operation, "empty response body");
            return Err(TikiError::EmptyResponse);
        }

        // NOTE: Body is scraped as text; invalid UTF-8 is replaced, not rejected
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(%operation, status = status.as_u16(), len = body.len(), "response received");
        if self.config.debug {
            debug!(%operation, body = body.as_str(), "response body");
        }
        Ok(body)
    }

    fn form_post(&self, url: &str, body: &str) -> RequestBuilder {
        self.http
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.to_string())
    }

    /// 위키 페이지 전체를 다운로드합니다.
    ///
    /// `page`는 앞 `/`가 붙은 인코딩된 페이지 이름입니다 (예: `"/IoT%20testing%20homepage"`).
    /// [`encode_page`](crate::request::encode_page)로 만들 수 있습니다.
    ///
    /// # 에러
    ///
    /// - [`TikiError::Transport`] — `"curl access to the Tiki site for the web page download function failed"`
    /// - [`TikiError::EmptyResponse`]
    pub fn download_page(&self, page: &str) -> Result<String> {
        let url = wiki_page_url(self.domain(), page);
        self.fetch_text(Operation::PageDownload, self.http.get(&url))
    }

    /// 위키 페이지에 `check_text`가 있는지 확인합니다.
    pub fn check_content(&self, page: &str, check_text: &str) -> Result<bool> {
        let url = wiki_page_url(self.domain(), page);
        let body = self.fetch_text(Operation::ContentCheck, self.http.get(&url))?;
        Ok(contains_text(&body, check_text))
    }

    /// 위키 페이지에서 마커 뒤 날짜를 찾아 `reference`보다 나중인지 비교합니다.
    ///
    /// 전송/빈 응답 에러만 `Err`로 반환하고, 마커 누락이나 파싱 실패는
    /// [`DateCheck`] 상태로 돌려줍니다.
    ///
    /// # 예시
    ///
    /// ```no_run
    /// use tiki_iot::client::TikiClient;
    /// use tiki_iot::config::ClientConfig;
    /// use tiki_iot::datetime::DateMarker;
    ///
    /// # fn example() -> tiki_iot::Result<()> {
    /// let client = TikiClient::new(ClientConfig::new("https://tiki.example.com", "Bearer abc"))?;
    /// let check = client.check_datetime(
    ///     "/IoT%20testing%20homepage",
    ///     &DateMarker::new("Last reading:", 29),
    ///     "Tue 28 Dec 2021 12:25:00 GMT",
    ///     "%a %d %b %Y %H:%M:%S %Z",
    /// )?;
    /// println!("{check}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn check_datetime(
        &self,
        page: &str,
        marker: &DateMarker<'_>,
        reference: &str,
        format: &str,
    ) -> Result<DateCheck> {
        let url = wiki_page_url(self.domain(), page);
        let body = self.fetch_text(Operation::DateTimeCheck, self.http.get(&url))?;
        let check = marker.check(&body, reference, format);
        debug!(result = check.as_str(), "date-time check done");
        Ok(check)
    }

    /// 새 트래커 아이템을 등록하고 새 `itemId`를 반환합니다.
    ///
    /// `body`는 [`tracker_fields_body`](crate::request::tracker_fields_body) 형태의 폼 본문입니다.
    ///
    /// # 에러
    ///
    /// - [`TikiError::NotFound`] (`"itemId text not found"`)
    pub fn post_tracker_item(&self, tracker_id: &str, body: &str) -> Result<String> {
        let url = tracker_items_url(self.domain(), tracker_id);
        let text = self.fetch_text(Operation::TrackerItemPost, self.form_post(&url, body))?;
        NEW_ITEM_ID.scrape(&text)
    }

    /// 기존 트래커 아이템을 업데이트하고 서버 메시지(`mes`)를 반환합니다.
    ///
    /// # 에러
    ///
    /// - [`TikiError::NotFound`] (`"Success text not found"`, `"mes text not found"`)
    pub fn update_tracker_item(&self, tracker_id: &str, item_id: &str, body: &str) -> Result<String> {
        let url = tracker_item_url(self.domain(), tracker_id, item_id);
        let text = self.fetch_text(Operation::TrackerItemUpdate, self.form_post(&url, body))?;
        UPDATE_MESSAGE.scrape(&text)
    }

    /// 트래커 아이템의 필드 목록(`fields` 객체 내용)을 반환합니다.
    ///
    /// 엔드포인트가 빈 폼 POST에만 `Success`/`fields` 형태로 응답하므로 GET이 아닌 POST를 씁니다.
    pub fn get_tracker_item(&self, tracker_id: &str, item_id: &str) -> Result<String> {
        let url = tracker_item_url(self.domain(), tracker_id, item_id);
        let text = self.fetch_text(Operation::TrackerItemGet, self.form_post(&url, ""))?;
        ITEM_FIELDS.scrape(&text)
    }

    /// 파일 갤러리 파일을 다운로드합니다.
    ///
    /// 1. 헤더 파일과 본문 파일을 먼저 생성 (본문은 지정 이름 또는 `tempdownload`)
    /// 2. `GET /api/galleries/{fileId}/download`
    /// 3. 상태 줄과 응답 헤더를 헤더 파일에, 본문을 본문 파일에 기록
    /// 4. 본문 이름이 지정되지 않았으면 헤더의 `attachment` 파일명으로 이름 변경
    ///
    /// # 에러
    ///
    /// - [`TikiError::HeaderFileOpen`] / [`TikiError::BodyFileOpen`] — 파일 생성 실패
    /// - [`TikiError::Transport`] / [`TikiError::BodyTransfer`] — 전송 실패
    /// - [`TikiError::HeaderFileWrite`] / [`TikiError::BodyFileWrite`] — 파일 기록 실패
    /// - [`TikiError::HeaderFileSize`] / [`TikiError::BodyFileSize`] — 기록 후 파일 상태 확인 실패
    /// - [`TikiError::HeaderFileReopen`] — 본문은 저장했지만 헤더 파일을 다시 읽을 수 없음
    /// - [`TikiError::FilenameNotFound`] — 헤더에 파일명 없음
    /// - [`TikiError::DownloadRename`] — 서버 파일명으로 이름을 바꿀 수 없음
    pub fn download_file(&self, file_id: &str, request: &DownloadRequest) -> Result<DownloadedFile> {
        let operation = Operation::FileDownload;
        let url = gallery_download_url(self.domain(), file_id);
        let header_path = request.header_path();
        let body_path = request.body_path();

        {
            let mut header_file = File::create(&header_path).map_err(TikiError::HeaderFileOpen)?;
            let mut body_file = File::create(&body_path).map_err(TikiError::BodyFileOpen)?;

            let mut response = self
                .http
                .get(&url)
                .send()
                .map_err(|source| TikiError::Transport { operation, source })?;

            let status = response.status();
            if !status.is_success() {
                warn!(%operation, status = status.as_u16(), "non-success HTTP status");
            }

            let header_error = |source| TikiError::HeaderFileWrite {
                path: header_path.clone(),
                source,
            };
            header_file
                .write_all(header_lines(response.version(), status, response.headers()).as_bytes())
                .and_then(|()| header_file.flush())
                .map_err(header_error)?;

            let written = copy_body(&mut response, &mut body_file, &body_path)?;
            debug!(%operation, bytes = written, path = %body_path.display(), "body written");
        }

        let header_size = fs::metadata(&header_path)
            .map_err(|_| TikiError::HeaderFileSize)?
            .len();
        let body_size = fs::metadata(&body_path)
            .map_err(|_| TikiError::BodyFileSize)?
            .len();
        debug!(header_size, body_size, "download files checked");

        if request.body_filename.is_some() {
            return Ok(DownloadedFile {
                path: body_path,
                header_path,
                renamed: false,
            });
        }

        let header_text =
            fs::read_to_string(&header_path).map_err(|source| TikiError::HeaderFileReopen {
                path: body_path.clone(),
                source,
            })?;
        if self.config.debug {
            debug!(headers = header_text.as_str(), "response headers");
        }
        let filename = filename_from_headers(&header_text)?;
        let final_path = request.directory.join(&filename);
        fs::rename(&body_path, &final_path).map_err(|source| TikiError::DownloadRename {
            from: body_path.clone(),
            to: final_path.clone(),
            source,
        })?;
        debug!(from = %body_path.display(), to = %final_path.display(), "download renamed");

        Ok(DownloadedFile {
            path: final_path,
            header_path,
            renamed: true,
        })
    }

    /// 파일 갤러리에 새 파일을 업로드하고 새 `fileId`를 반환합니다.
    ///
    /// # 에러
    ///
    /// - [`TikiError::UploadFile`] — 로컬 파일을 열 수 없음
    /// - [`TikiError::NotFound`] (`"fileId text not found"`)
    pub fn upload_file(&self, upload: &FileUpload) -> Result<String> {
        let url = gallery_upload_url(self.domain());
        let form = upload_form(upload)?;
        let text = self.fetch_text(Operation::FileUpload, self.http.post(&url).multipart(form))?;
        NEW_FILE_ID.scrape(&text)
    }

    /// 파일 갤러리의 기존 파일을 업데이트하고 응답 본문 전체를 반환합니다.
    ///
    /// 바꿀 항목이 없어도 요청은 보냅니다 (서버 응답으로 파일 존재를 확인할 수 있음).
    ///
    /// # 에러
    ///
    /// - [`TikiError::UpdateNotConfirmed`] — 응답에 `fileId`가 없음
    pub fn update_file(&self, file_id: &str, update: &FileUpdate) -> Result<String> {
        let url = gallery_update_url(self.domain(), file_id);
        if update.is_empty() {
            debug!(file_id, "file update carries no changes");
        }
        let form = update_form(update)?;
        let text = self.fetch_text(Operation::FileUpdate, self.http.post(&url).multipart(form))?;
        confirm_file_update(&text)
    }
}

/// 응답 본문을 파일로 복사합니다. 수신 에러와 기록 에러를 구분합니다.
fn copy_body<R, W>(response: &mut R, body_file: &mut W, body_path: &Path) -> Result<u64>
where
    R: Read,
    W: Write,
{
    let write_error = |source| TikiError::BodyFileWrite {
        path: body_path.to_path_buf(),
        source,
    };
    let mut buf = [0u8; 8 * 1024];
    let mut written = 0u64;
    loop {
        let n = match response.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TikiError::BodyTransfer(err)),
        };
        body_file.write_all(&buf[..n]).map_err(write_error)?;
        written += n as u64;
    }
    body_file.flush().map_err(write_error)?;
    Ok(written)
}

/// 응답 상태 줄과 헤더를 `HTTP/1.1 200 OK` + `name: value` 줄 형태로 만듭니다.
fn header_lines(version: Version, status: StatusCode, headers: &HeaderMap) -> String {
    let mut out = format!("{version:?} {status}\r\n");
    for (name, value) in headers {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&String::from_utf8_lossy(value.as_bytes()));
        out.push_str("\r\n");
    }
    out.push_str("\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::CONTENT_DISPOSITION;

    fn config() -> ClientConfig {
        ClientConfig::new("https://tiki.example.com/", "Authorization: Bearer abc")
    }

    #[test]
    fn test_tiki_client_new_trailing_slash_trimmed() {
        let client = TikiClient::new(config()).unwrap();
        assert_eq!(client.domain(), "https://tiki.example.com");
        assert!(!client.config().debug);
    }

    #[test]
    fn test_tiki_client_new_invalid_token() {
        let bad = ClientConfig::new("https://tiki.example.com", "Bearer a\nb");
        let err = TikiClient::new(bad).err().unwrap();
        assert!(matches!(err, TikiError::InvalidAccessToken));
    }

    #[test]
    fn test_tiki_client_with_timeout() {
        let client = TikiClient::new(config().with_timeout_secs(5)).unwrap();
        assert_eq!(client.config().timeout_secs, Some(5));
    }

    #[test]
    fn test_header_lines_format() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"data.csv\""),
        );
        let text = header_lines(Version::HTTP_11, StatusCode::OK, &headers);
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("content-disposition: attachment; filename=\"data.csv\"\r\n"));
        assert_eq!(filename_from_headers(&text).unwrap(), "data.csv");
    }

    #[test]
    fn test_transport_failure_names_operation() {
        // nothing listens on port 1
        let client = TikiClient::new(ClientConfig::new("http://127.0.0.1:1", "Bearer abc")).unwrap();
        let err = client.download_page("/Home").unwrap_err();
        assert_eq!(
            err.to_string(),
            "curl access to the Tiki site for the web page download function failed"
        );

        let err = client.get_tracker_item("3", "482").unwrap_err();
        assert_eq!(
            err.to_string(),
            "curl access to the Tiki site for tracker item download failed"
        );
    }

    #[test]
    fn test_download_file_unwritable_header_location() {
        let client = TikiClient::new(config()).unwrap();
        let request = DownloadRequest::new("/definitely/not/a/dir", "headers.txt");
        let err = client.download_file("731", &request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "response header file location could not be opened"
        );
    }
}
