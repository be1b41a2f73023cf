//! 요청 빌더 모듈 — API URL, 인증 헤더 값, 폼 본문
//!
//! ## URL 형태
//!
//! - [`wiki_page_url`] — `{domain}/api/wiki/page{page}`
//! - [`tracker_items_url`] — `{domain}/api/trackers/{trackerId}/items`
//! - [`tracker_item_url`] — `{domain}/api/trackers/{trackerId}/items/{itemId}`
//! - [`gallery_download_url`] — `{domain}/api/galleries/{fileId}/download`
//! - [`gallery_upload_url`] — `{domain}/api/galleries/upload`
//! - [`gallery_update_url`] — `{domain}/api/galleries/files/{fileId}/update`
//!
//! `domain`에는 끝 `/`가 없어야 하고, 경로 조각은 호출자가 이미 퍼센트 인코딩해 둔 값이어야 합니다.
//! 페이지 이름 인코딩이 필요하면 [`encode_page`]를 사용하세요.

use crate::constants::{AUTHORIZATION_PREFIX, GALLERIES_PATH, TRACKERS_PATH, WIKI_PAGE_PATH};

/// 위키 페이지 URL
///
/// ```
/// use tiki_iot::request::wiki_page_url;
///
/// assert_eq!(
///     wiki_page_url("https://tiki.example.com", "/IoT%20testing%20homepage"),
///     "https://tiki.example.com/api/wiki/page/IoT%20testing%20homepage"
/// );
/// ```
pub fn wiki_page_url(domain: &str, page: &str) -> String {
    format!("{domain}{WIKI_PAGE_PATH}{page}")
}

/// 새 트래커 아이템 등록 URL
pub fn tracker_items_url(domain: &str, tracker_id: &str) -> String {
    format!("{domain}{TRACKERS_PATH}/{tracker_id}/items")
}

/// 기존 트래커 아이템 URL (업데이트와 조회 공용)
pub fn tracker_item_url(domain: &str, tracker_id: &str, item_id: &str) -> String {
    format!("{domain}{TRACKERS_PATH}/{tracker_id}/items/{item_id}")
}

/// 파일 갤러리 다운로드 URL
pub fn gallery_download_url(domain: &str, file_id: &str) -> String {
    format!("{domain}{GALLERIES_PATH}/{file_id}/download")
}

/// 파일 갤러리 업로드 URL
pub fn gallery_upload_url(domain: &str) -> String {
    format!("{domain}{GALLERIES_PATH}/upload")
}

/// 파일 갤러리 파일 업데이트 URL
pub fn gallery_update_url(domain: &str, file_id: &str) -> String {
    format!("{domain}{GALLERIES_PATH}/files/{file_id}/update")
}

/// 페이지 이름을 앞 `/`가 붙은 퍼센트 인코딩 경로로 바꿉니다 (공백은 `%20`).
///
/// ```
/// use tiki_iot::request::encode_page;
///
/// assert_eq!(encode_page("IoT testing homepage"), "/IoT%20testing%20homepage");
/// ```
pub fn encode_page(name: &str) -> String {
    format!("/{}", urlencoding::encode(name.trim_start_matches('/')))
}

/// 트래커 필드 값으로 `fields[이름]=값&...` 폼 본문을 만듭니다.
///
/// 필드 이름은 Tiki 영구 필드 이름 그대로 쓰고, 값만 퍼센트 인코딩합니다.
///
/// ```
/// use tiki_iot::request::tracker_fields_body;
///
/// let body = tracker_fields_body(&[("IoTtestDeviceName", "pi 4"), ("IoTtestNumericalData", "123.456")]);
/// assert_eq!(body, "fields[IoTtestDeviceName]=pi%204&fields[IoTtestNumericalData]=123.456");
/// ```
pub fn tracker_fields_body<K, V>(fields: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fields
        .iter()
        .map(|(name, value)| {
            format!(
                "fields[{}]={}",
                name.as_ref(),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// 호출자가 넘긴 접근 토큰에서 Authorization 헤더 값을 얻습니다.
///
/// 기존 호출자는 `"Authorization: Bearer <token>"` 형태의 헤더 줄 전체를 넘기고,
/// 새 호출자는 `"Bearer <token>"` 값만 넘길 수 있습니다. 둘 다 허용합니다.
///
/// ```
/// use tiki_iot::request::authorization_value;
///
/// assert_eq!(authorization_value("Authorization: Bearer abc"), "Bearer abc");
/// assert_eq!(authorization_value("Bearer abc"), "Bearer abc");
/// ```
pub fn authorization_value(token: &str) -> &str {
    let token = token.trim();
    match token.get(..AUTHORIZATION_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(AUTHORIZATION_PREFIX) => {
            token[AUTHORIZATION_PREFIX.len()..].trim_start()
        }
        _ => token,
    }
}

#[cfg(feature = "client")]
pub use self::multipart::{update_form, upload_form};

#[cfg(feature = "client")]
mod multipart {
    use std::path::Path;

    use reqwest::blocking::multipart::Form;

    use crate::error::{Result, TikiError};
    use crate::types::{FileUpdate, FileUpload};

    fn attach_file(form: Form, path: &Path) -> Result<Form> {
        form.file("data", path).map_err(|source| TikiError::UploadFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 새 파일 업로드 폼 (`data`, `galleryId`, `name`, `title`, `description`)
    ///
    /// # 에러
    ///
    /// - [`TikiError::UploadFile`] — 로컬 파일을 열 수 없음
    pub fn upload_form(upload: &FileUpload) -> Result<Form> {
        let form = attach_file(Form::new(), &upload.path)?;
        Ok(form
            .text("galleryId", upload.gallery_id.clone())
            .text("name", upload.name.clone())
            .text("title", upload.title.clone())
            .text("description", upload.description.clone()))
    }

    /// 파일 업데이트 폼. 비어 있는 항목은 넣지 않습니다.
    ///
    /// # 에러
    ///
    /// - [`TikiError::UploadFile`] — 교체할 로컬 파일을 열 수 없음
    pub fn update_form(update: &FileUpdate) -> Result<Form> {
        let mut form = Form::new();
        if let Some(path) = update.path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            form = attach_file(form, path)?;
        }
        let texts = [
            ("name", &update.name),
            ("title", &update.title),
            ("description", &update.description),
        ];
        for (field, value) in texts {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                form = form.text(field, value.to_string());
            }
        }
        Ok(form)
    }
}
