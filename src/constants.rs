//! Tiki API 경로, 응답 마커, 트림 폭, 기본값 상수를 정의합니다.
//!
//! 마커와 트림 폭은 업스트림 응답 형태에 맞춘 고정 계약 값입니다.
//! 값을 바꾸면 기존 호출자가 받는 추출 결과가 달라집니다.

/// 라이브러리 버전 (연결 시 로그로 출력)
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP 클라이언트 User-Agent 문자열
pub const USER_AGENT: &str = concat!("tiki-iot/", env!("CARGO_PKG_VERSION"));

/// 위키 페이지 API 경로 (페이지 이름이 바로 뒤에 붙음)
pub const WIKI_PAGE_PATH: &str = "/api/wiki/page";

/// 트래커 API 경로 접두사
pub const TRACKERS_PATH: &str = "/api/trackers";

/// 파일 갤러리 API 경로 접두사
pub const GALLERIES_PATH: &str = "/api/galleries";

/// `accept` 헤더 값
pub const ACCEPT_JSON: &str = "application/json";

/// 폼 POST의 Content-Type
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Authorization 헤더 이름 (호출자가 전체 헤더 줄을 넘길 때 제거할 접두사)
pub const AUTHORIZATION_PREFIX: &str = "Authorization:";

/// 본문 파일명을 지정하지 않은 다운로드의 임시 파일명
pub const TEMP_DOWNLOAD_NAME: &str = "tempdownload";

/// 업데이트/조회 응답의 성공 표시 마커
pub const SUCCESS_MARKER: &str = "Success";

/// 새 트래커 아이템 ID 마커
pub const ITEM_ID_MARKER: &str = "itemId";

/// 트래커 아이템 업데이트 메시지 마커
pub const MESSAGE_MARKER: &str = "mes";

/// 트래커 아이템 필드 목록 마커
pub const FIELDS_MARKER: &str = "fields";

/// 파일 갤러리 파일 ID 마커
pub const FILE_ID_MARKER: &str = "fileId";

/// 필드 목록의 끝을 나타내는 마커
pub const NEXT_TICKET_MARKER: &str = "nextTicket";

/// 업로드 응답에서 파일 ID 뒤에 오는 마커
pub const GALLERY_ID_MARKER: &str = "galleryId";

/// 응답 헤더에서 Content-Disposition 줄을 찾는 토큰
pub const ATTACHMENT_TOKEN: &str = "attachment";

/// `itemId":` 폭 — 정수 ID는 따옴표로 감싸지 않음
pub const ITEM_ID_LEADING_TRIM: usize = 8;

/// `mes":["` 폭
pub const MESSAGE_LEADING_TRIM: usize = 7;

/// 메시지 끝의 닫는 `"`
pub const MESSAGE_TRAILING_TRIM: usize = 1;

/// `fields":` 폭
pub const FIELDS_LEADING_TRIM: usize = 8;

/// 필드 목록 끝의 `,"`
pub const FIELDS_TRAILING_TRIM: usize = 2;

/// `fileId":"` 폭
pub const FILE_ID_LEADING_TRIM: usize = 9;

/// 파일 ID 끝의 `","`
pub const FILE_ID_TRAILING_TRIM: usize = 3;

/// 파일명 앞의 `="` 폭
pub const FILENAME_LEADING_TRIM: usize = 2;

/// 날짜 마커와 날짜 텍스트 사이에 가정하는 구분 문자 수 (공백 1개)
pub const DATE_SEPARATOR_WIDTH: usize = 1;
