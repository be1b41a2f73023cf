//! # tiki-iot
//!
//! IoT 장치에서 Tiki CMS API(위키 페이지, 트래커, 파일 갤러리)를 호출하고,
//! JSON 파서 없이 응답 본문에서 필드 하나를 뽑아내는 라이브러리.
//!
//! 응답 처리의 핵심은 마커 검색 + 고정 오프셋 트림 + 종결자 절단으로 이루어진
//! 추출 엔진과, 페이지에 적힌 날짜를 기준 시각과 비교하는 비교기입니다.
//!
//! ## 모듈 구조
//!
//! - [`constants`] — API 경로, 응답 마커, 트림 폭 상수
//! - [`error`] — 에러 타입 계층 구조 ([`TikiError`])
//! - [`types`] — 공유 타입 정의 ([`Operation`], [`DateCheck`], [`DownloadRequest`] 등)
//! - [`extract`] — 마커 검색과 경계 검사가 있는 트림 ([`ExtractionRule`](extract::ExtractionRule))
//! - [`scrape`] — 엔드포인트별 추출 레시피 ([`Recipe`](scrape::Recipe))
//! - [`datetime`] — 타임스탬프 파싱과 비교 ([`DateMarker`](datetime::DateMarker))
//! - [`request`] — URL, 인증 헤더 값, 폼 본문 빌더
//! - [`config`] — 클라이언트 설정 ([`ClientConfig`])
//! - [`client`] — HTTP 클라이언트 *(feature `"client"` 활성화 시)*
//!
//! ## 사용 예시
//!
//! ```rust
//! use tiki_iot::scrape::{NEW_ITEM_ID, UPDATE_MESSAGE};
//! use tiki_iot::datetime::DateMarker;
//! use tiki_iot::DateCheck;
//!
//! let id = NEW_ITEM_ID.scrape(r#"{"trackerId":3,"itemId":482,"status":"o"}"#).unwrap();
//! assert_eq!(id, "482");
//!
//! let err = UPDATE_MESSAGE.scrape(r#"{"feedback":{"mes":["denied"]}}"#).unwrap_err();
//! assert_eq!(err.to_string(), "Success text not found");
//!
//! let page = "<p>Updated Wed 29 Dec 2021 00:00:00 GMT</p>";
//! let check = DateMarker::new("Updated", 29).check(
//!     page,
//!     "Tue 28 Dec 2021 12:25:00 GMT",
//!     "%a %d %b %Y %H:%M:%S %Z",
//! );
//! assert_eq!(check, DateCheck::Later);
//! ```

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod constants;
pub mod datetime;
pub mod error;
pub mod extract;
pub mod request;
pub mod scrape;
pub mod types;

// NOTE: Selective re-export, commonly used types only
#[cfg(feature = "client")]
pub use client::TikiClient;
pub use config::ClientConfig;
pub use error::{Result, TikiError};
pub use types::{DateCheck, DownloadRequest, DownloadedFile, FileUpdate, FileUpload, Operation};
