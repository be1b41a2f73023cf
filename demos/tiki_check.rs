//! Tiki 사이트에 작업 하나를 보내고 결과를 JSON으로 출력하는 CLI 예제
//!
//! 설정은 환경 변수(`TIKI_DOMAIN`, `TIKI_ACCESS_TOKEN`, `TIKI_DEBUG`, `TIKI_TIMEOUT_SECS`)에서 읽습니다.
//!
//! 사용법:
//! ```bash
//! cargo run --example tiki_check -- page <페이지 이름> <확인할 텍스트>
//! cargo run --example tiki_check -- date <페이지 이름> <마커> <datelen> <기준 시각> <형식>
//! cargo run --example tiki_check -- item <trackerId> <itemId>
//! ```
//!
//! 예시:
//! ```bash
//! RUST_LOG=tiki_iot=debug cargo run --example tiki_check -- \
//!     date "IoT testing homepage" "Last reading:" 29 "Tue 28 Dec 2021 12:25:00 GMT" "%a %d %b %Y %H:%M:%S %Z"
//! ```

use std::env;

use serde::Serialize;
use tiki_iot::datetime::DateMarker;
use tiki_iot::request::encode_page;
use tiki_iot::{ClientConfig, TikiClient};
use tracing_subscriber::EnvFilter;

/// JSON 출력용 데이터 구조
#[derive(Debug, Serialize)]
struct OutputData {
    /// 성공 여부
    success: bool,
    /// 실행한 작업
    operation: String,
    /// 결과 문자열 (에러 시 에러 메시지)
    result: String,
}

fn print_usage() {
    eprintln!("Tiki IoT 점검 CLI");
    eprintln!();
    eprintln!("사용법:");
    eprintln!("  cargo run --example tiki_check -- page <page> <check_text>");
    eprintln!("  cargo run --example tiki_check -- date <page> <marker> <datelen> <reference> <format>");
    eprintln!("  cargo run --example tiki_check -- item <trackerId> <itemId>");
    eprintln!();
    eprintln!("환경 변수:");
    eprintln!("  TIKI_DOMAIN        - 사이트 주소 (예: https://tiki.example.com)");
    eprintln!("  TIKI_ACCESS_TOKEN  - 접근 토큰 (예: Bearer abc...)");
    eprintln!("  TIKI_DEBUG         - 1이면 응답 본문까지 로그");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        std::process::exit(1);
    };

    let output = run(command, &args[1..]);

    // JSON 출력
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("JSON 직렬화 실패: {e}");
            std::process::exit(1);
        }
    }

    if !output.success {
        std::process::exit(1);
    }
}

fn run(command: &str, args: &[String]) -> OutputData {
    let failure = |message: String| OutputData {
        success: false,
        operation: command.to_string(),
        result: message,
    };

    let config = match ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => return failure(format!("설정 읽기 실패: {e}")),
    };
    let client = match TikiClient::new(config) {
        Ok(c) => c,
        Err(e) => return failure(format!("클라이언트 생성 실패: {e}")),
    };

    let result = match (command, args) {
        ("page", [page, check_text]) => client
            .check_content(&encode_page(page), check_text)
            .map(|found| found.to_string()),
        ("date", [page, marker, datelen, reference, format]) => {
            let Ok(datelen) = datelen.parse::<usize>() else {
                return failure(format!("datelen이 숫자가 아님: {datelen}"));
            };
            client
                .check_datetime(
                    &encode_page(page),
                    &DateMarker::new(marker, datelen),
                    reference,
                    format,
                )
                .map(|check| check.to_string())
        }
        ("item", [tracker_id, item_id]) => client.get_tracker_item(tracker_id, item_id),
        _ => {
            print_usage();
            return failure("알 수 없는 명령 또는 인자 개수".to_string());
        }
    };

    match result {
        Ok(text) => OutputData {
            success: true,
            operation: command.to_string(),
            result: text,
        },
        Err(e) => failure(e.to_string()),
    }
}
