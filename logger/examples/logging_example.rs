//! 로거 사용 예제
//!
//! 기본 로거, 파일+콘솔 로거, 전용 로거 인스턴스, 여러 스레드에서의 기록을
//! 차례로 보여줍니다. 로그 파일은 실행 파일 옆의 `logs/` 디렉토리에 생성됩니다.
//!
//! `RUST_LOG=logger=debug`로 실행하면 로거 내부 진단(순환, 파일 열기 등)도 볼 수 있습니다.

use anyhow::Result;
use logger::{Destination, Level, Logger, LoggerConfig};
use std::sync::Arc;
use std::thread;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("📝 예제 1: 기본 로거 (콘솔, DEBUG)");
    default_logger_example();

    println!("\n⚙️ 예제 2: 파일 + 콘솔 로거로 교체");
    file_logger_example()?;

    println!("\n🎯 예제 3: 전용 로거 인스턴스");
    custom_logger_example()?;

    println!("\n⚡ 예제 4: 여러 스레드에서 기록");
    concurrent_example()?;

    logger::close();
    println!("\n✅ 모든 예제 완료! logs/ 디렉토리에서 생성된 로그를 확인하세요.");
    Ok(())
}

fn default_logger_example() {
    logger::debugf(format_args!("설정 로드 중 path={}", "./config.toml"));
    logger::infoln(&[&"서버 준비", &"port", &50051]);
    logger::warningf!("메모리 사용량 {}%", 85);
    logger::flush();
}

fn file_logger_example() -> Result<()> {
    logger::initialize("example.log", Level::Info, Destination::FileConsole)?;

    logger::debugf!("INFO 레벨이므로 출력되지 않음");
    logger::infof!("게임 방 생성 room_id={}", 1001);
    logger::errorln!("데이터베이스 연결 실패", "timeout");
    logger::flush();

    let active = logger::with_default(|l| l.log_path().map(|p| p.display().to_string()));
    if let Some(Some(path)) = active {
        println!("   ✓ 로그 파일: {}", path);
    }
    Ok(())
}

fn custom_logger_example() -> Result<()> {
    let config = LoggerConfig {
        filename: "audit.log".to_string(),
        include_function: true,
        level: Level::Warning,
        destination: Destination::File,
        ..Default::default()
    };
    let audit = Logger::new(config)?;

    logger::warningf!(logger: &audit, "관리자 권한 사용 user={}", "admin");
    logger::errorf!(logger: &audit, "권한 없는 접근 ip={}", "10.0.0.7");
    audit.close();

    println!("   ✓ 감사 로그 기록 {}건", audit.stats().records_written);
    Ok(())
}

fn concurrent_example() -> Result<()> {
    let config = LoggerConfig::file("workers.log", Level::Debug, Destination::File);
    let log = Arc::new(Logger::new(config)?);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let log = log.clone();
            thread::spawn(move || {
                for i in 0..1000 {
                    log.debugln(&[&"worker", &worker, &"message", &i]);
                }
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
    log.close();

    let stats = log.stats();
    println!(
        "   ✓ {}건 기록, 실패 {}건",
        stats.records_written, stats.write_failures
    );
    Ok(())
}
