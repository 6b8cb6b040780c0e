//! 전역 기본 로거
//!
//! 처음 사용할 때 콘솔 전용, DEBUG 레벨, 파일 위치 포함으로 만들어집니다.
//! [`initialize`]로 새 설정의 로거를 설치하면 이전 로거는 남은 기록을 모두 쓰고
//! 닫힌 뒤 교체됩니다. [`close`] 이후의 호출은 다음 [`initialize`]까지 무시됩니다.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use tracing::{debug, error};

use crate::config::{Destination, LoggerConfig};
use crate::error::Result;
use crate::formatter::{CallerInfo, Level};
use crate::logger::Logger;

/// 전역 로거 인스턴스
static DEFAULT: Lazy<RwLock<Option<Logger>>> = Lazy::new(|| {
    let logger = match Logger::new(LoggerConfig::default()) {
        Ok(logger) => Some(logger),
        Err(e) => {
            error!(error = %e, "기본 로거 생성 실패");
            None
        }
    };
    RwLock::new(logger)
});

/// 파일 이름, 레벨, 출력 대상으로 기본 로거 교체
///
/// 새 로거 생성에 실패하면 기존 로거가 그대로 유지됩니다.
pub fn initialize(filename: &str, level: Level, destination: Destination) -> Result<()> {
    initialize_with(LoggerConfig::file(filename, level, destination))
}

/// 전체 설정으로 기본 로거 교체
pub fn initialize_with(config: LoggerConfig) -> Result<()> {
    let logger = Logger::new(config)?;
    install(logger);
    Ok(())
}

/// 만들어 둔 로거를 기본 로거로 설치
///
/// 진행 중인 호출이 끝난 뒤 교체되며, 이전 로거는 큐를 비우고 닫힙니다.
pub fn install(logger: Logger) {
    let previous = DEFAULT.write().replace(logger);
    if let Some(previous) = previous {
        previous.close();
        debug!("이전 기본 로거 종료됨");
    }
}

/// 기본 로거 닫기
pub fn close() {
    let previous = DEFAULT.write().take();
    if let Some(previous) = previous {
        previous.close();
    }
}

/// 기본 로거의 남은 기록을 모두 쓸 때까지 대기
pub fn flush() {
    with_default(|logger| logger.flush());
}

/// 설치된 기본 로거로 작업 실행 (닫힌 뒤에는 `None`)
pub fn with_default<R>(f: impl FnOnce(&Logger) -> R) -> Option<R> {
    // Display 구현 안에서 다시 로그를 남겨도 교착되지 않도록 재귀 읽기를 쓴다
    let guard = DEFAULT.read_recursive();
    guard.as_ref().map(f)
}

pub fn is_installed() -> bool {
    DEFAULT.read_recursive().is_some()
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    let caller = CallerInfo::here();
    with_default(|logger| logger.log_fmt(Level::Debug, Some(caller), args));
}

#[track_caller]
pub fn debugln(values: &[&dyn fmt::Display]) {
    let caller = CallerInfo::here();
    with_default(|logger| logger.log_concat(Level::Debug, Some(caller), values));
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    let caller = CallerInfo::here();
    with_default(|logger| logger.log_fmt(Level::Info, Some(caller), args));
}

#[track_caller]
pub fn infoln(values: &[&dyn fmt::Display]) {
    let caller = CallerInfo::here();
    with_default(|logger| logger.log_concat(Level::Info, Some(caller), values));
}

#[track_caller]
pub fn warningf(args: fmt::Arguments<'_>) {
    let caller = CallerInfo::here();
    with_default(|logger| logger.log_fmt(Level::Warning, Some(caller), args));
}

#[track_caller]
pub fn warningln(values: &[&dyn fmt::Display]) {
    let caller = CallerInfo::here();
    with_default(|logger| logger.log_concat(Level::Warning, Some(caller), values));
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    let caller = CallerInfo::here();
    with_default(|logger| logger.log_fmt(Level::Error, Some(caller), args));
}

#[track_caller]
pub fn errorln(values: &[&dyn fmt::Display]) {
    let caller = CallerInfo::here();
    with_default(|logger| logger.log_concat(Level::Error, Some(caller), values));
}
