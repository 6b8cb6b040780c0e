//! 로거 설정 관리
//!
//! 출력 대상, 레벨, 호출 위치 옵션과 로그 파일 경로 결정을 담당합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{LoggerError, Result};
use crate::formatter::Level;

/// 기본 큐 크기
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// 로그 디렉토리 이름 (실행 파일 디렉토리 기준)
pub const LOG_DIR_NAME: &str = "logs";

/// 로그 출력 대상
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// 파일만
    File,
    /// 표준 출력만
    Console,
    /// 파일과 표준 출력 모두
    FileConsole,
}

impl Destination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::File => "file",
            Destination::Console => "console",
            Destination::FileConsole => "file_console",
        }
    }

    pub fn has_file(&self) -> bool {
        matches!(self, Destination::File | Destination::FileConsole)
    }

    pub fn has_console(&self) -> bool {
        matches!(self, Destination::Console | Destination::FileConsole)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Destination {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Destination::File),
            "console" | "stdout" => Ok(Destination::Console),
            "file_console" | "filestdout" | "both" => Ok(Destination::FileConsole),
            _ => Err(()),
        }
    }
}

/// 로거 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// 로그 디렉토리 아래의 파일 이름 (콘솔 전용이면 비워도 됨)
    pub filename: String,

    /// 로그에 `파일:줄` 기록 여부 (기본값: true)
    pub include_file_path: bool,

    /// 로그에 호출 함수 이름 기록 여부 (기본값: false)
    pub include_function: bool,

    /// 최소 출력 레벨 (기본값: Debug)
    pub level: Level,

    /// 공개 API 진입점 바깥으로 건너뛸 호출 프레임 수 (기본값: 0)
    pub caller_depth: usize,

    /// 출력 대상 (기본값: Console)
    pub destination: Destination,

    /// 로그 디렉토리 (없으면 `<실행 파일 디렉토리>/logs`)
    pub log_dir: Option<PathBuf>,

    /// 대기 큐 크기 (기본값: 1000)
    pub queue_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            filename: String::new(),
            include_file_path: true,
            include_function: false,
            level: Level::Debug,
            caller_depth: 0,
            destination: Destination::Console,
            log_dir: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl LoggerConfig {
    /// 파일 이름, 레벨, 출력 대상만 지정한 설정
    pub fn file<S: Into<String>>(filename: S, level: Level, destination: Destination) -> Self {
        Self {
            filename: filename.into(),
            level,
            destination,
            ..Default::default()
        }
    }

    pub fn with_log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// 환경변수에서 설정 로드
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LOG_FILENAME") {
            config.filename = val;
        }

        if let Ok(val) = std::env::var("LOG_LEVEL") {
            if let Ok(level) = val.parse() {
                config.level = level;
            }
        }

        if let Ok(val) = std::env::var("LOG_DESTINATION") {
            if let Ok(destination) = val.parse() {
                config.destination = destination;
            }
        }

        if let Ok(val) = std::env::var("LOG_DIR") {
            if !val.is_empty() {
                config.log_dir = Some(PathBuf::from(val));
            }
        }

        if let Ok(val) = std::env::var("LOG_QUEUE_SIZE") {
            if let Ok(size) = val.parse() {
                config.queue_capacity = size;
            }
        }

        if let Ok(val) = std::env::var("LOG_CALLER_DEPTH") {
            if let Ok(depth) = val.parse() {
                config.caller_depth = depth;
            }
        }

        if let Ok(val) = std::env::var("LOG_FILE_PATH") {
            config.include_file_path = val.to_lowercase() == "true";
        }

        if let Ok(val) = std::env::var("LOG_FUNC_NAME") {
            config.include_function = val.to_lowercase() == "true";
        }

        config
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        if self.destination.has_file() && self.filename.trim().is_empty() {
            return Err(LoggerError::EmptyFilename);
        }

        if self.queue_capacity == 0 {
            return Err(LoggerError::InvalidQueueCapacity);
        }

        Ok(())
    }

    /// 로그 디렉토리 결정
    pub fn resolve_log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.log_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe().map_err(LoggerError::ExecutableDir)?;
        let exe_dir = exe.parent().ok_or_else(|| {
            LoggerError::ExecutableDir(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "실행 파일에 상위 디렉토리가 없음",
            ))
        })?;

        Ok(exe_dir.join(LOG_DIR_NAME))
    }

    /// 활성 로그 파일 경로 (파일 출력이 없으면 `None`)
    pub fn resolve_log_path(&self) -> Result<Option<PathBuf>> {
        if !self.destination.has_file() {
            return Ok(None);
        }
        Ok(Some(self.resolve_log_dir()?.join(&self.filename)))
    }
}
