//! 로거 파사드
//!
//! 레벨 검사, 포매팅, 작성기 큐 전달을 묶은 공개 API입니다.
//!
//! ```no_run
//! use logger::{Destination, Level, Logger, LoggerConfig};
//!
//! # fn main() -> logger::Result<()> {
//! let log = Logger::new(LoggerConfig::file("app.log", Level::Info, Destination::FileConsole))?;
//! log.infof(format_args!("서버 시작 port={}", 50051));
//! log.errorln(&[&"연결 실패", &"timeout"]);
//! log.close();
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::{Destination, LoggerConfig};
use crate::error::Result;
use crate::formatter::{CallerInfo, Level, LogFormatter};
use crate::rotation::{create_log_file, RotationManager};
use crate::sink::Sink;
use crate::writer::{AsyncLogWriter, WriterState, WriterStats};

/// 레벨별 로그 메서드를 제공하는 로거
pub struct Logger {
    level: Level,
    destination: Destination,
    formatter: LogFormatter,
    writer: AsyncLogWriter,
    log_path: Option<PathBuf>,
}

/// 로거 생성기
///
/// 콘솔 출력 대상과 시계를 바꿔 끼울 수 있습니다.
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Option<Box<dyn Write + Send>>,
    clock: Arc<dyn Clock>,
}

impl LoggerBuilder {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            console: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// 콘솔 출력 대상 교체 (기본값: 표준 출력)
    pub fn console<W: Write + Send + 'static>(mut self, console: W) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Result<Logger> {
        let config = self.config;
        config.validate()?;

        let log_path = config.resolve_log_path()?;
        let file = match &log_path {
            Some(path) => Some(create_log_file(path)?),
            None => None,
        };

        let console = if config.destination.has_console() {
            Some(
                self.console
                    .unwrap_or_else(|| Box::new(io::stdout()) as Box<dyn Write + Send>),
            )
        } else {
            None
        };

        let sink = Sink::new(file, console);
        let rotation = RotationManager::new(log_path.clone(), self.clock.clone());
        let writer = AsyncLogWriter::spawn(sink, rotation, config.queue_capacity)?;
        let formatter = LogFormatter::new(
            config.include_file_path,
            config.include_function,
            config.caller_depth,
            self.clock,
        );

        debug!(
            destination = %config.destination,
            level = %config.level,
            path = ?log_path,
            "로거 생성됨"
        );

        Ok(Logger {
            level: config.level,
            destination: config.destination,
            formatter,
            writer,
            log_path,
        })
    }
}

impl Logger {
    /// 설정으로 로거 생성
    ///
    /// 파일 출력인데 파일 이름이 비었거나 로그 파일을 열 수 없으면 실패합니다.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::new(config).build()
    }

    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder::new(config)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn destination(&self) -> Destination {
        self.destination
    }

    pub fn formatter(&self) -> &LogFormatter {
        &self.formatter
    }

    /// 해당 레벨이 기록되는지 여부
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// 활성 로그 파일 경로 (콘솔 전용이면 `None`)
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// 템플릿 메시지 기록
    pub fn log_fmt(&self, level: Level, caller: Option<CallerInfo>, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.writer.enqueue(self.formatter.format(level, caller, args));
    }

    /// 값 목록을 이어 붙여 기록
    pub fn log_concat(
        &self,
        level: Level,
        caller: Option<CallerInfo>,
        values: &[&dyn fmt::Display],
    ) {
        if !self.enabled(level) {
            return;
        }
        self.writer.enqueue(self.formatter.format_concat(level, caller, values));
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Debug, Some(CallerInfo::here()), args);
    }

    #[track_caller]
    pub fn debugln(&self, values: &[&dyn fmt::Display]) {
        self.log_concat(Level::Debug, Some(CallerInfo::here()), values);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Info, Some(CallerInfo::here()), args);
    }

    #[track_caller]
    pub fn infoln(&self, values: &[&dyn fmt::Display]) {
        self.log_concat(Level::Info, Some(CallerInfo::here()), values);
    }

    #[track_caller]
    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Warning, Some(CallerInfo::here()), args);
    }

    #[track_caller]
    pub fn warningln(&self, values: &[&dyn fmt::Display]) {
        self.log_concat(Level::Warning, Some(CallerInfo::here()), values);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(Level::Error, Some(CallerInfo::here()), args);
    }

    #[track_caller]
    pub fn errorln(&self, values: &[&dyn fmt::Display]) {
        self.log_concat(Level::Error, Some(CallerInfo::here()), values);
    }

    /// 지금까지 요청된 기록이 모두 쓰일 때까지 대기
    pub fn flush(&self) {
        self.writer.flush();
    }

    /// 남은 기록을 모두 쓰고 닫음. 이후 호출은 무시됩니다.
    pub fn close(&self) {
        self.writer.close();
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_closed()
    }

    pub fn state(&self) -> WriterState {
        self.writer.state()
    }

    pub fn stats(&self) -> WriterStats {
        self.writer.stats()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("destination", &self.destination)
            .field("log_path", &self.log_path)
            .field("state", &self.state())
            .finish()
    }
}
