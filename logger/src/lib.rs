//! 레벨 로그 + 일일 파일 순환 로거
//!
//! 여러 스레드의 로그 호출을 하나의 제한 큐로 모으고, 전용 작성기 스레드가
//! 순서대로 파일/콘솔에 씁니다.
//!
//! # 주요 기능
//! - **레벨 필터링**: DEBUG < INFO < WARNING < ERROR
//! - **비동기 처리**: 제한 큐(기본 1000)와 단일 작성기 스레드, 큐가 차면 호출자 대기
//! - **날짜별 파일 순환**: 날짜가 바뀌면 `<파일>.<YYYY-MM-DD>`로 이름 변경 후 새 파일
//! - **보관 정책**: 순환할 때 정확히 5일 전 파일 삭제
//! - **호출 위치**: `파일:줄`과 (매크로 사용 시) 함수 이름
//!
//! # 사용 예시
//! ```no_run
//! use logger::{Destination, Level};
//!
//! fn main() -> logger::Result<()> {
//!     logger::initialize("server.log", Level::Info, Destination::FileConsole)?;
//!
//!     logger::infof!("서버 시작 port={}", 50051);
//!     logger::errorln!("연결 실패", "timeout");
//!
//!     logger::close();
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod formatter;
pub mod logger;
mod macros;
pub mod registry;
pub mod rotation;
pub mod sink;
pub mod writer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Destination, LoggerConfig, DEFAULT_QUEUE_CAPACITY};
pub use error::{LoggerError, Result};
pub use formatter::{CallerInfo, Level, LogFormatter};
pub use logger::{Logger, LoggerBuilder};
pub use registry::{
    close, debugf, debugln, errorf, errorln, flush, infof, infoln, initialize, initialize_with,
    install, warningf, warningln, with_default,
};
pub use rotation::{RotationManager, RETENTION_DAYS};
pub use sink::MemoryConsole;
pub use writer::{AsyncLogWriter, WriterState, WriterStats};
