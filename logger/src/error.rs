//! 로거 에러 정의
//!
//! 생성 시점의 에러만 호출자에게 전달됩니다. 백그라운드 작성기에서 발생한
//! 런타임 에러는 `tracing`으로만 보고되며 로그 호출자에게 전파되지 않습니다.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Error, Debug)]
pub enum LoggerError {
    /// 파일 출력이 요청되었지만 파일 이름이 비어 있음
    #[error("파일 출력에는 파일 이름이 필요합니다")]
    EmptyFilename,

    #[error("큐 크기는 0보다 커야 합니다")]
    InvalidQueueCapacity,

    /// 실행 파일 디렉토리를 확인할 수 없음
    #[error("실행 파일 디렉토리 확인 실패: {0}")]
    ExecutableDir(#[source] io::Error),

    #[error("로그 디렉토리 생성 실패: {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("로그 파일 열기 실패: {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 작성기 스레드 생성 실패
    #[error("로그 작성기 스레드 시작 실패: {0}")]
    SpawnWorker(#[source] io::Error),
}
