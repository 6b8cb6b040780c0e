//! 로그 파일 일일 순환 및 보관 관리
//!
//! 날짜가 바뀌면 현재 파일을 `<이름>.<끝난 날짜>`로 바꾸고 같은 경로에 새 파일을
//! 엽니다. 순환할 때마다 정확히 5일 전 날짜의 파일 하나만 삭제합니다.
//!
//! 순환은 기록이 들어올 때만 검사합니다. 자정을 넘기는 동안 기록이 없으면
//! 다음 기록이 들어올 때까지 파일이 바뀌지 않습니다.

use chrono::{Days, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::clock::Clock;
use crate::error::{LoggerError, Result};
use crate::sink::Sink;

/// 순환된 파일 보관 일수
pub const RETENTION_DAYS: u64 = 5;

const DATE_SUFFIX_FORMAT: &str = "%Y-%m-%d";

/// 로그 순환 관리자
///
/// 작성기 스레드만 소유하고 호출합니다.
pub struct RotationManager {
    /// 활성 로그 파일 경로 (콘솔 전용이면 `None`)
    active_path: Option<PathBuf>,
    /// 현재 파일에 마지막으로 기록된 날짜
    marker: NaiveDate,
    clock: Arc<dyn Clock>,
}

impl RotationManager {
    pub fn new(active_path: Option<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        let marker = clock.today();
        Self {
            active_path,
            marker,
            clock,
        }
    }

    pub fn marker(&self) -> NaiveDate {
        self.marker
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active_path.as_deref()
    }

    /// 날짜가 바뀌었는지 확인 (콘솔 전용은 항상 false)
    pub fn needs_rotation(&self) -> bool {
        self.active_path.is_some() && self.clock.today() != self.marker
    }

    /// 파일 순환 실행
    ///
    /// 각 단계의 실패는 기록만 하고 다음 단계로 진행합니다. 순환을 수행했으면
    /// `true`를 반환합니다.
    pub fn rotate(&mut self, sink: &mut Sink) -> bool {
        let Some(active) = self.active_path.clone() else {
            return false;
        };

        let today = self.clock.today();
        let ended = self.marker;
        debug!(
            path = %active.display(),
            ended = %ended,
            today = %today,
            "로그 파일 순환 시작"
        );

        match sink.take_file() {
            Some(Ok(file)) => {
                if let Err(e) = file.sync_all() {
                    warn!(path = %active.display(), error = %e, "로그 파일 동기화 실패");
                }
            }
            Some(Err(e)) => {
                warn!(path = %active.display(), error = %e, "로그 파일 닫기 실패");
            }
            None => {
                debug!(path = %active.display(), "열린 로그 파일 없음");
            }
        }

        if active.exists() {
            let rotated = dated_path(&active, ended);
            if let Err(e) = fs::rename(&active, &rotated) {
                warn!(
                    from = %active.display(),
                    to = %rotated.display(),
                    error = %e,
                    "로그 파일 이름 변경 실패"
                );
            }
        }

        match open_append(&active) {
            Ok(file) => sink.swap_file(file),
            Err(e) => {
                error!(path = %active.display(), error = %e, "새 로그 파일 열기 실패");
            }
        }

        self.marker = today;
        self.sweep_retention(&active, today);

        debug!(path = %active.display(), "로그 파일 순환 완료");
        true
    }

    /// 정확히 `RETENTION_DAYS`일 전 날짜의 순환 파일 하나만 삭제
    fn sweep_retention(&self, active: &Path, today: NaiveDate) {
        let Some(expired) = today.checked_sub_days(Days::new(RETENTION_DAYS)) else {
            return;
        };

        let path = dated_path(active, expired);
        if !path.exists() {
            return;
        }

        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "오래된 로그 파일 삭제됨"),
            Err(e) => warn!(path = %path.display(), error = %e, "로그 파일 삭제 실패"),
        }
    }
}

/// `<경로>.<YYYY-MM-DD>`
pub fn dated_path(active: &Path, date: NaiveDate) -> PathBuf {
    let mut name = active.as_os_str().to_owned();
    name.push(".");
    name.push(date.format(DATE_SUFFIX_FORMAT).to_string());
    PathBuf::from(name)
}

/// 로그 파일 생성 (디렉토리 포함)
pub(crate) fn create_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LoggerError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    open_append(path).map_err(|source| LoggerError::OpenFile {
        path: path.to_path_buf(),
        source,
    })
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
