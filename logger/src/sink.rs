//! 로그 출력 대상
//!
//! 파일과 콘솔로의 팬아웃 쓰기를 담당합니다. 싱크는 작성기 스레드만 소유하므로
//! 내부 잠금이 없습니다.

use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use tracing::warn;

/// 파일 + 콘솔 팬아웃 싱크
pub struct Sink {
    file: Option<BufWriter<File>>,
    console: Option<Box<dyn Write + Send>>,
}

impl Sink {
    pub fn new(file: Option<File>, console: Option<Box<dyn Write + Send>>) -> Self {
        Self {
            file: file.map(BufWriter::new),
            console,
        }
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// 현재 연결된 출력 대상 수
    pub fn target_count(&self) -> usize {
        usize::from(self.file.is_some()) + usize::from(self.console.is_some())
    }

    /// 한 줄 쓰기
    ///
    /// 한 대상의 실패가 다른 대상의 쓰기를 막지 않습니다. 실패한 대상 수를 반환합니다.
    pub fn write_line(&mut self, line: &str) -> usize {
        let mut failed = 0;

        if let Some(file) = self.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                warn!(target: "logger::sink", error = %e, "로그 파일 쓰기 실패");
                failed += 1;
            }
        }

        if let Some(console) = self.console.as_mut() {
            if let Err(e) = writeln!(console, "{}", line) {
                warn!(target: "logger::sink", error = %e, "콘솔 쓰기 실패");
                failed += 1;
            }
        }

        failed
    }

    /// 버퍼에 남은 내용을 모든 대상에 기록
    pub fn flush(&mut self) {
        if let Some(file) = self.file.as_mut() {
            if let Err(e) = file.flush() {
                warn!(target: "logger::sink", error = %e, "로그 파일 플러시 실패");
            }
        }

        if let Some(console) = self.console.as_mut() {
            if let Err(e) = console.flush() {
                warn!(target: "logger::sink", error = %e, "콘솔 플러시 실패");
            }
        }
    }

    /// 파일 대상을 떼어내고 버퍼를 비움
    pub fn take_file(&mut self) -> Option<io::Result<File>> {
        self.file
            .take()
            .map(|writer| writer.into_inner().map_err(|e| e.into_error()))
    }

    /// 파일 대상 교체 (콘솔 대상은 그대로)
    pub fn swap_file(&mut self, file: File) {
        self.file = Some(BufWriter::new(file));
    }
}

/// 메모리 내 콘솔 (테스트용)
///
/// 복제본끼리 같은 버퍼를 공유하므로 하나를 로거에 넘기고 다른 하나로 내용을 읽습니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemoryConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
