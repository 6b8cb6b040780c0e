//! 비동기 로그 작성기
//!
//! 여러 생산자의 기록을 하나의 제한 큐로 모으고, 전용 작성기 스레드 하나가
//! 순서대로 꺼내 싱크에 씁니다. 싱크, 파일 핸들, 순환 날짜는 작성기 스레드만
//! 건드리므로 잠금이 필요 없습니다.

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

use crate::error::{LoggerError, Result};
use crate::rotation::RotationManager;
use crate::sink::Sink;

/// 로그 작성 명령
enum WriteCommand {
    /// 포매팅이 끝난 한 줄
    Write(String),
    /// 앞선 기록을 모두 쓰고 응답
    Flush(Sender<()>),
    /// 앞선 기록을 모두 쓰고 종료
    Shutdown,
}

/// 작성기 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriterState {
    Running,
    Closing,
    Closed,
}

/// 작성기 통계
#[derive(Debug, Default)]
struct AtomicWriterStats {
    records_written: AtomicU64,
    records_dropped: AtomicU64,
    rotations: AtomicU64,
    write_failures: AtomicU64,
}

/// 작성기 통계 스냅샷
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterStats {
    /// 하나 이상의 대상에 쓰인 기록 수
    pub records_written: u64,
    /// 쓸 수 있는 대상이 없어 버려진 기록 수
    pub records_dropped: u64,
    pub rotations: u64,
    pub write_failures: u64,
}

/// 비동기 로그 작성기
pub struct AsyncLogWriter {
    /// 명령 전송 채널
    sender: Sender<WriteCommand>,
    /// 취소 신호 (설정되면 기록 요청은 무시됨)
    closed: AtomicBool,
    state: Mutex<WriterState>,
    /// 작성기 스레드 핸들 (종료 대기용)
    worker: Mutex<Option<JoinHandle<()>>>,
    stats: Arc<AtomicWriterStats>,
}

impl AsyncLogWriter {
    /// 작성기 스레드 시작
    pub fn spawn(sink: Sink, rotation: RotationManager, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::InvalidQueueCapacity);
        }

        let (sender, receiver) = channel::bounded(capacity);
        let stats = Arc::new(AtomicWriterStats::default());

        let worker = Worker {
            receiver,
            sink,
            rotation,
            stats: stats.clone(),
        };
        let handle = thread::Builder::new()
            .name("log-writer".to_string())
            .spawn(move || worker.run())
            .map_err(LoggerError::SpawnWorker)?;

        debug!(capacity, "로그 작성기 스레드 시작됨");

        Ok(Self {
            sender,
            closed: AtomicBool::new(false),
            state: Mutex::new(WriterState::Running),
            worker: Mutex::new(Some(handle)),
            stats,
        })
    }

    /// 한 줄 기록 요청
    ///
    /// 큐가 가득 차면 자리가 날 때까지 호출 스레드를 막습니다. 종료 요청 뒤에는
    /// 아무 일도 하지 않습니다.
    pub fn enqueue(&self, line: String) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        // 작성기 스레드가 이미 끝났으면 수신자가 없어 실패한다
        let _ = self.sender.send(WriteCommand::Write(line));
    }

    /// 앞서 요청된 기록이 모두 쓰이고 플러시될 때까지 대기
    pub fn flush(&self) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }

        let (ack_tx, ack_rx) = channel::bounded(1);
        if self.sender.send(WriteCommand::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// 작성기 종료
    ///
    /// 이미 큐에 들어간 기록을 모두 쓴 뒤 파일을 닫고 스레드를 회수합니다.
    /// 여러 번 호출해도 안전하며, 동시에 호출한 쪽도 회수가 끝날 때까지 기다립니다.
    pub fn close(&self) {
        let mut worker = self.worker.lock();

        if !self.closed.swap(true, Ordering::AcqRel) {
            *self.state.lock() = WriterState::Closing;
            let _ = self.sender.send(WriteCommand::Shutdown);
        }

        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                error!("로그 작성기 스레드가 비정상 종료됨");
            }
            *self.state.lock() = WriterState::Closed;
            debug!("로그 작성기 종료됨");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn state(&self) -> WriterState {
        *self.state.lock()
    }

    pub fn stats(&self) -> WriterStats {
        WriterStats {
            records_written: self.stats.records_written.load(Ordering::Relaxed),
            records_dropped: self.stats.records_dropped.load(Ordering::Relaxed),
            rotations: self.stats.rotations.load(Ordering::Relaxed),
            write_failures: self.stats.write_failures.load(Ordering::Relaxed),
        }
    }
}

impl Drop for AsyncLogWriter {
    fn drop(&mut self) {
        self.close();
    }
}

/// 작성기 스레드 상태
struct Worker {
    receiver: Receiver<WriteCommand>,
    sink: Sink,
    rotation: RotationManager,
    stats: Arc<AtomicWriterStats>,
}

impl Worker {
    fn run(mut self) {
        while let Ok(command) = self.receiver.recv() {
            match command {
                WriteCommand::Write(line) => {
                    // 새 날짜의 첫 기록은 순환된 새 파일에 들어간다
                    if self.rotation.needs_rotation() {
                        self.sink.flush();
                        if self.rotation.rotate(&mut self.sink) {
                            self.stats.rotations.fetch_add(1, Ordering::Relaxed);
                        }
                    }

                    // 파일을 다시 열지 못한 파일 전용 로거는 대상이 없다
                    let targets = self.sink.target_count();
                    let failed = self.sink.write_line(&line);
                    if failed < targets {
                        self.stats.records_written.fetch_add(1, Ordering::Relaxed);
                    } else {
                        self.stats.records_dropped.fetch_add(1, Ordering::Relaxed);
                    }
                    if failed > 0 {
                        self.stats
                            .write_failures
                            .fetch_add(failed as u64, Ordering::Relaxed);
                    }

                    if self.receiver.is_empty() {
                        self.sink.flush();
                    }
                }
                WriteCommand::Flush(ack) => {
                    self.sink.flush();
                    let _ = ack.send(());
                }
                WriteCommand::Shutdown => break,
            }
        }

        // 종료 명령 뒤에 들어온 기록은 버리고, 플러시 대기자만 깨운다
        for command in self.receiver.try_iter() {
            if let WriteCommand::Flush(ack) = command {
                let _ = ack.send(());
            }
        }

        self.sink.flush();
        if let Some(Err(e)) = self.sink.take_file() {
            error!(error = %e, "종료 시 로그 파일 플러시 실패");
        }
        debug!("로그 작성기 스레드 종료");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::rotation::{create_log_file, dated_path};
    use crate::sink::MemoryConsole;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn start_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 28).expect("valid date")
    }

    fn console_writer(console: &MemoryConsole, capacity: usize) -> AsyncLogWriter {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at_noon(start_day()));
        let sink = Sink::new(None, Some(Box::new(console.clone())));
        AsyncLogWriter::spawn(sink, RotationManager::new(None, clock), capacity).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at_noon(start_day()));
        let result =
            AsyncLogWriter::spawn(Sink::new(None, None), RotationManager::new(None, clock), 0);
        assert!(matches!(result, Err(LoggerError::InvalidQueueCapacity)));
    }

    #[test]
    fn test_records_without_targets_are_dropped() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at_noon(start_day()));
        let writer =
            AsyncLogWriter::spawn(Sink::new(None, None), RotationManager::new(None, clock), 4)
                .unwrap();

        writer.enqueue("nowhere".to_string());
        writer.enqueue("still nowhere".to_string());
        writer.close();

        let stats = writer.stats();
        assert_eq!(stats.records_written, 0);
        assert_eq!(stats.records_dropped, 2);
        assert_eq!(stats.write_failures, 0);
    }

    #[test]
    fn test_records_written_in_order() {
        let console = MemoryConsole::new();
        let writer = console_writer(&console, 8);

        for i in 0..100 {
            writer.enqueue(format!("line {}", i));
        }
        writer.flush();

        let expected: Vec<String> = (0..100).map(|i| format!("line {}", i)).collect();
        assert_eq!(console.lines(), expected);
        assert_eq!(writer.stats().records_written, 100);
        writer.close();
    }

    #[test]
    fn test_close_drains_queue() {
        let console = MemoryConsole::new();
        let writer = console_writer(&console, 1000);

        for i in 0..500 {
            writer.enqueue(format!("queued {}", i));
        }
        writer.close();

        assert_eq!(writer.state(), WriterState::Closed);
        let lines = console.lines();
        assert_eq!(lines.len(), 500);
        assert_eq!(lines.first().map(String::as_str), Some("queued 0"));
        assert_eq!(lines.last().map(String::as_str), Some("queued 499"));
    }

    #[test]
    fn test_enqueue_after_close_is_noop() {
        let console = MemoryConsole::new();
        let writer = console_writer(&console, 4);

        writer.enqueue("before".to_string());
        writer.close();
        writer.enqueue("after".to_string());
        writer.flush();
        writer.close();

        assert!(writer.is_closed());
        assert_eq!(console.lines(), vec!["before"]);
    }

    #[test]
    fn test_full_queue_applies_backpressure() {
        let console = MemoryConsole::new();
        let writer = Arc::new(console_writer(&console, 1));

        let producers: Vec<_> = (0..4)
            .map(|p| {
                let writer = writer.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        writer.enqueue(format!("p{} {}", p, i));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }
        writer.flush();

        let lines = console.lines();
        assert_eq!(lines.len(), 1000);
        for p in 0..4 {
            let prefix = format!("p{} ", p);
            let seq: Vec<usize> = lines
                .iter()
                .filter_map(|l| l.strip_prefix(&prefix))
                .map(|n| n.parse().unwrap())
                .collect();
            assert_eq!(seq, (0..250).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_rotates_once_per_day_boundary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("svc.log");
        let clock = Arc::new(ManualClock::at_noon(start_day()));

        let sink = Sink::new(Some(create_log_file(&path).unwrap()), None);
        let rotation = RotationManager::new(Some(path.clone()), clock.clone());
        let writer = AsyncLogWriter::spawn(sink, rotation, 16).unwrap();

        writer.enqueue("day one a".to_string());
        writer.enqueue("day one b".to_string());
        writer.flush();
        assert_eq!(writer.stats().rotations, 0);

        clock.advance_days(1);
        for i in 0..5 {
            writer.enqueue(format!("day two {}", i));
        }
        writer.close();

        assert_eq!(writer.stats().rotations, 1);
        let rotated = dated_path(&path, start_day());
        assert_eq!(fs::read_to_string(&rotated).unwrap(), "day one a\nday one b\n");
        let current = fs::read_to_string(&path).unwrap();
        assert_eq!(current.lines().count(), 5);
        assert!(current.starts_with("day two 0\n"));
    }
}
