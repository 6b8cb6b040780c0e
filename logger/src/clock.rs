//! 벽시계 추상화
//!
//! 타임스탬프와 날짜 경계 판단은 모두 이 트레이트를 통해 현재 시각을 얻습니다.
//! 운영 환경에서는 [`SystemClock`], 테스트에서는 [`ManualClock`]으로 날짜를
//! 직접 넘길 수 있습니다.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use parking_lot::Mutex;

/// 현재 로컬 시각 제공자
pub trait Clock: Send + Sync {
    /// 현재 로컬 벽시계 시각
    fn now(&self) -> NaiveDateTime;

    /// 현재 로컬 날짜
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// 시스템 로컬 시간대 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// 수동으로 조작하는 시계 (테스트용)
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// 지정한 날짜의 정오로 시작하는 시계
    pub fn at_noon(date: NaiveDate) -> Self {
        Self::new(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}
