//! 计时器
//!
//! 包装单调时钟，测量单次操作调用的耗时。

use std::hint::black_box;
use std::time::{Duration, Instant};

/// 时钟抽象，生产环境使用单调时钟，测试中可以注入脚本化的时钟
pub trait Clock {
    type Instant: Copy;

    fn now(&self) -> Self::Instant;

    fn elapsed(&self, start: Self::Instant) -> Duration;
}

/// 基于 `std::time::Instant` 的单调时钟，不受系统时间调整影响
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, start: Instant) -> Duration {
        start.elapsed()
    }
}

/// 报告单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Milliseconds,
    Microseconds,
}

impl TimeUnit {
    /// 把耗时换算成该单位下的数值
    pub fn convert(self, duration: Duration) -> f64 {
        match self {
            TimeUnit::Milliseconds => duration.as_secs_f64() * 1_000.0,
            TimeUnit::Microseconds => duration.as_secs_f64() * 1_000_000.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "µs",
        }
    }
}

/// 计时器
#[derive(Debug, Clone, Default)]
pub struct Timer<C = MonotonicClock> {
    clock: C,
}

impl Timer<MonotonicClock> {
    pub fn monotonic() -> Self {
        Self { clock: MonotonicClock }
    }
}

impl<C: Clock> Timer<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// 调用 `operation` 并返回其结果和耗时
    pub fn measure<T>(&self, operation: impl FnOnce() -> T) -> (T, Duration) {
        let start = self.clock.now();
        let output = black_box(operation());
        let elapsed = self.clock.elapsed(start);
        (output, elapsed)
    }
}
