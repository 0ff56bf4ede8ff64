//! 重复试验与取平均
//!
//! 同一个操作顺序执行 N 次，丢弃第一个样本（包含库的延迟初始化、
//! 缓存预热等一次性开销），对其余 N-1 个样本取算术平均。

use std::time::Duration;

use crate::error::{BenchError, Result};
use crate::timing::{Clock, MonotonicClock, TimeUnit, Timer};

/// 最少试验次数：一次预热加至少一次计入平均
pub const MIN_ITERATIONS: usize = 2;

/// 一批试验的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    /// 第 2..N 个样本的平均耗时
    pub mean: Duration,
    /// 报告单位
    pub unit: TimeUnit,
    /// `mean` 按 `unit` 换算后的数值
    pub value: f64,
    /// 计入平均的样本数
    pub samples: usize,
}

impl TrialResult {
    fn new(mean: Duration, unit: TimeUnit, samples: usize) -> Self {
        Self {
            mean,
            unit,
            value: unit.convert(mean),
            samples,
        }
    }
}

/// 丢弃第一个样本后求平均，样本少于两个时返回 `None`
pub fn discard_first_mean(samples: &[Duration]) -> Option<Duration> {
    let kept = samples.get(1..).filter(|kept| !kept.is_empty())?;
    let total: Duration = kept.iter().sum();
    Some(total / kept.len() as u32)
}

/// 试验执行器
#[derive(Debug, Clone)]
pub struct TrialRunner<C = MonotonicClock> {
    timer: Timer<C>,
    iterations: usize,
}

impl TrialRunner<MonotonicClock> {
    pub fn monotonic(iterations: usize) -> Result<Self> {
        Self::new(Timer::monotonic(), iterations)
    }
}

impl<C: Clock> TrialRunner<C> {
    /// 创建执行器；试验次数少于 2 是配置错误
    pub fn new(timer: Timer<C>, iterations: usize) -> Result<Self> {
        if iterations < MIN_ITERATIONS {
            return Err(BenchError::Configuration(format!(
                "试验次数必须至少为 {}，当前值: {}",
                MIN_ITERATIONS, iterations
            )));
        }
        Ok(Self { timer, iterations })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// 计时执行 `operation` N 次；第一个错误会中止本批试验并原样返回
    pub fn run<T, E, F>(&self, unit: TimeUnit, mut operation: F) -> std::result::Result<TrialResult, E>
    where
        F: FnMut() -> std::result::Result<T, E>,
    {
        self.run_batched(unit, || Ok(()), |()| operation())
    }

    /// 每次试验先执行不计时的 `setup` 准备输入，再计时执行 `routine`
    pub fn run_batched<S, T, E, Setup, Routine>(
        &self,
        unit: TimeUnit,
        mut setup: Setup,
        mut routine: Routine,
    ) -> std::result::Result<TrialResult, E>
    where
        Setup: FnMut() -> std::result::Result<S, E>,
        Routine: FnMut(S) -> std::result::Result<T, E>,
    {
        let mut samples = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let input = setup()?;
            let (output, elapsed) = self.timer.measure(|| routine(input));
            output?;
            samples.push(elapsed);
        }

        // iterations >= 2 在构造时已保证
        let mean = discard_first_mean(&samples).unwrap_or_default();
        Ok(TrialResult::new(mean, unit, samples.len() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|&v| Duration::from_millis(v)).collect()
    }

    #[test]
    fn test_discard_first_mean() {
        assert_eq!(discard_first_mean(&ms(&[10, 20, 30, 40])), Some(Duration::from_millis(30)));
        assert_eq!(discard_first_mean(&ms(&[1000, 4])), Some(Duration::from_millis(4)));
        assert_eq!(discard_first_mean(&ms(&[10])), None);
        assert_eq!(discard_first_mean(&[]), None);
    }

    #[test]
    fn test_rejects_too_few_iterations() {
        for iterations in [0, 1] {
            let err = TrialRunner::monotonic(iterations).unwrap_err();
            assert!(matches!(err, BenchError::Configuration(_)));
        }
        assert!(TrialRunner::monotonic(2).is_ok());
    }

    #[test]
    fn test_error_aborts_batch() {
        let runner = TrialRunner::monotonic(5).unwrap();
        let mut calls = 0;
        let result = runner.run(TimeUnit::Microseconds, || {
            calls += 1;
            if calls == 3 {
                Err("boom")
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_result_unit_and_sample_count() {
        let runner = TrialRunner::monotonic(4).unwrap();
        let result = runner
            .run(TimeUnit::Milliseconds, || {
                std::thread::sleep(Duration::from_millis(1));
                Ok::<_, ()>(())
            })
            .unwrap();
        assert_eq!(result.unit, TimeUnit::Milliseconds);
        assert_eq!(result.samples, 3);
        assert!(result.value >= 1.0);
    }
}
