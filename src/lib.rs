//! cryptobench 库模块
//!
//! 密码学微基准测试：按安全级别（80/112/128/192/256 比特）测量密钥生成、
//! 对称加解密、非对称加解密、签名和验签的耗时，丢弃每批第一个样本后取平均。

pub mod config;
pub mod crypto;
pub mod error;
pub mod params;
pub mod report;
pub mod suite;
pub mod timing;
pub mod trial;
pub mod types;

// 重新导出常用类型
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use params::{AesKeySize, AlgorithmFamily, AlgorithmParameter, EcCurve, ParameterTable, SecurityLevel};
pub use suite::BenchmarkSuite;
pub use timing::{Clock, MonotonicClock, TimeUnit, Timer};
pub use trial::{discard_first_mean, TrialResult, TrialRunner};
pub use types::{OperationContext, OperationKind, Phase, Subject};
