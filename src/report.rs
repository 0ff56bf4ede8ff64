//! 报告格式
//!
//! 每个（阶段，安全级别/密钥长度）输出一行；DSA 不适用时输出 `N/A`。

use std::fmt;
use std::io::Write;

use crate::params::{AesKeySize, SecurityLevel};
use crate::trial::TrialResult;
use crate::types::{OperationKind, Phase};

/// 不适用的占位符
pub const NOT_APPLICABLE: &str = "N/A";

/// 全部完成后的结束行
pub const FOOTER: &str = "=== ALL BENCHMARKS COMPLETE ===";

/// 带单位的平均值，保留两位小数
pub struct Average<'a>(pub &'a TrialResult);

impl fmt::Display for Average<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.0.value, self.0.unit.symbol())
    }
}

/// 可能不适用的平均值
pub struct MaybeAverage<'a>(pub Option<&'a TrialResult>);

impl fmt::Display for MaybeAverage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(result) => fmt::Display::fmt(&Average(result), f),
            None => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// 写出分节标题，第一节之前不空行
pub fn write_header<W: Write>(out: &mut W, phase: Phase) -> std::io::Result<()> {
    if phase != Phase::KeyGeneration {
        writeln!(out)?;
    }
    writeln!(out, "=== {} ===", phase.title())
}

/// 密钥生成结果
#[derive(Debug, Clone, PartialEq)]
pub struct KeygenRow {
    pub level: SecurityLevel,
    pub rsa: TrialResult,
    pub dsa: Option<TrialResult>,
    pub ec: TrialResult,
}

impl fmt::Display for KeygenRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Security {} bits -> RSA: {}, DSA: {}, ECC: {}",
            self.level,
            Average(&self.rsa),
            MaybeAverage(self.dsa.as_ref()),
            Average(&self.ec)
        )
    }
}

/// AES 加解密结果
#[derive(Debug, Clone, PartialEq)]
pub struct AesRow {
    pub key_size: AesKeySize,
    pub encrypt: TrialResult,
    pub decrypt: TrialResult,
}

impl fmt::Display for AesRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} encrypt: {}, decrypt: {}",
            self.key_size,
            Average(&self.encrypt),
            Average(&self.decrypt)
        )
    }
}

/// ChaCha20 加密结果
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRow {
    pub encrypt: TrialResult,
}

impl fmt::Display for StreamRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChaCha20 encrypt: {}", Average(&self.encrypt))
    }
}

/// 对称加密阶段的全部结果
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricReport {
    pub aes: Vec<AesRow>,
    pub chacha20: StreamRow,
}

/// RSA 加解密结果
#[derive(Debug, Clone, PartialEq)]
pub struct AsymmetricRow {
    pub level: SecurityLevel,
    pub encrypt: TrialResult,
    pub decrypt: TrialResult,
}

impl fmt::Display for AsymmetricRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RSA Security {} -> Enc: {}, Dec: {}",
            self.level,
            Average(&self.encrypt),
            Average(&self.decrypt)
        )
    }
}

/// 签名或验签结果
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureRow {
    pub level: SecurityLevel,
    /// `Sign` 或 `Verify`
    pub operation: OperationKind,
    pub rsa: TrialResult,
    pub dsa: Option<TrialResult>,
    pub ec: TrialResult,
}

impl fmt::Display for SignatureRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.operation;
        write!(
            f,
            "Security {} -> RSA {op}: {}, DSA {op}: {}, ECC {op}: {}",
            self.level,
            Average(&self.rsa),
            MaybeAverage(self.dsa.as_ref()),
            Average(&self.ec)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimeUnit;
    use std::time::Duration;

    fn result(micros: u64, unit: TimeUnit) -> TrialResult {
        let mean = Duration::from_micros(micros);
        TrialResult {
            mean,
            unit,
            value: unit.convert(mean),
            samples: 9,
        }
    }

    #[test]
    fn test_keygen_row_with_absent_dsa() {
        let row = KeygenRow {
            level: SecurityLevel::Bits256,
            rsa: result(1_234_567, TimeUnit::Milliseconds),
            dsa: None,
            ec: result(450, TimeUnit::Milliseconds),
        };
        assert_eq!(
            row.to_string(),
            "Security 256 bits -> RSA: 1234.57 ms, DSA: N/A, ECC: 0.45 ms"
        );
    }

    #[test]
    fn test_signature_row() {
        let row = SignatureRow {
            level: SecurityLevel::Bits80,
            operation: OperationKind::Verify,
            rsa: result(100, TimeUnit::Milliseconds),
            dsa: Some(result(200, TimeUnit::Milliseconds)),
            ec: result(300, TimeUnit::Milliseconds),
        };
        assert_eq!(
            row.to_string(),
            "Security 80 -> RSA verify: 0.10 ms, DSA verify: 0.20 ms, ECC verify: 0.30 ms"
        );
    }

    #[test]
    fn test_symmetric_rows() {
        let aes = AesRow {
            key_size: AesKeySize::Aes128,
            encrypt: result(12, TimeUnit::Microseconds),
            decrypt: result(11, TimeUnit::Microseconds),
        };
        assert_eq!(aes.to_string(), "AES-128 encrypt: 12.00 µs, decrypt: 11.00 µs");
        let stream = StreamRow {
            encrypt: result(7, TimeUnit::Microseconds),
        };
        assert_eq!(stream.to_string(), "ChaCha20 encrypt: 7.00 µs");
    }

    #[test]
    fn test_headers() {
        let mut out = Vec::new();
        write_header(&mut out, Phase::KeyGeneration).unwrap();
        write_header(&mut out, Phase::AsymmetricCipher).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "=== KEY GENERATION ===\n\n=== RSA ENCRYPTION / DECRYPTION ===\n"
        );
    }
}
