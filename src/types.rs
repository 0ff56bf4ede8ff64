use std::fmt;

use crate::params::{AesKeySize, SecurityLevel};

/// 基准测试阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    KeyGeneration,
    SymmetricCipher,
    AsymmetricCipher,
    Signing,
    Verification,
}

impl Phase {
    /// 报告中的分节标题
    pub fn title(self) -> &'static str {
        match self {
            Phase::KeyGeneration => "KEY GENERATION",
            Phase::SymmetricCipher => "SYMMETRIC ENCRYPTION (µs)",
            Phase::AsymmetricCipher => "RSA ENCRYPTION / DECRYPTION",
            Phase::Signing => "DIGITAL SIGNING (RSA, DSA, ECC)",
            Phase::Verification => "SIGNATURE VERIFICATION (RSA, DSA, ECC)",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::KeyGeneration => "密钥生成",
            Phase::SymmetricCipher => "对称加密",
            Phase::AsymmetricCipher => "非对称加密",
            Phase::Signing => "签名",
            Phase::Verification => "验签",
        };
        f.write_str(name)
    }
}

/// 被计时的操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Keygen,
    Encrypt,
    Decrypt,
    Sign,
    Verify,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Keygen => "keygen",
            OperationKind::Encrypt => "encrypt",
            OperationKind::Decrypt => "decrypt",
            OperationKind::Sign => "sign",
            OperationKind::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// 一次测量的对象：非对称阶段按安全级别，对称阶段按密钥长度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Level(SecurityLevel),
    Aes(AesKeySize),
    Stream,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Level(level) => write!(f, "安全级别 {}", level),
            Subject::Aes(key_size) => write!(f, "{}", key_size),
            Subject::Stream => f.write_str("ChaCha20"),
        }
    }
}

/// 出错操作的上下文，用于诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    pub phase: Phase,
    pub subject: Subject,
    pub algorithm: String,
    pub operation: OperationKind,
}

impl OperationContext {
    pub fn new(phase: Phase, subject: Subject, algorithm: impl Into<String>, operation: OperationKind) -> Self {
        Self {
            phase,
            subject,
            algorithm: algorithm.into(),
            operation,
        }
    }
}

impl fmt::Display for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}阶段] {} / {} / {}",
            self.phase, self.subject, self.algorithm, self.operation
        )
    }
}
