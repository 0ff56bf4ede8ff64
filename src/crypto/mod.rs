//! 加密模块 - 外部密码库的薄封装
//!
//! 本模块不实现任何密码算法，只把外部库的原语整理成类型化的接口，
//! 使基准测试的各阶段只剩下简短的调用点：
//! 1. 对称加密（AES-ECB、ChaCha20），基于 RustCrypto
//! 2. 非对称加密（RSA-OAEP）、签名与验签（RSA-PSS、DSA、ECDSA），基于 OpenSSL
//! 3. 硬件加速检测

pub mod asymmetric;
pub mod hardware;
pub mod symmetric;

pub use asymmetric::*;
pub use hardware::*;
pub use symmetric::*;

use openssl::error::ErrorStack;
use rand::RngCore;

use crate::params::{AlgorithmFamily, AlgorithmParameter};

/// 生成随机字节（明文、对称密钥、nonce）
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

/// 密码库错误
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("OpenSSL 调用失败: {0}")]
    OpenSsl(#[from] ErrorStack),

    #[error("密钥长度无效: {actual} 字节")]
    InvalidKeyLength { actual: usize },

    #[error("nonce 长度无效: 需要 {expected} 字节, 实际 {actual} 字节")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("数据长度 {len} 不是分组大小 {block} 的整数倍")]
    UnalignedBuffer { len: usize, block: usize },

    #[error("密钥流已耗尽")]
    KeystreamExhausted,

    #[error("{family} 不接受参数 {parameter}")]
    ParameterMismatch {
        family: AlgorithmFamily,
        parameter: AlgorithmParameter,
    },

    #[error("{family} 不支持该操作: {operation}")]
    UnsupportedOperation {
        family: AlgorithmFamily,
        operation: &'static str,
    },

    #[error("签名验证失败")]
    SignatureRejected,
}
