//! 错误类型
//!
//! 本工具是诊断程序而不是服务：没有可恢复的错误路径，
//! 任何错误都会终止整个运行并给出出错的阶段、对象、算法和操作。

use crate::crypto::CryptoError;
use crate::types::OperationContext;

/// 基准测试错误
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// 配置错误，在任何计时开始之前报告
    #[error("配置错误: {0}")]
    Configuration(String),

    /// 外部密码库拒绝了某个操作
    #[error("{context} 失败: {source}")]
    CryptoOperation {
        context: OperationContext,
        #[source]
        source: CryptoError,
    },

    /// 刚生成的签名验证失败
    #[error("完整性错误: {context} 拒绝了刚生成的签名")]
    Integrity { context: OperationContext },

    #[error("写出报告失败: {0}")]
    Output(#[from] std::io::Error),
}

impl BenchError {
    /// 为密码库错误附加上下文；签名被拒绝时归类为完整性错误
    pub fn from_crypto(context: OperationContext, source: CryptoError) -> Self {
        match source {
            CryptoError::SignatureRejected => BenchError::Integrity { context },
            source => BenchError::CryptoOperation { context, source },
        }
    }

    /// 出错操作的上下文（配置和输出错误没有）
    pub fn context(&self) -> Option<&OperationContext> {
        match self {
            BenchError::CryptoOperation { context, .. } | BenchError::Integrity { context } => Some(context),
            BenchError::Configuration(_) | BenchError::Output(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SecurityLevel;
    use crate::types::{OperationKind, Phase, Subject};

    fn context() -> OperationContext {
        OperationContext::new(
            Phase::Verification,
            Subject::Level(SecurityLevel::Bits112),
            "RSA-2048",
            OperationKind::Verify,
        )
    }

    #[test]
    fn test_rejected_signature_is_integrity_error() {
        let err = BenchError::from_crypto(context(), CryptoError::SignatureRejected);
        assert!(matches!(err, BenchError::Integrity { .. }));
        let message = err.to_string();
        assert!(message.contains("验签"));
        assert!(message.contains("112"));
        assert!(message.contains("RSA-2048"));
        assert!(message.contains("verify"));
    }

    #[test]
    fn test_other_crypto_errors_keep_source() {
        let err = BenchError::from_crypto(context(), CryptoError::UnalignedBuffer { len: 15, block: 16 });
        assert!(matches!(err, BenchError::CryptoOperation { .. }));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.context(), Some(&context()));
    }
}
