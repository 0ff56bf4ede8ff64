use crate::params::{AesKeySize, ParameterTable, SecurityLevel};
use crate::trial::MIN_ITERATIONS;

/// SHA-256 摘要长度（字节），决定 OAEP 的最大明文长度
const SHA256_LEN: usize = 32;

/// 基准测试配置
///
/// 进程内固定不变，构造 `BenchmarkSuite` 时传入。
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// 每批试验的次数（第一次只用于预热）
    pub iterations: usize,
    /// 随机明文大小（字节），用于对称加密和签名
    pub plaintext_size: usize,
    /// RSA 加密使用的随机消息大小（字节）
    pub rsa_message_size: usize,
    /// 扫描的安全级别，必须严格升序
    pub security_levels: Vec<SecurityLevel>,
    /// 扫描的 AES 密钥长度
    pub aes_key_sizes: Vec<AesKeySize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            plaintext_size: 10 * 1024,
            rsa_message_size: 8, // RSA 只能加密小于模数的数据
            security_levels: SecurityLevel::ALL.to_vec(),
            aes_key_sizes: AesKeySize::ALL.to_vec(),
        }
    }
}

impl BenchConfig {
    /// 只扫描给定安全级别的配置，其余字段取默认值
    pub fn with_levels(levels: &[SecurityLevel]) -> Self {
        Self {
            security_levels: levels.to_vec(),
            ..Self::default()
        }
    }

    /// 验证配置的合理性
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.iterations < MIN_ITERATIONS {
            errors.push(format!(
                "试验次数必须至少为{}（一次预热加至少一次计入平均），当前值: {}",
                MIN_ITERATIONS, self.iterations
            ));
        }

        if self.plaintext_size == 0 {
            errors.push("明文大小必须大于0".to_string());
        }

        if self.security_levels.is_empty() {
            errors.push("至少需要一个安全级别".to_string());
        }
        if !self.security_levels.windows(2).all(|w| w[0] < w[1]) {
            errors.push(format!("安全级别必须严格升序且不重复，当前值: {:?}", self.security_levels));
        }

        if self.aes_key_sizes.is_empty() {
            errors.push("至少需要一个AES密钥长度".to_string());
        }

        // OAEP(SHA-256) 最多加密 k - 2*hLen - 2 字节，k 取最小的模数
        if self.rsa_message_size == 0 {
            errors.push("RSA消息大小必须大于0".to_string());
        } else if let Some(level) = self.security_levels.iter().min() {
            let modulus_bytes = ParameterTable::rsa_modulus_bits(*level) as usize / 8;
            let max_message = modulus_bytes - 2 * SHA256_LEN - 2;
            if self.rsa_message_size > max_message {
                errors.push(format!(
                    "RSA消息过大: {}字节，安全级别{}的RSA-OAEP最多{}字节",
                    self.rsa_message_size, level, max_message
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BenchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.iterations, 10);
        assert_eq!(config.plaintext_size, 10240);
        assert_eq!(config.rsa_message_size, 8);
        assert_eq!(config.security_levels.len(), 5);
    }

    #[test]
    fn test_invalid_iterations() {
        let config = BenchConfig {
            iterations: 1,
            ..BenchConfig::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("试验次数"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = BenchConfig {
            iterations: 0,
            plaintext_size: 0,
            rsa_message_size: 0,
            security_levels: vec![SecurityLevel::Bits128, SecurityLevel::Bits80],
            aes_key_sizes: Vec::new(),
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_rsa_message_limit_uses_smallest_level() {
        // RSA-1024: 128 - 64 - 2 = 62
        let mut config = BenchConfig::default();
        config.rsa_message_size = 62;
        assert!(config.validate().is_ok());
        config.rsa_message_size = 63;
        assert!(config.validate().is_err());

        let mut config = BenchConfig::with_levels(&[SecurityLevel::Bits112]);
        config.rsa_message_size = 63;
        assert!(config.validate().is_ok());
    }
}
