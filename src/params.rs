//! 安全级别参数表
//!
//! 将抽象的安全级别（比特）映射到各算法族的具体参数：
//! RSA 模数长度、DSA 模数长度（高安全级别下不适用）以及椭圆曲线。

use std::fmt;

/// 安全级别（估计的暴力破解强度，单位：比特）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityLevel {
    Bits80,
    Bits112,
    Bits128,
    Bits192,
    Bits256,
}

impl SecurityLevel {
    /// 完整的扫描顺序（升序）
    pub const ALL: [SecurityLevel; 5] = [
        SecurityLevel::Bits80,
        SecurityLevel::Bits112,
        SecurityLevel::Bits128,
        SecurityLevel::Bits192,
        SecurityLevel::Bits256,
    ];

    /// 安全级别的比特数，用作报告标签
    pub fn bits(self) -> u16 {
        match self {
            SecurityLevel::Bits80 => 80,
            SecurityLevel::Bits112 => 112,
            SecurityLevel::Bits128 => 128,
            SecurityLevel::Bits192 => 192,
            SecurityLevel::Bits256 => 256,
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// 按安全级别取参数的非对称算法族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    Rsa,
    Dsa,
    Ec,
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmFamily::Rsa => "RSA",
            AlgorithmFamily::Dsa => "DSA",
            AlgorithmFamily::Ec => "ECC",
        };
        f.write_str(name)
    }
}

/// NIST 素数域曲线（SEC 2 命名）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    Secp192r1,
    Secp224r1,
    Secp256r1,
    Secp384r1,
    Secp521r1,
}

impl EcCurve {
    pub fn name(self) -> &'static str {
        match self {
            EcCurve::Secp192r1 => "secp192r1",
            EcCurve::Secp224r1 => "secp224r1",
            EcCurve::Secp256r1 => "secp256r1",
            EcCurve::Secp384r1 => "secp384r1",
            EcCurve::Secp521r1 => "secp521r1",
        }
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 某个（安全级别，算法族）对应的具体参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmParameter {
    /// 模数长度（比特），用于 RSA 和 DSA
    KeySize(u32),
    /// 命名曲线，用于 EC
    Curve(EcCurve),
}

impl fmt::Display for AlgorithmParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmParameter::KeySize(bits) => write!(f, "{}", bits),
            AlgorithmParameter::Curve(curve) => write!(f, "{}", curve),
        }
    }
}

/// AES 密钥长度（与安全级别无关，单独扫描）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AesKeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl AesKeySize {
    pub const ALL: [AesKeySize; 3] = [AesKeySize::Aes128, AesKeySize::Aes192, AesKeySize::Aes256];

    pub fn bits(self) -> u16 {
        match self {
            AesKeySize::Aes128 => 128,
            AesKeySize::Aes192 => 192,
            AesKeySize::Aes256 => 256,
        }
    }

    /// 密钥字节数
    pub fn key_len(self) -> usize {
        usize::from(self.bits()) / 8
    }
}

impl fmt::Display for AesKeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.bits())
    }
}

/// 静态参数表
///
/// 定义域是封闭的枚举，所以查询是全函数：RSA 和 EC 在每个级别都有定义，
/// DSA 在 192/256 级别没有标准化的参数集，返回 `None` 作为跳过信号。
pub struct ParameterTable;

impl ParameterTable {
    /// 查询参数
    pub fn lookup(level: SecurityLevel, family: AlgorithmFamily) -> Option<AlgorithmParameter> {
        match family {
            AlgorithmFamily::Rsa => Some(AlgorithmParameter::KeySize(Self::rsa_modulus_bits(level))),
            AlgorithmFamily::Dsa => Self::dsa_modulus_bits(level).map(AlgorithmParameter::KeySize),
            AlgorithmFamily::Ec => Some(AlgorithmParameter::Curve(Self::ec_curve(level))),
        }
    }

    /// RSA 模数长度（比特）
    pub fn rsa_modulus_bits(level: SecurityLevel) -> u32 {
        match level {
            SecurityLevel::Bits80 => 1024,
            SecurityLevel::Bits112 => 2048,
            SecurityLevel::Bits128 => 3072,
            SecurityLevel::Bits192 => 7680,
            SecurityLevel::Bits256 => 15360,
        }
    }

    /// DSA 模数长度（比特），192/256 级别不适用
    pub fn dsa_modulus_bits(level: SecurityLevel) -> Option<u32> {
        match level {
            SecurityLevel::Bits80 => Some(1024),
            SecurityLevel::Bits112 => Some(2048),
            SecurityLevel::Bits128 => Some(3072),
            SecurityLevel::Bits192 | SecurityLevel::Bits256 => None,
        }
    }

    /// 椭圆曲线
    pub fn ec_curve(level: SecurityLevel) -> EcCurve {
        match level {
            SecurityLevel::Bits80 => EcCurve::Secp192r1,
            SecurityLevel::Bits112 => EcCurve::Secp224r1,
            SecurityLevel::Bits128 => EcCurve::Secp256r1,
            SecurityLevel::Bits192 => EcCurve::Secp384r1,
            SecurityLevel::Bits256 => EcCurve::Secp521r1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_total_except_high_dsa() {
        let families = [AlgorithmFamily::Rsa, AlgorithmFamily::Dsa, AlgorithmFamily::Ec];
        for level in SecurityLevel::ALL {
            for family in families {
                let absent = family == AlgorithmFamily::Dsa
                    && matches!(level, SecurityLevel::Bits192 | SecurityLevel::Bits256);
                assert_eq!(
                    ParameterTable::lookup(level, family).is_none(),
                    absent,
                    "{} @ {}",
                    family,
                    level
                );
            }
        }
    }

    #[test]
    fn test_lookup_values() {
        assert_eq!(
            ParameterTable::lookup(SecurityLevel::Bits128, AlgorithmFamily::Rsa),
            Some(AlgorithmParameter::KeySize(3072))
        );
        assert_eq!(
            ParameterTable::lookup(SecurityLevel::Bits128, AlgorithmFamily::Dsa),
            Some(AlgorithmParameter::KeySize(3072))
        );
        assert_eq!(
            ParameterTable::lookup(SecurityLevel::Bits256, AlgorithmFamily::Ec),
            Some(AlgorithmParameter::Curve(EcCurve::Secp521r1))
        );
        assert_eq!(ParameterTable::rsa_modulus_bits(SecurityLevel::Bits256), 15360);
        assert_eq!(ParameterTable::ec_curve(SecurityLevel::Bits128).name(), "secp256r1");
    }

    #[test]
    fn test_sweep_is_ascending() {
        let bits: Vec<u16> = SecurityLevel::ALL.iter().map(|l| l.bits()).collect();
        assert_eq!(bits, vec![80, 112, 128, 192, 256]);
        assert!(SecurityLevel::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_aes_key_len() {
        let lens: Vec<usize> = AesKeySize::ALL.iter().map(|k| k.key_len()).collect();
        assert_eq!(lens, vec![16, 24, 32]);
        assert_eq!(AesKeySize::Aes192.to_string(), "AES-192");
    }
}
