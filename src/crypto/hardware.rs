//! 硬件加速检测模块
//!
//! 检测 CPU 的 AES-NI、AVX2 等特性。对称加密的耗时在有无 AES-NI 时
//! 相差一个数量级，运行开始时记录下来便于解读结果。

use std::fmt;

/// 硬件信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardwareInfo {
    pub has_aes_ni: bool,
    pub has_avx2: bool,
    pub has_avx512: bool,
}

impl HardwareInfo {
    /// 检测当前 CPU
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self {
                has_aes_ni: is_x86_feature_detected!("aes"),
                has_avx2: is_x86_feature_detected!("avx2"),
                has_avx512: is_x86_feature_detected!("avx512f"),
            }
        }

        #[cfg(not(target_arch = "x86_64"))]
        {
            Self::default()
        }
    }
}

impl fmt::Display for HardwareInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |on: bool| if on { "是" } else { "否" };
        write!(
            f,
            "AES-NI: {}, AVX2: {}, AVX-512: {}",
            flag(self.has_aes_ni),
            flag(self.has_avx2),
            flag(self.has_avx512)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(HardwareInfo::detect(), HardwareInfo::detect());
        assert!(HardwareInfo::default().to_string().contains("AES-NI: 否"));
    }
}
