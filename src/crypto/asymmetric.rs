//! 非对称加密封装（OpenSSL）
//!
//! 提供 RSA/DSA/EC 密钥生成、RSA-OAEP(SHA-256) 加解密，
//! 以及 RSA-PSS(SHA-256, 最大盐长)、DSA-SHA-256、ECDSA-SHA-256 签名与验签。

use openssl::bn::BigNum;
use openssl::dsa::Dsa;
use openssl::ec::{EcGroup, EcKey};
use openssl::encrypt::{Decrypter, Encrypter};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private, Public};
use openssl::rsa::{Padding, Rsa};
use openssl::sign::{RsaPssSaltlen, Signer, Verifier};

use super::CryptoError;
use crate::params::{AlgorithmFamily, AlgorithmParameter, EcCurve};

/// RSA 公钥指数
pub const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// 曲线对应的 OpenSSL NID
pub fn curve_nid(curve: EcCurve) -> Nid {
    match curve {
        EcCurve::Secp192r1 => Nid::X9_62_PRIME192V1,
        EcCurve::Secp224r1 => Nid::SECP224R1,
        EcCurve::Secp256r1 => Nid::X9_62_PRIME256V1,
        EcCurve::Secp384r1 => Nid::SECP384R1,
        EcCurve::Secp521r1 => Nid::SECP521R1,
    }
}

/// 生成私钥（密钥生成阶段计时的就是这一步）
///
/// DSA 每次都会重新生成域参数，与只给出模数长度的调用方式一致。
pub fn generate_private_key(
    family: AlgorithmFamily,
    parameter: AlgorithmParameter,
) -> Result<PKey<Private>, CryptoError> {
    match (family, parameter) {
        (AlgorithmFamily::Rsa, AlgorithmParameter::KeySize(bits)) => {
            let exponent = BigNum::from_u32(RSA_PUBLIC_EXPONENT)?;
            let rsa = Rsa::generate_with_e(bits, &exponent)?;
            Ok(PKey::from_rsa(rsa)?)
        }
        (AlgorithmFamily::Dsa, AlgorithmParameter::KeySize(bits)) => Ok(PKey::from_dsa(Dsa::generate(bits)?)?),
        (AlgorithmFamily::Ec, AlgorithmParameter::Curve(curve)) => {
            let group = EcGroup::from_curve_name(curve_nid(curve))?;
            Ok(PKey::from_ec_key(EcKey::generate(&group)?)?)
        }
        (family, parameter) => Err(CryptoError::ParameterMismatch { family, parameter }),
    }
}

fn oaep_sha256_encrypter(public: &PKey<Public>) -> Result<Encrypter<'_>, CryptoError> {
    let mut encrypter = Encrypter::new(public)?;
    encrypter.set_rsa_padding(Padding::PKCS1_OAEP)?;
    encrypter.set_rsa_oaep_md(MessageDigest::sha256())?;
    encrypter.set_rsa_mgf1_md(MessageDigest::sha256())?;
    Ok(encrypter)
}

fn oaep_sha256_decrypter(private: &PKey<Private>) -> Result<Decrypter<'_>, CryptoError> {
    let mut decrypter = Decrypter::new(private)?;
    decrypter.set_rsa_padding(Padding::PKCS1_OAEP)?;
    decrypter.set_rsa_oaep_md(MessageDigest::sha256())?;
    decrypter.set_rsa_mgf1_md(MessageDigest::sha256())?;
    Ok(decrypter)
}

/// 非对称密钥对
pub struct KeyPair {
    family: AlgorithmFamily,
    parameter: AlgorithmParameter,
    private: PKey<Private>,
    public: PKey<Public>,
}

impl KeyPair {
    /// 生成新的密钥对
    pub fn generate(family: AlgorithmFamily, parameter: AlgorithmParameter) -> Result<Self, CryptoError> {
        let private = generate_private_key(family, parameter)?;
        Self::from_private(family, parameter, private)
    }

    /// 从私钥导出只含公钥的句柄，验签和加密只使用公钥
    pub fn from_private(
        family: AlgorithmFamily,
        parameter: AlgorithmParameter,
        private: PKey<Private>,
    ) -> Result<Self, CryptoError> {
        let public = PKey::public_key_from_der(&private.public_key_to_der()?)?;
        Ok(Self {
            family,
            parameter,
            private,
            public,
        })
    }

    pub fn family(&self) -> AlgorithmFamily {
        self.family
    }

    pub fn parameter(&self) -> AlgorithmParameter {
        self.parameter
    }

    /// 报告和诊断中使用的算法名称，例如 `RSA-3072`、`ECDSA-secp256r1`
    pub fn algorithm_name(&self) -> String {
        algorithm_name(self.family, self.parameter)
    }

    fn require_rsa(&self, operation: &'static str) -> Result<(), CryptoError> {
        if self.family != AlgorithmFamily::Rsa {
            return Err(CryptoError::UnsupportedOperation {
                family: self.family,
                operation,
            });
        }
        Ok(())
    }

    /// RSA-OAEP(SHA-256, MGF1-SHA-256) 公钥加密
    pub fn encrypt(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.require_rsa("OAEP 加密")?;
        let encrypter = oaep_sha256_encrypter(&self.public)?;
        let mut ciphertext = vec![0u8; encrypter.encrypt_len(message)?];
        let len = encrypter.encrypt(message, &mut ciphertext)?;
        ciphertext.truncate(len);
        Ok(ciphertext)
    }

    /// RSA-OAEP(SHA-256, MGF1-SHA-256) 私钥解密
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.require_rsa("OAEP 解密")?;
        let decrypter = oaep_sha256_decrypter(&self.private)?;
        let mut plaintext = vec![0u8; decrypter.decrypt_len(ciphertext)?];
        let len = decrypter.decrypt(ciphertext, &mut plaintext)?;
        plaintext.truncate(len);
        Ok(plaintext)
    }

    /// 对整段数据签名（SHA-256 摘要）
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut signer = Signer::new(MessageDigest::sha256(), &self.private)?;
        if self.family == AlgorithmFamily::Rsa {
            signer.set_rsa_padding(Padding::PKCS1_PSS)?;
            signer.set_rsa_pss_saltlen(RsaPssSaltlen::MAXIMUM_LENGTH)?;
            signer.set_rsa_mgf1_md(MessageDigest::sha256())?;
        }
        signer.update(data)?;
        Ok(signer.sign_to_vec()?)
    }

    /// 用公钥验签，签名不匹配时返回 `SignatureRejected`
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let mut verifier = Verifier::new(MessageDigest::sha256(), &self.public)?;
        if self.family == AlgorithmFamily::Rsa {
            verifier.set_rsa_padding(Padding::PKCS1_PSS)?;
            verifier.set_rsa_pss_saltlen(RsaPssSaltlen::MAXIMUM_LENGTH)?;
            verifier.set_rsa_mgf1_md(MessageDigest::sha256())?;
        }
        verifier.update(data)?;
        // 畸形的 DSA/ECDSA 签名会让 OpenSSL 直接报错，同样视为签名无效
        match verifier.verify(signature) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(CryptoError::SignatureRejected),
        }
    }
}

/// 算法名称
pub fn algorithm_name(family: AlgorithmFamily, parameter: AlgorithmParameter) -> String {
    match (family, parameter) {
        (AlgorithmFamily::Ec, parameter) => format!("ECDSA-{}", parameter),
        (family, parameter) => format!("{}-{}", family, parameter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rsa(bits: u32) -> KeyPair {
        KeyPair::generate(AlgorithmFamily::Rsa, AlgorithmParameter::KeySize(bits)).unwrap()
    }

    #[test]
    fn test_oaep_round_trip() {
        let pair = rsa(1024);
        let message = b"8 bytes!";
        let ciphertext = pair.encrypt(message).unwrap();
        assert_eq!(ciphertext.len(), 128);
        assert_eq!(pair.decrypt(&ciphertext).unwrap(), message);
        // OAEP 是随机化的
        assert_ne!(pair.encrypt(message).unwrap(), ciphertext);
    }

    #[test]
    fn test_oaep_rejects_tampered_ciphertext() {
        let pair = rsa(1024);
        let mut ciphertext = pair.encrypt(b"message!").unwrap();
        ciphertext[10] ^= 0x01;
        assert!(matches!(pair.decrypt(&ciphertext), Err(CryptoError::OpenSsl(_))));
    }

    #[test]
    fn test_sign_verify_each_family() {
        let pairs = [
            rsa(1024),
            KeyPair::generate(AlgorithmFamily::Dsa, AlgorithmParameter::KeySize(1024)).unwrap(),
            KeyPair::generate(AlgorithmFamily::Ec, AlgorithmParameter::Curve(EcCurve::Secp192r1)).unwrap(),
            KeyPair::generate(AlgorithmFamily::Ec, AlgorithmParameter::Curve(EcCurve::Secp521r1)).unwrap(),
        ];
        let mut data = vec![0x5au8; 10 * 1024];
        for pair in &pairs {
            let signature = pair.sign(&data).unwrap();
            pair.verify(&data, &signature).unwrap();

            data[4096] ^= 0x01;
            assert!(
                matches!(pair.verify(&data, &signature), Err(CryptoError::SignatureRejected)),
                "{}",
                pair.algorithm_name()
            );
            data[4096] ^= 0x01;
        }
    }

    #[test]
    fn test_dsa_cannot_encrypt() {
        let pair = KeyPair::generate(AlgorithmFamily::Dsa, AlgorithmParameter::KeySize(1024)).unwrap();
        assert!(matches!(
            pair.encrypt(b"x"),
            Err(CryptoError::UnsupportedOperation { family: AlgorithmFamily::Dsa, .. })
        ));
    }

    #[test]
    fn test_parameter_mismatch() {
        let result = generate_private_key(AlgorithmFamily::Rsa, AlgorithmParameter::Curve(EcCurve::Secp256r1));
        assert!(matches!(result, Err(CryptoError::ParameterMismatch { .. })));
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(algorithm_name(AlgorithmFamily::Rsa, AlgorithmParameter::KeySize(3072)), "RSA-3072");
        assert_eq!(algorithm_name(AlgorithmFamily::Dsa, AlgorithmParameter::KeySize(2048)), "DSA-2048");
        assert_eq!(
            algorithm_name(AlgorithmFamily::Ec, AlgorithmParameter::Curve(EcCurve::Secp384r1)),
            "ECDSA-secp384r1"
        );
    }
}
