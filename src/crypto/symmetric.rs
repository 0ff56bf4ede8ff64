//! 对称加密封装
//!
//! AES 使用 ECB 模式，要求数据按 16 字节分组对齐；同一个加密器/解密器对象
//! 可以反复调用 `update`。ChaCha20 使用 128 位 nonce：前 4 字节是小端的
//! 分组计数器，后 12 字节是 RFC 8439 的 nonce。

use aes::{Aes128, Aes192, Aes256};
use chacha20::ChaCha20;
use cipher::generic_array::GenericArray;
use cipher::typenum::U16;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit, StreamCipher, StreamCipherSeek};

use super::CryptoError;

/// AES 分组大小（字节）
pub const AES_BLOCK_SIZE: usize = 16;
/// ChaCha20 密钥长度（字节）
pub const CHACHA20_KEY_SIZE: usize = 32;
/// ChaCha20 nonce 长度（字节，含 4 字节计数器）
pub const CHACHA20_NONCE_SIZE: usize = 16;

const CHACHA20_BLOCK_SIZE: u64 = 64;

/// 零填充：追加 `block - len % block` 个零字节
///
/// 已对齐的数据也会多出一个完整的零分组。
pub fn zero_pad(data: &[u8], block: usize) -> Vec<u8> {
    let pad = block - data.len() % block;
    let mut padded = Vec::with_capacity(data.len() + pad);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad, 0);
    padded
}

fn check_aligned(len: usize) -> Result<(), CryptoError> {
    if len % AES_BLOCK_SIZE != 0 {
        return Err(CryptoError::UnalignedBuffer {
            len,
            block: AES_BLOCK_SIZE,
        });
    }
    Ok(())
}

fn encrypt_blocks<E: BlockEncryptMut<BlockSize = U16>>(cipher: &mut E, buf: &mut [u8]) {
    for block in buf.chunks_exact_mut(AES_BLOCK_SIZE) {
        cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
    }
}

fn decrypt_blocks<D: BlockDecryptMut<BlockSize = U16>>(cipher: &mut D, input: &[u8], output: &mut [u8]) {
    for (src, dst) in input
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        cipher.decrypt_block_b2b_mut(GenericArray::from_slice(src), GenericArray::from_mut_slice(dst));
    }
}

/// AES-ECB 加密器
pub enum AesEcbEncryptor {
    Aes128(ecb::Encryptor<Aes128>),
    Aes192(ecb::Encryptor<Aes192>),
    Aes256(ecb::Encryptor<Aes256>),
}

impl AesEcbEncryptor {
    /// 根据密钥长度（16/24/32 字节）选择 AES 变体
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = |_| CryptoError::InvalidKeyLength { actual: key.len() };
        Ok(match key.len() {
            16 => Self::Aes128(ecb::Encryptor::new_from_slice(key).map_err(invalid)?),
            24 => Self::Aes192(ecb::Encryptor::new_from_slice(key).map_err(invalid)?),
            32 => Self::Aes256(ecb::Encryptor::new_from_slice(key).map_err(invalid)?),
            actual => return Err(CryptoError::InvalidKeyLength { actual }),
        })
    }

    /// 原地加密整个缓冲区
    pub fn update(&mut self, buf: &mut [u8]) -> Result<(), CryptoError> {
        check_aligned(buf.len())?;
        match self {
            Self::Aes128(cipher) => encrypt_blocks(cipher, buf),
            Self::Aes192(cipher) => encrypt_blocks(cipher, buf),
            Self::Aes256(cipher) => encrypt_blocks(cipher, buf),
        }
        Ok(())
    }
}

/// AES-ECB 解密器
pub enum AesEcbDecryptor {
    Aes128(ecb::Decryptor<Aes128>),
    Aes192(ecb::Decryptor<Aes192>),
    Aes256(ecb::Decryptor<Aes256>),
}

impl AesEcbDecryptor {
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = |_| CryptoError::InvalidKeyLength { actual: key.len() };
        Ok(match key.len() {
            16 => Self::Aes128(ecb::Decryptor::new_from_slice(key).map_err(invalid)?),
            24 => Self::Aes192(ecb::Decryptor::new_from_slice(key).map_err(invalid)?),
            32 => Self::Aes256(ecb::Decryptor::new_from_slice(key).map_err(invalid)?),
            actual => return Err(CryptoError::InvalidKeyLength { actual }),
        })
    }

    /// 把 `input` 解密到等长的 `output`，`input` 保持不变
    pub fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), CryptoError> {
        check_aligned(input.len())?;
        if output.len() != input.len() {
            return Err(CryptoError::UnalignedBuffer {
                len: output.len(),
                block: AES_BLOCK_SIZE,
            });
        }
        match self {
            Self::Aes128(cipher) => decrypt_blocks(cipher, input, output),
            Self::Aes192(cipher) => decrypt_blocks(cipher, input, output),
            Self::Aes256(cipher) => decrypt_blocks(cipher, input, output),
        }
        Ok(())
    }
}

/// ChaCha20 流密码（256 位密钥，128 位 nonce）
pub struct ChaCha20Stream {
    cipher: ChaCha20,
}

impl ChaCha20Stream {
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != CHACHA20_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength { actual: key.len() });
        }
        let (counter, iv) = match nonce.len() {
            CHACHA20_NONCE_SIZE => nonce.split_at(4),
            actual => {
                return Err(CryptoError::InvalidNonceLength {
                    expected: CHACHA20_NONCE_SIZE,
                    actual,
                })
            }
        };

        let mut cipher = ChaCha20::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength { actual: key.len() })?;
        let counter = u32::from_le_bytes([counter[0], counter[1], counter[2], counter[3]]);
        cipher
            .try_seek(u64::from(counter) * CHACHA20_BLOCK_SIZE)
            .map_err(|_| CryptoError::KeystreamExhausted)?;
        Ok(Self { cipher })
    }

    /// 原地与密钥流异或（加密和解密是同一个操作）
    pub fn apply_keystream(&mut self, buf: &mut [u8]) -> Result<(), CryptoError> {
        self.cipher
            .try_apply_keystream(buf)
            .map_err(|_| CryptoError::KeystreamExhausted)
    }
}
