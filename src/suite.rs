//! 基准测试套件
//!
//! 按固定顺序执行五个阶段（密钥生成、对称加密、非对称加密、签名、验签），
//! 每个阶段按安全级别（对称加密按密钥长度）升序扫描。所有计时都通过
//! `TrialRunner` 顺序执行，任何阶段都不会并发，以免干扰测量。

use std::io::Write;

use tracing::{debug, info};

use crate::config::BenchConfig;
use crate::crypto::{
    algorithm_name, generate_private_key, random_bytes, zero_pad, AesEcbDecryptor, AesEcbEncryptor,
    ChaCha20Stream, CryptoError, HardwareInfo, KeyPair, AES_BLOCK_SIZE, CHACHA20_KEY_SIZE, CHACHA20_NONCE_SIZE,
};
use crate::error::{BenchError, Result};
use crate::params::{AesKeySize, AlgorithmFamily, AlgorithmParameter, ParameterTable, SecurityLevel};
use crate::report::{
    write_header, AesRow, AsymmetricRow, KeygenRow, SignatureRow, StreamRow, SymmetricReport, FOOTER,
};
use crate::timing::{Clock, MonotonicClock, TimeUnit, Timer};
use crate::trial::{TrialResult, TrialRunner};
use crate::types::{OperationContext, OperationKind, Phase, Subject};

/// 为密码库错误附加出错操作的上下文
trait WithContext<T> {
    fn context(self, context: &OperationContext) -> Result<T>;
}

impl<T> WithContext<T> for std::result::Result<T, CryptoError> {
    fn context(self, context: &OperationContext) -> Result<T> {
        self.map_err(|source| BenchError::from_crypto(context.clone(), source))
    }
}

fn log_batch(context: &OperationContext, result: &TrialResult) {
    debug!(
        "{}: {:.2} {}（{} 个样本）",
        context,
        result.value,
        result.unit.symbol(),
        result.samples
    );
}

/// 基准测试套件
pub struct BenchmarkSuite<C = MonotonicClock> {
    config: BenchConfig,
    runner: TrialRunner<C>,
    /// 进程开始时生成一次，之后只读
    plaintext: Vec<u8>,
}

impl BenchmarkSuite<MonotonicClock> {
    /// 使用单调时钟创建套件
    pub fn new(config: BenchConfig) -> Result<Self> {
        Self::with_timer(config, Timer::monotonic())
    }
}

impl<C: Clock> BenchmarkSuite<C> {
    /// 使用指定计时器创建套件；配置无效时在任何计时之前失败
    pub fn with_timer(config: BenchConfig, timer: Timer<C>) -> Result<Self> {
        config
            .validate()
            .map_err(|errors| BenchError::Configuration(errors.join("; ")))?;
        let runner = TrialRunner::new(timer, config.iterations)?;
        let plaintext = random_bytes(config.plaintext_size);
        Ok(Self {
            config,
            runner,
            plaintext,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    /// 依次执行全部五个阶段并写出报告
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        info!(
            "开始基准测试: {} 次试验/批, 明文 {} 字节, {}",
            self.config.iterations,
            self.plaintext.len(),
            HardwareInfo::detect()
        );

        self.begin_phase(out, Phase::KeyGeneration)?;
        for &level in &self.config.security_levels {
            writeln!(out, "{}", self.keygen_at(level)?)?;
            out.flush()?;
        }

        self.begin_phase(out, Phase::SymmetricCipher)?;
        for &key_size in &self.config.aes_key_sizes {
            writeln!(out, "{}", self.aes_at(key_size)?)?;
            out.flush()?;
        }
        writeln!(out, "{}", self.chacha20()?)?;

        self.begin_phase(out, Phase::AsymmetricCipher)?;
        for &level in &self.config.security_levels {
            writeln!(out, "{}", self.asymmetric_at(level)?)?;
            out.flush()?;
        }

        self.begin_phase(out, Phase::Signing)?;
        for &level in &self.config.security_levels {
            writeln!(out, "{}", self.signing_at(level)?)?;
            out.flush()?;
        }

        self.begin_phase(out, Phase::Verification)?;
        for &level in &self.config.security_levels {
            writeln!(out, "{}", self.verification_at(level)?)?;
            out.flush()?;
        }

        writeln!(out)?;
        writeln!(out, "{}", FOOTER)?;
        out.flush()?;
        info!("全部基准测试完成");
        Ok(())
    }

    fn begin_phase<W: Write>(&self, out: &mut W, phase: Phase) -> Result<()> {
        info!("{}阶段开始", phase);
        write_header(out, phase)?;
        Ok(())
    }

    /// RSA 和 EC 在每个级别都必须有参数
    fn required_parameter(&self, level: SecurityLevel, family: AlgorithmFamily) -> Result<AlgorithmParameter> {
        ParameterTable::lookup(level, family)
            .ok_or_else(|| BenchError::Configuration(format!("安全级别 {} 没有 {} 参数", level, family)))
    }

    // ============ 密钥生成 ============

    /// 单个安全级别的密钥生成计时
    pub fn keygen_at(&self, level: SecurityLevel) -> Result<KeygenRow> {
        let rsa = self.required_parameter(level, AlgorithmFamily::Rsa)?;
        let ec = self.required_parameter(level, AlgorithmFamily::Ec)?;

        let rsa = self.keygen_batch(level, AlgorithmFamily::Rsa, rsa)?;
        let dsa = match ParameterTable::lookup(level, AlgorithmFamily::Dsa) {
            Some(parameter) => Some(self.keygen_batch(level, AlgorithmFamily::Dsa, parameter)?),
            None => {
                debug!("安全级别 {} 没有标准化的 DSA 参数，跳过", level);
                None
            }
        };
        let ec = self.keygen_batch(level, AlgorithmFamily::Ec, ec)?;

        Ok(KeygenRow { level, rsa, dsa, ec })
    }

    fn keygen_batch(
        &self,
        level: SecurityLevel,
        family: AlgorithmFamily,
        parameter: AlgorithmParameter,
    ) -> Result<TrialResult> {
        let context = OperationContext::new(
            Phase::KeyGeneration,
            Subject::Level(level),
            algorithm_name(family, parameter),
            OperationKind::Keygen,
        );
        let result = self
            .runner
            .run(TimeUnit::Milliseconds, || generate_private_key(family, parameter))
            .context(&context)?;
        log_batch(&context, &result);
        Ok(result)
    }

    // ============ 对称加密 ============

    /// 单个 AES 密钥长度的加密和解密计时
    ///
    /// 加密：同一个加密器对同一个缓冲区反复原地 `update`，后面的试验加密的是
    /// 前一次的输出。解密：用刚才的密钥新建加密器/解密器，生成一份密文，
    /// 同一个解密器对这份密文反复 `update`。
    pub fn aes_at(&self, key_size: AesKeySize) -> Result<AesRow> {
        let subject = Subject::Aes(key_size);
        let algorithm = format!("{}-ECB", key_size);
        let enc_context = OperationContext::new(Phase::SymmetricCipher, subject, algorithm.as_str(), OperationKind::Encrypt);
        let dec_context = OperationContext::new(Phase::SymmetricCipher, subject, algorithm, OperationKind::Decrypt);

        let key = random_bytes(key_size.key_len());
        let padded = zero_pad(&self.plaintext, AES_BLOCK_SIZE);

        let mut encryptor = AesEcbEncryptor::new(&key).context(&enc_context)?;
        let mut buffer = padded.clone();
        let encrypt = self
            .runner
            .run(TimeUnit::Microseconds, || encryptor.update(&mut buffer))
            .context(&enc_context)?;
        log_batch(&enc_context, &encrypt);

        let mut ciphertext = padded;
        AesEcbEncryptor::new(&key)
            .and_then(|mut fresh| fresh.update(&mut ciphertext))
            .context(&enc_context)?;
        let mut decryptor = AesEcbDecryptor::new(&key).context(&dec_context)?;
        let mut recovered = vec![0u8; ciphertext.len()];
        let decrypt = self
            .runner
            .run(TimeUnit::Microseconds, || decryptor.update(&ciphertext, &mut recovered))
            .context(&dec_context)?;
        log_batch(&dec_context, &decrypt);

        Ok(AesRow {
            key_size,
            encrypt,
            decrypt,
        })
    }

    /// ChaCha20 加密整个明文的计时；每次试验在不计时的准备阶段新建密码实例
    pub fn chacha20(&self) -> Result<StreamRow> {
        let context = OperationContext::new(Phase::SymmetricCipher, Subject::Stream, "ChaCha20", OperationKind::Encrypt);
        let key = random_bytes(CHACHA20_KEY_SIZE);
        let nonce = random_bytes(CHACHA20_NONCE_SIZE);

        let encrypt = self
            .runner
            .run_batched(
                TimeUnit::Microseconds,
                || ChaCha20Stream::new(&key, &nonce).map(|cipher| (cipher, self.plaintext.clone())),
                |(mut cipher, mut buf): (ChaCha20Stream, Vec<u8>)| cipher.apply_keystream(&mut buf).map(|()| buf),
            )
            .context(&context)?;
        log_batch(&context, &encrypt);

        Ok(StreamRow { encrypt })
    }

    /// 对称加密阶段：全部 AES 密钥长度加 ChaCha20
    pub fn symmetric(&self) -> Result<SymmetricReport> {
        let aes = self
            .config
            .aes_key_sizes
            .iter()
            .map(|&key_size| self.aes_at(key_size))
            .collect::<Result<Vec<_>>>()?;
        let chacha20 = self.chacha20()?;
        Ok(SymmetricReport { aes, chacha20 })
    }

    // ============ 非对称加密 ============

    /// 单个安全级别的 RSA-OAEP 加密和解密计时
    pub fn asymmetric_at(&self, level: SecurityLevel) -> Result<AsymmetricRow> {
        let parameter = self.required_parameter(level, AlgorithmFamily::Rsa)?;
        let pair = self.key_pair(Phase::AsymmetricCipher, level, AlgorithmFamily::Rsa, parameter)?;
        let subject = Subject::Level(level);
        let enc_context =
            OperationContext::new(Phase::AsymmetricCipher, subject, pair.algorithm_name(), OperationKind::Encrypt);
        let dec_context =
            OperationContext::new(Phase::AsymmetricCipher, subject, pair.algorithm_name(), OperationKind::Decrypt);

        let message = random_bytes(self.config.rsa_message_size);
        let encrypt = self
            .runner
            .run(TimeUnit::Milliseconds, || pair.encrypt(&message))
            .context(&enc_context)?;
        log_batch(&enc_context, &encrypt);

        let ciphertext = pair.encrypt(&message).context(&enc_context)?;
        let decrypt = self
            .runner
            .run(TimeUnit::Milliseconds, || pair.decrypt(&ciphertext))
            .context(&dec_context)?;
        log_batch(&dec_context, &decrypt);

        Ok(AsymmetricRow {
            level,
            encrypt,
            decrypt,
        })
    }

    // ============ 签名与验签 ============

    /// 单个安全级别的签名计时（每个算法族使用新生成的密钥对）
    pub fn signing_at(&self, level: SecurityLevel) -> Result<SignatureRow> {
        self.signature_row(level, OperationKind::Sign, |family, parameter| {
            let pair = self.key_pair(Phase::Signing, level, family, parameter)?;
            let context = OperationContext::new(Phase::Signing, Subject::Level(level), pair.algorithm_name(), OperationKind::Sign);
            let result = self
                .runner
                .run(TimeUnit::Milliseconds, || pair.sign(&self.plaintext))
                .context(&context)?;
            log_batch(&context, &result);
            Ok(result)
        })
    }

    /// 单个安全级别的验签计时：每个算法族签一次，对同一个签名反复验签
    ///
    /// 验签失败说明库或逻辑有缺陷，返回完整性错误并中止运行。
    pub fn verification_at(&self, level: SecurityLevel) -> Result<SignatureRow> {
        self.signature_row(level, OperationKind::Verify, |family, parameter| {
            let pair = self.key_pair(Phase::Verification, level, family, parameter)?;
            let subject = Subject::Level(level);
            let sign_context =
                OperationContext::new(Phase::Verification, subject, pair.algorithm_name(), OperationKind::Sign);
            let verify_context =
                OperationContext::new(Phase::Verification, subject, pair.algorithm_name(), OperationKind::Verify);

            let signature = pair.sign(&self.plaintext).context(&sign_context)?;
            let result = self
                .runner
                .run(TimeUnit::Milliseconds, || pair.verify(&self.plaintext, &signature))
                .context(&verify_context)?;
            log_batch(&verify_context, &result);
            Ok(result)
        })
    }

    fn signature_row<F>(&self, level: SecurityLevel, operation: OperationKind, mut batch: F) -> Result<SignatureRow>
    where
        F: FnMut(AlgorithmFamily, AlgorithmParameter) -> Result<TrialResult>,
    {
        let rsa = batch(AlgorithmFamily::Rsa, self.required_parameter(level, AlgorithmFamily::Rsa)?)?;
        let dsa = match ParameterTable::lookup(level, AlgorithmFamily::Dsa) {
            Some(parameter) => Some(batch(AlgorithmFamily::Dsa, parameter)?),
            None => {
                debug!("安全级别 {} 没有标准化的 DSA 参数，跳过", level);
                None
            }
        };
        let ec = batch(AlgorithmFamily::Ec, self.required_parameter(level, AlgorithmFamily::Ec)?)?;

        Ok(SignatureRow {
            level,
            operation,
            rsa,
            dsa,
            ec,
        })
    }

    /// 生成不计时的密钥对
    fn key_pair(
        &self,
        phase: Phase,
        level: SecurityLevel,
        family: AlgorithmFamily,
        parameter: AlgorithmParameter,
    ) -> Result<KeyPair> {
        let context = OperationContext::new(
            phase,
            Subject::Level(level),
            algorithm_name(family, parameter),
            OperationKind::Keygen,
        );
        KeyPair::generate(family, parameter).context(&context)
    }
}
