//! 发射器状态序列化
//!
//! 将发射器的可恢复状态封装为 [`StateEnvelope`]，再按 [`FormatSettings`]
//! 编码为不透明字符串：明文模式为 base64(JSON)，加密模式为
//! AES-256-GCM 认证加密后再 base64。

use crate::error::{PulseXError, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 支持的认证加密算法标识
pub const AES_256_GCM: &str = "aes-256-gcm";

/// AES-256 密钥长度（字节）
const KEY_LEN: usize = 32;

/// AES-GCM 随机数长度（字节）
const NONCE_LEN: usize = 12;

/// 状态序列化格式设置
///
/// 加密模式下 `key`/`iv` 为 base64 编码的随机字节；IV 长度允许超过
/// 12 字节，仅取前 12 字节作为 GCM nonce。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatSettings {
    /// 是否加密
    pub encrypted: bool,
    /// 发射器类型标签
    pub type_tag: String,
    /// 加密算法标识
    #[serde(default)]
    pub algorithm: Option<String>,
    /// base64 编码的密钥
    #[serde(default)]
    pub key: Option<String>,
    /// base64 编码的 IV
    #[serde(default)]
    pub iv: Option<String>,
}

impl FormatSettings {
    /// 明文模式
    pub fn plaintext(type_tag: impl Into<String>) -> Self {
        Self {
            encrypted: false,
            type_tag: type_tag.into(),
            algorithm: None,
            key: None,
            iv: None,
        }
    }

    /// AES-256-GCM 加密模式
    pub fn aes_256_gcm(
        type_tag: impl Into<String>,
        key: impl Into<String>,
        iv: impl Into<String>,
    ) -> Self {
        Self {
            encrypted: true,
            type_tag: type_tag.into(),
            algorithm: Some(AES_256_GCM.to_string()),
            key: Some(key.into()),
            iv: Some(iv.into()),
        }
    }
}

/// 发射器状态信封
///
/// 恢复路径据此重建 [`crate::emitter::EmitterDescription`]。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateEnvelope {
    /// 发射器类型标签
    pub type_tag: String,
    /// 发射器 id
    pub id: String,
    /// 名称
    pub name: String,
    /// 描述
    pub description: String,
    /// 类型自定义属性
    pub properties: Value,
}

/// 将状态信封编码为不透明字符串
pub fn seal(envelope: &StateEnvelope, settings: &FormatSettings) -> Result<String> {
    let plaintext = serde_json::to_vec(envelope)
        .map_err(|e| PulseXError::serialization(format!("状态编码失败: {}", e)))?;

    if !settings.encrypted {
        return Ok(BASE64.encode(plaintext));
    }

    let (cipher, nonce) = build_cipher(settings)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
        .map_err(|_| PulseXError::crypto("加密失败".to_string()))?;
    Ok(BASE64.encode(ciphertext))
}

/// 从不透明字符串解码状态信封
pub fn open(data: &str, settings: &FormatSettings) -> Result<StateEnvelope> {
    let bytes = BASE64
        .decode(data)
        .map_err(|e| PulseXError::serialization(format!("base64 解码失败: {}", e)))?;

    let plaintext = if settings.encrypted {
        let (cipher, nonce) = build_cipher(settings)?;
        cipher
            .decrypt(Nonce::from_slice(&nonce), bytes.as_slice())
            .map_err(|_| PulseXError::crypto("解密失败或密文被篡改".to_string()))?
    } else {
        bytes
    };

    serde_json::from_slice(&plaintext)
        .map_err(|e| PulseXError::serialization(format!("状态解码失败: {}", e)))
}

/// 根据格式设置构建加密器和 nonce
fn build_cipher(settings: &FormatSettings) -> Result<(Aes256Gcm, [u8; NONCE_LEN])> {
    match settings.algorithm.as_deref() {
        Some(AES_256_GCM) => {}
        Some(other) => {
            return Err(PulseXError::crypto(format!("不支持的加密算法: {}", other)));
        }
        None => {
            return Err(PulseXError::crypto("加密模式下必须指定算法".to_string()));
        }
    }

    let key = decode_material(settings.key.as_deref(), "key", KEY_LEN)?;
    let iv = decode_material(settings.iv.as_deref(), "iv", NONCE_LEN)?;

    let cipher = Aes256Gcm::new_from_slice(&key[..KEY_LEN])
        .map_err(|_| PulseXError::crypto("密钥长度无效".to_string()))?;

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&iv[..NONCE_LEN]);
    Ok((cipher, nonce))
}

/// 解码 base64 密钥材料并校验最小长度
fn decode_material(value: Option<&str>, field: &str, min_len: usize) -> Result<Vec<u8>> {
    let encoded = value
        .ok_or_else(|| PulseXError::crypto(format!("加密模式下缺少 {}", field)))?;
    let bytes = BASE64
        .decode(encoded)
        .map_err(|_| PulseXError::crypto(format!("{} 不是有效的 base64", field)))?;
    if bytes.len() < min_len {
        return Err(PulseXError::crypto(format!(
            "{} 长度不足: 需要至少 {} 字节",
            field, min_len
        )));
    }
    Ok(bytes)
}
