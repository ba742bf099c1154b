//! 비밀번호 해싱 유틸리티.
//!
//! PBKDF2-HMAC-SHA256 기반 비밀번호 해싱 및 검증.
//!
//! 저장 형식은 `base64(salt) ":" base64(derived_key)`입니다.
//! - 솔트: OS 난수 16바이트 (호출마다 새로 생성)
//! - 반복 횟수: 100,000
//! - 파생 키: 32바이트
//!
//! 키 파생은 의도적으로 느린 CPU 작업이므로, 비동기 핸들러에서는
//! `tokio::task::spawn_blocking`으로 감싸서 호출해야 합니다.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// 솔트 길이 (바이트).
pub const SALT_LEN: usize = 16;

/// 파생 키 길이 (바이트).
pub const KEY_LEN: usize = 32;

/// PBKDF2 반복 횟수.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

const SEPARATOR: char = ':';

/// 존재하지 않는 사용자 로그인 시 검증 대상으로 쓰는 해시.
///
/// 형식이 올바르므로 [`verify_password`]가 실제 키 파생까지 수행하고,
/// 어떤 비밀번호로도 일치하지 않습니다 (솔트와 키가 모두 0).
pub const DUMMY_HASH: &str =
    "AAAAAAAAAAAAAAAAAAAAAA==:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("솔트 생성 실패: {0}")]
    SaltGeneration(String),
}

/// 비밀번호 해싱.
///
/// 같은 비밀번호라도 솔트가 매번 다르므로 결과 문자열도 매번 다릅니다.
///
/// # Example
///
/// ```rust,ignore
/// let hash = hash_password("Password123!")?;
/// // "q4Xb...==:Zk1c...="
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| PasswordError::SaltGeneration(e.to_string()))?;

    let key = derive_key(password, &salt);

    Ok(format!(
        "{}{}{}",
        STANDARD.encode(salt),
        SEPARATOR,
        STANDARD.encode(key)
    ))
}

/// 비밀번호 검증.
///
/// 형식이 잘못된 해시(구분자 누락, base64 오류, 길이 불일치)는 에러 없이 `false`를 반환합니다.
/// 파생 키 비교는 상수 시간으로 수행합니다.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let Some((salt, expected)) = decode_hash(encoded) else {
        return false;
    };

    let actual = derive_key(password, &salt);
    actual[..].ct_eq(&expected[..]).into()
}

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    pbkdf2::pbkdf2_hmac_array::<Sha256, KEY_LEN>(password.as_bytes(), salt, PBKDF2_ITERATIONS)
}

fn decode_hash(encoded: &str) -> Option<([u8; SALT_LEN], [u8; KEY_LEN])> {
    let mut parts = encoded.split(SEPARATOR);
    let salt_b64 = parts.next()?;
    let key_b64 = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let salt: [u8; SALT_LEN] = STANDARD.decode(salt_b64).ok()?.try_into().ok()?;
    let key: [u8; KEY_LEN] = STANDARD.decode(key_b64).ok()?.try_into().ok()?;
    Some((salt, key))
}
