//! Authenticated encryption turning cursor bytes into opaque token strings.

use std::fmt;

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hkdf::Hkdf;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;
const HKDF_INFO: &[u8] = b"medialib-pagination-token-v1";

/// Shortest secret accepted for token key derivation.
pub const MIN_SECRET_LEN: usize = 32;

/// Upper bound on accepted token length; cursors are far smaller than this.
pub const MAX_TOKEN_LEN: usize = 4096;

#[derive(Error, Debug)]
pub enum CipherError {
    #[error("token secret must be at least {min} bytes, got {len}")]
    WeakSecret { len: usize, min: usize },

    #[error("token key derivation failed")]
    KeyDerivation,

    #[error("token exceeds {max} characters")]
    TooLong { max: usize },

    #[error("token is not valid base64")]
    Encoding(#[from] base64::DecodeError),

    #[error("token is shorter than its nonce and tag")]
    TooShort,

    #[error("token failed authentication")]
    Authentication,

    #[error("token encryption failed")]
    Encryption,
}

/// Symmetric authenticated encryption for pagination tokens.
///
/// `open` must reject any string that `seal` did not produce with the same
/// key; the token codec relies on that for tamper evidence.
pub trait TokenCipher: Send + Sync {
    fn seal(&self, plaintext: &[u8]) -> Result<String, CipherError>;

    fn open(&self, token: &str) -> Result<Vec<u8>, CipherError>;
}

/// AES-256-GCM with a random nonce per token.
///
/// Token text is URL-safe unpadded base64 of `nonce || ciphertext || tag`.
pub struct AesGcmTokenCipher {
    cipher: Aes256Gcm,
}

impl AesGcmTokenCipher {
    /// Derive the encryption key from `secret` with HKDF-SHA256.
    pub fn from_secret(secret: &[u8]) -> Result<Self, CipherError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(CipherError::WeakSecret {
                len: secret.len(),
                min: MIN_SECRET_LEN,
            });
        }

        let hk = Hkdf::<Sha256>::new(None, secret);
        let mut okm = Zeroizing::new([0u8; 32]);
        hk.expand(HKDF_INFO, &mut okm[..])
            .map_err(|_| CipherError::KeyDerivation)?;
        let key = Key::<Aes256Gcm>::from_slice(&okm[..]);

        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }
}

impl fmt::Debug for AesGcmTokenCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmTokenCipher").finish_non_exhaustive()
    }
}

impl TokenCipher for AesGcmTokenCipher {
    fn seal(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CipherError::Encryption)?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    fn open(&self, token: &str) -> Result<Vec<u8>, CipherError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(CipherError::TooLong { max: MAX_TOKEN_LEN });
        }

        let sealed = URL_SAFE_NO_PAD.decode(token)?;
        if sealed.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CipherError::TooShort);
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Authentication)
    }
}
