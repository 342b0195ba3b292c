use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use hkdf::Hkdf;
use rand::Rng;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::aead::KEY_SIZE;
use crate::error::{CryptoError, CryptoResult};

const STORE_KEY_INFO: &[u8] = b"passlock-store-key-v1";

/// Random per-install secret persisted next to the encrypted store.
/// Never used directly as an encryption key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct InstallSecret {
    bytes: [u8; KEY_SIZE],
}

impl InstallSecret {
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let mut decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::Base64(e.to_string()))?;
        if decoded.len() != KEY_SIZE {
            let got = decoded.len();
            decoded.zeroize();
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                got,
            });
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes)
    }

    /// Load the secret from `path`, generating and persisting one if the file does not exist.
    pub fn load_or_create(path: &Path) -> std::io::Result<Self> {
        if path.exists() {
            let encoded = std::fs::read_to_string(path)?;
            return Self::from_base64(&encoded)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
        }

        let secret = Self::generate();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        crate::file::write_private(path, secret.to_base64().as_bytes())?;
        tracing::info!("Generated new store key at {}", path.display());
        Ok(secret)
    }
}

impl std::fmt::Debug for InstallSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Encryption key for the store file, derived from the install secret via HKDF-SHA256.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct StoreKey {
    bytes: [u8; KEY_SIZE],
}

impl StoreKey {
    pub fn derive(secret: &InstallSecret) -> CryptoResult<Self> {
        let hk = Hkdf::<Sha256>::new(None, &secret.bytes);
        let mut bytes = [0u8; KEY_SIZE];
        hk.expand(STORE_KEY_INFO, &mut bytes)
            .map_err(|e| CryptoError::DerivationFailed(e.to_string()))?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
