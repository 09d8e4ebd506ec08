// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! secp256k1 ECDSA operator keys.
//!
//! Keys arrive in one of three shapes:
//! - raw hex (`0x` prefix optional),
//! - Hedera DER-encoded hex, i.e. raw hex behind a fixed ASN.1 prefix,
//! - PEM files (SEC1 or PKCS#8), as exported by most wallets.

use std::{fmt, path::Path, str::FromStr};

use k256::{
    ecdsa::{
        signature::hazmat::{PrehashSigner, PrehashVerifier},
        Signature, SigningKey, VerifyingKey,
    },
    SecretKey,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// ASN.1 prefix Hedera puts in front of an ECDSA secp256k1 private key.
const DER_PRIVATE_KEY_PREFIX: &str = "3030020100300706052b8104000a04220420";

/// ASN.1 prefix Hedera puts in front of a compressed ECDSA public key.
const DER_PUBLIC_KEY_PREFIX: &str = "302d300706052b8104000a032200";

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Failed to read key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn strip_hex(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix("0x").unwrap_or(raw)
}

/// An operator private key.
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    /// Parse an ECDSA key from raw or DER-prefixed hex.
    pub fn from_str_ecdsa(raw: &str) -> Result<Self, KeyError> {
        let hex_key = strip_hex(raw).to_ascii_lowercase();
        let hex_key = hex_key
            .strip_prefix(DER_PRIVATE_KEY_PREFIX)
            .unwrap_or(&hex_key);

        let bytes = hex::decode(hex_key)
            .map_err(|e| KeyError::InvalidPrivateKey(format!("Invalid hex: {}", e)))?;

        SigningKey::from_slice(&bytes)
            .map(Self)
            .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))
    }

    /// Parse a PEM-encoded key (SEC1 first, then PKCS#8).
    pub fn from_pem(pem_bytes: &[u8]) -> Result<Self, KeyError> {
        use k256::pkcs8::DecodePrivateKey;

        let pem_str = std::str::from_utf8(pem_bytes)
            .map_err(|e| KeyError::InvalidPrivateKey(format!("Invalid UTF-8: {}", e)))?;

        let pem = pem::parse(pem_str)
            .map_err(|e| KeyError::InvalidPrivateKey(format!("Invalid PEM: {}", e)))?;

        let secret = SecretKey::from_sec1_der(pem.contents())
            .or_else(|_| SecretKey::from_pkcs8_der(pem.contents()).map_err(|e| e.to_string()))
            .map_err(|e| KeyError::InvalidPrivateKey(format!("Invalid key format: {}", e)))?;

        Ok(Self(SigningKey::from(secret)))
    }

    /// Read and parse a PEM key file.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| KeyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_pem(&bytes)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key().clone())
    }

    /// Sign the SHA-256 digest of `message`; returns the 64-byte `r || s` form.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, KeyError> {
        let digest = Sha256::digest(message);
        let signature: Signature = self
            .0
            .sign_prehash(&digest)
            .map_err(|e| KeyError::InvalidSignature(e.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&"<redacted>").finish()
    }
}

/// An ECDSA secp256k1 public key, shown as compressed SEC1 hex.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Compressed SEC1 encoding (33 bytes).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Hedera DER-prefixed hex form.
    pub fn to_string_der(&self) -> String {
        format!("{DER_PUBLIC_KEY_PREFIX}{self}")
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), KeyError> {
        let signature = Signature::from_slice(signature)
            .map_err(|e| KeyError::InvalidSignature(e.to_string()))?;
        self.0
            .verify_prehash(&Sha256::digest(message), &signature)
            .map_err(|e| KeyError::InvalidSignature(e.to_string()))
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let hex_key = strip_hex(raw).to_ascii_lowercase();
        let hex_key = hex_key
            .strip_prefix(DER_PUBLIC_KEY_PREFIX)
            .unwrap_or(&hex_key);

        let bytes = hex::decode(hex_key)
            .map_err(|e| KeyError::InvalidPublicKey(format!("Invalid hex: {}", e)))?;

        VerifyingKey::from_sec1_bytes(&bytes)
            .map(Self)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use k256::pkcs8::{EncodePrivateKey, LineEnding};

    use super::*;

    const KEY_HEX: &str = "0101010101010101010101010101010101010101010101010101010101010101";

    #[test]
    fn test_private_key_from_hex_variants() {
        let raw = PrivateKey::from_str_ecdsa(KEY_HEX).unwrap();
        let prefixed = PrivateKey::from_str_ecdsa(&format!("0x{KEY_HEX}")).unwrap();
        let der = PrivateKey::from_str_ecdsa(&format!("{DER_PRIVATE_KEY_PREFIX}{KEY_HEX}")).unwrap();

        assert_eq!(raw.public_key(), prefixed.public_key());
        assert_eq!(raw.public_key(), der.public_key());
    }

    #[test]
    fn test_private_key_rejects_garbage() {
        assert!(PrivateKey::from_str_ecdsa("not-hex").is_err());
        assert!(PrivateKey::from_str_ecdsa("abcd").is_err());
        assert!(PrivateKey::from_str_ecdsa(&"00".repeat(32)).is_err());
    }

    #[test]
    fn test_private_key_debug_is_redacted() {
        let key = PrivateKey::from_str_ecdsa(KEY_HEX).unwrap();
        assert!(!format!("{key:?}").contains("0101"));
    }

    #[test]
    fn test_private_key_from_pem_file() {
        let secret = SecretKey::from_slice(&hex::decode(KEY_HEX).unwrap()).unwrap();
        let pem = secret.to_pkcs8_pem(LineEnding::LF).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(pem.as_bytes()).unwrap();

        let from_file = PrivateKey::from_pem_file(file.path()).unwrap();
        let from_hex = PrivateKey::from_str_ecdsa(KEY_HEX).unwrap();
        assert_eq!(from_file.public_key(), from_hex.public_key());
    }

    #[test]
    fn test_missing_pem_file() {
        let err = PrivateKey::from_pem_file("/definitely/not/here.pem").unwrap_err();
        assert!(matches!(err, KeyError::Io { .. }));
    }

    #[test]
    fn test_public_key_parse_and_display() {
        let public = PrivateKey::from_str_ecdsa(KEY_HEX).unwrap().public_key();
        let hex_form = public.to_string();
        assert_eq!(hex_form.len(), 66);

        assert_eq!(hex_form.parse::<PublicKey>().unwrap(), public);
        assert_eq!(public.to_string_der().parse::<PublicKey>().unwrap(), public);
        assert!("02abcd".parse::<PublicKey>().is_err());
    }

    #[test]
    fn test_sign_and_verify() {
        let key = PrivateKey::from_str_ecdsa(KEY_HEX).unwrap();
        let signature = key.sign(b"hello hedera").unwrap();
        assert_eq!(signature.len(), 64);

        let public = key.public_key();
        assert!(public.verify(b"hello hedera", &signature).is_ok());
        assert!(public.verify(b"tampered", &signature).is_err());
    }
}
