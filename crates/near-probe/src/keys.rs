use ed25519_dalek::{SECRET_KEY_LENGTH, SigningKey};
use std::fmt;
use std::str::FromStr;

const ED25519_PREFIX: &str = "ed25519";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unsupported key curve: {0}")]
    UnsupportedCurve(String),
    #[error("invalid base58 key data: {0}")]
    InvalidEncoding(String),
    #[error("invalid key length: {0} bytes")]
    InvalidLength(usize),
    #[error("public key does not match the secret key")]
    PublicKeyMismatch,
}

/// An ed25519 key pair in the `ed25519:<base58>` form used by NEAR wallets.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }

    /// Public key as `ed25519:<base58>`
    pub fn public_key(&self) -> String {
        let bytes = self.signing_key.verifying_key().to_bytes();
        format!("{}:{}", ED25519_PREFIX, bs58::encode(bytes).into_string())
    }

    /// Secret key as `ed25519:<base58>` of the 64-byte seed and public key
    pub fn secret_key(&self) -> String {
        let mut combined = Vec::with_capacity(64);
        combined.extend_from_slice(&self.signing_key.to_bytes());
        combined.extend_from_slice(&self.signing_key.verifying_key().to_bytes());
        format!("{}:{}", ED25519_PREFIX, bs58::encode(combined).into_string())
    }
}

impl FromStr for KeyPair {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = match s.split_once(':') {
            Some((curve, data)) if curve.eq_ignore_ascii_case(ED25519_PREFIX) => data,
            Some((curve, _)) => return Err(KeyError::UnsupportedCurve(curve.to_string())),
            None => s,
        };

        let bytes = bs58::decode(data.trim())
            .into_vec()
            .map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;

        // Either a bare seed or seed followed by its public key
        if bytes.len() != SECRET_KEY_LENGTH && bytes.len() != 2 * SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidLength(bytes.len()));
        }

        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&bytes[..SECRET_KEY_LENGTH]);
        let signing_key = SigningKey::from_bytes(&seed);

        if bytes.len() == 2 * SECRET_KEY_LENGTH
            && signing_key.verifying_key().as_bytes()[..] != bytes[SECRET_KEY_LENGTH..]
        {
            return Err(KeyError::PublicKeyMismatch);
        }

        Ok(Self::from_signing_key(signing_key))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_key() -> KeyPair {
        KeyPair::from_signing_key(SigningKey::from_bytes(&[7u8; 32]))
    }

    #[test]
    fn test_parse_full_secret_key() {
        let key = fixed_key();
        let parsed: KeyPair = key.secret_key().parse().unwrap();
        assert_eq!(parsed.public_key(), key.public_key());
        assert!(parsed.public_key().starts_with("ed25519:"));
    }

    #[test]
    fn test_parse_seed_only() {
        let encoded = bs58::encode([7u8; 32]).into_string();
        let parsed: KeyPair = format!("ed25519:{}", encoded).parse().unwrap();
        assert_eq!(parsed.public_key(), fixed_key().public_key());

        // the curve prefix is optional
        let bare: KeyPair = encoded.parse().unwrap();
        assert_eq!(bare.public_key(), fixed_key().public_key());
    }

    #[test]
    fn test_rejects_mismatched_public_key() {
        let mut combined = vec![7u8; 32];
        combined.extend_from_slice(&[1u8; 32]);
        let encoded = format!("ed25519:{}", bs58::encode(combined).into_string());

        assert_eq!(
            encoded.parse::<KeyPair>().unwrap_err(),
            KeyError::PublicKeyMismatch
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            "secp256k1:abc".parse::<KeyPair>().unwrap_err(),
            KeyError::UnsupportedCurve("secp256k1".to_string())
        );
        assert!(matches!(
            "ed25519:0OIl".parse::<KeyPair>().unwrap_err(),
            KeyError::InvalidEncoding(_)
        ));
        let short = format!("ed25519:{}", bs58::encode([1u8; 10]).into_string());
        assert_eq!(
            short.parse::<KeyPair>().unwrap_err(),
            KeyError::InvalidLength(10)
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = fixed_key();
        let debug = format!("{:?}", key);
        assert!(debug.contains(&key.public_key()));
        assert!(!debug.contains(&key.secret_key()));
    }
}
