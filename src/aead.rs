use crate::error::Error;
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand_core::{OsRng, RngCore};

pub(crate) const NONCE_SIZE: usize = 12; // AES-GCM uses 12-byte (96-bit) nonces
pub(crate) const TAG_SIZE: usize = 16;

/// Encrypts with AES-256-GCM under a fresh random nonce.
///
/// Output layout: nonce (12 bytes) || ciphertext || tag (16 bytes).
pub(crate) fn seal(plaintext: &[u8], key: &[u8; 32]) -> Result<Vec<u8>, Error> {
    let key = aes_gcm::Key::<Aes256Gcm>::from_slice(key.as_slice());
    let cipher = Aes256Gcm::new(key);

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|_| Error::Random)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let mut ciphertext = cipher.encrypt(nonce, plaintext)?;

    let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.append(&mut ciphertext);

    Ok(result)
}

/// Decrypts and verifies. Input layout: nonce (12 bytes) || ciphertext || tag.
pub(crate) fn open(data: &[u8], key: &[u8; 32]) -> Result<Vec<u8>, Error> {
    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(Error::CiphertextTooShort);
    }

    let key = aes_gcm::Key::<Aes256Gcm>::from_slice(key.as_slice());
    let cipher = Aes256Gcm::new(key);

    let (nonce, body) = data.split_at(NONCE_SIZE);
    cipher
        .decrypt(Nonce::from_slice(nonce), body)
        .map_err(|_| Error::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let key = [42u8; 32];
        let plaintext = b"Hello, peer!";

        let sealed = seal(plaintext, &key).unwrap();
        let opened = open(&sealed, &key).unwrap();

        assert_eq!(opened.as_slice(), plaintext);
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let key = [42u8; 32];

        let first = seal(b"same message", &key).unwrap();
        let second = seal(b"same message", &key).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_key_fails() {
        let sealed = seal(b"secret", &[1u8; 32]).unwrap();
        assert_eq!(open(&sealed, &[2u8; 32]), Err(Error::AuthenticationFailed));
    }

    #[test]
    fn test_tampering_detected() {
        let key = [42u8; 32];
        let mut sealed = seal(b"secret", &key).unwrap();

        for i in 0..sealed.len() {
            sealed[i] ^= 0x01;
            assert_eq!(open(&sealed, &key), Err(Error::AuthenticationFailed));
            sealed[i] ^= 0x01;
        }
    }

    #[test]
    fn test_truncated_input_rejected() {
        let key = [42u8; 32];

        assert_eq!(open(&[], &key), Err(Error::CiphertextTooShort));
        assert_eq!(
            open(&[0u8; NONCE_SIZE + TAG_SIZE - 1], &key),
            Err(Error::CiphertextTooShort)
        );
    }

    #[test]
    fn test_empty_plaintext() {
        let key = [42u8; 32];

        let sealed = seal(b"", &key).unwrap();
        assert_eq!(sealed.len(), NONCE_SIZE + TAG_SIZE);
        assert!(open(&sealed, &key).unwrap().is_empty());
    }
}
