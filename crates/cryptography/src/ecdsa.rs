//! ECDSA sign/verify over secp256r1 (Neo's default curve) and secp256k1.
//!
//! Signatures are the raw 64-byte `r || s` fixed-width encoding Neo scripts use,
//! not DER. Signing is deterministic (RFC 6979), matching `p256`/`k256`'s default.

use crate::Error;
use k256::ecdsa::{
    signature::{Signer as K1Signer, Verifier as K1Verifier},
    Signature as K1Signature, SigningKey as K1SigningKey, VerifyingKey as K1VerifyingKey,
};
use p256::ecdsa::{
    signature::{Signer, Verifier},
    Signature as R1Signature, SigningKey as R1SigningKey, VerifyingKey as R1VerifyingKey,
};

pub struct ECDsa;

impl ECDsa {
    /// Signs `message` with a secp256r1 private key, returning a 64-byte `r||s` signature.
    pub fn sign(message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, Error> {
        let signing_key =
            R1SigningKey::from_slice(private_key).map_err(|e| Error::InvalidKey(e.to_string()))?;
        let signature: R1Signature = signing_key.sign(message);
        Ok(signature.to_bytes().to_vec())
    }

    pub fn sign_deterministic(message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, Error> {
        Self::sign(message, private_key)
    }

    /// Verifies a signature against secp256r1, Neo's default curve.
    pub fn verify_signature(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<bool, Error> {
        Self::verify_signature_secp256r1(message, signature, public_key)
    }

    /// Alias kept for call sites that spell out the curve explicitly.
    pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<bool, Error> {
        Self::verify_signature(message, signature, public_key)
    }

    pub fn verify_signature_secp256r1(
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<bool, Error> {
        let verifying_key = R1VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        let sig = R1Signature::from_slice(signature)
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;
        Ok(verifying_key.verify(message, &sig).is_ok())
    }

    pub fn verify_signature_secp256k1(
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<bool, Error> {
        let verifying_key = K1VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        let sig = K1Signature::from_slice(signature)
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;
        Ok(verifying_key.verify(message, &sig).is_ok())
    }

    pub fn sign_secp256k1(message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, Error> {
        let signing_key =
            K1SigningKey::from_slice(private_key).map_err(|e| Error::InvalidKey(e.to_string()))?;
        let signature: K1Signature = signing_key.sign(message);
        Ok(signature.to_bytes().to_vec())
    }

    pub fn generate_private_key() -> [u8; 32] {
        let signing_key = R1SigningKey::random(&mut rand::thread_rng());
        let mut out = [0u8; 32];
        out.copy_from_slice(&signing_key.to_bytes());
        out
    }

    pub fn validate_private_key(private_key: &[u8]) -> bool {
        R1SigningKey::from_slice(private_key).is_ok()
    }

    pub fn validate_public_key(public_key: &[u8]) -> bool {
        R1VerifyingKey::from_sec1_bytes(public_key).is_ok()
    }

    pub fn derive_public_key(private_key: &[u8]) -> Result<Vec<u8>, Error> {
        let signing_key =
            R1SigningKey::from_slice(private_key).map_err(|e| Error::InvalidKey(e.to_string()))?;
        let verifying_key = R1VerifyingKey::from(&signing_key);
        use p256::elliptic_curve::sec1::ToEncodedPoint;
        Ok(verifying_key.to_encoded_point(false).as_bytes().to_vec())
    }

    pub fn derive_compressed_public_key(private_key: &[u8]) -> Result<Vec<u8>, Error> {
        let signing_key =
            R1SigningKey::from_slice(private_key).map_err(|e| Error::InvalidKey(e.to_string()))?;
        let verifying_key = R1VerifyingKey::from(&signing_key);
        use p256::elliptic_curve::sec1::ToEncodedPoint;
        Ok(verifying_key.to_encoded_point(true).as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_round_trips() {
        let private_key = ECDsa::generate_private_key();
        let public_key = ECDsa::derive_public_key(&private_key).unwrap();
        let message = b"neo consensus message";
        let signature = ECDsa::sign(message, &private_key).unwrap();
        assert!(ECDsa::verify_signature_secp256r1(message, &signature, &public_key).unwrap());
    }

    #[test]
    fn tampered_message_fails_verification() {
        let private_key = ECDsa::generate_private_key();
        let public_key = ECDsa::derive_public_key(&private_key).unwrap();
        let signature = ECDsa::sign(b"original", &private_key).unwrap();
        assert!(!ECDsa::verify_signature_secp256r1(b"tampered", &signature, &public_key).unwrap());
    }

    #[test]
    fn signing_is_deterministic() {
        let private_key = ECDsa::generate_private_key();
        let a = ECDsa::sign(b"same message", &private_key).unwrap();
        let b = ECDsa::sign(b"same message", &private_key).unwrap();
        assert_eq!(a, b);
    }
}
