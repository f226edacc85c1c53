//! Elliptic-curve point handling for the two curves Neo verification scripts use:
//! secp256r1 (the default) and secp256k1 (accepted for externally-owned accounts).
//!
//! Field and group arithmetic is delegated entirely to the `p256`/`k256` crates;
//! this module only owns Neo's point *encoding* rules (compressed/uncompressed/
//! infinity) and curve selection.

use crate::Error;
use k256::{
    elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint},
    AffinePoint as Secp256k1Affine, EncodedPoint as Secp256k1Encoded,
};
use p256::{
    elliptic_curve::sec1::{FromEncodedPoint as P256FromEncoded, ToEncodedPoint as P256ToEncoded},
    AffinePoint as Secp256r1Affine, EncodedPoint as Secp256r1Encoded,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECCurve {
    Secp256r1,
    Secp256k1,
}

impl ECCurve {
    pub fn secp256r1() -> Self {
        ECCurve::Secp256r1
    }

    pub fn secp256k1() -> Self {
        ECCurve::Secp256k1
    }
}

/// A point on one of the supported curves, stored in its canonical Neo encoding:
/// compressed (33 bytes, `0x02`/`0x03` prefix), uncompressed (65 bytes, `0x04`
/// prefix), or the point at infinity (single `0x00` byte).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ECPoint {
    curve: ECCurve,
    encoded: Vec<u8>,
}

impl ECPoint {
    pub fn infinity(curve: ECCurve) -> Self {
        Self { curve, encoded: vec![0x00] }
    }

    pub fn is_infinity(&self) -> bool {
        self.encoded == [0x00]
    }

    pub fn curve(&self) -> ECCurve {
        self.curve
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Validates `bytes` as a point on `curve` and wraps it, preserving whichever
    /// of compressed/uncompressed/infinity encoding was given.
    pub fn new(curve: ECCurve, bytes: Vec<u8>) -> Result<Self, Error> {
        validate_point(curve, &bytes)?;
        Ok(Self { curve, encoded: bytes })
    }

    /// Decodes a point, inferring the curve as secp256r1 (Neo's default) unless
    /// the bytes don't parse on it, in which case secp256k1 is tried.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes == [0x00] {
            return Ok(Self::infinity(ECCurve::Secp256r1));
        }
        Self::new(ECCurve::Secp256r1, bytes.to_vec())
            .or_else(|_| Self::new(ECCurve::Secp256k1, bytes.to_vec()))
    }

    pub fn decode_compressed(bytes: &[u8], curve: ECCurve) -> Result<Self, Error> {
        if bytes.len() != 33 {
            return Err(Error::InvalidKey("compressed point must be 33 bytes".into()));
        }
        Self::new(curve, bytes.to_vec())
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::from_hex(s)
    }

    /// Re-encodes this point in compressed form (33 bytes).
    pub fn to_compressed(&self) -> Result<Vec<u8>, Error> {
        if self.is_infinity() {
            return Ok(self.encoded.clone());
        }
        match self.curve {
            ECCurve::Secp256r1 => {
                let point = p256_affine(&self.encoded)?;
                Ok(point.to_encoded_point(true).as_bytes().to_vec())
            }
            ECCurve::Secp256k1 => {
                let point = k256_affine(&self.encoded)?;
                Ok(point.to_encoded_point(true).as_bytes().to_vec())
            }
        }
    }
}

impl Default for ECPoint {
    fn default() -> Self {
        Self::infinity(ECCurve::Secp256r1)
    }
}

fn validate_point(curve: ECCurve, bytes: &[u8]) -> Result<(), Error> {
    if bytes == [0x00] {
        return Ok(());
    }
    match curve {
        ECCurve::Secp256r1 => p256_affine(bytes).map(|_| ()),
        ECCurve::Secp256k1 => k256_affine(bytes).map(|_| ()),
    }
}

fn p256_affine(bytes: &[u8]) -> Result<Secp256r1Affine, Error> {
    let encoded = Secp256r1Encoded::from_bytes(bytes)
        .map_err(|e| Error::InvalidKey(e.to_string()))?;
    Option::from(Secp256r1Affine::from_encoded_point(&encoded))
        .ok_or_else(|| Error::InvalidKey("point not on secp256r1".into()))
}

fn k256_affine(bytes: &[u8]) -> Result<Secp256k1Affine, Error> {
    let encoded = Secp256k1Encoded::from_bytes(bytes)
        .map_err(|e| Error::InvalidKey(e.to_string()))?;
    Option::from(Secp256k1Affine::from_encoded_point(&encoded))
        .ok_or_else(|| Error::InvalidKey("point not on secp256k1".into()))
}

/// Key generation/compression helpers used by wallet key pairs (default curve secp256r1).
pub struct ECC;

impl ECC {
    pub fn generate_public_key(private_key: &[u8; 32]) -> Result<Vec<u8>, Error> {
        let signing_key = p256::ecdsa::SigningKey::from_slice(private_key)
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        let verifying_key = p256::ecdsa::VerifyingKey::from(&signing_key);
        Ok(verifying_key.to_encoded_point(false).as_bytes().to_vec())
    }

    pub fn compress_public_key(public_key: &[u8]) -> Result<Vec<u8>, Error> {
        let point = p256_affine(public_key)?;
        Ok(point.to_encoded_point(true).as_bytes().to_vec())
    }
}
