//! Cryptographic primitives for the Neo blockchain: hashing, Merkle roots,
//! elliptic-curve point encoding/signing, Base58Check, and script-hash
//! derivation for the standard verification script templates.

pub mod base58;
pub mod ecc;
pub mod ecdsa;
pub mod hash;
pub mod helper;
pub mod merkle_tree;

pub use ecc::{ECCurve, ECPoint, ECC};
pub use ecdsa::ECDsa;
pub use hash::{hash160, hash256, keccak256, ripemd160, sha256};
pub use merkle_tree::MerkleTree;

/// Error types for cryptography operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Verification failed")]
    VerificationFailed,

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
