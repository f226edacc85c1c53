//! Base58 and Base58Check (Bitcoin-style, double-SHA256 checksum) encoding.

use crate::hash::hash256;
use crate::Error;

pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

pub fn decode(s: &str) -> Result<Vec<u8>, Error> {
    bs58::decode(s).into_vec().map_err(|e| Error::InvalidFormat(e.to_string()))
}

pub fn encode_check(data: &[u8]) -> String {
    let mut buf = data.to_vec();
    buf.extend_from_slice(&hash256(data)[..4]);
    encode(&buf)
}

pub fn decode_check(s: &str) -> Result<Vec<u8>, Error> {
    let decoded = decode(s)?;
    if decoded.len() < 4 {
        return Err(Error::InvalidFormat("base58check payload too short".into()));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    if hash256(payload)[..4] != *checksum {
        return Err(Error::InvalidFormat("base58check checksum mismatch".into()));
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_round_trips() {
        let payload = b"neo script hash payload";
        let encoded = encode_check(payload);
        assert_eq!(decode_check(&encoded).unwrap(), payload);
    }

    #[test]
    fn tampered_checksum_is_rejected() {
        let mut encoded = encode_check(b"payload").into_bytes();
        encoded[0] ^= 1;
        let encoded = String::from_utf8_lossy(&encoded).to_string();
        assert!(decode_check(&encoded).is_err());
    }
}
