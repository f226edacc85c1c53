//! Script-hash derivation and the standard verification script templates
//! (single-sig and multi-sig) that Neo accounts are built from.

use crate::ecc::ECPoint;
use crate::hash::hash160;
use crate::Error;

const PUSHDATA1: u8 = 0x0c;
const SYSCALL: u8 = 0x41;
/// `System.Crypto.CheckSig` interop method id.
const CHECK_SIG: [u8; 4] = [0x41, 0x13, 0xc3, 0xdd];
/// `System.Crypto.CheckMultisig` interop method id.
const CHECK_MULTISIG: [u8; 4] = [0x13, 0xf5, 0xb0, 0x9d];

/// `Hash160` of a script, i.e. its Neo script hash / account identifier.
pub fn script_hash(script: &[u8]) -> [u8; 20] {
    hash160(script)
}

/// Builds the standard single-signature verification script for `public_key`
/// and returns its script hash directly.
pub fn public_key_to_script_hash(public_key: &[u8]) -> Result<[u8; 20], Error> {
    Ok(script_hash(&single_sig_script(public_key)?))
}

fn push_data(buf: &mut Vec<u8>, data: &[u8]) {
    buf.push(PUSHDATA1);
    buf.push(data.len() as u8);
    buf.extend_from_slice(data);
}

fn push_int(buf: &mut Vec<u8>, n: u8) {
    // PUSH1..PUSH16 are opcodes 0x11..0x20.
    buf.push(0x10 + n);
}

/// `PUSHDATA pubkey SYSCALL CheckSig`.
pub fn single_sig_script(public_key: &[u8]) -> Result<Vec<u8>, Error> {
    if public_key.len() != 33 {
        return Err(Error::InvalidKey("public key must be compressed (33 bytes)".into()));
    }
    let mut script = Vec::with_capacity(40);
    push_data(&mut script, public_key);
    script.push(SYSCALL);
    script.extend_from_slice(&CHECK_SIG);
    Ok(script)
}

/// Builds the standard `m`-of-`n` multi-signature verification script:
/// `PUSH m, PUSHDATA pk_1 .. pk_n (ascending), PUSH n, SYSCALL CheckMultisig`.
///
/// Requires `1 <= m <= n <= 1024`; public keys are sorted ascending by their
/// compressed encoding before being embedded, matching account derivation.
pub fn multi_sig_script(m: usize, public_keys: &[ECPoint]) -> Result<Vec<u8>, Error> {
    let n = public_keys.len();
    if m == 0 || m > n || n > 1024 {
        return Err(Error::InvalidFormat(format!(
            "invalid multisig parameters: m={m}, n={n}"
        )));
    }

    let mut keys: Vec<Vec<u8>> = public_keys
        .iter()
        .map(|p| p.to_compressed())
        .collect::<Result<_, _>>()?;
    keys.sort();

    let mut script = Vec::with_capacity(40 * n + 8);
    push_int(&mut script, m as u8);
    for key in &keys {
        push_data(&mut script, key);
    }
    push_int(&mut script, n as u8);
    script.push(SYSCALL);
    script.extend_from_slice(&CHECK_MULTISIG);
    Ok(script)
}

/// Script hash of the standard `m`-of-`n` multi-signature account.
pub fn multi_sig_script_hash(m: usize, public_keys: &[ECPoint]) -> Result<[u8; 20], Error> {
    Ok(script_hash(&multi_sig_script(m, public_keys)?))
}
