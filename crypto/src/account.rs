//! Account id derivation from public keys.
//!
//! Format: `lat_` + base32(public_key, 52 chars) + base32(checksum, 8 chars),
//! where the checksum is the first 5 bytes of Blake2b-256(public_key).
//! The alphabet `13456789abcdefghijkmnopqrstuwxyz` leaves out look-alike characters.

use lattice_types::{AccountId, PublicKey};

const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// ASCII byte -> 5-bit value, 0xFF for characters outside the alphabet.
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[BASE32_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// 256 bits -> ceil(256 / 5) characters.
const PUBKEY_CHARS: usize = 52;

fn encode_base32(bytes: &[u8]) -> String {
    let mut result = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u64 = 0;
    let mut bits = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            result.push(BASE32_ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
        }
    }
    if bits > 0 {
        result.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
    }
    result
}

fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let val = *BASE32_DECODE.get(c as usize)?;
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            if pos < N {
                result[pos] = (buffer >> bits) as u8;
                pos += 1;
            }
        }
    }

    (pos == N).then_some(result)
}

/// Derive the account id owned by `public_key`.
pub fn derive_account_id(public_key: &PublicKey) -> AccountId {
    let checksum = crate::blake2b_256(public_key.as_bytes());
    AccountId::new(format!(
        "{}{}{}",
        AccountId::PREFIX,
        encode_base32(public_key.as_bytes()),
        encode_base32(&checksum[..5])
    ))
}

/// Extract the public key bytes from an account id.
///
/// Returns `None` if the id is malformed or its checksum does not match.
pub fn decode_account_id(account_id: &str) -> Option<[u8; 32]> {
    let encoded = account_id.strip_prefix(AccountId::PREFIX)?;
    if encoded.len() != AccountId::ENCODED_LEN || !encoded.is_ascii() {
        return None;
    }
    let (key_part, checksum_part) = encoded.split_at(PUBKEY_CHARS);

    let key: [u8; 32] = decode_base32_fixed(key_part)?;
    let checksum: [u8; 5] = decode_base32_fixed(checksum_part)?;

    (checksum[..] == crate::blake2b_256(&key)[..5]).then_some(key)
}

/// The public key an account id encodes.
pub fn public_key_of(account_id: &AccountId) -> Option<PublicKey> {
    decode_account_id(account_id.as_str()).map(PublicKey)
}

/// Well-formed and checksum-correct.
pub fn validate_account_id(account_id: &AccountId) -> bool {
    decode_account_id(account_id.as_str()).is_some()
}
