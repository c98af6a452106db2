//! Minimal contract ABI encoding for the registry and ERC-721 calls.
//!
//! Only the fixed call shapes this workflow needs are supported: static
//! 32-byte words plus the single dynamic `string` parameter of `register`.

use crate::crypto::keccak::selector;
use crate::error::{IoidError, Result};
use crate::types::{Address, Digest, RecoveredSignature};

/// Left-pad an address into a 32-byte word
#[must_use]
fn address_word(addr: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(addr.as_bytes());
    word
}

/// Big-endian `uint256` word from a `u64`
#[must_use]
fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Build calldata from a selector and a sequence of static words
fn encode_static(sig: &str, words: &[[u8; 32]]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32 * words.len());
    data.extend_from_slice(&selector(sig));
    for word in words {
        data.extend_from_slice(word);
    }
    data
}

/// Calldata for `nonces(address)`
#[must_use]
pub fn nonces_call(device: Address) -> Vec<u8> {
    encode_static("nonces(address)", &[address_word(device)])
}

/// Calldata for
/// `register(address,uint256,address,address,bytes32,string,uint8,bytes32,bytes32)`.
///
/// The `uri` string is the only dynamic parameter; its head slot holds the
/// byte offset of the length-prefixed tail.
#[must_use]
pub fn register_call(
    device_contract: Address,
    token_id: u64,
    owner: Address,
    device: Address,
    hash: &Digest,
    uri: &str,
    sig: &RecoveredSignature,
) -> Vec<u8> {
    const SIG: &str =
        "register(address,uint256,address,address,bytes32,string,uint8,bytes32,bytes32)";
    // Nine head words, so the dynamic tail starts at 9 * 32.
    let uri_offset = 9 * 32;

    let mut data = encode_static(
        SIG,
        &[
            address_word(device_contract),
            u64_word(token_id),
            address_word(owner),
            address_word(device),
            *hash.as_bytes(),
            u64_word(uri_offset),
            u64_word(u64::from(sig.v)),
            sig.r,
            sig.s,
        ],
    );

    data.extend_from_slice(&u64_word(uri.len() as u64));
    data.extend_from_slice(uri.as_bytes());
    let padding = (32 - uri.len() % 32) % 32;
    data.extend_from_slice(&vec![0u8; padding]);
    data
}

/// Calldata for `balanceOf(address)`
#[must_use]
pub fn balance_of_call(owner: Address) -> Vec<u8> {
    encode_static("balanceOf(address)", &[address_word(owner)])
}

/// Calldata for `ownerOf(uint256)`
#[must_use]
pub fn owner_of_call(token_id: u64) -> Vec<u8> {
    encode_static("ownerOf(uint256)", &[u64_word(token_id)])
}

/// Calldata for `getApproved(uint256)`
#[must_use]
pub fn get_approved_call(token_id: u64) -> Vec<u8> {
    encode_static("getApproved(uint256)", &[u64_word(token_id)])
}

/// Calldata for `approve(address,uint256)`
#[must_use]
pub fn approve_call(spender: Address, token_id: u64) -> Vec<u8> {
    encode_static("approve(address,uint256)", &[address_word(spender), u64_word(token_id)])
}

/// Calldata for `transferFrom(address,address,uint256)`
#[must_use]
pub fn transfer_from_call(from: Address, to: Address, token_id: u64) -> Vec<u8> {
    encode_static(
        "transferFrom(address,address,uint256)",
        &[address_word(from), address_word(to), u64_word(token_id)],
    )
}

/// Decode a returned 32-byte word as an address
pub fn decode_address(word: &[u8]) -> Result<Address> {
    if word.len() != 32 {
        return Err(IoidError::Rpc {
            method: "eth_call".to_string(),
            message: format!("expected a 32-byte return word, got {} bytes", word.len()),
        });
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&word[12..]);
    Ok(Address::new(out))
}

/// Decode a returned 32-byte word as a `u64`, rejecting out-of-range values
pub fn decode_u64(word: &[u8]) -> Result<u64> {
    if word.len() != 32 || word[..24].iter().any(|b| *b != 0) {
        return Err(IoidError::Rpc {
            method: "eth_call".to_string(),
            message: format!("return word does not fit in u64: 0x{}", hex::encode(word)),
        });
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    #[test]
    fn nonces_calldata_layout() {
        let data = nonces_call(addr(0x11));
        assert_eq!(data.len(), 4 + 32);
        // Address is right-aligned in its word.
        assert_eq!(&data[4..16], &[0u8; 12]);
        assert_eq!(&data[16..36], addr(0x11).as_bytes());
    }

    #[test]
    fn register_calldata_layout() {
        let sig = RecoveredSignature {
            r: [0xaa; 32],
            s: [0xbb; 32],
            v: 28,
        };
        let uri = "ipfs://QmTest";
        let data = register_call(addr(1), 7, addr(2), addr(3), &Digest::new([0xcc; 32]), uri, &sig);

        // selector + 9 head words + length word + one padded content word
        assert_eq!(data.len(), 4 + 9 * 32 + 32 + 32);

        let word = |i: usize| &data[4 + i * 32..4 + (i + 1) * 32];
        assert_eq!(word(1)[31], 7); // tokenId
        assert_eq!(word(4), &[0xcc; 32]); // digest hash
        assert_eq!(word(5)[31], 0x20); // uri offset = 0x120
        assert_eq!(word(5)[30], 0x01);
        assert_eq!(word(6)[31], 28); // v
        assert_eq!(word(7), &[0xaa; 32]); // r
        assert_eq!(word(8), &[0xbb; 32]); // s
        assert_eq!(word(9)[31] as usize, uri.len());
        assert_eq!(&word(10)[..uri.len()], uri.as_bytes());
    }

    #[test]
    fn uri_length_multiple_of_32_gets_no_padding() {
        let sig = RecoveredSignature { r: [0; 32], s: [0; 32], v: 27 };
        let uri = "ipfs://".to_string() + &"Q".repeat(25); // exactly 32 bytes
        let data = register_call(addr(1), 0, addr(2), addr(3), &Digest::new([0; 32]), &uri, &sig);
        assert_eq!(data.len(), 4 + 9 * 32 + 32 + 32);
    }

    #[test]
    fn decode_round_trips() {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(addr(0x42).as_bytes());
        assert_eq!(decode_address(&word).unwrap(), addr(0x42));

        assert_eq!(decode_u64(&u64_word(123_456)).unwrap(), 123_456);
        let mut big = [0xff; 32];
        big[31] = 1;
        assert!(decode_u64(&big).is_err());
    }
}
