//! EIP-155 legacy transaction encoding and signing.
//!
//! The registry endpoints used here predate typed transactions, so the
//! submitter broadcasts nine-field legacy transactions with the replay-
//! protected `v = chain_id * 2 + 35 + recovery_id` encoding.

use crate::crypto::keccak::keccak256;
use crate::crypto::wallet::Wallet;
use crate::error::Result;
use crate::types::Address;

/// An unsigned legacy transaction.
#[derive(Debug, Clone)]
pub struct LegacyTransaction {
    /// Sender account nonce (not the registry permit nonce)
    pub nonce: u64,
    /// Gas price in wei
    pub gas_price: u128,
    /// Gas limit
    pub gas_limit: u64,
    /// Recipient contract
    pub to: Address,
    /// Transferred value in wei
    pub value: u128,
    /// Calldata
    pub data: Vec<u8>,
}

impl LegacyTransaction {
    /// RLP payload whose Keccak-256 hash is signed under EIP-155:
    /// `[nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0]`
    #[must_use]
    pub fn signing_payload(&self, chain_id: u64) -> Vec<u8> {
        let mut items = Vec::new();
        self.append_body(&mut items);
        append_uint(&mut items, u128::from(chain_id));
        append_uint(&mut items, 0);
        append_uint(&mut items, 0);
        wrap_list(&items)
    }

    /// Sign with `wallet` and return the raw transaction bytes ready for
    /// `eth_sendRawTransaction`
    pub fn sign(&self, wallet: &Wallet, chain_id: u64) -> Result<Vec<u8>> {
        let hash = keccak256(&self.signing_payload(chain_id));
        let (sig, recovery_id) = wallet.sign_hash(&hash)?;
        let v = chain_id * 2 + 35 + u64::from(recovery_id.to_byte());

        let bytes = sig.to_bytes();
        let mut items = Vec::new();
        self.append_body(&mut items);
        append_uint(&mut items, u128::from(v));
        append_bytes(&mut items, strip_leading_zeros(&bytes[..32]));
        append_bytes(&mut items, strip_leading_zeros(&bytes[32..]));
        Ok(wrap_list(&items))
    }

    fn append_body(&self, out: &mut Vec<u8>) {
        append_uint(out, u128::from(self.nonce));
        append_uint(out, self.gas_price);
        append_uint(out, u128::from(self.gas_limit));
        append_bytes(out, self.to.as_bytes());
        append_uint(out, self.value);
        append_bytes(out, &self.data);
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn append_length(out: &mut Vec<u8>, len: usize, offset: u8) {
    if len < 56 {
        out.push(offset + len as u8);
    } else {
        let be = len.to_be_bytes();
        let be = strip_leading_zeros(&be);
        out.push(offset + 55 + be.len() as u8);
        out.extend_from_slice(be);
    }
}

fn append_bytes(out: &mut Vec<u8>, data: &[u8]) {
    if data.len() == 1 && data[0] < 0x80 {
        out.push(data[0]);
    } else {
        append_length(out, data.len(), 0x80);
        out.extend_from_slice(data);
    }
}

fn append_uint(out: &mut Vec<u8>, value: u128) {
    let be = value.to_be_bytes();
    append_bytes(out, strip_leading_zeros(&be));
}

fn wrap_list(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    append_length(&mut out, payload.len(), 0xc0);
    out.extend_from_slice(payload);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rlp_string_vectors() {
        let mut out = Vec::new();
        append_bytes(&mut out, b"dog");
        assert_eq!(hex::encode(&out), "83646f67");

        out.clear();
        append_bytes(&mut out, b"");
        assert_eq!(hex::encode(&out), "80");

        out.clear();
        append_bytes(&mut out, &[0x7f]);
        assert_eq!(hex::encode(&out), "7f");
    }

    #[test]
    fn rlp_uint_vectors() {
        let mut out = Vec::new();
        append_uint(&mut out, 0);
        assert_eq!(hex::encode(&out), "80");

        out.clear();
        append_uint(&mut out, 15);
        assert_eq!(hex::encode(&out), "0f");

        out.clear();
        append_uint(&mut out, 1024);
        assert_eq!(hex::encode(&out), "820400");
    }

    #[test]
    fn rlp_list_vector() {
        let mut items = Vec::new();
        append_bytes(&mut items, b"cat");
        append_bytes(&mut items, b"dog");
        assert_eq!(hex::encode(wrap_list(&items)), "c88363617483646f67");
    }

    #[test]
    fn eip155_example_transaction() {
        // The worked example from the EIP-155 specification.
        let tx = LegacyTransaction {
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: "0x3535353535353535353535353535353535353535".parse().unwrap(),
            value: 1_000_000_000_000_000_000,
            data: Vec::new(),
        };

        let payload = tx.signing_payload(1);
        assert_eq!(
            hex::encode(&payload),
            "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
        );
        assert_eq!(
            hex::encode(keccak256(&payload)),
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );

        let wallet = Wallet::from_hex(
            "0x4646464646464646464646464646464646464646464646464646464646464646",
        )
        .unwrap();
        let raw = tx.sign(&wallet, 1).unwrap();

        // Signed form is a list carrying the six body fields plus v, r, s,
        // with v = 1 * 2 + 35 + recovery_id.
        assert_eq!(raw[0], 0xf8);
        let encoded = hex::encode(&raw);
        assert!(encoded.contains("098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080"));
        assert!(encoded.contains("25a0") || encoded.contains("26a0")); // v = 37 or 38
    }
}
