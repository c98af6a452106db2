//! Recovery-parameter disambiguation for raw device signatures.
//!
//! A secp256k1 signature over a digest admits exactly two candidate public
//! keys, selected by a one-bit recovery discriminant the device's signing
//! endpoint does not reliably report. Both candidates are tried and the one
//! whose derived address matches the device's DID address wins. Defaulting to
//! a fixed discriminant would collapse device authentication to "any
//! signature accepted", so no match is a hard failure.

use crate::crypto::keccak::address_from_pubkey;
use crate::error::{IoidError, Result};
use crate::types::{Address, Digest, RecoveredSignature};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

/// One recovery attempt: the discriminant tried and the address it yields
struct Candidate {
    recovery_id: RecoveryId,
    recovered: Address,
}

/// Decode a raw device signature against `digest` and select the recovery
/// discriminant under which it verifies for `expected_signer`.
///
/// The signature layout is fixed: bytes 0..32 are `r`, bytes 32..64 are `s`.
/// Any trailing discriminant byte the device appended is discarded rather
/// than trusted.
pub fn disambiguate(
    digest: &Digest,
    signature: &[u8],
    expected_signer: Address,
) -> Result<RecoveredSignature> {
    if signature.len() < 64 {
        return Err(IoidError::InvalidSignature(format!(
            "signature must carry two 32-byte scalars, got {} bytes",
            signature.len()
        )));
    }

    let mut sig = Signature::from_slice(&signature[..64])
        .map_err(|e| IoidError::InvalidSignature(format!("malformed scalars: {e}")))?;
    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
    }

    let candidates = [RecoveryId::new(false, false), RecoveryId::new(true, false)]
        .into_iter()
        .filter_map(|recovery_id| {
            VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
                .ok()
                .map(|key| Candidate {
                    recovery_id,
                    recovered: address_from_pubkey(&key),
                })
        });

    for candidate in candidates {
        if candidate.recovered == expected_signer {
            let mut r = [0u8; 32];
            let mut s = [0u8; 32];
            let bytes = sig.to_bytes();
            r.copy_from_slice(&bytes[..32]);
            s.copy_from_slice(&bytes[32..]);
            return Ok(RecoveredSignature {
                r,
                s,
                v: 27 + candidate.recovery_id.to_byte(),
            });
        }
    }

    // Either a forged/corrupted signature or a digest mismatch (e.g. a stale
    // nonce was signed).
    Err(IoidError::InvalidSignature(format!(
        "neither recovery candidate matches signer {expected_signer}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keccak::address_from_pubkey;
    use k256::ecdsa::SigningKey;

    fn device_key() -> SigningKey {
        SigningKey::from_slice(&[0x11; 32]).unwrap()
    }

    fn other_key() -> SigningKey {
        SigningKey::from_slice(&[0x22; 32]).unwrap()
    }

    fn sign_raw(key: &SigningKey, digest: &Digest) -> (Vec<u8>, u8) {
        let (sig, recovery_id) = key.sign_prehash_recoverable(digest.as_bytes()).unwrap();
        (sig.to_bytes().to_vec(), recovery_id.to_byte())
    }

    #[test]
    fn recovers_correct_discriminant() {
        let key = device_key();
        let signer = address_from_pubkey(key.verifying_key());
        let digest = Digest::new([0x42; 32]);

        let (raw, recovery_byte) = sign_raw(&key, &digest);
        let recovered = disambiguate(&digest, &raw, signer).unwrap();

        assert_eq!(recovered.v, 27 + recovery_byte);
        assert_eq!(&recovered.r, &raw[..32]);
        assert_eq!(&recovered.s, &raw[32..64]);
    }

    #[test]
    fn both_discriminants_are_reachable() {
        // RFC 6979 signatures are deterministic per (key, digest), so sweep
        // digests until both parities have been observed.
        let key = device_key();
        let signer = address_from_pubkey(key.verifying_key());
        let mut seen = [false, false];

        for byte in 0u8..=255 {
            let digest = Digest::new([byte; 32]);
            let (raw, _) = sign_raw(&key, &digest);
            let recovered = disambiguate(&digest, &raw, signer).unwrap();
            seen[(recovered.v - 27) as usize] = true;
            if seen[0] && seen[1] {
                return;
            }
        }
        panic!("never observed both recovery discriminants");
    }

    #[test]
    fn ignores_trailing_discriminant_byte() {
        let key = device_key();
        let signer = address_from_pubkey(key.verifying_key());
        let digest = Digest::new([0x42; 32]);

        let (mut raw, _) = sign_raw(&key, &digest);
        raw.push(0xff); // junk the device might append
        assert!(disambiguate(&digest, &raw, signer).is_ok());
    }

    #[test]
    fn rejects_wrong_signer() {
        let digest = Digest::new([0x42; 32]);
        let (raw, _) = sign_raw(&other_key(), &digest);
        let signer = address_from_pubkey(device_key().verifying_key());

        let err = disambiguate(&digest, &raw, signer).unwrap_err();
        assert!(matches!(err, IoidError::InvalidSignature(_)));
    }

    #[test]
    fn rejects_signature_over_different_digest() {
        let key = device_key();
        let signer = address_from_pubkey(key.verifying_key());

        let (raw, _) = sign_raw(&key, &Digest::new([0x42; 32]));
        let err = disambiguate(&Digest::new([0x43; 32]), &raw, signer).unwrap_err();
        assert!(matches!(err, IoidError::InvalidSignature(_)));
    }

    #[test]
    fn rejects_truncated_signature() {
        let signer = address_from_pubkey(device_key().verifying_key());
        let err = disambiguate(&Digest::new([0; 32]), &[0u8; 63], signer).unwrap_err();
        assert!(matches!(err, IoidError::InvalidSignature(_)));
    }
}
