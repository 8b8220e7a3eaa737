//! Hash function seam and packed field encoding
//!
//! Fields are hashed as the concatenation of their fixed-width big-endian
//! encodings, in argument order.

use sha2::{Digest as _, Sha256};

use crate::types::{Address, Digest};

/// One-way hash over a sequence of byte slices
pub trait SeedHasher {
    fn hashv(&self, parts: &[&[u8]]) -> Digest;
}

/// SHA-256, the default off-chain hasher
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl SeedHasher for Sha256Hasher {
    fn hashv(&self, parts: &[&[u8]]) -> Digest {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().into()
    }
}

impl<H: SeedHasher + ?Sized> SeedHasher for &H {
    fn hashv(&self, parts: &[&[u8]]) -> Digest {
        (**self).hashv(parts)
    }
}

/// A single field of a packed hash preimage
#[derive(Clone, Copy, Debug)]
pub enum Field<'a> {
    U64(u64),
    I64(i64),
    U128(u128),
    I128(i128),
    Address(&'a Address),
    Digest(&'a Digest),
}

impl Field<'_> {
    fn write(&self, out: &mut Vec<u8>) {
        match self {
            Field::U64(v) => out.extend_from_slice(&v.to_be_bytes()),
            Field::I64(v) => out.extend_from_slice(&v.to_be_bytes()),
            Field::U128(v) => out.extend_from_slice(&v.to_be_bytes()),
            Field::I128(v) => out.extend_from_slice(&v.to_be_bytes()),
            Field::Address(a) => out.extend_from_slice(a.as_bytes()),
            Field::Digest(d) => out.extend_from_slice(&d[..]),
        }
    }
}

/// Packed encoding of `fields`
pub fn encode_packed(fields: &[Field<'_>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(fields.len() * 32);
    for field in fields {
        field.write(&mut out);
    }
    out
}

/// Hash the packed encoding of `fields`
pub fn hash_fields<H: SeedHasher + ?Sized>(hasher: &H, fields: &[Field<'_>]) -> Digest {
    let preimage = encode_packed(fields);
    hasher.hashv(&[preimage.as_slice()])
}

/// `uint(digest) mod modulus`, reading the digest as a big-endian 256-bit integer
///
/// Returns 0 for a zero modulus.
pub fn digest_mod(digest: &Digest, modulus: u64) -> u64 {
    if modulus == 0 {
        return 0;
    }
    let m = modulus as u128;
    let mut rem = 0u128;
    for &byte in digest.iter() {
        // rem < m <= 2^64, so rem * 256 + 255 cannot overflow u128
        rem = (rem * 256 + byte as u128) % m;
    }
    rem as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256("abc")
        let digest = Sha256Hasher.hashv(&[b"abc".as_slice()]);
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hashv_is_concatenation() {
        let split = Sha256Hasher.hashv(&[b"ab".as_slice(), b"c".as_slice()]);
        let whole = Sha256Hasher.hashv(&[b"abc".as_slice()]);
        assert_eq!(split, whole);
    }

    #[test]
    fn test_encode_packed_widths() {
        let addr = Address([0x11; 32]);
        let digest = [0x22u8; 32];
        let bytes = encode_packed(&[
            Field::U64(1),
            Field::I64(-1),
            Field::U128(2),
            Field::I128(-2),
            Field::Address(&addr),
            Field::Digest(&digest),
        ]);
        assert_eq!(bytes.len(), 8 + 8 + 16 + 16 + 32 + 32);
        assert_eq!(&bytes[0..8], &[0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(&bytes[8..16], &[0xff; 8]);
        assert_eq!(bytes[31], 2);
        assert_eq!(&bytes[32..48], &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                                     0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);
        assert_eq!(&bytes[48..80], &[0x11; 32]);
        assert_eq!(&bytes[80..112], &[0x22; 32]);
    }

    #[test]
    fn test_digest_mod_small_values() {
        let mut digest = [0u8; 32];
        digest[31] = 17;
        assert_eq!(digest_mod(&digest, 5), 2);
        assert_eq!(digest_mod(&digest, 1), 0);
        assert_eq!(digest_mod(&digest, 0), 0);

        digest[30] = 1; // 256 + 17 = 273
        assert_eq!(digest_mod(&digest, 10), 3);
    }

    #[test]
    fn test_digest_mod_full_width() {
        // 2^256 - 1 mod 3 == 0 (2^256 ≡ 1 mod 3), mod 7: 2^256 ≡ 2^(256 mod 3) = 2^1 → 2 - 1 = 1
        let digest = [0xffu8; 32];
        assert_eq!(digest_mod(&digest, 3), 0);
        assert_eq!(digest_mod(&digest, 7), 1);
        assert_eq!(digest_mod(&digest, u64::MAX), 0); // 2^64 - 1 divides 2^256 - 1
    }
}
