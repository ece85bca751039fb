//! Twisted Edwards (ed25519) key families.
//!
//! Public keys are encoded as `0x00 ∥ A` so that every curve shares the 33-byte
//! compressed layout used by extended-key serialization and fingerprints.

use crate::Bip32Error;
use crate::curve::CurveKind;
use crate::keys::CurveKeys;
use crypto_utils::hash::blake2b512;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::IsIdentity;
use ed25519_dalek::SigningKey;

const PUBLIC_KEY_PREFIX: u8 = 0x00;

fn encode_point(point: &EdwardsPoint) -> [u8; 33] {
    prefixed(point.compress().to_bytes())
}

fn prefixed(a: [u8; 32]) -> [u8; 33] {
    let mut out = [0u8; 33];
    out[0] = PUBLIC_KEY_PREFIX;
    out[1..].copy_from_slice(&a);
    out
}

/// Accepts a bare 32-byte point or one carrying the `0x00` prefix.
fn decode_point(bytes: &[u8]) -> Result<EdwardsPoint, Bip32Error> {
    let raw = match bytes.len() {
        33 if bytes[0] == PUBLIC_KEY_PREFIX => &bytes[1..],
        32 => bytes,
        _ => return Err(Bip32Error::InvalidKeyData),
    };
    let compressed = CompressedEdwardsY::from_slice(raw).map_err(|_| Bip32Error::InvalidKeyData)?;
    let point = compressed.decompress().ok_or(Bip32Error::InvalidKeyData)?;
    // Only the canonical encoding of a point outside the torsion subgroup.
    if point.compress().as_bytes()[..] != raw[..] || point.is_small_order() {
        return Err(Bip32Error::InvalidKeyData);
    }
    Ok(point)
}

fn seed_bytes(bytes: &[u8]) -> Result<[u8; 32], Bip32Error> {
    bytes.try_into().map_err(|_| Bip32Error::InvalidKeyData)
}

fn canonical_scalar(bytes: &[u8; 32]) -> Result<Scalar, Bip32Error> {
    let scalar: Scalar =
        Option::from(Scalar::from_canonical_bytes(*bytes)).ok_or(Bip32Error::InvalidKeyData)?;
    if scalar == Scalar::ZERO {
        return Err(Bip32Error::InvalidKeyData);
    }
    Ok(scalar)
}

fn add_edwards(a: &[u8; 33], b: &[u8; 33]) -> Result<[u8; 33], Bip32Error> {
    let sum = decode_point(a)? + decode_point(b)?;
    if sum.is_identity() {
        return Err(Bip32Error::InvalidKeyData);
    }
    Ok(encode_point(&sum))
}

fn mul_base(scalar: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
    Ok(encode_point(&EdwardsPoint::mul_base(&canonical_scalar(scalar)?)))
}

fn reencode(compressed: &[u8; 33]) -> Result<Vec<u8>, Bip32Error> {
    Ok(encode_point(&decode_point(compressed)?).to_vec())
}

/// SLIP-0010 ed25519: private keys are opaque 32-byte seeds expanded with SHA-512.
pub struct Ed25519Keys;

impl CurveKeys for Ed25519Keys {
    fn kind(&self) -> CurveKind {
        CurveKind::Ed25519
    }

    fn parse_private(&self, bytes: &[u8]) -> Result<[u8; 32], Bip32Error> {
        seed_bytes(bytes)
    }

    fn parse_public(&self, bytes: &[u8]) -> Result<[u8; 33], Bip32Error> {
        let point = decode_point(bytes)?;
        ed25519_dalek::VerifyingKey::from_bytes(&point.compress().to_bytes())
            .map_err(|_| Bip32Error::InvalidKeyData)?;
        Ok(encode_point(&point))
    }

    fn public_from_private(&self, private: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        Ok(prefixed(SigningKey::from_bytes(private).verifying_key().to_bytes()))
    }

    fn private_from_seed_half(&self, il: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        Ok(*il)
    }

    fn add_points(&self, a: &[u8; 33], b: &[u8; 33]) -> Result<[u8; 33], Bip32Error> {
        add_edwards(a, b)
    }

    fn mul_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        mul_base(scalar)
    }

    fn add_scalars(&self, _a: &[u8; 32], _b: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        Err(Bip32Error::UnsupportedDerivation)
    }

    fn uncompressed(&self, compressed: &[u8; 33]) -> Result<Vec<u8>, Bip32Error> {
        reencode(compressed)
    }
}

/// ed25519 with Blake2b-512 in place of SHA-512 for key expansion.
pub struct Ed25519Blake2bKeys;

impl CurveKeys for Ed25519Blake2bKeys {
    fn kind(&self) -> CurveKind {
        CurveKind::Ed25519Blake2b
    }

    fn parse_private(&self, bytes: &[u8]) -> Result<[u8; 32], Bip32Error> {
        seed_bytes(bytes)
    }

    fn parse_public(&self, bytes: &[u8]) -> Result<[u8; 33], Bip32Error> {
        Ok(encode_point(&decode_point(bytes)?))
    }

    fn public_from_private(&self, private: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        let expanded = blake2b512(private);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&expanded[..32]);
        Ok(encode_point(&EdwardsPoint::mul_base_clamped(secret)))
    }

    fn private_from_seed_half(&self, il: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        Ok(*il)
    }

    fn add_points(&self, a: &[u8; 33], b: &[u8; 33]) -> Result<[u8; 33], Bip32Error> {
        add_edwards(a, b)
    }

    fn mul_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        mul_base(scalar)
    }

    fn add_scalars(&self, _a: &[u8; 32], _b: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        Err(Bip32Error::UnsupportedDerivation)
    }

    fn uncompressed(&self, compressed: &[u8; 33]) -> Result<Vec<u8>, Bip32Error> {
        reencode(compressed)
    }
}

/// Monero-style ed25519: the spend scalar is the private seed reduced modulo
/// the group order, and `A = (k mod ℓ)·B`.
///
/// The reduction happens only when the public key is computed, so child
/// derivation keeps `k_i = IL` like the other ed25519 families.
pub struct Ed25519MoneroKeys;

fn monero_scalar(private: &[u8; 32]) -> Result<Scalar, Bip32Error> {
    let reduced = Scalar::from_bytes_mod_order(*private);
    if reduced == Scalar::ZERO {
        return Err(Bip32Error::InvalidKeyData);
    }
    Ok(reduced)
}

impl CurveKeys for Ed25519MoneroKeys {
    fn kind(&self) -> CurveKind {
        CurveKind::Ed25519Monero
    }

    fn parse_private(&self, bytes: &[u8]) -> Result<[u8; 32], Bip32Error> {
        let seed = seed_bytes(bytes)?;
        monero_scalar(&seed)?;
        Ok(seed)
    }

    fn parse_public(&self, bytes: &[u8]) -> Result<[u8; 33], Bip32Error> {
        Ok(encode_point(&decode_point(bytes)?))
    }

    fn public_from_private(&self, private: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        Ok(encode_point(&EdwardsPoint::mul_base(&monero_scalar(private)?)))
    }

    fn private_from_seed_half(&self, il: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        Ok(*il)
    }

    fn add_points(&self, a: &[u8; 33], b: &[u8; 33]) -> Result<[u8; 33], Bip32Error> {
        add_edwards(a, b)
    }

    fn mul_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        mul_base(scalar)
    }

    fn add_scalars(&self, _a: &[u8; 32], _b: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        Err(Bip32Error::UnsupportedDerivation)
    }

    fn uncompressed(&self, compressed: &[u8; 33]) -> Result<Vec<u8>, Bip32Error> {
        reencode(compressed)
    }
}
