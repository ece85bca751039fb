//! Short-Weierstrass curves: secp256k1 (via `secp256k1`) and NIST P-256 (via `p256`).

use crate::Bip32Error;
use crate::curve::CurveKind;
use crate::keys::CurveKeys;
use p256::elliptic_curve::PrimeField;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use secp256k1::{PublicKey, SECP256K1, Scalar, SecretKey};

pub struct Secp256k1Keys;

fn secp_secret(bytes: &[u8]) -> Result<SecretKey, Bip32Error> {
    SecretKey::from_slice(bytes).map_err(|_| Bip32Error::InvalidKeyData)
}

fn secp_point(bytes: &[u8]) -> Result<PublicKey, Bip32Error> {
    PublicKey::from_slice(bytes).map_err(|_| Bip32Error::InvalidKeyData)
}

impl CurveKeys for Secp256k1Keys {
    fn kind(&self) -> CurveKind {
        CurveKind::Secp256k1
    }

    fn parse_private(&self, bytes: &[u8]) -> Result<[u8; 32], Bip32Error> {
        secp_secret(bytes).map(|sk| sk.secret_bytes())
    }

    fn parse_public(&self, bytes: &[u8]) -> Result<[u8; 33], Bip32Error> {
        secp_point(bytes).map(|pk| pk.serialize())
    }

    fn public_from_private(&self, private: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        let sk = secp_secret(private)?;
        Ok(PublicKey::from_secret_key(SECP256K1, &sk).serialize())
    }

    fn private_from_seed_half(&self, il: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        self.parse_private(il)
    }

    fn add_points(&self, a: &[u8; 33], b: &[u8; 33]) -> Result<[u8; 33], Bip32Error> {
        let sum = secp_point(a)?
            .combine(&secp_point(b)?)
            .map_err(|_| Bip32Error::InvalidKeyData)?;
        Ok(sum.serialize())
    }

    fn mul_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        self.public_from_private(scalar)
    }

    fn add_scalars(&self, a: &[u8; 32], b: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        let tweak = Scalar::from_be_bytes(*b).map_err(|_| Bip32Error::InvalidKeyData)?;
        let sum = secp_secret(a)?
            .add_tweak(&tweak)
            .map_err(|_| Bip32Error::InvalidKeyData)?;
        Ok(sum.secret_bytes())
    }

    fn uncompressed(&self, compressed: &[u8; 33]) -> Result<Vec<u8>, Bip32Error> {
        Ok(secp_point(compressed)?.serialize_uncompressed().to_vec())
    }
}

pub struct Nist256p1Keys;

fn p256_secret(bytes: &[u8]) -> Result<p256::SecretKey, Bip32Error> {
    let bytes: [u8; 32] = bytes.try_into().map_err(|_| Bip32Error::InvalidKeyData)?;
    p256::SecretKey::from_bytes(&bytes.into()).map_err(|_| Bip32Error::InvalidKeyData)
}

fn p256_point(bytes: &[u8]) -> Result<p256::PublicKey, Bip32Error> {
    p256::PublicKey::from_sec1_bytes(bytes).map_err(|_| Bip32Error::InvalidKeyData)
}

fn p256_compressed(point: &p256::PublicKey) -> Result<[u8; 33], Bip32Error> {
    point
        .to_encoded_point(true)
        .as_bytes()
        .try_into()
        .map_err(|_| Bip32Error::InvalidKeyData)
}

impl CurveKeys for Nist256p1Keys {
    fn kind(&self) -> CurveKind {
        CurveKind::Nist256p1
    }

    fn parse_private(&self, bytes: &[u8]) -> Result<[u8; 32], Bip32Error> {
        p256_secret(bytes).map(|sk| sk.to_bytes().into())
    }

    fn parse_public(&self, bytes: &[u8]) -> Result<[u8; 33], Bip32Error> {
        p256_compressed(&p256_point(bytes)?)
    }

    fn public_from_private(&self, private: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        p256_compressed(&p256_secret(private)?.public_key())
    }

    fn private_from_seed_half(&self, il: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        self.parse_private(il)
    }

    fn add_points(&self, a: &[u8; 33], b: &[u8; 33]) -> Result<[u8; 33], Bip32Error> {
        let sum = p256_point(a)?.to_projective() + p256_point(b)?.to_projective();
        let sum = p256::PublicKey::from_affine(sum.to_affine())
            .map_err(|_| Bip32Error::InvalidKeyData)?;
        p256_compressed(&sum)
    }

    fn mul_generator(&self, scalar: &[u8; 32]) -> Result<[u8; 33], Bip32Error> {
        self.public_from_private(scalar)
    }

    fn add_scalars(&self, a: &[u8; 32], b: &[u8; 32]) -> Result<[u8; 32], Bip32Error> {
        let tweak: p256::Scalar =
            Option::from(p256::Scalar::from_repr((*b).into()))
                .ok_or(Bip32Error::InvalidKeyData)?;
        let sum = *p256_secret(a)?.to_nonzero_scalar() + tweak;
        p256::SecretKey::from_bytes(&sum.to_repr())
            .map(|sk| sk.to_bytes().into())
            .map_err(|_| Bip32Error::InvalidKeyData)
    }

    fn uncompressed(&self, compressed: &[u8; 33]) -> Result<Vec<u8>, Bip32Error> {
        Ok(p256_point(compressed)?
            .to_encoded_point(false)
            .as_bytes()
            .to_vec())
    }
}
