//! Master key generation: `I = HMAC(key = curve tag, data = seed)`, `IL` becomes
//! the private key and `IR` the chain code.

use crate::Bip32Error;
use crate::curve::CurveKind;
use crate::extended_key::{ExtendedKey, KeyNetVersions};
use crate::keys::{KeyMaterial, PrivateKey};

/// Splits a 64-byte HMAC output into `IL` and `IR`.
pub(crate) fn split_halves(i: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}

/// Derives the depth-0 extended private key of `curve` from `seed`.
///
/// An `IL` that is not a valid private key is fatal for this seed and curve;
/// no retry happens here.
pub fn derive_master_key(
    seed: &[u8],
    curve: CurveKind,
    versions: KeyNetVersions,
) -> Result<ExtendedKey, Bip32Error> {
    let params = curve.params();
    let i = params.hmac_hash.mac(params.master_hmac_key, &[seed]);
    master_from_output(&i, curve, versions)
}

fn master_from_output(
    i: &[u8; 64],
    curve: CurveKind,
    versions: KeyNetVersions,
) -> Result<ExtendedKey, Bip32Error> {
    let (il, chain_code) = split_halves(i);

    let private = curve
        .keys()
        .private_from_seed_half(&il)
        .and_then(|bytes| PrivateKey::from_bytes(&bytes, curve))
        .map_err(|_| {
            log::warn!("seed yields an invalid {curve} master key");
            Bip32Error::InvalidMasterKey
        })?;
    let keys = KeyMaterial::from_private(private).map_err(|_| Bip32Error::InvalidMasterKey)?;

    log::trace!("derived {curve} master key");
    Ok(ExtendedKey::new_root(versions, chain_code, keys))
}
