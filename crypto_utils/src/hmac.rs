use blake2::Blake2b512;
use hmac::{Hmac, Mac, SimpleHmac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;
// Blake2b has no lazy block buffer the optimized `Hmac` wrapper expects.
type HmacBlake2b512 = SimpleHmac<Blake2b512>;

/// Digest backing the HMAC step of a derivation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HmacHash {
    Sha512,
    Blake2b512,
}

impl HmacHash {
    /// Computes the 64-byte MAC of `parts`, fed in order, under `key`.
    pub fn mac(self, key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
        match self {
            HmacHash::Sha512 => {
                let mut mac =
                    HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
                parts.iter().for_each(|p| mac.update(p));
                mac.finalize().into_bytes().into()
            }
            HmacHash::Blake2b512 => {
                let mut mac =
                    HmacBlake2b512::new_from_slice(key).expect("HMAC accepts keys of any length");
                parts.iter().for_each(|p| mac.update(p));
                mac.finalize().into_bytes().into()
            }
        }
    }
}

pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    HmacHash::Sha512.mac(key, &[data])
}

pub fn hmac_blake2b512(key: &[u8], data: &[u8]) -> [u8; 64] {
    HmacHash::Blake2b512.mac(key, &[data])
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    /// Test case from RFC 4231
    #[test]
    fn hmac_sha512_rfc1() {
        let key = vec![0x0b; 20];
        let data = b"Hi There";
        let expected = hex!(
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cdedaa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        );
        assert_eq!(hmac_sha512(&key, data), expected);
    }

    /// Test case from RFC 4231
    #[test]
    fn hmac_sha512_rfc2() {
        let key = b"Jefe";
        let data = b"what do ya want for nothing?";
        let expected = hex!(
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
        assert_eq!(hmac_sha512(key, data), expected);
    }

    #[test]
    fn split_input_matches_concatenated() {
        let key = b"chain code";
        let joined = HmacHash::Sha512.mac(key, &[b"\x00abc\x80\x00\x00\x01"]);
        let split = HmacHash::Sha512.mac(key, &[&[0x00], b"abc", &0x8000_0001u32.to_be_bytes()]);
        assert_eq!(joined, split);

        let joined = HmacHash::Blake2b512.mac(key, &[b"\x00abc\x80\x00\x00\x01"]);
        let split =
            HmacHash::Blake2b512.mac(key, &[&[0x00], b"abc", &0x8000_0001u32.to_be_bytes()]);
        assert_eq!(joined, split);
    }

    #[test]
    fn blake2b_mac_is_distinct_from_sha512_mac() {
        let key = b"ed25519 seed";
        let data = hex!("000102030405060708090a0b0c0d0e0f");
        let b2 = hmac_blake2b512(key, &data);
        assert_ne!(b2, hmac_sha512(key, &data));
        assert_eq!(b2, hmac_blake2b512(key, &data));
        assert_ne!(b2, hmac_blake2b512(b"other key", &data));
    }
}
