//! The node type most callers work with: one position in a derivation tree,
//! built from a seed or a serialized key and walked by path.

use crate::Bip32Error;
use crate::ckd;
use crate::curve::CurveKind;
use crate::derivation::DerivationPath;
use crate::extended_key::{EXTENDED_KEY_LEN, ExtendedKey, KeyNetVersions};
use crate::index::ChildIndex;
use crate::keys::{ChainCode, Fingerprint, KeyMaterial, PrivateKey, PublicKey};
use crate::master::derive_master_key;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bip32 {
    key: ExtendedKey,
}

impl Bip32 {
    /// Master node for `seed` on `curve`, serialized with `xprv`/`xpub` tags.
    pub fn from_seed(seed: &[u8], curve: CurveKind) -> Result<Self, Bip32Error> {
        Self::from_seed_with_versions(seed, curve, KeyNetVersions::MAINNET)
    }

    pub fn from_seed_with_versions(
        seed: &[u8],
        curve: CurveKind,
        versions: KeyNetVersions,
    ) -> Result<Self, Bip32Error> {
        derive_master_key(seed, curve, versions).map(Bip32::from)
    }

    /// Parses Base58Check text such as `xprv...` or `tpub...`.
    pub fn from_extended_key(text: &str, curve: CurveKind) -> Result<Self, Bip32Error> {
        ExtendedKey::from_base58(text, curve).map(Bip32::from)
    }

    /// Parses the 78-byte binary form.
    pub fn from_extended_key_bytes(
        data: &[u8; EXTENDED_KEY_LEN],
        curve: CurveKind,
    ) -> Result<Self, Bip32Error> {
        ExtendedKey::from_bytes(data, curve).map(Bip32::from)
    }

    /// Root node from a raw private key and chain code.
    pub fn from_private_key(
        private_key: &[u8],
        chain_code: ChainCode,
        curve: CurveKind,
    ) -> Result<Self, Bip32Error> {
        let keys = KeyMaterial::from_private(PrivateKey::from_bytes(private_key, curve)?)?;
        Ok(ExtendedKey::new_root(KeyNetVersions::MAINNET, chain_code, keys).into())
    }

    /// Public-only root node from a raw public key and chain code.
    pub fn from_public_key(
        public_key: &[u8],
        chain_code: ChainCode,
        curve: CurveKind,
    ) -> Result<Self, Bip32Error> {
        let keys = KeyMaterial::PublicOnly(PublicKey::from_bytes(public_key, curve)?);
        Ok(ExtendedKey::new_root(KeyNetVersions::MAINNET, chain_code, keys).into())
    }

    /// Derives the node at `path` relative to this one, e.g. `"m/44'/0'/0'/0/1"`.
    pub fn derive_path(&self, path: &str) -> Result<Self, Bip32Error> {
        let path: DerivationPath = path.parse()?;
        path.derive(&self.key).map(Bip32::from)
    }

    pub fn derive(&self, path: &DerivationPath) -> Result<Self, Bip32Error> {
        path.derive(&self.key).map(Bip32::from)
    }

    pub fn derive_child(&self, index: impl Into<ChildIndex>) -> Result<Self, Bip32Error> {
        ckd::derive_child(&self.key, index.into()).map(Bip32::from)
    }

    /// Fails with [`Bip32Error::NoPrivateKey`] on a public-only node.
    pub fn private_key(&self) -> Result<&PrivateKey, Bip32Error> {
        self.key.private_key()
    }

    pub fn public_key(&self) -> &PublicKey {
        self.key.public_key()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.key.fingerprint()
    }

    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.key.parent_fingerprint()
    }

    pub fn depth(&self) -> u8 {
        self.key.depth()
    }

    pub fn child_index(&self) -> ChildIndex {
        self.key.child_index()
    }

    pub fn chain_code(&self) -> &ChainCode {
        self.key.chain_code()
    }

    pub fn curve(&self) -> CurveKind {
        self.key.curve()
    }

    /// The same node without its private key.
    pub fn to_public(&self) -> Self {
        self.key.public_only().into()
    }

    pub fn is_public_only(&self) -> bool {
        self.key.is_public_only()
    }

    pub fn serialize(&self) -> [u8; EXTENDED_KEY_LEN] {
        self.key.to_bytes()
    }

    pub fn extended_private_key(&self) -> Result<String, Bip32Error> {
        self.key.private_key()?;
        Ok(self.key.to_base58())
    }

    pub fn extended_public_key(&self) -> String {
        self.key.public_only().to_base58()
    }

    pub fn key(&self) -> &ExtendedKey {
        &self.key
    }
}

impl From<ExtendedKey> for Bip32 {
    fn from(key: ExtendedKey) -> Self {
        Bip32 { key }
    }
}

impl fmt::Display for Bip32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::HARDENED_OFFSET;
    use hex_literal::hex;

    /// Checks each `(path, xprv, xpub)` row against a master derived from `seed`.
    fn check_vector(seed: &[u8], rows: &[(&str, &str, &str)]) {
        let m = Bip32::from_seed(seed, CurveKind::Secp256k1).unwrap();
        for (path, xprv, xpub) in rows {
            let node = m.derive_path(path).unwrap();
            assert_eq!(node.extended_private_key().unwrap(), *xprv, "xprv at {path}");
            assert_eq!(node.extended_public_key(), *xpub, "xpub at {path}");

            let parsed = Bip32::from_extended_key(xprv, CurveKind::Secp256k1).unwrap();
            assert_eq!(parsed, node, "parsed xprv at {path}");
            let parsed = Bip32::from_extended_key(xpub, CurveKind::Secp256k1).unwrap();
            assert_eq!(parsed, node.to_public(), "parsed xpub at {path}");
        }
    }

    /// BIP32 Test vector 1
    #[test]
    fn test_vector1() {
        check_vector(
            &hex!("000102030405060708090a0b0c0d0e0f"),
            &[
                (
                    "m",
                    "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi",
                    "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8",
                ),
                (
                    "m/0'",
                    "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7",
                    "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw",
                ),
                (
                    "m/0'/1",
                    "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs",
                    "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ",
                ),
                (
                    "m/0'/1/2'",
                    "xprv9z4pot5VBttmtdRTWfWQmoH1taj2axGVzFqSb8C9xaxKymcFzXBDptWmT7FwuEzG3ryjH4ktypQSAewRiNMjANTtpgP4mLTj34bhnZX7UiM",
                    "xpub6D4BDPcP2GT577Vvch3R8wDkScZWzQzMMUm3PWbmWvVJrZwQY4VUNgqFJPMM3No2dFDFGTsxxpG5uJh7n7epu4trkrX7x7DogT5Uv6fcLW5",
                ),
                (
                    "m/0'/1/2'/2",
                    "xprvA2JDeKCSNNZky6uBCviVfJSKyQ1mDYahRjijr5idH2WwLsEd4Hsb2Tyh8RfQMuPh7f7RtyzTtdrbdqqsunu5Mm3wDvUAKRHSC34sJ7in334",
                    "xpub6FHa3pjLCk84BayeJxFW2SP4XRrFd1JYnxeLeU8EqN3vDfZmbqBqaGJAyiLjTAwm6ZLRQUMv1ZACTj37sR62cfN7fe5JnJ7dh8zL4fiyLHV",
                ),
                (
                    "m/0'/1/2'/2/1000000000",
                    "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76",
                    "xpub6H1LXWLaKsWFhvm6RVpEL9P4KfRZSW7abD2ttkWP3SSQvnyA8FSVqNTEcYFgJS2UaFcxupHiYkro49S8yGasTvXEYBVPamhGW6cFJodrTHy",
                ),
            ],
        );
    }

    /// BIP32 Test vector 2
    #[test]
    fn test_vector2() {
        check_vector(
            &hex!(
                "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a29f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542"
            ),
            &[
                (
                    "m",
                    "xprv9s21ZrQH143K31xYSDQpPDxsXRTUcvj2iNHm5NUtrGiGG5e2DtALGdso3pGz6ssrdK4PFmM8NSpSBHNqPqm55Qn3LqFtT2emdEXVYsCzC2U",
                    "xpub661MyMwAqRbcFW31YEwpkMuc5THy2PSt5bDMsktWQcFF8syAmRUapSCGu8ED9W6oDMSgv6Zz8idoc4a6mr8BDzTJY47LJhkJ8UB7WEGuduB",
                ),
                (
                    "m/0",
                    "xprv9vHkqa6EV4sPZHYqZznhT2NPtPCjKuDKGY38FBWLvgaDx45zo9WQRUT3dKYnjwih2yJD9mkrocEZXo1ex8G81dwSM1fwqWpWkeS3v86pgKt",
                    "xpub69H7F5d8KSRgmmdJg2KhpAK8SR3DjMwAdkxj3ZuxV27CprR9LgpeyGmXUbC6wb7ERfvrnKZjXoUmmDznezpbZb7ap6r1D3tgFxHmwMkQTPH",
                ),
                (
                    "m/0/2147483647'",
                    "xprv9wSp6B7kry3Vj9m1zSnLvN3xH8RdsPP1Mh7fAaR7aRLcQMKTR2vidYEeEg2mUCTAwCd6vnxVrcjfy2kRgVsFawNzmjuHc2YmYRmagcEPdU9",
                    "xpub6ASAVgeehLbnwdqV6UKMHVzgqAG8Gr6riv3Fxxpj8ksbH9ebxaEyBLZ85ySDhKiLDBrQSARLq1uNRts8RuJiHjaDMBU4Zn9h8LZNnBC5y4a",
                ),
                (
                    "m/0/2147483647'/1",
                    "xprv9zFnWC6h2cLgpmSA46vutJzBcfJ8yaJGg8cX1e5StJh45BBciYTRXSd25UEPVuesF9yog62tGAQtHjXajPPdbRCHuWS6T8XA2ECKADdw4Ef",
                    "xpub6DF8uhdarytz3FWdA8TvFSvvAh8dP3283MY7p2V4SeE2wyWmG5mg5EwVvmdMVCQcoNJxGoWaU9DCWh89LojfZ537wTfunKau47EL2dhHKon",
                ),
                (
                    "m/0/2147483647'/1/2147483646'",
                    "xprvA1RpRA33e1JQ7ifknakTFpgNXPmW2YvmhqLQYMmrj4xJXXWYpDPS3xz7iAxn8L39njGVyuoseXzU6rcxFLJ8HFsTjSyQbLYnMpCqE2VbFWc",
                    "xpub6ERApfZwUNrhLCkDtcHTcxd75RbzS1ed54G1LkBUHQVHQKqhMkhgbmJbZRkrgZw4koxb5JaHWkY4ALHY2grBGRjaDMzQLcgJvLJuZZvRcEL",
                ),
                (
                    "m/0/2147483647'/1/2147483646'/2",
                    "xprvA2nrNbFZABcdryreWet9Ea4LvTJcGsqrMzxHx98MMrotbir7yrKCEXw7nadnHM8Dq38EGfSh6dqA9QWTyefMLEcBYJUuekgW4BYPJcr9E7j",
                    "xpub6FnCn6nSzZAw5Tw7cgR9bi15UV96gLZhjDstkXXxvCLsUXBGXPdSnLFbdpq8p9HmGsApME5hQTZ3emM2rnY5agb9rXpVGyy3bdW6EEgAtqt",
                ),
            ],
        );
    }

    /// BIP32 Test vector 3: leading zeros in the private key
    #[test]
    fn test_vector3() {
        check_vector(
            &hex!(
                "4b381541583be4423346c643850da4b320e46a87ae3d2a4e6da11eba819cd4acba45d239319ac14f863b8d5ab5a0d0c64d2e8a1e7d1457df2e5a3c51c73235be"
            ),
            &[
                (
                    "m",
                    "xprv9s21ZrQH143K25QhxbucbDDuQ4naNntJRi4KUfWT7xo4EKsHt2QJDu7KXp1A3u7Bi1j8ph3EGsZ9Xvz9dGuVrtHHs7pXeTzjuxBrCmmhgC6",
                    "xpub661MyMwAqRbcEZVB4dScxMAdx6d4nFc9nvyvH3v4gJL378CSRZiYmhRoP7mBy6gSPSCYk6SzXPTf3ND1cZAceL7SfJ1Z3GC8vBgp2epUt13",
                ),
                (
                    "m/0'",
                    "xprv9uPDJpEQgRQfDcW7BkF7eTya6RPxXeJCqCJGHuCJ4GiRVLzkTXBAJMu2qaMWPrS7AANYqdq6vcBcBUdJCVVFceUvJFjaPdGZ2y9WACViL4L",
                    "xpub68NZiKmJWnxxS6aaHmn81bvJeTESw724CRDs6HbuccFQN9Ku14VQrADWgqbhhTHBaohPX4CjNLf9fq9MYo6oDaPPLPxSb7gwQN3ih19Zm4Y",
                ),
            ],
        );
    }

    /// BIP32 Test vector 4: leading zeros in the private key of a hardened child
    #[test]
    fn test_vector4() {
        check_vector(
            &hex!("3ddd5602285899a946114506157c7997e5444528f3003f6134712147db19b678"),
            &[
                (
                    "m",
                    "xprv9s21ZrQH143K48vGoLGRPxgo2JNkJ3J3fqkirQC2zVdk5Dgd5w14S7fRDyHH4dWNHUgkvsvNDCkvAwcSHNAQwhwgNMgZhLtQC63zxwhQmRv",
                    "xpub661MyMwAqRbcGczjuMoRm6dXaLDEhW1u34gKenbeYqAix21mdUKJyuyu5F1rzYGVxyL6tmgBUAEPrEz92mBXjByMRiJdba9wpnN37RLLAXa",
                ),
                (
                    "m/0'",
                    "xprv9vB7xEWwNp9kh1wQRfCCQMnZUEG21LpbR9NPCNN1dwhiZkjjeGRnaALmPXCX7SgjFTiCTT6bXes17boXtjq3xLpcDjzEuGLQBM5ohqkao9G",
                    "xpub69AUMk3qDBi3uW1sXgjCmVjJ2G6WQoYSnNHyzkmdCHEhSZ4tBok37xfFEqHd2AddP56Tqp4o56AePAgCjYdvpW2PU2jbUPFKsav5ut6Ch1m",
                ),
                (
                    "m/0'/1'",
                    "xprv9xJocDuwtYCMNAo3Zw76WENQeAS6WGXQ55RCy7tDJ8oALr4FWkuVoHJeHVAcAqiZLE7Je3vZJHxspZdFHfnBEjHqU5hG1Jaj32dVoS6XLT1",
                    "xpub6BJA1jSqiukeaesWfxe6sNK9CCGaujFFSJLomWHprUL9DePQ4JDkM5d88n49sMGJxrhpjazuXYWdMf17C9T5XnxkopaeS7jGk1GyyVziaMt",
                ),
            ],
        );
    }

    #[test]
    fn derive_child_matches_derive_path() {
        let m = Bip32::from_seed(&hex!("000102030405060708090a0b0c0d0e0f"), CurveKind::Secp256k1)
            .unwrap();
        let by_child = m
            .derive_child(HARDENED_OFFSET)
            .unwrap()
            .derive_child(1u32)
            .unwrap();
        let by_path = m.derive_path("m/0'/1").unwrap();
        assert_eq!(by_child, by_path);
        assert_eq!(by_child.depth(), 2);
        assert_eq!(by_child.child_index(), ChildIndex::new(1));
        assert_eq!(
            by_child.parent_fingerprint(),
            m.derive_child(HARDENED_OFFSET).unwrap().fingerprint()
        );
    }

    #[test]
    fn public_only_node() {
        let m = Bip32::from_seed(&hex!("000102030405060708090a0b0c0d0e0f"), CurveKind::Secp256k1)
            .unwrap();
        let xpub = m.to_public();
        assert!(xpub.is_public_only());
        assert_eq!(xpub.private_key().unwrap_err(), Bip32Error::NoPrivateKey);
        assert_eq!(
            xpub.extended_private_key().unwrap_err(),
            Bip32Error::NoPrivateKey
        );
        assert_eq!(xpub.public_key(), m.public_key());
        assert_eq!(
            xpub.derive_path("m/0/1").unwrap(),
            m.derive_path("m/0/1").unwrap().to_public()
        );
        assert_eq!(
            xpub.derive_path("m/0'").unwrap_err(),
            Bip32Error::PublicDerivationUnavailable
        );
    }

    #[test]
    fn from_raw_keys() {
        let m = Bip32::from_seed(&hex!("000102030405060708090a0b0c0d0e0f"), CurveKind::Secp256k1)
            .unwrap();
        let chain_code = *m.chain_code();
        let raw = Bip32::from_private_key(m.private_key().unwrap().raw(), chain_code, m.curve())
            .unwrap();
        assert_eq!(raw, m);

        let raw_pub =
            Bip32::from_public_key(m.public_key().raw_compressed(), chain_code, m.curve()).unwrap();
        assert_eq!(raw_pub, m.to_public());

        assert_eq!(
            Bip32::from_private_key(&[0u8; 32], chain_code, CurveKind::Secp256k1).unwrap_err(),
            Bip32Error::InvalidKeyData
        );
    }

    #[test]
    fn binary_round_trip_and_testnet() {
        let seed = hex!("000102030405060708090a0b0c0d0e0f");
        let m = Bip32::from_seed_with_versions(&seed, CurveKind::Secp256k1, KeyNetVersions::TESTNET)
            .unwrap();
        assert!(m.extended_private_key().unwrap().starts_with("tprv"));
        assert!(m.extended_public_key().starts_with("tpub"));
        assert_eq!(m.to_string(), m.extended_private_key().unwrap());

        let child = m.derive_path("m/0'").unwrap();
        let bytes = child.serialize();
        assert_eq!(
            Bip32::from_extended_key_bytes(&bytes, CurveKind::Secp256k1).unwrap(),
            child
        );
        assert_eq!(child.key().versions(), KeyNetVersions::TESTNET);
    }

    #[test]
    fn ed25519_node() {
        let m = Bip32::from_seed(&hex!("000102030405060708090a0b0c0d0e0f"), CurveKind::Ed25519)
            .unwrap();
        let node = m.derive_path("m/0'/1'").unwrap();
        assert_eq!(node.fingerprint(), node.public_key().fingerprint());
        assert_eq!(
            node.private_key().unwrap().raw(),
            &hex!("b1d0bad404bf35da785a64ca1ac54b2617211d2777696fbffaf208f746ae84f2")
        );
        assert_eq!(m.derive_child(1u32).unwrap_err(), Bip32Error::UnsupportedDerivation);

        let text = node.extended_private_key().unwrap();
        assert_eq!(Bip32::from_extended_key(&text, CurveKind::Ed25519).unwrap(), node);
    }
}
