//! Hashing and text-encoding primitives shared by the HD key engine.

pub mod base58;
pub mod hash;
pub mod hmac;
