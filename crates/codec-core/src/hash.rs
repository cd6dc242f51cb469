//! SHA-256 based digests used by the address codecs.
//!
//! SHA-256 itself is treated as a capability: everything that needs it goes
//! through [`Sha256Provider`], with [`Sha2`] (the `sha2` crate) as the
//! default. The `*_with` variants let callers plug in a platform hasher.

use sha2::{Digest, Sha256};

use crate::ripemd160;

/// Something that can compute a SHA-256 digest of a whole message.
pub trait Sha256Provider {
    /// SHA-256 of `data`.
    fn digest(&self, data: &[u8]) -> [u8; 32];
}

/// SHA-256 provider backed by the `sha2` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha2;

impl Sha256Provider for Sha2 {
    #[inline]
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        let hash = Sha256::digest(data);
        let mut result = [0u8; 32];
        result.copy_from_slice(&hash);
        result
    }
}

impl<P: Sha256Provider + ?Sized> Sha256Provider for &P {
    #[inline]
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        (**self).digest(data)
    }
}

/// Single SHA256 hash.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha2.digest(data)
}

/// Bitcoin's double SHA256: SHA256(SHA256(data)).
///
/// Base58Check checksums are the first four bytes of this.
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    hash256_with(&Sha2, data)
}

/// HASH160: RIPEMD160(SHA256(data)), the digest behind P2PKH and P2SH.
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    hash160_with(&Sha2, data)
}

/// Double SHA256 using the given provider.
pub fn hash256_with<P: Sha256Provider>(provider: &P, data: &[u8]) -> [u8; 32] {
    let first = provider.digest(data);
    provider.digest(&first)
}

/// HASH160 using the given provider for the SHA256 step.
pub fn hash160_with<P: Sha256Provider>(provider: &P, data: &[u8]) -> [u8; 20] {
    ripemd160::hash(&provider.digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_double_sha256() {
        // Test vector: SHA256d("hello")
        let hash = double_sha256(b"hello");

        let expected = hex::decode(
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        ).unwrap();

        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash160_pubkey() {
        // Compressed pubkey of the private key 1.
        let pubkey = hex::decode(
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        ).unwrap();

        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    struct CountingProvider {
        calls: Cell<usize>,
    }

    impl Sha256Provider for CountingProvider {
        fn digest(&self, data: &[u8]) -> [u8; 32] {
            self.calls.set(self.calls.get() + 1);
            Sha2.digest(data)
        }
    }

    #[test]
    fn test_injected_provider() {
        let provider = CountingProvider { calls: Cell::new(0) };

        assert_eq!(hash256_with(&provider, b"hello"), double_sha256(b"hello"));
        assert_eq!(provider.calls.get(), 2);

        assert_eq!(hash160_with(&provider, b"hello"), hash160(b"hello"));
        assert_eq!(provider.calls.get(), 3);
    }
}
