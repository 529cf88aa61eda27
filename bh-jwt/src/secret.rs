// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use zeroize::Zeroizing;

/// Secret shared between the signing and the verifying party of an HMAC
/// signed token.
///
/// The bytes are zeroed when the value is dropped, and they are never
/// printed by [`Debug`](std::fmt::Debug). A token never keeps the secret
/// around; it is handed to each signing or verification call instead.
#[derive(Clone)]
pub struct SharedSecret(Zeroizing<Vec<u8>>);

impl SharedSecret {
    /// Wraps the given secret bytes.
    pub fn new(secret: Vec<u8>) -> Self {
        Self(Zeroizing::new(secret))
    }

    /// Returns the raw secret bytes.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` if the secret holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the secret length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSecret").field(&"<redacted>").finish()
    }
}

impl From<Vec<u8>> for SharedSecret {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SharedSecret {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SharedSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SharedSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = SharedSecret::from("s3cr3t");
        let debug = format!("{secret:?}");

        assert!(!debug.contains("s3cr3t"));
        assert_eq!(debug, "SharedSecret(\"<redacted>\")");
    }

    #[test]
    fn conversions_keep_bytes() {
        assert_eq!(SharedSecret::from("key").expose(), b"key");
        assert_eq!(SharedSecret::from(b"key".as_slice()).expose(), b"key");
        assert_eq!(SharedSecret::from("key".to_owned()).expose(), b"key");
        assert_eq!(SharedSecret::from(vec![1, 2, 3]).len(), 3);
        assert!(SharedSecret::from("").is_empty());
    }
}
