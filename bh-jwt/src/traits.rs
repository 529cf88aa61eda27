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

use crate::SigningAlgorithm;

/// Type alias for a boxed error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An external keyed-hash backend, to be used for computing and comparing JWS
/// MACs.
///
/// The crate never implements the primitives itself. A default
/// [`openssl`]-backed implementation is available as
/// [`OpensslMac`](crate::OpensslMac) under the default `openssl` feature;
/// disable the feature to plug in a different implementation.
///
/// Implementors only ever see the HMAC algorithms: [`crate::sign`] and
/// [`crate::verify`] reject [`SigningAlgorithm::Unsecured`] and empty keys
/// before calling into the backend.
pub trait MacBackend: Sync {
    /// Compute the MAC of `message` under `key`, using the hash function
    /// selected by `algorithm`, as raw bytes (not yet base64url-encoded).
    fn mac(
        &self,
        algorithm: SigningAlgorithm,
        key: &[u8],
        message: &[u8],
    ) -> Result<Vec<u8>, BoxError>;

    /// Compare two byte strings of **equal length** in constant time.
    ///
    /// The running time must not depend on the position of the first
    /// differing byte.
    fn constant_time_eq(&self, left: &[u8], right: &[u8]) -> bool;
}

impl<B: MacBackend + ?Sized> MacBackend for &B {
    fn mac(
        &self,
        algorithm: SigningAlgorithm,
        key: &[u8],
        message: &[u8],
    ) -> Result<Vec<u8>, BoxError> {
        (**self).mac(algorithm, key, message)
    }

    fn constant_time_eq(&self, left: &[u8], right: &[u8]) -> bool {
        (**self).constant_time_eq(left, right)
    }
}
