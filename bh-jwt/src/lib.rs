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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate provides functions and types for building, signing,
//! serializing and parsing [JSON Web Tokens (JWT)][1] secured with a shared
//! secret, i.e. with the HMAC algorithms of [JSON Web Signature (JWS)][2].
//!
//! [1]: https://datatracker.ietf.org/doc/html/rfc7519
//! [2]: https://datatracker.ietf.org/doc/html/rfc7515
//!
//! # Details
//!
//! A token is a [`Header`] and a [`Body`] wrapped in a [`Token`]. Signing
//! projects both to canonical JSON (see [`project`]), encodes them as
//! unpadded `base64url` and computes the MAC over `<header>.<body>`. Parsing
//! reverses this and verifies the MAC in constant time, using only the
//! algorithms allowed by the caller's [`VerificationPolicy`].
//!
//! The keyed-hash function itself is provided by a [`MacBackend`]. A default
//! [`openssl`] backed implementation, [`OpensslMac`], is available under the
//! default feature `openssl`, which can be disabled and replaced by a custom
//! implementation passed to the `*_with` variants of the operations.
//!
//! Every failure is reported as an [`Error`]; the ones meaning that a token
//! was rejected share a single [`Error::public_message`].
//!
//! # Examples
//!
//! ## Sign and parse a JWT
//!
//! ```
//! use bh_jwt::{
//!     Body, Error, Header, NumericDate, SharedSecret, SigningAlgorithm, Token,
//!     VerificationPolicy,
//! };
//!
//! let secret = SharedSecret::from("s3cr3t");
//!
//! let mut body = Body::default();
//! body.sub = Some("user-42".to_owned());
//! body.iat = Some(NumericDate::from_seconds(1_700_000_000).unwrap());
//! let token = Token::build_signed(Header::new(SigningAlgorithm::Hs256), body, &secret).unwrap();
//!
//! // Three `base64url` segments separated by `.`
//! let compact = token.to_string();
//! assert_eq!(compact.split('.').count(), 3);
//!
//! // Parse it back, allowing only `HS256`
//! let policy = VerificationPolicy::default();
//! let parsed = Token::parse(&compact, &secret, &policy).unwrap();
//! assert_eq!(parsed.body().sub.as_deref(), Some("user-42"));
//!
//! // A different secret is rejected
//! let err = Token::parse(&compact, &SharedSecret::from("other"), &policy).unwrap_err();
//! assert_eq!(err.error, Error::SignatureVerification);
//! ```

#[cfg(feature = "openssl")]
mod openssl_impl;
#[cfg(test)]
mod test_utils;

mod algorithm;
mod base64url;
mod body;
mod canonical;
mod error;
mod header;
mod policy;
mod secret;
mod signer;
mod token;
mod traits;

pub use algorithm::*;
pub use base64url::*;
pub use body::*;
pub use canonical::*;
pub use error::*;
pub use header::*;
#[cfg(feature = "openssl")]
pub use openssl_impl::*;
pub use policy::*;
pub use secret::*;
pub use signer::*;
pub use token::*;
pub use traits::*;

/// A JSON object, as used for extension header parameters and private claims.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Helper macro with the same syntax as [`serde_json::json`] specialized for
/// constructing JSON objects.
///
/// It will construct a more specific type ([`JsonObject`]) than just
/// [`serde_json::Value`] when constructing an object, and panic if the syntax
/// is valid JSON but not an object.
#[macro_export]
macro_rules! json_object {
    ($stuff:tt) => {
        match ::serde_json::json!($stuff) {
            ::serde_json::Value::Object(o) => o,
            _ => unreachable!("JSON literal wasn't an object"),
        }
    };
}
