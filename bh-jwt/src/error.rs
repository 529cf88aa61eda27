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

/// Error type defining possible errors while building, signing and parsing
/// JWTs.
///
/// The variants [`Error::Decode`], [`Error::MalformedToken`],
/// [`Error::UnsupportedAlgorithm`], [`Error::InvalidKey`] and
/// [`Error::SignatureVerification`] all mean that a token was *rejected*.
/// Their [`Display`](std::fmt::Display) output is meant for internal logs
/// only; use [`Error::public_message`] when answering an untrusted party.
#[derive(strum_macros::Display, Debug, PartialEq, Clone)]
pub enum Error {
    /// Error that occurs when the input is not valid unpadded `base64url`.
    #[strum(to_string = "Invalid base64url input")]
    Decode,

    /// Error that occurs when the token does not consist of exactly three
    /// segments, or a segment does not hold the expected JSON structure.
    #[strum(to_string = "Malformed token: {0}")]
    MalformedToken(String),

    /// Error that occurs when the algorithm is missing, unknown, not
    /// implemented or not allowed by the verifying side.
    #[strum(to_string = "Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Error that occurs when the shared secret is missing or empty.
    #[strum(to_string = "Invalid key: {0}")]
    InvalidKey(String),

    /// Error that occurs when the signature does not match the signing input.
    #[strum(to_string = "Signature verification failed")]
    SignatureVerification,

    /// Error that occurs when an extension header parameter or a private claim
    /// uses one of the registered names.
    #[strum(to_string = "Reserved name {0} used as an extension field")]
    ReservedName(String),

    /// Error that occurs when a number of seconds can not be represented as a
    /// point in time.
    #[strum(to_string = "NumericDate {0} is out of range")]
    InvalidNumericDate(i64),

    /// Error that occurs when a header or body could not be encoded as JSON.
    #[strum(to_string = "JSON serialization failed")]
    Serialization,

    /// Error that occurs when the keyed-hash backend unexpectedly failed.
    #[strum(to_string = "Crypto backend failed")]
    CryptoBackend,
}

impl bherror::BhError for Error {}

/// Message returned by [`Error::public_message`] for every rejected token.
pub const TOKEN_REJECTED_MESSAGE: &str = "invalid token";

impl Error {
    /// Returns `true` if the error means that a token was rejected, as opposed
    /// to a caller mistake while constructing one or a backend failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Decode
                | Self::MalformedToken(_)
                | Self::UnsupportedAlgorithm(_)
                | Self::InvalidKey(_)
                | Self::SignatureVerification
        )
    }

    /// Message that is safe to show to a remote party.
    ///
    /// All rejection kinds share the same message, so that a remote party
    /// cannot tell a bad signature apart from a malformed token.
    pub fn public_message(&self) -> &'static str {
        if self.is_rejection() {
            TOKEN_REJECTED_MESSAGE
        } else {
            "internal error"
        }
    }
}

/// Result type alias for the crate.
pub type Result<T> = bherror::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_share_public_message() {
        let rejections = [
            Error::Decode,
            Error::MalformedToken("wrong number of segments".to_owned()),
            Error::UnsupportedAlgorithm("HS384".to_owned()),
            Error::InvalidKey("empty secret".to_owned()),
            Error::SignatureVerification,
        ];

        for error in rejections {
            assert!(error.is_rejection(), "{error}");
            assert_eq!(error.public_message(), TOKEN_REJECTED_MESSAGE);
        }
    }

    #[test]
    fn construction_errors_are_not_rejections() {
        for error in [
            Error::ReservedName("alg".to_owned()),
            Error::InvalidNumericDate(i64::MAX),
            Error::Serialization,
            Error::CryptoBackend,
        ] {
            assert!(!error.is_rejection(), "{error}");
            assert_ne!(error.public_message(), TOKEN_REJECTED_MESSAGE);
        }
    }

    #[test]
    fn display_is_specific() {
        assert_eq!(
            Error::MalformedToken("expected 3 segments, found 2".to_owned()).to_string(),
            "Malformed token: expected 3 segments, found 2"
        );
        assert_eq!(
            Error::ReservedName("sub".to_owned()).to_string(),
            "Reserved name sub used as an extension field"
        );
    }
}
