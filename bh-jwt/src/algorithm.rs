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

use std::str::FromStr;

use bherror::Error as BhError;
use serde::{Deserialize, Serialize};

use crate::Error;

/// JWS algorithms understood by this crate.
///
/// # Algorithms
///
/// Only the symmetric keyed-hash (HMAC) algorithms from [section 3.2 of
/// RFC7518] are implemented, together with the `"none"` algorithm of
/// [section 3.6 of RFC7518] for *Unsecured JWS*. The latter is never accepted
/// implicitly; see [`crate::VerificationPolicy::allow_unsecured`].
///
/// [section 3.2 of RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.2
/// [section 3.6 of RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SigningAlgorithm {
    /// HMAC using SHA-256
    Hs256,
    /// HMAC using SHA-384
    Hs384,
    /// HMAC using SHA-512
    Hs512,
    /// No digital signature or MAC performed
    #[serde(rename = "none")]
    Unsecured,
}

/// JWS `"alg"` header parameter value for **HMAC using SHA-256**, as specified
/// in [RFC7518].
///
/// [RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.1
pub const SIGNING_ALG_HS256: &str = "HS256";
/// JWS `"alg"` header parameter value for **HMAC using SHA-384**, as specified
/// in [RFC7518].
///
/// [RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.1
pub const SIGNING_ALG_HS384: &str = "HS384";
/// JWS `"alg"` header parameter value for **HMAC using SHA-512**, as specified
/// in [RFC7518].
///
/// [RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.1
pub const SIGNING_ALG_HS512: &str = "HS512";
/// JWS `"alg"` header parameter value for an **Unsecured JWS**, as specified
/// in [RFC7518].
///
/// [RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.6
pub const SIGNING_ALG_NONE: &str = "none";

impl SigningAlgorithm {
    /// Returns `true` for the `"none"` algorithm.
    pub fn is_unsecured(&self) -> bool {
        matches!(self, Self::Unsecured)
    }

    /// Length in bytes of the MAC produced by this algorithm, which is also
    /// the minimum secret length recommended by [section 3.2 of RFC7518].
    ///
    /// [section 3.2 of RFC7518]: https://datatracker.ietf.org/doc/html/rfc7518#section-3.2
    pub fn mac_len(&self) -> usize {
        match self {
            Self::Hs256 => 32,
            Self::Hs384 => 48,
            Self::Hs512 => 64,
            Self::Unsecured => 0,
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = BhError<Error>;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            SIGNING_ALG_HS256 => Ok(SigningAlgorithm::Hs256),
            SIGNING_ALG_HS384 => Ok(SigningAlgorithm::Hs384),
            SIGNING_ALG_HS512 => Ok(SigningAlgorithm::Hs512),
            SIGNING_ALG_NONE => Ok(SigningAlgorithm::Unsecured),
            _ => Err(BhError::root(Error::UnsupportedAlgorithm(value.to_owned()))),
        }
    }
}

impl std::fmt::Display for SigningAlgorithm {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::Hs256 => SIGNING_ALG_HS256,
            Self::Hs384 => SIGNING_ALG_HS384,
            Self::Hs512 => SIGNING_ALG_HS512,
            Self::Unsecured => SIGNING_ALG_NONE,
        };
        write!(f, "{}", name)
    }
}
