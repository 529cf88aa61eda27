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

use chrono::{SubsecRound as _, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    canonical::{ensure_unreserved, unproject_object, CanonicalJson},
    Error, JsonObject, Result,
};

/// Claim names with a dedicated field on [`Body`].
pub const RESERVED_CLAIM_NAMES: &[&str] = &["iss", "sub", "aud", "exp", "nbf", "iat", "jti"];

/// A `NumericDate`, as defined in [section 2 of RFC7519][1].
///
/// The value is held as a UTC point in time, but it is always whole seconds:
/// on the wire it is the integer number of seconds since the *UNIX* epoch,
/// never a formatted date string.
///
/// [1]: <https://datatracker.ietf.org/doc/html/rfc7519#section-2>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub struct NumericDate(chrono::DateTime<Utc>);

impl NumericDate {
    /// Creates the date `seconds` after the *UNIX* epoch.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidNumericDate`] if the value is out of the
    /// supported range.
    pub fn from_seconds(seconds: i64) -> Result<Self> {
        chrono::DateTime::from_timestamp(seconds, 0)
            .map(Self)
            .ok_or_else(|| bherror::Error::root(Error::InvalidNumericDate(seconds)))
    }

    /// The current time, truncated to whole seconds.
    pub fn now() -> Self {
        Utc::now().into()
    }

    /// Seconds since the *UNIX* epoch.
    pub fn seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// The date as a [`chrono::DateTime`].
    pub fn as_date_time(&self) -> &chrono::DateTime<Utc> {
        &self.0
    }
}

/// The fraction of a second is dropped.
impl From<chrono::DateTime<Utc>> for NumericDate {
    fn from(date_time: chrono::DateTime<Utc>) -> Self {
        Self(date_time.trunc_subsecs(0))
    }
}

impl From<NumericDate> for chrono::DateTime<Utc> {
    fn from(date: NumericDate) -> Self {
        date.0
    }
}

impl From<NumericDate> for i64 {
    fn from(date: NumericDate) -> Self {
        date.seconds()
    }
}

impl TryFrom<i64> for NumericDate {
    type Error = bherror::Error<Error>;

    fn try_from(seconds: i64) -> std::result::Result<Self, Self::Error> {
        Self::from_seconds(seconds)
    }
}

impl std::fmt::Display for NumericDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.seconds())
    }
}

/// The claims carried by a token.
///
/// The registered claims of [section 4.1 of RFC7519][1] are plain fields; any
/// other claim is a *private claim* and lives in a separate map, which keeps
/// insertion order and never holds one of the [`RESERVED_CLAIM_NAMES`].
///
/// The claims are only carried, never validated: checking e.g. `exp` or `aud`
/// against a policy is left to the caller.
///
/// ```
/// # use bh_jwt::{Body, NumericDate};
/// let mut body = Body::default().with_private_claim("role", "admin").unwrap();
/// body.sub = Some("user-42".to_owned());
/// body.exp = Some(NumericDate::from_seconds(1_800_000_000).unwrap());
///
/// assert_eq!(body.private_claim("role"), Some(&"admin".into()));
/// ```
///
/// [1]: <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1>
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    /// Issuer of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Intended recipient of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Expiration time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<NumericDate>,

    /// Time before which the token must not be accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<NumericDate>,

    /// Time at which the token was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<NumericDate>,

    /// Unique identifier of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    #[serde(flatten)]
    private_claims: JsonObject,
}

impl Body {
    /// Builds the claims from an arbitrary, untrusted claims map.
    ///
    /// Registered claims are moved to their fields and every other entry
    /// becomes a private claim, in the order of the map.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MalformedToken`] if a registered claim has the
    /// wrong type, e.g. a non-integer `exp`.
    pub fn from_claims_map(claims: JsonObject) -> Result<Self> {
        unproject_object(claims)
    }

    /// Returns the private claims, in insertion order.
    pub fn private_claims(&self) -> &JsonObject {
        &self.private_claims
    }

    /// Returns a single private claim.
    pub fn private_claim(&self, name: &str) -> Option<&Value> {
        self.private_claims.get(name)
    }

    /// Inserts a private claim, returning the previous value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ReservedName`] if `name` is one of the
    /// [`RESERVED_CLAIM_NAMES`].
    pub fn insert_private_claim(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let name = name.into();
        ensure_unreserved(&name, RESERVED_CLAIM_NAMES)?;

        Ok(self.private_claims.insert(name, value.into()))
    }

    /// Builder-style variant of [`Body::insert_private_claim`].
    pub fn with_private_claim(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.insert_private_claim(name, value)?;
        Ok(self)
    }

    /// Removes a private claim, keeping the order of the others.
    pub fn remove_private_claim(&mut self, name: &str) -> Option<Value> {
        self.private_claims.shift_remove(name)
    }
}

impl CanonicalJson for Body {
    const KIND: &'static str = "body";
    const RESERVED_NAMES: &'static [&'static str] = RESERVED_CLAIM_NAMES;

    fn extension_fields(&self) -> &JsonObject {
        &self.private_claims
    }
}
