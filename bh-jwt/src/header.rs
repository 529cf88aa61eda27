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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    canonical::{ensure_unreserved, CanonicalJson},
    Error, JsonObject, Result, SigningAlgorithm,
};

/// The `"typ"` value conventionally used for JWTs.
pub const JWT_TYP: &str = "JWT";

/// Header parameter names with a dedicated field on [`Header`].
pub const RESERVED_HEADER_NAMES: &[&str] = &["typ", "cty", "alg", "enc"];

/// The JOSE header of a token.
///
/// The registered parameters are plain fields; any other parameter (e.g.
/// `kid`, `x5t`, `crit`) lives in the extension map, which keeps insertion
/// order and never holds one of the [`RESERVED_HEADER_NAMES`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    /// Media type of the complete token, conventionally [`JWT_TYP`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    /// Media type of the secured content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cty: Option<String>,

    /// Algorithm used to secure the token, e.g. `"HS256"`.
    ///
    /// It is kept as the raw header value so that unknown algorithms survive
    /// parsing and can be reported; see [`Header::algorithm`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,

    /// Content encryption algorithm of an encrypted token.
    ///
    /// Encryption is not implemented; a header setting this parameter can be
    /// neither signed nor accepted when parsing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enc: Option<String>,

    #[serde(flatten)]
    extra: JsonObject,
}

impl Header {
    /// Creates a header with `"typ": "JWT"` and the given algorithm.
    pub fn new(alg: SigningAlgorithm) -> Self {
        Self {
            typ: Some(JWT_TYP.to_owned()),
            alg: Some(alg.to_string()),
            ..Default::default()
        }
    }

    /// Returns the algorithm named by the `alg` parameter.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedAlgorithm`] if `alg` is missing or names
    /// an unknown algorithm.
    pub fn algorithm(&self) -> Result<SigningAlgorithm> {
        let alg = self.alg.as_deref().ok_or_else(|| {
            bherror::Error::root(Error::UnsupportedAlgorithm(
                "missing \"alg\" header parameter".to_owned(),
            ))
        })?;

        alg.parse()
    }

    /// Returns the extension parameters, in insertion order.
    pub fn extra(&self) -> &JsonObject {
        &self.extra
    }

    /// Returns a single extension parameter.
    pub fn extra_field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Returns the `kid` (Key ID) extension parameter, if it is a string.
    pub fn kid(&self) -> Option<&str> {
        self.extra_field("kid").and_then(Value::as_str)
    }

    /// Inserts an extension parameter, returning the previous value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ReservedName`] if `name` is one of the
    /// [`RESERVED_HEADER_NAMES`].
    pub fn insert_extra(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let name = name.into();
        ensure_unreserved(&name, RESERVED_HEADER_NAMES)?;

        Ok(self.extra.insert(name, value.into()))
    }

    /// Builder-style variant of [`Header::insert_extra`].
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.insert_extra(name, value)?;
        Ok(self)
    }

    /// Removes an extension parameter, keeping the order of the others.
    pub fn remove_extra(&mut self, name: &str) -> Option<Value> {
        self.extra.shift_remove(name)
    }
}

impl CanonicalJson for Header {
    const KIND: &'static str = "header";
    const RESERVED_NAMES: &'static [&'static str] = RESERVED_HEADER_NAMES;

    fn extension_fields(&self) -> &JsonObject {
        &self.extra
    }
}
