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

//! Canonical JSON projection of the token header and body.
//!
//! The signature covers the exact bytes produced here, so the projection is
//! deterministic: the registered fields come first, in the order in which
//! they are declared on [`Header`](crate::Header) and [`Body`](crate::Body),
//! followed by the extension fields (private claims) in insertion order. No
//! insignificant whitespace is emitted.

use bherror::traits::{ErrorContext as _, ForeignError as _};
use serde::{de::DeserializeOwned, Serialize};

use crate::{Error, JsonObject, Result};

/// An entity with a fixed set of registered fields plus a residual map of
/// extension fields, which is merged into the same JSON object on the wire.
pub trait CanonicalJson: Serialize + DeserializeOwned {
    /// Name of the entity, used in error messages.
    const KIND: &'static str;

    /// Registered names, which the extension fields must not use.
    const RESERVED_NAMES: &'static [&'static str];

    /// The residual map of extension fields.
    fn extension_fields(&self) -> &JsonObject;
}

/// Fails with [`Error::ReservedName`] if `name` is one of the `reserved` names.
pub(crate) fn ensure_unreserved(name: &str, reserved: &[&str]) -> Result<()> {
    if reserved.contains(&name) {
        return Err(bherror::Error::root(Error::ReservedName(name.to_owned())));
    }

    Ok(())
}

/// Projects the `entity` into its canonical, compact JSON bytes.
///
/// # Errors
///
/// - [`Error::ReservedName`] if an extension field collides with a registered
///   name,
/// - [`Error::Serialization`] if the JSON encoder fails.
pub fn project<E: CanonicalJson>(entity: &E) -> Result<Vec<u8>> {
    for name in entity.extension_fields().keys() {
        ensure_unreserved(name, E::RESERVED_NAMES).ctx(|| format!("projecting {}", E::KIND))?;
    }

    serde_json::to_vec(entity)
        .foreign_err(|| Error::Serialization)
        .ctx(|| format!("projecting {}", E::KIND))
}

/// Reconstructs an entity from its JSON bytes.
///
/// Unknown fields are kept as extension fields, in document order.
///
/// # Errors
///
/// Fails with [`Error::MalformedToken`] if the bytes are not a JSON object, or
/// if a registered field has the wrong type.
pub fn unproject<E: CanonicalJson>(bytes: &[u8]) -> Result<E> {
    serde_json::from_slice(bytes)
        .foreign_err(|| Error::MalformedToken(format!("invalid {} JSON", E::KIND)))
}

/// Reconstructs an entity from an already parsed JSON object.
///
/// The errors are the same as for [`unproject`].
pub fn unproject_object<E: CanonicalJson>(object: JsonObject) -> Result<E> {
    serde_json::from_value(serde_json::Value::Object(object))
        .foreign_err(|| Error::MalformedToken(format!("invalid {} structure", E::KIND)))
}
