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

//! Unpadded `base64url` encoding, as used by every segment of a compact JWT.
//!
//! See [section 2 of RFC7515](https://www.rfc-editor.org/rfc/rfc7515.html#section-2).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bherror::traits::{ErrorContext as _, ForeignError as _};

use crate::{Error, Result};

/// Returns the `base64url`-encoded string **without padding** of the given
/// `input`.
pub fn base64_url_encode<T: AsRef<[u8]>>(input: T) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decodes the given `payload` as the `base64url`-encoded string **without
/// padding** into bytes.
///
/// The caller never supplies padding; padded input, characters outside the
/// URL-safe alphabet, an impossible length (`len % 4 == 1`) and non-zero
/// trailing bits in the last symbol all fail with [`Error::Decode`].
pub fn base64_url_decode<T: AsRef<[u8]>>(payload: T) -> Result<Vec<u8>> {
    let payload = payload.as_ref();

    URL_SAFE_NO_PAD
        .decode(payload)
        .foreign_err(|| Error::Decode)
        .ctx(|| format!("decoding {} base64url characters", payload.len()))
}
