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

use bherror::traits::{ErrorContext as _, ForeignBoxed as _};

use crate::{Error, MacBackend, Result, SharedSecret, SigningAlgorithm};

/// Create the signing input for a `JWS`, given its encoded header and body.
///
/// The signing input is constructed by concatenating the `base64url`-encoded
/// header and body by the `.` character, i.e. `<header>.<body>`, as defined
/// [here].
///
/// [here]: https://www.rfc-editor.org/rfc/rfc7515.html#section-5.1
pub fn construct_signing_input(header: &str, body: &str) -> String {
    format!("{header}.{body}")
}

pub(crate) fn check_secret(secret: &SharedSecret) -> Result<()> {
    if secret.is_empty() {
        return Err(bherror::Error::root(Error::InvalidKey(
            "shared secret is empty".to_owned(),
        )));
    }

    Ok(())
}

fn check_mac_algorithm(algorithm: SigningAlgorithm) -> Result<()> {
    if algorithm.is_unsecured() {
        return Err(bherror::Error::root(Error::UnsupportedAlgorithm(
            algorithm.to_string(),
        )))
        .ctx(|| "the unsecured algorithm produces no MAC");
    }

    Ok(())
}

/// Computes the MAC of `signing_input` under `secret`, returning raw bytes
/// (not yet `base64url`-encoded).
///
/// # Errors
///
/// - [`Error::InvalidKey`] if the `secret` is empty; this is checked first,
///   so an empty secret never produces a signature for any algorithm,
/// - [`Error::UnsupportedAlgorithm`] for [`SigningAlgorithm::Unsecured`],
/// - [`Error::CryptoBackend`] if the `backend` fails.
pub fn sign<B: MacBackend + ?Sized>(
    backend: &B,
    signing_input: &[u8],
    secret: &SharedSecret,
    algorithm: SigningAlgorithm,
) -> Result<Vec<u8>> {
    check_secret(secret)?;
    check_mac_algorithm(algorithm)?;

    backend
        .mac(algorithm, secret.expose(), signing_input)
        .foreign_boxed_err(|| Error::CryptoBackend)
        .ctx(|| format!("computing {algorithm} MAC"))
}

/// Checks whether `candidate` is the MAC of `signing_input` under `secret`.
///
/// The expected MAC is recomputed and compared with the backend's
/// constant-time comparison. Returns `Ok(false)` on a mismatch; the errors are
/// the same as for [`sign`].
pub fn verify<B: MacBackend + ?Sized>(
    backend: &B,
    signing_input: &[u8],
    secret: &SharedSecret,
    algorithm: SigningAlgorithm,
    candidate: &[u8],
) -> Result<bool> {
    let expected = sign(backend, signing_input, secret, algorithm)?;

    Ok(expected.len() == candidate.len() && backend.constant_time_eq(&expected, candidate))
}
