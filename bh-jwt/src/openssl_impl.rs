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

use openssl::{hash::MessageDigest, memcmp, pkey::PKey, sign::Signer as OpensslSigner};

use crate::{BoxError, MacBackend, SigningAlgorithm};

/// [`MacBackend`] implementation backed by [`openssl`], supporting `HS256`,
/// `HS384` and `HS512`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpensslMac;

fn message_digest(algorithm: SigningAlgorithm) -> Result<MessageDigest, BoxError> {
    match algorithm {
        SigningAlgorithm::Hs256 => Ok(MessageDigest::sha256()),
        SigningAlgorithm::Hs384 => Ok(MessageDigest::sha384()),
        SigningAlgorithm::Hs512 => Ok(MessageDigest::sha512()),
        SigningAlgorithm::Unsecured => Err(format!("{algorithm} is not a MAC algorithm").into()),
    }
}

impl MacBackend for OpensslMac {
    fn mac(
        &self,
        algorithm: SigningAlgorithm,
        key: &[u8],
        message: &[u8],
    ) -> Result<Vec<u8>, BoxError> {
        let digest = message_digest(algorithm)?;
        let key = PKey::hmac(key)?;

        let mut signer = OpensslSigner::new(digest, &key)?;
        signer.update(message)?;
        Ok(signer.sign_to_vec()?)
    }

    fn constant_time_eq(&self, left: &[u8], right: &[u8]) -> bool {
        // `memcmp::eq` panics on a length mismatch; lengths are public anyway.
        left.len() == right.len() && memcmp::eq(left, right)
    }
}
