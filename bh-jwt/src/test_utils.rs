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

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::{BoxError, MacBackend, SigningAlgorithm};

/// Symbolic MAC over the given message with the given key, in lieu of a real
/// keyed-hash function.
///
/// Bulky, but tests the important thing: over which message, with which key
/// and which algorithm was the MAC produced, regardless of the (correctness of
/// the) implementation of the primitive.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct StubMacValue {
    pub(crate) alg: SigningAlgorithm,
    pub(crate) key: Vec<u8>,
    pub(crate) message: Vec<u8>,
}

/// [`MacBackend`] producing [`StubMacValue`]s, which also counts how many
/// MACs it was asked to compute.
#[derive(Default)]
pub(crate) struct StubMac {
    calls: AtomicUsize,
}

impl StubMac {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MacBackend for StubMac {
    fn mac(
        &self,
        algorithm: SigningAlgorithm,
        key: &[u8],
        message: &[u8],
    ) -> Result<Vec<u8>, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(serde_json::to_vec(&StubMacValue {
            alg: algorithm,
            key: key.to_vec(),
            message: message.to_vec(),
        })?)
    }

    fn constant_time_eq(&self, left: &[u8], right: &[u8]) -> bool {
        left == right
    }
}

/// [`MacBackend`] which always fails, for testing error propagation.
pub(crate) struct FailingMac;

impl MacBackend for FailingMac {
    fn mac(
        &self,
        _algorithm: SigningAlgorithm,
        _key: &[u8],
        _message: &[u8],
    ) -> Result<Vec<u8>, BoxError> {
        Err("backend unavailable".into())
    }

    fn constant_time_eq(&self, _left: &[u8], _right: &[u8]) -> bool {
        unreachable!("FailingMac never produces a MAC to compare")
    }
}
