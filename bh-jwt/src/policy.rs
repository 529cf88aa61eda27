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

use bherror::traits::ErrorContext as _;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, SigningAlgorithm};

/// Verifying side configuration: which algorithms a parsed token may use.
///
/// The algorithm declared in a token header is attacker-controlled, so it is
/// only ever honoured if it is also on this allow-list. Unsecured tokens
/// additionally require the explicit [`allow_unsecured`] opt-in.
///
/// The policy can be embedded in a configuration file:
///
/// ```
/// # use bh_jwt::{SigningAlgorithm, VerificationPolicy};
/// let policy: VerificationPolicy =
///     serde_json::from_str(r#"{"allowed_algorithms":["HS256","HS512"]}"#).unwrap();
///
/// assert!(policy.allows(SigningAlgorithm::Hs512));
/// assert!(!policy.allows(SigningAlgorithm::Hs384));
/// ```
///
/// [`allow_unsecured`]: VerificationPolicy::allow_unsecured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationPolicy {
    allowed_algorithms: Vec<SigningAlgorithm>,
    allow_unsecured: bool,
}

/// Allows only [`SigningAlgorithm::Hs256`].
impl Default for VerificationPolicy {
    fn default() -> Self {
        Self::new([SigningAlgorithm::Hs256])
    }
}

impl VerificationPolicy {
    /// Creates a policy allowing exactly the given `algorithms`.
    pub fn new(algorithms: impl IntoIterator<Item = SigningAlgorithm>) -> Self {
        let mut policy = Self {
            allowed_algorithms: Vec::new(),
            allow_unsecured: false,
        };
        for algorithm in algorithms {
            policy = policy.allow(algorithm);
        }
        policy
    }

    /// Adds `algorithm` to the allow-list.
    pub fn allow(mut self, algorithm: SigningAlgorithm) -> Self {
        if !self.allowed_algorithms.contains(&algorithm) {
            self.allowed_algorithms.push(algorithm);
        }
        self
    }

    /// Opts in to (or out of) accepting unsecured (`"alg": "none"`) tokens.
    ///
    /// Has an effect only if [`SigningAlgorithm::Unsecured`] is on the
    /// allow-list as well.
    pub fn allow_unsecured(mut self, allow: bool) -> Self {
        self.allow_unsecured = allow;
        self
    }

    /// The allow-list, in the order the algorithms were added.
    pub fn allowed_algorithms(&self) -> &[SigningAlgorithm] {
        &self.allowed_algorithms
    }

    /// Returns `true` if a token using `algorithm` may be accepted.
    pub fn allows(&self, algorithm: SigningAlgorithm) -> bool {
        self.allowed_algorithms.contains(&algorithm)
            && (!algorithm.is_unsecured() || self.allow_unsecured)
    }

    pub(crate) fn check(&self, algorithm: SigningAlgorithm) -> Result<()> {
        if !self.allows(algorithm) {
            return Err(bherror::Error::root(Error::UnsupportedAlgorithm(
                algorithm.to_string(),
            )))
            .ctx(|| "algorithm not allowed by the verification policy");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_allows_only_hs256() {
        let policy = VerificationPolicy::default();

        assert!(policy.allows(SigningAlgorithm::Hs256));
        assert!(!policy.allows(SigningAlgorithm::Hs384));
        assert!(!policy.allows(SigningAlgorithm::Hs512));
        assert!(!policy.allows(SigningAlgorithm::Unsecured));
    }

    #[test]
    fn unsecured_needs_both_listing_and_opt_in() {
        let listed = VerificationPolicy::default().allow(SigningAlgorithm::Unsecured);
        assert!(!listed.allows(SigningAlgorithm::Unsecured));

        let opted_in = VerificationPolicy::default().allow_unsecured(true);
        assert!(!opted_in.allows(SigningAlgorithm::Unsecured));

        let both = listed.allow_unsecured(true);
        assert!(both.allows(SigningAlgorithm::Unsecured));
        assert!(both.allows(SigningAlgorithm::Hs256));
    }

    #[test]
    fn check_rejects_unlisted_algorithm() {
        let policy = VerificationPolicy::new([SigningAlgorithm::Hs512]);

        policy.check(SigningAlgorithm::Hs512).unwrap();
        let err = policy.check(SigningAlgorithm::Hs256).unwrap_err();
        assert_matches!(err.error, Error::UnsupportedAlgorithm(ref alg) if alg == "HS256");
    }

    #[test]
    fn allow_does_not_duplicate() {
        let policy = VerificationPolicy::new([
            SigningAlgorithm::Hs256,
            SigningAlgorithm::Hs384,
            SigningAlgorithm::Hs256,
        ])
        .allow(SigningAlgorithm::Hs384);

        assert_eq!(
            policy.allowed_algorithms(),
            [SigningAlgorithm::Hs256, SigningAlgorithm::Hs384]
        );
    }

    #[test]
    fn serde_round_trip_uses_jose_names() {
        let policy = VerificationPolicy::new([SigningAlgorithm::Hs384]);

        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "allowed_algorithms": ["HS384"],
                "allow_unsecured": false,
            })
        );
        assert_eq!(serde_json::from_value::<VerificationPolicy>(json).unwrap(), policy);

        let empty: VerificationPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, VerificationPolicy::default());
    }
}
