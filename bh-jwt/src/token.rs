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

//! Assembling, signing, serializing and parsing of compact JWTs.
//!
//! A [`Token`] goes through two states. A [`Token<Unsigned>`] holds a
//! [`Header`] and a [`Body`] which can be changed freely. Signing consumes it
//! and yields a [`Token<Signed>`], which caches its compact serialization and
//! no longer gives mutable access to the entities, so the cached signature
//! can never go stale. Parsing a compact string yields a [`Token<Signed>`]
//! directly, but only after its signature has been verified.

use bherror::traits::{ErrorContext as _, PropagateError as _};

use crate::{
    base64_url_decode, base64_url_encode,
    canonical::{project, unproject, CanonicalJson},
    construct_signing_input, signer, Body, Error, Header, JsonObject, MacBackend, Result,
    SharedSecret, SigningAlgorithm, VerificationPolicy,
};
#[cfg(feature = "openssl")]
use crate::OpensslMac;

/// State of a [`Token`] which has not been signed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Unsigned;

/// State of a [`Token`] which was signed, or parsed and verified.
#[derive(Debug, Clone, PartialEq)]
pub struct Signed {
    compact: String,
    signing_input_len: usize,
    signature: Vec<u8>,
}

/// A JWT, i.e. a [`Header`] and a [`Body`], in the state `S`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<S> {
    header: Header,
    body: Body,
    state: S,
}

impl<S> Token<S> {
    /// The header of the token.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The body (claims) of the token.
    pub fn body(&self) -> &Body {
        &self.body
    }
}

fn ensure_not_encrypted(header: &Header) -> Result<()> {
    match &header.enc {
        Some(enc) => Err(bherror::Error::root(Error::UnsupportedAlgorithm(
            enc.clone(),
        )))
        .ctx(|| "encrypted tokens are not supported"),
        None => Ok(()),
    }
}

fn encode_segment<E: CanonicalJson>(entity: &E) -> Result<String> {
    project(entity).map(base64_url_encode)
}

impl Token<Unsigned> {
    /// Creates an unsigned token.
    pub fn new(header: Header, body: Body) -> Self {
        Self {
            header,
            body,
            state: Unsigned,
        }
    }

    /// Mutable access to the header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Mutable access to the body.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Signs the token with the algorithm named in its header, using the MAC
    /// implementation of the given `backend`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidKey`] if the `secret` is empty; this is checked
    ///   before anything else, whatever the header says,
    /// - [`Error::UnsupportedAlgorithm`] if the header `alg` is missing,
    ///   unknown or `"none"` (see [`Token::unsecured`]), or `enc` is set,
    /// - [`Error::ReservedName`] or [`Error::Serialization`] if the header or
    ///   body can not be projected,
    /// - [`Error::CryptoBackend`] if the `backend` fails.
    pub fn sign_with<B: MacBackend + ?Sized>(
        self,
        backend: &B,
        secret: &SharedSecret,
    ) -> Result<Token<Signed>> {
        signer::check_secret(secret)?;
        ensure_not_encrypted(&self.header)?;
        let algorithm = self.header.algorithm()?;
        if algorithm.is_unsecured() {
            return Err(bherror::Error::root(Error::UnsupportedAlgorithm(
                algorithm.to_string(),
            )))
            .ctx(|| "unsecured tokens are created with `Token::unsecured`");
        }

        let signing_input = construct_signing_input(
            &encode_segment(&self.header)?,
            &encode_segment(&self.body)?,
        );
        let signature = signer::sign(backend, signing_input.as_bytes(), secret, algorithm)?;

        tracing::debug!(%algorithm, "token signed");

        Ok(self.into_signed(signing_input, signature))
    }

    /// Signs the token using the [`OpensslMac`] backend.
    ///
    /// The errors are the same as for [`Token::sign_with`].
    #[cfg(feature = "openssl")]
    pub fn sign(self, secret: &SharedSecret) -> Result<Token<Signed>> {
        self.sign_with(&OpensslMac, secret)
    }

    fn into_signed(self, signing_input: String, signature: Vec<u8>) -> Token<Signed> {
        let signing_input_len = signing_input.len();
        let compact = format!("{signing_input}.{}", base64_url_encode(&signature));

        Token {
            header: self.header,
            body: self.body,
            state: Signed {
                compact,
                signing_input_len,
                signature,
            },
        }
    }
}

/// Splits a compact JWT into its three segments.
fn split_segments(compact: &str) -> Result<[&str; 3]> {
    let segments: Vec<&str> = compact.split('.').collect();

    <[&str; 3]>::try_from(segments).map_err(|segments| {
        bherror::Error::root(Error::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )))
    })
}

fn decode_segment<E: CanonicalJson>(segment: &str) -> Result<E> {
    let bytes = base64_url_decode(segment)
        .with_err(|| Error::MalformedToken(format!("{} segment is not base64url", E::KIND)))?;

    unproject(&bytes)
}

impl Token<Signed> {
    /// Assembles a token from the `header` and `body` and signs it with the
    /// `backend`; see [`Token::sign_with`].
    pub fn build_signed_with<B: MacBackend + ?Sized>(
        backend: &B,
        header: Header,
        body: Body,
        secret: &SharedSecret,
    ) -> Result<Self> {
        Token::new(header, body).sign_with(backend, secret)
    }

    /// Assembles a token from the `header` and `body` and signs it using the
    /// [`OpensslMac`] backend.
    #[cfg(feature = "openssl")]
    pub fn build_signed(header: Header, body: Body, secret: &SharedSecret) -> Result<Self> {
        Self::build_signed_with(&OpensslMac, header, body, secret)
    }

    /// Builds and signs a token from an arbitrary, untrusted claims map.
    ///
    /// The claims become the [`Body`] (see [`Body::from_claims_map`]), paired
    /// with the default `HS256` header. Nothing in `claims` can influence the
    /// header; e.g. an `"alg"` entry is just a private claim.
    pub fn from_untrusted_map_with<B: MacBackend + ?Sized>(
        backend: &B,
        claims: JsonObject,
        secret: &SharedSecret,
    ) -> Result<Self> {
        let body = Body::from_claims_map(claims)?;

        Self::build_signed_with(backend, Header::new(SigningAlgorithm::Hs256), body, secret)
    }

    /// Same as [`Token::from_untrusted_map_with`], using the [`OpensslMac`]
    /// backend.
    #[cfg(feature = "openssl")]
    pub fn from_untrusted_map(claims: JsonObject, secret: &SharedSecret) -> Result<Self> {
        Self::from_untrusted_map_with(&OpensslMac, claims, secret)
    }

    /// Creates an *Unsecured JWS* (`"alg": "none"`) with an empty signature.
    ///
    /// The `alg` parameter of the `header` is overwritten. Such a token is
    /// only accepted by a [`VerificationPolicy`] which explicitly allows it.
    pub fn unsecured(mut header: Header, body: Body) -> Result<Self> {
        ensure_not_encrypted(&header)?;
        header.alg = Some(SigningAlgorithm::Unsecured.to_string());

        let signing_input =
            construct_signing_input(&encode_segment(&header)?, &encode_segment(&body)?);

        tracing::warn!("creating an unsecured token");

        Ok(Token::new(header, body).into_signed(signing_input, Vec::new()))
    }

    /// Parses a compact JWT and verifies its signature with the `backend`.
    ///
    /// The algorithm declared in the header is used only if it is allowed by
    /// the `policy`. The segment count is checked before anything else, and
    /// no MAC is computed unless both the header and the body are well
    /// formed.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedToken`] if the token does not have exactly three
    ///   segments, or a segment is not `base64url` or the expected JSON,
    /// - [`Error::UnsupportedAlgorithm`] if the algorithm is unknown, not
    ///   allowed by the `policy`, or the header sets `enc`,
    /// - [`Error::InvalidKey`] if the `secret` is empty,
    /// - [`Error::SignatureVerification`] if the signature does not match.
    pub fn parse_with<B: MacBackend + ?Sized>(
        backend: &B,
        compact: &str,
        secret: &SharedSecret,
        policy: &VerificationPolicy,
    ) -> Result<Self> {
        let [header_segment, body_segment, signature_segment] = split_segments(compact)?;

        let header: Header = decode_segment(header_segment)?;
        let body: Body = decode_segment(body_segment)?;
        let signature = base64_url_decode(signature_segment)
            .with_err(|| Error::MalformedToken("signature segment is not base64url".to_owned()))?;

        ensure_not_encrypted(&header)?;
        let algorithm = header.algorithm()?;
        policy.check(algorithm)?;

        let signing_input = construct_signing_input(header_segment, body_segment);

        let verified = if algorithm.is_unsecured() {
            tracing::warn!("accepting an unsecured token");
            signature.is_empty()
        } else {
            signer::verify(backend, signing_input.as_bytes(), secret, algorithm, &signature)?
        };

        if !verified {
            return Err(bherror::Error::root(Error::SignatureVerification));
        }

        tracing::debug!(%algorithm, "token parsed and verified");

        Ok(Token {
            header,
            body,
            state: Signed {
                compact: compact.to_owned(),
                signing_input_len: signing_input.len(),
                signature,
            },
        })
    }

    /// Same as [`Token::parse_with`], using the [`OpensslMac`] backend.
    #[cfg(feature = "openssl")]
    pub fn parse(
        compact: &str,
        secret: &SharedSecret,
        policy: &VerificationPolicy,
    ) -> Result<Self> {
        Self::parse_with(&OpensslMac, compact, secret, policy)
    }

    /// Decodes the header of a compact JWT **without** verifying anything.
    ///
    /// Useful to e.g. read the `kid` before choosing the secret to verify the
    /// token with. The returned `alg` is attacker-controlled and must not be
    /// used to choose the verification algorithm.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MalformedToken`] if the token does not have exactly
    /// three segments, or its header segment is malformed.
    pub fn decode_header(compact: &str) -> Result<Header> {
        let [header_segment, _, _] = split_segments(compact)?;

        decode_segment(header_segment)
    }

    /// The compact serialization, `<header>.<body>.<signature>`.
    pub fn as_str(&self) -> &str {
        &self.state.compact
    }

    /// Returns the compact serialization as an owned string.
    pub fn serialize(&self) -> String {
        self.state.compact.clone()
    }

    /// The signing input, `<header>.<body>`, as it was signed or parsed.
    pub fn signing_input(&self) -> &str {
        &self.state.compact[..self.state.signing_input_len]
    }

    /// The raw signature bytes; empty for an unsecured token.
    pub fn signature(&self) -> &[u8] {
        &self.state.signature
    }

    /// Releases the header and the body, e.g. to build a new token from them.
    pub fn into_parts(self) -> (Header, Body) {
        (self.header, self.body)
    }
}

impl std::fmt::Display for Token<Signed> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
