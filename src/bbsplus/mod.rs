// Copyright 2025 Zetrix

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! BBS+ multi-message signatures over the BLS12-381 pairing groups.
//!
//! A signer commits an ordered list of messages against a per-key generator
//! set and produces one compact signature over all of them. The holder of a
//! signature can then derive, per verification session, a zero-knowledge
//! proof of knowledge of that signature which reveals only a chosen subset of
//! the signed messages; every undisclosed slot stays hidden behind a
//! holder-owned blinding factor. Proofs are bound to a verifier nonce through
//! the Fiat-Shamir challenge, so a proof minted for one session fails
//! verification in any other.
//!
//! The flow mirrors the issuer / holder / verifier roles of a credential
//! system:
//! - the issuer derives a key pair from a seed ([`keys::KeyPair::generate`])
//!   and expands it for a fixed slot count ([`keys::BbsPublicKey::derive`]),
//! - the issuer signs the holder's messages ([`signature::Signature::sign`]),
//! - the holder proves possession, disclosing per-slot
//!   ([`proof::PoKSignature::proof_gen`]),
//! - the verifier checks the proof against the disclosed slots and its own
//!   nonce ([`proof::PoKSignature::proof_verify`]).
//!
//! Signatures and proofs are randomized on every call; only verification
//! outcomes are comparable, never raw bytes.

/// Module for ciphersuites
pub mod ciphersuites;
/// Module for generators
pub mod generators;
/// Module for keys
pub mod keys;
/// Module for proofs
pub mod proof;
/// Module for signatures
pub mod signature;
