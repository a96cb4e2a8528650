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

use digest::HashMarker;
use elliptic_curve::hash2curve::{ExpandMsg, ExpandMsgXmd, ExpandMsgXof};
use sha2::Sha256;
use sha3::Shake256;

/// Domain parameters of a BBS+ instantiation over BLS12-381: the ciphersuite
/// identifier, the seeds/DSTs used to derive generators, and the
/// expand-message primitive everything hashes through.
pub trait BbsCiphersuite {
    const ID: &'static [u8];
    const GENERATOR_SEED_BP: &'static [u8];
    const GENERATOR_SEED_DST: &'static [u8];
    const GENERATOR_DST: &'static [u8];

    /// Output width of one expand-message block mapped to a scalar.
    const EXPAND_LEN: usize = 48;
    /// Minimum accepted seed (key material) length in bytes.
    const IKM_LEN: usize = 32;
    /// Maximum accepted seed length; longer inputs are rejected, not hashed down.
    const MAX_IKM_LEN: usize = 65535;

    type HashAlg: HashMarker;
    type Expander: ExpandMsg<'static>;

    fn keygen_dst() -> Vec<u8> {
        [Self::ID, b"KEYGEN_DST_"].concat()
    }

    fn hash_to_scalar_dst() -> Vec<u8> {
        [Self::ID, b"H2S_"].concat()
    }

    fn map_msg_to_scalar_dst() -> Vec<u8> {
        [Self::ID, b"MAP_MSG_TO_SCALAR_AS_HASH_"].concat()
    }

    fn challenge_dst() -> Vec<u8> {
        [Self::ID, b"PROOF_CHALLENGE_"].concat()
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bls12381Shake256 {}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bls12381Sha256 {}

impl BbsCiphersuite for Bls12381Shake256 {
    const ID: &'static [u8] = b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_";
    const GENERATOR_SEED_BP: &'static [u8] =
        b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_BP_MESSAGE_GENERATOR_SEED";
    const GENERATOR_SEED_DST: &'static [u8] =
        b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_SIG_GENERATOR_SEED_";
    const GENERATOR_DST: &'static [u8] =
        b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_SIG_GENERATOR_DST_";
    type HashAlg = Shake256;
    type Expander = ExpandMsgXof<Self::HashAlg>;
}

impl BbsCiphersuite for Bls12381Sha256 {
    const ID: &'static [u8] = b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_";
    const GENERATOR_SEED_BP: &'static [u8] =
        b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_BP_MESSAGE_GENERATOR_SEED";
    const GENERATOR_SEED_DST: &'static [u8] =
        b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_SIG_GENERATOR_SEED_";
    const GENERATOR_DST: &'static [u8] =
        b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_SIG_GENERATOR_DST_";
    type HashAlg = Sha256;
    type Expander = ExpandMsgXmd<Self::HashAlg>;
}
