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

use bls12_381_plus::G1Projective;
use elliptic_curve::hash2curve::{ExpandMsg, Expander};
use group::{Curve, Group};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::ciphersuites::BbsCiphersuite;

/// The G1 generator set backing one BBS public key: the ciphersuite base
/// point `P1`, the blinding generator `Q1`, the domain generator `Q2`, and
/// one message generator per slot. Derivation is a deterministic function of
/// (seed, slot count); the same seed always reproduces the same set.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Generators {
    pub g1_base_point: G1Projective,
    pub q1: G1Projective,
    pub q2: G1Projective,
    pub message_generators: Vec<G1Projective>,
}

impl Serialize for Generators {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let result: Vec<String> = self
            .message_generators
            .iter()
            .map(|item| hex::encode(item.to_affine().to_compressed()))
            .collect();

        let mut state = serializer.serialize_struct("Generators", 4)?;
        state.serialize_field(
            "BP",
            &hex::encode(self.g1_base_point.to_affine().to_compressed()),
        )?;
        state.serialize_field("Q1", &hex::encode(self.q1.to_affine().to_compressed()))?;
        state.serialize_field("Q2", &hex::encode(self.q2.to_affine().to_compressed()))?;
        state.serialize_field("MsgGenerators", &result)?;
        state.end()
    }
}

impl Generators {
    /// Derives Q1, Q2 and `len` message generators from `seed` (the
    /// compressed public key bytes), plus the ciphersuite base point.
    pub(crate) fn create<CS>(seed: &[u8], len: usize) -> Generators
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let base_point = Self::create_g1_base_point::<CS>();

        let mut generators: Vec<G1Projective> = Vec::with_capacity(len + 2);

        let mut v = vec![0u8; CS::EXPAND_LEN];
        let mut buffer = vec![0u8; CS::EXPAND_LEN];

        CS::Expander::expand_message(&[seed], &[CS::GENERATOR_SEED_DST], CS::EXPAND_LEN)
            .unwrap()
            .fill_bytes(&mut v);

        let mut n = 1u32;
        while generators.len() < len + 2 {
            v.extend_from_slice(&n.to_be_bytes());
            CS::Expander::expand_message(&[v.as_slice()], &[CS::GENERATOR_SEED_DST], CS::EXPAND_LEN)
                .unwrap()
                .fill_bytes(&mut buffer);
            v = buffer.clone();
            n += 1;

            let candidate = G1Projective::hash::<CS::Expander>(&v, CS::GENERATOR_DST);
            if !bool::from(candidate.is_identity()) && !generators.contains(&candidate) {
                generators.push(candidate);
            }
        }

        Generators {
            g1_base_point: base_point,
            q1: generators[0],
            q2: generators[1],
            message_generators: generators[2..].to_vec(),
        }
    }

    fn create_g1_base_point<CS>() -> G1Projective
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let mut v = vec![0u8; CS::EXPAND_LEN];
        CS::Expander::expand_message(
            &[CS::GENERATOR_SEED_BP],
            &[CS::GENERATOR_SEED_DST],
            CS::EXPAND_LEN,
        )
        .unwrap()
        .fill_bytes(&mut v);

        let extra = 1u32.to_be_bytes();
        let buffer = [v.as_slice(), &extra].concat();

        CS::Expander::expand_message(&[buffer.as_slice()], &[CS::GENERATOR_SEED_DST], CS::EXPAND_LEN)
            .unwrap()
            .fill_bytes(&mut v);

        G1Projective::hash::<CS::Expander>(&v, CS::GENERATOR_DST)
    }
}
