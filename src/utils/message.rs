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

use bls12_381_plus::Scalar;
use elliptic_curve::hash2curve::ExpandMsg;
use ff::Field;
use serde::{Deserialize, Serialize};

use crate::bbsplus::ciphersuites::BbsCiphersuite;
use crate::errors::Error;
use crate::utils::util::{hash_to_scalar, ScalarExt};

/// A message admitted into group arithmetic: the scalar image of an opaque
/// byte string. The raw bytes are never interpreted by the scheme.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BBSplusMessage {
    pub value: Scalar,
}

impl BBSplusMessage {
    pub fn new(msg: Scalar) -> Self {
        Self { value: msg }
    }

    /// Maps an opaque message to a scalar with the ciphersuite's
    /// MAP_MSG_TO_SCALAR_AS_HASH domain separation tag.
    pub fn map_message_to_scalar_as_hash<CS: BbsCiphersuite>(data: &[u8]) -> Self
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let scalar = hash_to_scalar::<CS>(data, &CS::map_msg_to_scalar_dst());
        Self { value: scalar }
    }

    pub fn messages_to_scalar<CS: BbsCiphersuite>(messages: &[Vec<u8>]) -> Vec<Self>
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        messages
            .iter()
            .map(|m| Self::map_message_to_scalar_as_hash::<CS>(m))
            .collect()
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        self.value.to_bytes_be()
    }
}

/// A prover-owned scalar that hides one message slot inside a proof. Used as
/// the Schnorr randomization term for that slot's generator, so the slot
/// stays hidden while the proof still verifies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlindingFactor(pub(crate) Scalar);

impl BlindingFactor {
    pub const LENGTH: usize = 32;

    /// Fresh uniform blinding factor from the process CSPRNG. Reusing one
    /// across two proofs links them; mint a new one per hidden slot per proof.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self(Scalar::random(&mut rng))
    }

    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        self.0.to_bytes_be()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; Self::LENGTH] = bytes.try_into().map_err(|_| {
            Error::MalformedEncoding(format!(
                "blinding factor must be {} bytes, got {}",
                Self::LENGTH,
                bytes.len()
            ))
        })?;
        let scalar = Scalar::from_bytes_be(&bytes)
            .ok_or_else(|| Error::MalformedEncoding("non-canonical scalar".to_owned()))?;
        Ok(Self(scalar))
    }
}

/// Per-slot disclosure directive for proof construction. Order and length
/// must match the message order used at signing time; the discriminant chosen
/// here is what the verifier is later told about the slot.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ProofMessage {
    /// The slot is disclosed to the verifier and enters the challenge
    /// computation in the clear.
    Revealed(Vec<u8>),
    /// The slot stays hidden; the blinding factor is the randomization term
    /// committed over this slot's generator.
    Hidden(Vec<u8>, BlindingFactor),
}

impl ProofMessage {
    pub fn revealed(message: &[u8]) -> Self {
        Self::Revealed(message.to_vec())
    }

    pub fn hidden(message: &[u8], blinding_factor: BlindingFactor) -> Self {
        Self::Hidden(message.to_vec(), blinding_factor)
    }

    pub fn message(&self) -> &[u8] {
        match self {
            Self::Revealed(m) => m,
            Self::Hidden(m, _) => m,
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}
