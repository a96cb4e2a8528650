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

use bls12_381_plus::{G2Affine, G2Projective, Scalar};
use elliptic_curve::group::Curve;
use elliptic_curve::hash2curve::ExpandMsg;
use ff::Field;
use serde::{Deserialize, Serialize};

use super::ciphersuites::BbsCiphersuite;
use super::generators::Generators;
use crate::errors::Error;
use crate::utils::util::{hash_to_scalar, i2osp, ScalarExt};

/// The holder's scalar. Never transmitted; encodings exist for storage only.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SecretKey(pub(crate) Scalar);

impl SecretKey {
    pub const LENGTH: usize = 32;

    /// Big-endian canonical encoding.
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        self.0.to_be_bytes()
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; Self::LENGTH] = bytes.try_into().map_err(|_| {
            Error::MalformedEncoding(format!(
                "secret key must be {} bytes, got {}",
                Self::LENGTH,
                bytes.len()
            ))
        })?;
        let s = Scalar::from_bytes_be(&bytes)
            .ok_or_else(|| Error::MalformedEncoding("non-canonical scalar".to_owned()))?;
        if s == Scalar::ZERO {
            return Err(Error::MalformedEncoding("secret key is zero".to_owned()));
        }
        Ok(Self(s))
    }
}

/// The signer's point in G2, `W = BP2 * SK`. Shared freely.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PublicKey(pub(crate) G2Projective);

impl PublicKey {
    pub const LENGTH: usize = 96;

    /// Compressed canonical encoding.
    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        self.0.to_affine().to_compressed()
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; Self::LENGTH] = bytes.try_into().map_err(|_| {
            Error::MalformedEncoding(format!(
                "public key must be {} bytes, got {}",
                Self::LENGTH,
                bytes.len()
            ))
        })?;
        let point = Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
            .ok_or_else(|| Error::MalformedEncoding("invalid G2 point".to_owned()))?;
        Ok(Self(G2Projective::from(point)))
    }
}

/// A (PublicKey, SecretKey) pair derived deterministically from a seed.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct KeyPair {
    pub(crate) public: PublicKey,
    pub(crate) private: SecretKey,
}

impl KeyPair {
    /// Deterministic generation: the same seed always yields the same pair.
    /// Seeds shorter than [`BbsCiphersuite::IKM_LEN`] or longer than
    /// [`BbsCiphersuite::MAX_IKM_LEN`] are rejected, never truncated or padded.
    pub fn generate<CS: BbsCiphersuite>(seed: &[u8]) -> Result<Self, Error>
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let sk = key_gen::<CS>(seed)?;
        let pk = sk_to_pk(sk);

        Ok(Self {
            public: PublicKey(pk),
            private: SecretKey(sk),
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &SecretKey {
        &self.private
    }

    /// Returns the couple `(sk, pk)`.
    pub fn into_parts(self) -> (SecretKey, PublicKey) {
        (self.private, self.public)
    }
}

/// SK = hash_to_scalar(key_material || I2OSP(0, 2), keygen_dst)
///
/// The two zero octets are the length prefix of the (empty) key-info string,
/// kept so the transcript layout matches deployments that supply one.
pub(crate) fn key_gen<CS>(key_material: &[u8]) -> Result<Scalar, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    if key_material.len() < CS::IKM_LEN || key_material.len() > CS::MAX_IKM_LEN {
        return Err(Error::InvalidSeed(key_material.len()));
    }

    let derive_input = [key_material, &i2osp(0, 2)].concat();

    Ok(hash_to_scalar::<CS>(&derive_input, &CS::keygen_dst()))
}

/// W = SK * BP2
pub(crate) fn sk_to_pk(sk: Scalar) -> G2Projective {
    G2Affine::generator() * sk
}

/// A public key expanded for a fixed number of message slots: the G2 point
/// plus one deterministically derived G1 generator per slot. Every signature
/// or proof against this key must supply exactly `message_count` slots.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct BbsPublicKey {
    pub(crate) w: G2Projective,
    pub(crate) generators: Generators,
}

impl BbsPublicKey {
    /// Pure and deterministic: generators are derived by hashing the
    /// compressed public key bytes with a running counter, so the same
    /// (key, count) always expands to the same value.
    pub fn derive<CS: BbsCiphersuite>(pk: &PublicKey, message_count: u32) -> Result<Self, Error>
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        if message_count == 0 {
            return Err(Error::InvalidMessageCount);
        }

        let generators = Generators::create::<CS>(&pk.to_bytes(), message_count as usize);

        Ok(Self {
            w: pk.0,
            generators,
        })
    }

    pub fn message_count(&self) -> usize {
        self.generators.message_generators.len()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.w)
    }

    /// Compressed point followed by the big-endian slot count. Generators are
    /// re-derived on decode, which keeps the encoding canonical.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PublicKey::LENGTH + 4);
        bytes.extend_from_slice(&PublicKey(self.w).to_bytes());
        bytes.extend_from_slice(&(self.message_count() as u32).to_be_bytes());
        bytes
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes<CS: BbsCiphersuite>(bytes: &[u8]) -> Result<Self, Error>
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        if bytes.len() != PublicKey::LENGTH + 4 {
            return Err(Error::MalformedEncoding(format!(
                "BBS public key must be {} bytes, got {}",
                PublicKey::LENGTH + 4,
                bytes.len()
            )));
        }

        let pk = PublicKey::from_bytes(&bytes[..PublicKey::LENGTH])?;
        let count = u32::from_be_bytes(bytes[PublicKey::LENGTH..].try_into().unwrap());
        Self::derive::<CS>(&pk, count)
    }
}
