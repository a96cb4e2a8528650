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
use elliptic_curve::group::Curve;
use elliptic_curve::hash2curve::{ExpandMsg, Expander};
use ff::Field;
use rand::RngCore;

use crate::bbsplus::ciphersuites::BbsCiphersuite;
use crate::bbsplus::generators::Generators;
use crate::bbsplus::keys::PublicKey;
use crate::utils::message::BBSplusMessage;

/// I2OSP: big-endian, fixed-width octet string of `len` bytes.
pub fn i2osp(x: usize, len: usize) -> Vec<u8> {
    let bytes = (x as u64).to_be_bytes();
    bytes[bytes.len() - len..].to_vec()
}

/// hash_to_scalar(msg_octets, dst): expand the input to EXPAND_LEN uniform
/// bytes and reduce into the scalar field, re-expanding with a counter until
/// the result is nonzero.
pub fn hash_to_scalar<CS: BbsCiphersuite>(msg_octets: &[u8], dst: &[u8]) -> Scalar
where
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let mut counter: u8 = 0;
    let mut hashed_scalar = Scalar::ZERO;

    let mut uniform_bytes = vec![0u8; CS::EXPAND_LEN];

    while hashed_scalar == Scalar::ZERO {
        let msg_prime = [msg_octets, &[counter]].concat();
        CS::Expander::expand_message(&[msg_prime.as_slice()], &[dst], CS::EXPAND_LEN)
            .unwrap()
            .fill_bytes(&mut uniform_bytes);
        hashed_scalar = Scalar::from_okm(uniform_bytes.as_slice().try_into().unwrap());

        counter += 1;
    }

    hashed_scalar
}

/// domain = hash_to_scalar(PK || L || Q1 || Q2 || H_1 || ... || H_L || ID),
/// binding the signer key and the full generator set into every signature
/// and proof transcript.
pub(crate) fn calculate_domain<CS: BbsCiphersuite>(
    pk: &PublicKey,
    generators: &Generators,
) -> Scalar
where
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let L = generators.message_generators.len();

    let mut dom_input: Vec<u8> = Vec::new();
    dom_input.extend_from_slice(&pk.to_bytes());
    dom_input.extend_from_slice(&i2osp(L, 8));
    dom_input.extend_from_slice(&generators.q1.to_affine().to_compressed());
    dom_input.extend_from_slice(&generators.q2.to_affine().to_compressed());
    generators
        .message_generators
        .iter()
        .for_each(|h| dom_input.extend_from_slice(&h.to_affine().to_compressed()));
    dom_input.extend_from_slice(CS::ID);

    hash_to_scalar::<CS>(&dom_input, &CS::hash_to_scalar_dst())
}

/// Fresh uniform scalars from the process CSPRNG, one 48-byte OKM each.
/// Every signing and proof call draws its own batch; randomizers are never
/// reused across calls.
pub fn calculate_random_scalars(count: usize) -> Vec<Scalar> {
    let mut rng = rand::thread_rng();
    let mut random_scalars: Vec<Scalar> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut buf = [0u8; 48];
        rng.fill_bytes(&mut buf);
        random_scalars.push(Scalar::from_okm(&buf));
    }

    random_scalars
}

/// Random octet string, e.g. a verifier nonce.
pub fn generate_random_secret(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

/// Indexes in `0..length` not present in `indexes`, ascending.
pub fn get_remaining_indexes(length: usize, indexes: &[usize]) -> Vec<usize> {
    let mut remaining: Vec<usize> = Vec::new();

    for i in 0..length {
        if !indexes.contains(&i) {
            remaining.push(i);
        }
    }

    remaining
}

/// The subset of `messages` selected by `indexes`, in index order.
pub fn get_messages(messages: &[BBSplusMessage], indexes: &[usize]) -> Vec<BBSplusMessage> {
    indexes.iter().map(|&i| messages[i]).collect()
}

/// The subset of raw message byte strings selected by `indexes`, in index order.
pub fn get_messages_vec(messages: &[Vec<u8>], indexes: &[usize]) -> Vec<Vec<u8>> {
    indexes.iter().map(|&i| messages[i].clone()).collect()
}

pub trait ScalarExt {
    fn to_bytes_be(&self) -> [u8; 32];
    fn from_bytes_be(bytes: &[u8; 32]) -> Option<Self>
    where
        Self: Sized;
}

impl ScalarExt for Scalar {
    fn to_bytes_be(&self) -> [u8; 32] {
        self.to_be_bytes()
    }

    /// None when the encoding is not a canonical field element.
    fn from_bytes_be(bytes: &[u8; 32]) -> Option<Self> {
        Scalar::from_be_bytes(bytes).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bbsplus::ciphersuites::{Bls12381Sha256, Bls12381Shake256};

    #[test]
    fn i2osp_widths() {
        assert_eq!(i2osp(0, 2), vec![0, 0]);
        assert_eq!(i2osp(258, 2), vec![1, 2]);
        assert_eq!(i2osp(5, 8), vec![0, 0, 0, 0, 0, 0, 0, 5]);
    }

    #[test]
    fn hash_to_scalar_deterministic_and_dst_separated() {
        let a = hash_to_scalar::<Bls12381Sha256>(b"msg", b"DST_A");
        let b = hash_to_scalar::<Bls12381Sha256>(b"msg", b"DST_A");
        let c = hash_to_scalar::<Bls12381Sha256>(b"msg", b"DST_B");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let d = hash_to_scalar::<Bls12381Shake256>(b"msg", b"DST_A");
        assert_ne!(a, d);
    }

    #[test]
    fn random_scalars_are_distinct() {
        let scalars = calculate_random_scalars(8);
        assert_eq!(scalars.len(), 8);
        for i in 0..scalars.len() {
            for j in i + 1..scalars.len() {
                assert_ne!(scalars[i], scalars[j]);
            }
        }
    }

    #[test]
    fn remaining_indexes_complement() {
        assert_eq!(get_remaining_indexes(5, &[0, 2]), vec![1, 3, 4]);
        assert_eq!(get_remaining_indexes(3, &[]), vec![0, 1, 2]);
        assert!(get_remaining_indexes(2, &[0, 1]).is_empty());
    }

    #[test]
    fn scalar_be_round_trip() {
        let s = hash_to_scalar::<Bls12381Sha256>(b"round-trip", b"DST");
        let bytes = s.to_bytes_be();
        assert_eq!(Scalar::from_bytes_be(&bytes), Some(s));

        // the field modulus is far below 2^256 - 1
        let not_canonical = [0xffu8; 32];
        assert_eq!(Scalar::from_bytes_be(&not_canonical), None);
    }
}
