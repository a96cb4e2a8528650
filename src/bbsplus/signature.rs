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

use bls12_381_plus::{
    multi_miller_loop, G1Affine, G1Projective, G2Prepared, G2Projective, Gt, Scalar,
};
use elliptic_curve::hash2curve::ExpandMsg;
use ff::Field;
use group::{Curve, Group};
use serde::{Deserialize, Serialize};

use super::ciphersuites::BbsCiphersuite;
use super::generators::Generators;
use super::keys::{BbsPublicKey, SecretKey};
use crate::errors::Error;
use crate::utils::message::BBSplusMessage;
use crate::utils::util::{calculate_domain, calculate_random_scalars, ScalarExt};

/// A multi-message signature: `A = B * (SK + e)^-1` with
/// `B = P1 + Q1*s + Q2*domain + H_1*msg_1 + ... + H_L*msg_L`.
///
/// `e` and `s` are drawn fresh at every signing call, so two signatures over
/// identical input are never bit-identical; compare signatures by
/// verification outcome, not by bytes.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Signature {
    pub(crate) A: G1Projective,
    pub(crate) e: Scalar,
    pub(crate) s: Scalar,
}

impl Signature {
    pub const LENGTH: usize = 112;

    pub fn a(&self) -> G1Projective {
        self.A
    }

    pub fn e(&self) -> Scalar {
        self.e
    }

    pub fn s(&self) -> Scalar {
        self.s
    }

    /// Signs an ordered message list. The list length must equal the slot
    /// count the BBS public key was derived for.
    pub fn sign<CS: BbsCiphersuite>(
        sk: &SecretKey,
        bbs_pk: &BbsPublicKey,
        messages: &[Vec<u8>],
    ) -> Result<Self, Error>
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        if messages.len() != bbs_pk.message_count() {
            return Err(Error::MessageCountMismatch {
                expected: bbs_pk.message_count(),
                got: messages.len(),
            });
        }

        let message_scalars = BBSplusMessage::messages_to_scalar::<CS>(messages);
        core_sign::<CS>(sk, bbs_pk, &message_scalars)
    }

    /// Direct (non-proof) verification:
    /// `e(A, W + BP2*e) == e(B, BP2)`, checked as a double Miller loop.
    pub fn verify<CS: BbsCiphersuite>(
        &self,
        bbs_pk: &BbsPublicKey,
        messages: &[Vec<u8>],
    ) -> Result<(), Error>
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        if messages.len() != bbs_pk.message_count() {
            return Err(Error::MessageCountMismatch {
                expected: bbs_pk.message_count(),
                got: messages.len(),
            });
        }

        let message_scalars = BBSplusMessage::messages_to_scalar::<CS>(messages);
        core_verify::<CS>(bbs_pk, self, &message_scalars)
    }

    pub fn to_bytes(&self) -> [u8; Self::LENGTH] {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[0..48].copy_from_slice(&self.A.to_affine().to_compressed());
        bytes[48..80].copy_from_slice(&self.e.to_bytes_be());
        bytes[80..112].copy_from_slice(&self.s.to_bytes_be());
        bytes
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let data: [u8; Self::LENGTH] = data.try_into().map_err(|_| {
            Error::MalformedEncoding(format!(
                "signature must be {} bytes, got {}",
                Self::LENGTH,
                data.len()
            ))
        })?;

        let a_bytes: [u8; 48] = data[0..48].try_into().unwrap();
        let A = Option::<G1Affine>::from(G1Affine::from_compressed(&a_bytes))
            .map(G1Projective::from)
            .ok_or_else(|| Error::MalformedEncoding("invalid G1 point".to_owned()))?;

        let e_bytes: [u8; 32] = data[48..80].try_into().unwrap();
        let e = Scalar::from_bytes_be(&e_bytes)
            .ok_or_else(|| Error::MalformedEncoding("non-canonical scalar e".to_owned()))?;

        let s_bytes: [u8; 32] = data[80..112].try_into().unwrap();
        let s = Scalar::from_bytes_be(&s_bytes)
            .ok_or_else(|| Error::MalformedEncoding("non-canonical scalar s".to_owned()))?;

        Ok(Self { A, e, s })
    }
}

/// B = P1 + Q1*s + Q2*domain + H_1*msg_1 + ... + H_L*msg_L
pub(crate) fn compute_B(
    generators: &Generators,
    s: Scalar,
    domain: Scalar,
    messages: &[BBSplusMessage],
) -> G1Projective {
    let mut B = generators.g1_base_point + generators.q1 * s + generators.q2 * domain;

    for (H_i, msg) in generators.message_generators.iter().zip(messages) {
        B += *H_i * msg.value;
    }

    B
}

fn core_sign<CS>(
    sk: &SecretKey,
    bbs_pk: &BbsPublicKey,
    messages: &[BBSplusMessage],
) -> Result<Signature, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let domain = calculate_domain::<CS>(&bbs_pk.public_key(), &bbs_pk.generators);

    // resample on the negligible chance that SK + e has no inverse or A
    // degenerates to the identity
    loop {
        let randoms = calculate_random_scalars(2);
        let (e, s) = (randoms[0], randoms[1]);

        let B = compute_B(&bbs_pk.generators, s, domain, messages);

        let denom = Option::<Scalar>::from((sk.0 + e).invert());
        let A = match denom {
            Some(inv) => B * inv,
            None => continue,
        };

        if A.is_identity().into() {
            continue;
        }

        return Ok(Signature { A, e, s });
    }
}

fn core_verify<CS>(
    bbs_pk: &BbsPublicKey,
    signature: &Signature,
    messages: &[BBSplusMessage],
) -> Result<(), Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let domain = calculate_domain::<CS>(&bbs_pk.public_key(), &bbs_pk.generators);
    let B = compute_B(&bbs_pk.generators, signature.s, domain, messages);

    let BP2 = G2Projective::GENERATOR;
    let A2 = bbs_pk.w + BP2 * signature.e;

    let a_affine = signature.A.to_affine();
    let a2_prepared = G2Prepared::from(A2.to_affine());
    let b_affine = B.to_affine();
    let neg_bp2_prepared = G2Prepared::from(-BP2.to_affine());

    let pairing = multi_miller_loop(&[
        (&a_affine, &a2_prepared),
        (&b_affine, &neg_bp2_prepared),
    ])
    .final_exponentiation();

    if pairing == Gt::IDENTITY {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bbsplus::ciphersuites::{Bls12381Sha256, Bls12381Shake256};
    use crate::bbsplus::keys::KeyPair;

    fn setup<CS: BbsCiphersuite>(count: u32) -> (KeyPair, BbsPublicKey)
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let pair = KeyPair::generate::<CS>(&[11u8; 32]).unwrap();
        let bbs_pk = BbsPublicKey::derive::<CS>(pair.public_key(), count).unwrap();
        (pair, bbs_pk)
    }

    fn messages() -> Vec<Vec<u8>> {
        vec![
            b"message one".to_vec(),
            b"message two".to_vec(),
            b"message three".to_vec(),
        ]
    }

    #[test]
    fn sign_verify_round_trip() {
        let (pair, bbs_pk) = setup::<Bls12381Sha256>(3);
        let msgs = messages();

        let signature =
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &msgs).unwrap();
        assert!(signature
            .verify::<Bls12381Sha256>(&bbs_pk, &msgs)
            .is_ok());
    }

    #[test]
    fn sign_verify_round_trip_shake() {
        let (pair, bbs_pk) = setup::<Bls12381Shake256>(3);
        let msgs = messages();

        let signature =
            Signature::sign::<Bls12381Shake256>(pair.private_key(), &bbs_pk, &msgs).unwrap();
        assert!(signature
            .verify::<Bls12381Shake256>(&bbs_pk, &msgs)
            .is_ok());
    }

    #[test]
    fn signing_is_randomized() {
        let (pair, bbs_pk) = setup::<Bls12381Sha256>(3);
        let msgs = messages();

        let first =
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &msgs).unwrap();
        let second =
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &msgs).unwrap();

        assert_ne!(first.to_bytes(), second.to_bytes());
        assert!(first.verify::<Bls12381Sha256>(&bbs_pk, &msgs).is_ok());
        assert!(second.verify::<Bls12381Sha256>(&bbs_pk, &msgs).is_ok());
    }

    #[test]
    fn tampered_message_fails() {
        let (pair, bbs_pk) = setup::<Bls12381Sha256>(3);
        let msgs = messages();

        let signature =
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &msgs).unwrap();

        let mut tampered = msgs.clone();
        tampered[1][0] ^= 0x01;
        assert_eq!(
            signature.verify::<Bls12381Sha256>(&bbs_pk, &tampered),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn reordered_messages_fail() {
        let (pair, bbs_pk) = setup::<Bls12381Sha256>(3);
        let msgs = messages();

        let signature =
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &msgs).unwrap();

        let mut reordered = msgs.clone();
        reordered.swap(0, 2);
        assert_eq!(
            signature.verify::<Bls12381Sha256>(&bbs_pk, &reordered),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn message_count_is_enforced() {
        let (pair, bbs_pk) = setup::<Bls12381Sha256>(3);

        let too_few = vec![b"only".to_vec()];
        assert_eq!(
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &too_few),
            Err(Error::MessageCountMismatch {
                expected: 3,
                got: 1
            })
        );
    }

    #[test]
    fn single_message_scheme_works() {
        let (pair, bbs_pk) = setup::<Bls12381Sha256>(1);
        let msgs = vec![b"lone message".to_vec()];

        let signature =
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &msgs).unwrap();
        assert!(signature.verify::<Bls12381Sha256>(&bbs_pk, &msgs).is_ok());
    }

    #[test]
    fn encoding_round_trips() {
        let (pair, bbs_pk) = setup::<Bls12381Sha256>(3);
        let msgs = messages();

        let signature =
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &msgs).unwrap();
        let bytes = signature.to_bytes();
        assert_eq!(bytes.len(), Signature::LENGTH);

        let decoded = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, signature);
        assert!(decoded.verify::<Bls12381Sha256>(&bbs_pk, &msgs).is_ok());
    }

    #[test]
    fn decoding_rejects_malformed_inputs() {
        assert!(matches!(
            Signature::from_bytes(&[0u8; 80]),
            Err(Error::MalformedEncoding(_))
        ));
        assert!(matches!(
            Signature::from_bytes(&[0xffu8; 112]),
            Err(Error::MalformedEncoding(_))
        ));
    }

    #[test]
    fn wrong_key_fails() {
        let (pair, bbs_pk) = setup::<Bls12381Sha256>(3);
        let msgs = messages();
        let signature =
            Signature::sign::<Bls12381Sha256>(pair.private_key(), &bbs_pk, &msgs).unwrap();

        let other = KeyPair::generate::<Bls12381Sha256>(&[99u8; 32]).unwrap();
        let other_bbs_pk =
            BbsPublicKey::derive::<Bls12381Sha256>(other.public_key(), 3).unwrap();
        assert_eq!(
            signature.verify::<Bls12381Sha256>(&other_bbs_pk, &msgs),
            Err(Error::InvalidSignature)
        );
    }
}
