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
    multi_miller_loop, G1Affine, G1Projective, G2Prepared, G2Projective, Scalar,
};
use elliptic_curve::hash2curve::ExpandMsg;
use ff::Field;
use group::{Curve, Group};
use serde::{Deserialize, Serialize};

use super::ciphersuites::BbsCiphersuite;
use super::keys::BbsPublicKey;
use super::signature::{compute_B, Signature};
use crate::errors::Error;
use crate::utils::message::{BBSplusMessage, ProofMessage};
use crate::utils::util::{
    calculate_domain, calculate_random_scalars, get_messages, get_remaining_indexes,
    hash_to_scalar, i2osp, ScalarExt,
};

/// Zero-knowledge proof of knowledge of a signature, disclosing a chosen
/// subset of the signed messages.
///
/// `A_prime`/`A_bar`/`D` are the randomized signature commitments, `challenge`
/// the Fiat-Shamir scalar, and the remaining scalars the Schnorr responses —
/// one `m_cap` entry per hidden slot, in ascending slot order. Self-contained:
/// verification needs the BBS public key, the nonce and the revealed messages,
/// never the signature, the hidden messages or their blinding factors.
///
/// Proofs are randomized; two proofs over identical input differ byte-wise.
/// A proof is bound to its nonce and is not meant to be replayed across
/// verification sessions.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PoKSignature {
    pub(crate) A_prime: G1Projective,
    pub(crate) A_bar: G1Projective,
    pub(crate) D: G1Projective,
    pub(crate) challenge: Scalar,
    pub(crate) e_cap: Scalar,
    pub(crate) r2_cap: Scalar,
    pub(crate) r3_cap: Scalar,
    pub(crate) s_cap: Scalar,
    pub(crate) m_cap: Vec<Scalar>,
}

impl PoKSignature {
    /// Encoded length of a proof hiding `undisclosed` message slots.
    pub const fn length(undisclosed: usize) -> usize {
        48 * 3 + 32 * 5 + 32 * undisclosed
    }

    /// Builds a proof over `messages`, one directive per signed slot in
    /// signing order. The signature is validated against the full message
    /// set before any blinding happens; handing out a proof for an invalid
    /// signature is never acceptable.
    pub fn proof_gen<CS: BbsCiphersuite>(
        bbs_pk: &BbsPublicKey,
        nonce: &[u8],
        signature: &Signature,
        messages: &[ProofMessage],
    ) -> Result<Self, Error>
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let L = bbs_pk.message_count();
        if messages.len() != L {
            return Err(Error::MessageCountMismatch {
                expected: L,
                got: messages.len(),
            });
        }

        let all_bytes: Vec<Vec<u8>> = messages.iter().map(|m| m.message().to_vec()).collect();
        signature.verify::<CS>(bbs_pk, &all_bytes)?;

        let mut message_scalars: Vec<BBSplusMessage> = Vec::with_capacity(L);
        let mut disclosed_indexes: Vec<usize> = Vec::new();
        let mut undisclosed_indexes: Vec<usize> = Vec::new();
        let mut m_tilde: Vec<Scalar> = Vec::new();

        for (i, pm) in messages.iter().enumerate() {
            message_scalars.push(BBSplusMessage::map_message_to_scalar_as_hash::<CS>(
                pm.message(),
            ));
            match pm {
                ProofMessage::Revealed(_) => disclosed_indexes.push(i),
                ProofMessage::Hidden(_, blinding) => {
                    undisclosed_indexes.push(i);
                    m_tilde.push(blinding.0);
                }
            }
        }

        core_proof_gen::<CS>(
            bbs_pk,
            signature,
            &message_scalars,
            &disclosed_indexes,
            &undisclosed_indexes,
            &m_tilde,
            nonce,
        )
    }

    /// Checks the proof against the revealed messages, each paired with its
    /// original slot index. Recomputes the Fiat-Shamir challenge from the
    /// proof's public commitments, the nonce and the revealed messages, then
    /// closes with the pairing check.
    pub fn proof_verify<CS: BbsCiphersuite>(
        &self,
        bbs_pk: &BbsPublicKey,
        nonce: &[u8],
        disclosed_messages: &[Vec<u8>],
        disclosed_indexes: &[usize],
    ) -> Result<(), Error>
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let mut disclosed_indexes = disclosed_indexes.to_vec();
        disclosed_indexes.sort_unstable();
        if disclosed_indexes.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::ProofVerification(
                "duplicate disclosed index".to_owned(),
            ));
        }

        if disclosed_messages.len() != disclosed_indexes.len() {
            return Err(Error::ProofVerification(format!(
                "{} disclosed messages for {} indexes",
                disclosed_messages.len(),
                disclosed_indexes.len()
            )));
        }

        let disclosed_scalars = BBSplusMessage::messages_to_scalar::<CS>(disclosed_messages);

        core_proof_verify::<CS>(
            bbs_pk,
            self,
            &disclosed_scalars,
            &disclosed_indexes,
            nonce,
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::with_capacity(Self::length(self.m_cap.len()));

        bytes.extend_from_slice(&self.A_prime.to_affine().to_compressed());
        bytes.extend_from_slice(&self.A_bar.to_affine().to_compressed());
        bytes.extend_from_slice(&self.D.to_affine().to_compressed());
        bytes.extend_from_slice(&self.challenge.to_bytes_be());
        bytes.extend_from_slice(&self.e_cap.to_bytes_be());
        bytes.extend_from_slice(&self.r2_cap.to_bytes_be());
        bytes.extend_from_slice(&self.r3_cap.to_bytes_be());
        bytes.extend_from_slice(&self.s_cap.to_bytes_be());
        self.m_cap
            .iter()
            .for_each(|v| bytes.extend_from_slice(&v.to_bytes_be()));
        bytes
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < Self::length(0) || (bytes.len() - Self::length(0)) % 32 != 0 {
            return Err(Error::MalformedEncoding(format!(
                "proof length {} is not {} + a multiple of 32",
                bytes.len(),
                Self::length(0)
            )));
        }

        let parse_g1 = |slice: &[u8]| -> Result<G1Projective, Error> {
            let arr: [u8; 48] = slice.try_into().unwrap();
            Option::<G1Affine>::from(G1Affine::from_compressed(&arr))
                .map(G1Projective::from)
                .ok_or_else(|| Error::MalformedEncoding("invalid G1 point".to_owned()))
        };
        let parse_scalar = |slice: &[u8]| -> Result<Scalar, Error> {
            let arr: [u8; 32] = slice.try_into().unwrap();
            Scalar::from_bytes_be(&arr)
                .ok_or_else(|| Error::MalformedEncoding("non-canonical scalar".to_owned()))
        };

        let A_prime = parse_g1(&bytes[0..48])?;
        let A_bar = parse_g1(&bytes[48..96])?;
        let D = parse_g1(&bytes[96..144])?;
        let challenge = parse_scalar(&bytes[144..176])?;
        let e_cap = parse_scalar(&bytes[176..208])?;
        let r2_cap = parse_scalar(&bytes[208..240])?;
        let r3_cap = parse_scalar(&bytes[240..272])?;
        let s_cap = parse_scalar(&bytes[272..304])?;

        let mut m_cap: Vec<Scalar> = Vec::new();
        for chunk in bytes[304..].chunks_exact(32) {
            m_cap.push(parse_scalar(chunk)?);
        }

        Ok(Self {
            A_prime,
            A_bar,
            D,
            challenge,
            e_cap,
            r2_cap,
            r3_cap,
            s_cap,
            m_cap,
        })
    }
}

#[derive(Clone, Debug)]
struct ProofInitResult {
    A_prime: G1Projective,
    A_bar: G1Projective,
    D: G1Projective,
    T1: G1Projective,
    T2: G1Projective,
    domain: Scalar,
}

fn core_proof_gen<CS>(
    bbs_pk: &BbsPublicKey,
    signature: &Signature,
    messages: &[BBSplusMessage],
    disclosed_indexes: &[usize],
    undisclosed_indexes: &[usize],
    m_tilde: &[Scalar],
    nonce: &[u8],
) -> Result<PoKSignature, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    // [r1, r2, e~, r2~, r3~, s~]; r1 must be invertible, resample until it is
    let (random_scalars, r3) = loop {
        let rs = calculate_random_scalars(6);
        if let Some(inv) = Option::<Scalar>::from(rs[0].invert()) {
            break (rs, inv);
        }
    };

    let init_res = proof_init::<CS>(
        bbs_pk,
        signature,
        &random_scalars,
        messages,
        undisclosed_indexes,
        m_tilde,
    );

    let disclosed_messages = get_messages(messages, disclosed_indexes);

    let challenge = proof_challenge_calculate::<CS>(
        &init_res,
        disclosed_indexes,
        &disclosed_messages,
        nonce,
    );

    let undisclosed_messages = get_messages(messages, undisclosed_indexes);

    Ok(proof_finalize(
        &init_res,
        challenge,
        signature,
        &random_scalars,
        r3,
        &undisclosed_messages,
        m_tilde,
    ))
}

fn proof_init<CS>(
    bbs_pk: &BbsPublicKey,
    signature: &Signature,
    random_scalars: &[Scalar],
    messages: &[BBSplusMessage],
    undisclosed_indexes: &[usize],
    m_tilde: &[Scalar],
) -> ProofInitResult
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let generators = &bbs_pk.generators;

    let r1 = random_scalars[0];
    let r2 = random_scalars[1];
    let e_tilde = random_scalars[2];
    let r2_tilde = random_scalars[3];
    let r3_tilde = random_scalars[4];
    let s_tilde = random_scalars[5];

    let domain = calculate_domain::<CS>(&bbs_pk.public_key(), generators);
    let B = compute_B(generators, signature.s, domain, messages);

    let A_prime = signature.A * r1;
    let A_bar = A_prime * (-signature.e) + B * r1;
    let D = B * r1 - generators.q1 * r2;

    let T1 = A_prime * e_tilde + generators.q1 * r2_tilde;
    let mut T2 = D * r3_tilde + generators.q1 * s_tilde;

    for (j, &idx) in undisclosed_indexes.iter().enumerate() {
        T2 += generators.message_generators[idx] * m_tilde[j];
    }

    ProofInitResult {
        A_prime,
        A_bar,
        D,
        T1,
        T2,
        domain,
    }
}

/// c = hash_to_scalar(A' || Abar || D || T1 || T2 || I2OSP(R, 8) ||
///     indexes || disclosed message scalars || domain ||
///     I2OSP(len(nonce), 8) || nonce)
fn proof_challenge_calculate<CS>(
    init_res: &ProofInitResult,
    disclosed_indexes: &[usize],
    disclosed_messages: &[BBSplusMessage],
    nonce: &[u8],
) -> Scalar
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let R = disclosed_indexes.len();

    let mut c_arr: Vec<u8> = Vec::new();
    c_arr.extend_from_slice(&init_res.A_prime.to_affine().to_compressed());
    c_arr.extend_from_slice(&init_res.A_bar.to_affine().to_compressed());
    c_arr.extend_from_slice(&init_res.D.to_affine().to_compressed());
    c_arr.extend_from_slice(&init_res.T1.to_affine().to_compressed());
    c_arr.extend_from_slice(&init_res.T2.to_affine().to_compressed());
    c_arr.extend_from_slice(&i2osp(R, 8));
    disclosed_indexes
        .iter()
        .for_each(|&i| c_arr.extend_from_slice(&i2osp(i, 8)));
    disclosed_messages
        .iter()
        .for_each(|m| c_arr.extend_from_slice(&m.to_bytes_be()));
    c_arr.extend_from_slice(&init_res.domain.to_bytes_be());
    c_arr.extend_from_slice(&i2osp(nonce.len(), 8));
    c_arr.extend_from_slice(nonce);

    hash_to_scalar::<CS>(&c_arr, &CS::challenge_dst())
}

fn proof_finalize(
    init_res: &ProofInitResult,
    challenge: Scalar,
    signature: &Signature,
    random_scalars: &[Scalar],
    r3: Scalar,
    undisclosed_messages: &[BBSplusMessage],
    m_tilde: &[Scalar],
) -> PoKSignature {
    let r2 = random_scalars[1];
    let e_tilde = random_scalars[2];
    let r2_tilde = random_scalars[3];
    let r3_tilde = random_scalars[4];
    let s_tilde = random_scalars[5];

    let s_prime = signature.s - r2 * r3;

    let e_cap = e_tilde + signature.e * challenge;
    let r2_cap = r2_tilde - r2 * challenge;
    let r3_cap = r3_tilde - r3 * challenge;
    let s_cap = s_tilde + s_prime * challenge;

    let m_cap: Vec<Scalar> = m_tilde
        .iter()
        .zip(undisclosed_messages)
        .map(|(tilde, msg)| tilde + msg.value * challenge)
        .collect();

    PoKSignature {
        A_prime: init_res.A_prime,
        A_bar: init_res.A_bar,
        D: init_res.D,
        challenge,
        e_cap,
        r2_cap,
        r3_cap,
        s_cap,
        m_cap,
    }
}

fn core_proof_verify<CS>(
    bbs_pk: &BbsPublicKey,
    proof: &PoKSignature,
    disclosed_messages: &[BBSplusMessage],
    disclosed_indexes: &[usize],
    nonce: &[u8],
) -> Result<(), Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let init_res = proof_verify_init::<CS>(
        bbs_pk,
        proof,
        disclosed_messages,
        disclosed_indexes,
    )?;

    let challenge = proof_challenge_calculate::<CS>(
        &init_res,
        disclosed_indexes,
        disclosed_messages,
        nonce,
    );

    if proof.challenge != challenge {
        return Err(Error::ProofVerification("challenge mismatch".to_owned()));
    }

    if proof.A_prime.is_identity().into() {
        return Err(Error::ProofVerification("A' is the identity".to_owned()));
    }

    let BP2 = G2Projective::GENERATOR;

    let a_prime_affine = proof.A_prime.to_affine();
    let w_prepared = G2Prepared::from(bbs_pk.w.to_affine());
    let a_bar_affine = proof.A_bar.to_affine();
    let neg_bp2_prepared = G2Prepared::from(-BP2.to_affine());

    let pairing = multi_miller_loop(&[
        (&a_prime_affine, &w_prepared),
        (&a_bar_affine, &neg_bp2_prepared),
    ])
    .final_exponentiation();

    if pairing.is_identity().into() {
        Ok(())
    } else {
        Err(Error::ProofVerification("pairing check failed".to_owned()))
    }
}

fn proof_verify_init<CS>(
    bbs_pk: &BbsPublicKey,
    proof: &PoKSignature,
    disclosed_messages: &[BBSplusMessage],
    disclosed_indexes: &[usize],
) -> Result<ProofInitResult, Error>
where
    CS: BbsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let generators = &bbs_pk.generators;

    let U = proof.m_cap.len();
    let R = disclosed_indexes.len();
    let L = bbs_pk.message_count();

    if U + R != L {
        return Err(Error::ProofVerification(format!(
            "{} hidden + {} revealed slots for a {}-message key",
            U, R, L
        )));
    }

    if let Some(&invalid) = disclosed_indexes.iter().find(|&&i| i >= L) {
        return Err(Error::ProofVerification(format!(
            "disclosed index {} out of range for {} messages",
            invalid, L
        )));
    }

    let undisclosed_indexes = get_remaining_indexes(L, disclosed_indexes);

    let domain = calculate_domain::<CS>(&bbs_pk.public_key(), generators);

    let T1 = (proof.A_bar - proof.D) * proof.challenge
        + proof.A_prime * proof.e_cap
        + generators.q1 * proof.r2_cap;

    let mut Bv = generators.g1_base_point + generators.q2 * domain;
    for (i, msg) in disclosed_indexes.iter().zip(disclosed_messages) {
        Bv += generators.message_generators[*i] * msg.value;
    }

    let mut T2 = Bv * proof.challenge + proof.D * proof.r3_cap + generators.q1 * proof.s_cap;
    for (j, &idx) in undisclosed_indexes.iter().enumerate() {
        T2 += generators.message_generators[idx] * proof.m_cap[j];
    }

    Ok(ProofInitResult {
        A_prime: proof.A_prime,
        A_bar: proof.A_bar,
        D: proof.D,
        T1,
        T2,
        domain,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bbsplus::ciphersuites::{Bls12381Sha256, Bls12381Shake256};
    use crate::bbsplus::keys::KeyPair;
    use crate::utils::message::BlindingFactor;

    const NONCE: &[u8] = b"verifier session nonce";

    fn setup<CS: BbsCiphersuite>(
        count: u32,
    ) -> (KeyPair, BbsPublicKey, Vec<Vec<u8>>, Signature)
    where
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let pair = KeyPair::generate::<CS>(&[21u8; 32]).unwrap();
        let bbs_pk = BbsPublicKey::derive::<CS>(pair.public_key(), count).unwrap();
        let msgs: Vec<Vec<u8>> = (0..count)
            .map(|i| format!("credential attribute {}", i).into_bytes())
            .collect();
        let signature = Signature::sign::<CS>(pair.private_key(), &bbs_pk, &msgs).unwrap();
        (pair, bbs_pk, msgs, signature)
    }

    fn disclose_only(msgs: &[Vec<u8>], reveal: &[usize]) -> Vec<ProofMessage> {
        msgs.iter()
            .enumerate()
            .map(|(i, m)| {
                if reveal.contains(&i) {
                    ProofMessage::revealed(m)
                } else {
                    ProofMessage::hidden(m, BlindingFactor::random())
                }
            })
            .collect()
    }

    #[test]
    fn partial_reveal_round_trip() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(4);
        let directives = disclose_only(&msgs, &[1, 3]);

        let proof =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();

        let disclosed = vec![msgs[1].clone(), msgs[3].clone()];
        assert!(proof
            .proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &disclosed, &[1, 3])
            .is_ok());
    }

    #[test]
    fn partial_reveal_round_trip_shake() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Shake256>(4);
        let directives = disclose_only(&msgs, &[0, 2]);

        let proof = PoKSignature::proof_gen::<Bls12381Shake256>(
            &bbs_pk, NONCE, &signature, &directives,
        )
        .unwrap();

        let disclosed = vec![msgs[0].clone(), msgs[2].clone()];
        assert!(proof
            .proof_verify::<Bls12381Shake256>(&bbs_pk, NONCE, &disclosed, &[0, 2])
            .is_ok());
    }

    #[test]
    fn full_reveal_round_trip() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs, &[0, 1, 2]);

        let proof =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();
        assert!(proof.m_cap.is_empty());

        assert!(proof
            .proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &msgs, &[0, 1, 2])
            .is_ok());
    }

    #[test]
    fn all_hidden_round_trip() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs, &[]);

        let proof =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();
        assert_eq!(proof.m_cap.len(), 3);

        assert!(proof
            .proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &[], &[])
            .is_ok());
    }

    #[test]
    fn nonce_replay_is_rejected() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs, &[0]);

        let proof =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();

        let disclosed = vec![msgs[0].clone()];
        assert_eq!(
            proof.proof_verify::<Bls12381Sha256>(&bbs_pk, b"another nonce", &disclosed, &[0]),
            Err(Error::ProofVerification("challenge mismatch".to_owned()))
        );
    }

    #[test]
    fn tampered_revealed_message_is_rejected() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs, &[1]);

        let proof =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();

        let mut tampered = msgs[1].clone();
        tampered[0] ^= 0x01;
        assert!(proof
            .proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &[tampered], &[1])
            .is_err());
    }

    #[test]
    fn revealed_message_at_wrong_slot_is_rejected() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs, &[1]);

        let proof =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();

        // message 1's content swapped for message 0's
        assert!(proof
            .proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &[msgs[0].clone()], &[1])
            .is_err());
    }

    #[test]
    fn proof_generation_requires_valid_signature() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);

        let mut wrong = msgs.clone();
        wrong[2] = b"never signed".to_vec();
        let directives = disclose_only(&wrong, &[0]);

        assert_eq!(
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn proof_generation_checks_slot_count() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs[..2], &[0]);

        assert_eq!(
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives),
            Err(Error::MessageCountMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn verification_rejects_structural_mismatches() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs, &[0, 1]);

        let proof =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();

        let disclosed = vec![msgs[0].clone(), msgs[1].clone()];

        // wrong revealed-slot count
        assert!(matches!(
            proof.proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &disclosed[..1], &[0]),
            Err(Error::ProofVerification(_))
        ));
        // index out of range
        assert!(matches!(
            proof.proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &disclosed, &[0, 7]),
            Err(Error::ProofVerification(_))
        ));
        // duplicated index
        assert!(matches!(
            proof.proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &disclosed, &[0, 0]),
            Err(Error::ProofVerification(_))
        ));
        // messages/indexes length mismatch
        assert!(matches!(
            proof.proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &disclosed, &[0]),
            Err(Error::ProofVerification(_))
        ));
    }

    #[test]
    fn proofs_are_randomized() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs, &[0]);

        let first =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();
        let second =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();

        assert_ne!(first.to_bytes(), second.to_bytes());

        let disclosed = vec![msgs[0].clone()];
        assert!(first
            .proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &disclosed, &[0])
            .is_ok());
        assert!(second
            .proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &disclosed, &[0])
            .is_ok());
    }

    #[test]
    fn encoding_round_trips() {
        let (_, bbs_pk, msgs, signature) = setup::<Bls12381Sha256>(3);
        let directives = disclose_only(&msgs, &[2]);

        let proof =
            PoKSignature::proof_gen::<Bls12381Sha256>(&bbs_pk, NONCE, &signature, &directives)
                .unwrap();

        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), PoKSignature::length(2));

        let decoded = PoKSignature::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, proof);
        assert!(decoded
            .proof_verify::<Bls12381Sha256>(&bbs_pk, NONCE, &[msgs[2].clone()], &[2])
            .is_ok());
    }

    #[test]
    fn decoding_rejects_malformed_inputs() {
        assert!(matches!(
            PoKSignature::from_bytes(&[0u8; 100]),
            Err(Error::MalformedEncoding(_))
        ));
        assert!(matches!(
            PoKSignature::from_bytes(&[0u8; 305]),
            Err(Error::MalformedEncoding(_))
        ));
        assert!(matches!(
            PoKSignature::from_bytes(&[0xffu8; 304]),
            Err(Error::MalformedEncoding(_))
        ));
    }
}
