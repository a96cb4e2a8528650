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

use std::env;

use elliptic_curve::hash2curve::ExpandMsg;
use rand::Rng;
use zkbbs::bbsplus::ciphersuites::{BbsCiphersuite, Bls12381Sha256, Bls12381Shake256};
use zkbbs::bbsplus::keys::{BbsPublicKey, KeyPair};
use zkbbs::bbsplus::proof::PoKSignature;
use zkbbs::bbsplus::signature::Signature;
use zkbbs::errors::Error;
use zkbbs::utils::message::{BlindingFactor, ProofMessage};
use zkbbs::utils::util::{generate_random_secret, get_messages_vec};

fn selective_disclosure_main<CS: BbsCiphersuite>() -> Result<(), Error>
where
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    const MSGS: [&str; 3] = [
        "name: alice",
        "birthdate: 1990-01-01",
        "citizenship: wonderland",
    ];

    log::info!("Messages: {:?}", MSGS);

    let mut rng = rand::thread_rng();
    let seed: Vec<u8> = (0..CS::IKM_LEN).map(|_| rng.gen()).collect();

    log::info!("Keypair Generation");
    let issuer_keypair = KeyPair::generate::<CS>(&seed)?;

    let issuer_sk = issuer_keypair.private_key();
    log::info!("SK: {}", issuer_sk.encode());
    let issuer_pk = issuer_keypair.public_key();
    log::info!("PK: {}", issuer_pk.encode());

    let messages: Vec<Vec<u8>> = MSGS.iter().map(|m| m.as_bytes().to_vec()).collect();

    log::info!("BBS Public Key Derivation ({} message slots)", MSGS.len());
    let bbs_pk = BbsPublicKey::derive::<CS>(issuer_pk, MSGS.len() as u32)?;
    log::info!("BBS PK: {}", bbs_pk.encode());

    log::info!("Signature Computation...");
    let signature = Signature::sign::<CS>(issuer_sk, &bbs_pk, &messages)?;
    log::info!("Signature: {}", signature.encode());

    signature.verify::<CS>(&bbs_pk, &messages)?;
    log::info!("Signature is VALID");

    // Holder receives the nonce from the Verifier
    let nonce_verifier = generate_random_secret(32);
    log::info!("Nonce: {}", hex::encode(&nonce_verifier));

    // Holder discloses the birthdate only
    let directives = vec![
        ProofMessage::hidden(&messages[0], BlindingFactor::random()),
        ProofMessage::revealed(&messages[1]),
        ProofMessage::hidden(&messages[2], BlindingFactor::random()),
    ];

    log::info!("Proof of Knowledge of the Signature Generation...");
    let proof = PoKSignature::proof_gen::<CS>(&bbs_pk, &nonce_verifier, &signature, &directives)?;
    log::info!("Proof: {}", proof.encode());

    // Verifier sees the proof, the nonce and the disclosed slot only
    log::info!("Proof of Knowledge of the Signature verification...");
    let disclosed = get_messages_vec(&messages, &[1]);
    proof.proof_verify::<CS>(&bbs_pk, &nonce_verifier, &disclosed, &[1])?;
    log::info!("Proof of Knowledge of the Signature is VALID!");

    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!(
            "Usage: {} <cipher_suite>
                Ciphersuites:
                    - BLS12-381-SHA-256
                    - BLS12-381-SHAKE-256",
            args[0]
        );
        return;
    }

    let cipher_suite = &args[1];

    match cipher_suite.as_str() {
        "BLS12-381-SHA-256" => {
            log::info!("Ciphersuite: BLS12-381-SHA-256");
            let _ = selective_disclosure_main::<Bls12381Sha256>();
        }
        "BLS12-381-SHAKE-256" => {
            log::info!("Ciphersuite: BLS12-381-SHAKE-256");
            let _ = selective_disclosure_main::<Bls12381Shake256>();
        }
        _ => {
            println!("Unknown cipher suite: {}", cipher_suite);
        }
    }
}
