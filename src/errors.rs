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

use thiserror::Error;

/// Every fallible operation of the crate returns exactly one of these.
/// Error values carry sizes and structural causes only, never key material
/// or blinding factors.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("seed length {0} outside the accepted range [32, 65535]")]
    InvalidSeed(usize),
    #[error("message count must be at least 1")]
    InvalidMessageCount,
    #[error("expected {expected} messages, got {got}")]
    MessageCountMismatch { expected: usize, got: usize },
    #[error("signature does not verify against the supplied messages")]
    InvalidSignature,
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
    #[error("proof verification failed: {0}")]
    ProofVerification(String),
}
