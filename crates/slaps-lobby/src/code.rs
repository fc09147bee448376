//! Lobby codes and collision-bounded code allocation
//!
//! A host publishes its lobby under a short random code. The peer network
//! may already have that code bound, in which case the host draws another,
//! up to `max_code_attempts` times.

use core::fmt;
use serde::{Deserialize, Serialize};
use slaps_core::SeededRng;

use crate::config::LobbyConfig;
use crate::error::LobbyError;

/// Uppercase letters and digits without I, O, 0 or 1
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LobbyCode(String);

impl LobbyCode {
    /// Draw a random code of `length` characters
    pub fn generate(rng: &mut SeededRng, length: usize) -> Self {
        let code = (0..length)
            .map(|_| ALPHABET[rng.next_range(ALPHABET.len() as u32) as usize] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocState {
    Idle,
    /// Waiting to hear whether the code is free.
    Proposed(LobbyCode),
    Bound(LobbyCode),
    Exhausted,
}

/// Bounded-retry state machine for binding a lobby code
///
/// `propose` → (`reject` → `propose` ...) → `accept`. After
/// `max_code_attempts` proposals without an accept the allocator is
/// exhausted and every further `propose` fails.
#[derive(Clone, Debug)]
pub struct CodeAllocator {
    length: usize,
    max_attempts: u32,
    attempts: u32,
    state: AllocState,
}

impl CodeAllocator {
    pub fn new(config: &LobbyConfig) -> Self {
        Self {
            length: config.code_length,
            max_attempts: config.max_code_attempts,
            attempts: 0,
            state: AllocState::Idle,
        }
    }

    pub fn state(&self) -> &AllocState {
        &self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Draw the next candidate code
    pub fn propose(&mut self, rng: &mut SeededRng) -> Result<LobbyCode, LobbyError> {
        match &self.state {
            AllocState::Bound(code) => return Ok(code.clone()),
            AllocState::Exhausted => return Err(LobbyError::CodeSpaceExhausted(self.attempts)),
            AllocState::Idle | AllocState::Proposed(_) => {}
        }

        if self.attempts >= self.max_attempts {
            log::warn!("giving up on lobby code after {} attempts", self.attempts);
            self.state = AllocState::Exhausted;
            return Err(LobbyError::CodeSpaceExhausted(self.attempts));
        }

        self.attempts += 1;
        let code = LobbyCode::generate(rng, self.length);
        self.state = AllocState::Proposed(code.clone());
        Ok(code)
    }

    /// The proposed code is already in use
    pub fn reject(&mut self) {
        if let AllocState::Proposed(code) = &self.state {
            log::info!("lobby code {} taken (attempt {}/{})", code, self.attempts, self.max_attempts);
            self.state = AllocState::Idle;
        }
    }

    /// The proposed code is ours
    pub fn accept(&mut self) -> Result<LobbyCode, LobbyError> {
        match &self.state {
            AllocState::Proposed(code) | AllocState::Bound(code) => {
                let code = code.clone();
                self.state = AllocState::Bound(code.clone());
                Ok(code)
            }
            AllocState::Idle | AllocState::Exhausted => Err(LobbyError::NoPendingCode),
        }
    }
}

/// Run the allocator against a synchronous availability check
pub fn allocate(
    config: &LobbyConfig,
    rng: &mut SeededRng,
    mut is_taken: impl FnMut(&LobbyCode) -> bool,
) -> Result<LobbyCode, LobbyError> {
    let mut allocator = CodeAllocator::new(config);
    loop {
        let code = allocator.propose(rng)?;
        if is_taken(&code) {
            allocator.reject();
        } else {
            return allocator.accept();
        }
    }
}
