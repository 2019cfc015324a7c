//! # Session Context
//!
//! A connected principal plus the contract it talks to. Created on connect,
//! dropped on disconnect, and passed explicitly into every orchestrator call.

use crate::entities::{ContractAddress, Identity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An established client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    identity: Identity,
    contract: ContractAddress,
}

impl Session {
    /// Open a session for `identity` against `contract`.
    #[must_use]
    pub fn new(identity: Identity, contract: ContractAddress) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            contract,
        }
    }

    /// Unique id of this session (changes on every reconnect).
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Caller identity.
    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Records contract address.
    #[must_use]
    pub fn contract(&self) -> ContractAddress {
        self.contract
    }
}
