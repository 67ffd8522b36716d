use serde::{Deserialize, Serialize};

/// What an outstanding callback is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketKind {
    ImageLoad,
    RetryCooldown,
    GameOver,
}

/// Handle attached to every deferred request the controller makes.
///
/// The epoch changes whenever a round loads, so a callback from an earlier round
/// carries an old epoch and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    epoch: u64,
    kind: TicketKind,
}

impl Ticket {
    #[must_use]
    pub(crate) fn new(epoch: u64, kind: TicketKind) -> Self {
        Self { epoch, kind }
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn kind(&self) -> TicketKind {
        self.kind
    }
}
