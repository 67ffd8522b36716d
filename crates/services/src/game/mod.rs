mod controller;
mod selection;
mod snapshot;
mod ticket;

// Public API of the game subsystem.
pub use controller::{ChoiceResult, RoundController};
pub use selection::select_questions;
pub use snapshot::GameSnapshot;
pub use ticket::{Ticket, TicketKind};
