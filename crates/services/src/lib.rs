#![forbid(unsafe_code)]

pub mod error;
pub mod game;
pub mod presentation;

pub use glimpse_core::Clock;

pub use error::GameError;
pub use game::{
    ChoiceResult, GameSnapshot, RoundController, Ticket, TicketKind, select_questions,
};
pub use presentation::{ChoiceState, Feedback, Hud, PortEvent, PresentationPort, RecordingPort};
