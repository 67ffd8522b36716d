//! The surface the controller renders through.
//!
//! Front-ends implement [`PresentationPort`]; the controller only ever calls it and
//! never reads anything back. Asynchronous results (image loaded, timer elapsed)
//! come back through the controller's commands together with the [`Ticket`] handed
//! out here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use glimpse_core::model::{CHOICE_COUNT, ImageRef, Label, Quadrant};
use glimpse_core::scoring::Polarity;

use crate::game::{Ticket, TicketKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceState {
    Enabled,
    Disabled,
    Correct,
    Incorrect,
}

/// A message for the player plus its tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub polarity: Polarity,
}

impl Feedback {
    #[must_use]
    pub fn positive(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            polarity: Polarity::Positive,
        }
    }

    #[must_use]
    pub fn negative(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            polarity: Polarity::Negative,
        }
    }
}

/// Heads-up display numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub round: u32,
    pub total_rounds: u32,
    pub score: u32,
    pub streak: u32,
    pub attempts_remaining: u8,
    pub reveal_progress_percent: u8,
}

pub trait PresentationPort {
    /// Start loading `image`. The front-end answers exactly once with
    /// `image_ready(ticket)` or `image_failed(ticket)`.
    fn display_image(&mut self, image: &ImageRef, ticket: Ticket);

    /// Cover every quadrant again.
    fn reset_board(&mut self);

    fn reveal_quadrant(&mut self, quadrant: Quadrant);

    fn render_choices(&mut self, labels: &[Label; CHOICE_COUNT]);

    fn set_choice_state(&mut self, label: &Label, state: ChoiceState);

    fn show_feedback(&mut self, feedback: &Feedback);

    fn clear_feedback(&mut self);

    fn show_next_control(&mut self);

    fn show_restart_control(&mut self);

    fn hide_controls(&mut self);

    fn update_hud(&mut self, hud: &Hud);

    /// Call `timer_fired(ticket)` once `delay` has elapsed. No cancellation is
    /// needed; stale tickets are ignored.
    fn schedule(&mut self, ticket: Ticket, delay: Duration);
}

//
// ─── RECORDING PORT ────────────────────────────────────────────────────────────
//

/// One call made on a [`PresentationPort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortEvent {
    DisplayImage { image: ImageRef, ticket: Ticket },
    ResetBoard,
    RevealQuadrant(Quadrant),
    RenderChoices(Vec<Label>),
    SetChoiceState { label: Label, state: ChoiceState },
    ShowFeedback(Feedback),
    ClearFeedback,
    ShowNextControl,
    ShowRestartControl,
    HideControls,
    UpdateHud(Hud),
    Schedule { ticket: Ticket, delay: Duration },
}

/// A port that queues every call as a [`PortEvent`].
///
/// Useful headless and as an outbox for front-ends that render in batches.
#[derive(Debug, Clone, Default)]
pub struct RecordingPort {
    events: Vec<PortEvent>,
}

impl RecordingPort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[PortEvent] {
        &self.events
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<PortEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ticket of the most recent image request.
    #[must_use]
    pub fn last_image_ticket(&self) -> Option<Ticket> {
        self.events.iter().rev().find_map(|event| match event {
            PortEvent::DisplayImage { ticket, .. } => Some(*ticket),
            _ => None,
        })
    }

    /// Ticket of the most recent timer of the given kind.
    #[must_use]
    pub fn last_timer(&self, kind: TicketKind) -> Option<Ticket> {
        self.events.iter().rev().find_map(|event| match event {
            PortEvent::Schedule { ticket, .. } if ticket.kind() == kind => Some(*ticket),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.events.iter().rev().find_map(|event| match event {
            PortEvent::ShowFeedback(feedback) => Some(feedback),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_hud(&self) -> Option<Hud> {
        self.events.iter().rev().find_map(|event| match event {
            PortEvent::UpdateHud(hud) => Some(*hud),
            _ => None,
        })
    }
}

impl PresentationPort for RecordingPort {
    fn display_image(&mut self, image: &ImageRef, ticket: Ticket) {
        self.events.push(PortEvent::DisplayImage {
            image: image.clone(),
            ticket,
        });
    }

    fn reset_board(&mut self) {
        self.events.push(PortEvent::ResetBoard);
    }

    fn reveal_quadrant(&mut self, quadrant: Quadrant) {
        self.events.push(PortEvent::RevealQuadrant(quadrant));
    }

    fn render_choices(&mut self, labels: &[Label; CHOICE_COUNT]) {
        self.events.push(PortEvent::RenderChoices(labels.to_vec()));
    }

    fn set_choice_state(&mut self, label: &Label, state: ChoiceState) {
        self.events.push(PortEvent::SetChoiceState {
            label: label.clone(),
            state,
        });
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        self.events.push(PortEvent::ShowFeedback(feedback.clone()));
    }

    fn clear_feedback(&mut self) {
        self.events.push(PortEvent::ClearFeedback);
    }

    fn show_next_control(&mut self) {
        self.events.push(PortEvent::ShowNextControl);
    }

    fn show_restart_control(&mut self) {
        self.events.push(PortEvent::ShowRestartControl);
    }

    fn hide_controls(&mut self) {
        self.events.push(PortEvent::HideControls);
    }

    fn update_hud(&mut self, hud: &Hud) {
        self.events.push(PortEvent::UpdateHud(*hud));
    }

    fn schedule(&mut self, ticket: Ticket, delay: Duration) {
        self.events.push(PortEvent::Schedule { ticket, delay });
    }
}
