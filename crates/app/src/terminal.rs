//! Text rendering of presentation events.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glimpse_core::model::{ImageRef, Label, QUADRANTS, Quadrant};
use glimpse_core::scoring::Polarity;
use services::{ChoiceState, Hud, PortEvent, Ticket};

/// Deferred work the controller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    LoadImage { image: ImageRef, ticket: Ticket },
    Timer { ticket: Ticket, delay: Duration },
}

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Choice(usize),
    Next,
    Restart,
    Quit,
    Unknown,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Self::Next,
            "r" | "restart" => Self::Restart,
            "q" | "quit" | "exit" => Self::Quit,
            other => other
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=4).contains(n))
                .map_or(Self::Unknown, Self::Choice),
        }
    }
}

/// Mirror of what a graphical board would show.
#[derive(Debug)]
pub struct Screen {
    images_dir: PathBuf,
    choices: Vec<(Label, ChoiceState)>,
    revealed: [bool; QUADRANTS as usize],
    image: Option<ImageRef>,
    next_visible: bool,
    restart_visible: bool,
}

impl Screen {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            choices: Vec::new(),
            revealed: [false; QUADRANTS as usize],
            image: None,
            next_visible: false,
            restart_visible: false,
        }
    }

    /// Render a batch of events and collect the jobs they request.
    pub fn apply_all(&mut self, events: Vec<PortEvent>) -> Vec<Job> {
        let mut board_changed = false;
        let mut jobs = Vec::new();

        for event in events {
            match event {
                PortEvent::DisplayImage { image, ticket } => {
                    println!("Loading {image}...");
                    self.image = Some(image.clone());
                    jobs.push(Job::LoadImage { image, ticket });
                }
                PortEvent::ResetBoard => {
                    self.revealed = [false; QUADRANTS as usize];
                    board_changed = true;
                }
                PortEvent::RevealQuadrant(quadrant) => {
                    self.reveal(quadrant);
                    board_changed = true;
                }
                PortEvent::RenderChoices(labels) => {
                    self.choices = labels
                        .into_iter()
                        .map(|label| (label, ChoiceState::Enabled))
                        .collect();
                }
                PortEvent::SetChoiceState { label, state } => {
                    for (candidate, current) in &mut self.choices {
                        if *candidate == label {
                            *current = state;
                        }
                    }
                }
                PortEvent::ShowFeedback(feedback) => {
                    let marker = match feedback.polarity {
                        Polarity::Positive => "+",
                        Polarity::Negative => "-",
                    };
                    println!("[{marker}] {}", feedback.message);
                }
                PortEvent::ClearFeedback => {}
                PortEvent::ShowNextControl => self.next_visible = true,
                PortEvent::ShowRestartControl => self.restart_visible = true,
                PortEvent::HideControls => {
                    self.next_visible = false;
                    self.restart_visible = false;
                }
                PortEvent::UpdateHud(hud) => print_hud(&hud),
                PortEvent::Schedule { ticket, delay } => jobs.push(Job::Timer { ticket, delay }),
            }
        }

        if board_changed {
            self.print_board();
        }
        jobs
    }

    /// Whether the picture can be shown. Remote images are assumed reachable.
    pub async fn image_available(&self, image: &ImageRef) -> bool {
        match image.as_path() {
            Some(path) => tokio::fs::try_exists(self.resolve(path))
                .await
                .unwrap_or(false),
            None => true,
        }
    }

    /// Label for a 1-based choice number, if that button is clickable.
    pub fn choice(&self, number: usize) -> Option<Label> {
        let (label, state) = self.choices.get(number.checked_sub(1)?)?;
        (*state == ChoiceState::Enabled).then(|| label.clone())
    }

    pub fn prompt(&self) {
        let buttons = self
            .choices
            .iter()
            .enumerate()
            .map(|(i, (label, state))| format!("{}) {label}{}", i + 1, state_suffix(*state)))
            .collect::<Vec<_>>()
            .join("   ");
        if !buttons.is_empty() {
            println!("{buttons}");
        }
        println!("({})", self.controls().join(", "));
    }

    /// Commands that would do something right now.
    fn controls(&self) -> Vec<&'static str> {
        let mut controls = Vec::new();
        if self
            .choices
            .iter()
            .any(|(_, state)| *state == ChoiceState::Enabled)
        {
            controls.push("1-4 choose");
        }
        if self.next_visible {
            controls.push("n next round");
        }
        if self.restart_visible {
            controls.push("r restart");
        }
        controls.push("q quit");
        controls
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.images_dir.join(path)
        }
    }

    fn reveal(&mut self, quadrant: Quadrant) {
        if let Some(cell) = self.revealed.get_mut(usize::from(quadrant.index())) {
            *cell = true;
        }
    }

    fn print_board(&self) {
        let cell = |i: usize| if self.revealed[i] { "    " } else { "####" };
        let name = self
            .image
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("+----+----+");
        println!("|{}|{}|  {name}", cell(0), cell(1));
        println!("+----+----+");
        println!("|{}|{}|", cell(2), cell(3));
        println!("+----+----+");
    }
}

fn state_suffix(state: ChoiceState) -> &'static str {
    match state {
        ChoiceState::Enabled => "",
        ChoiceState::Disabled => " (locked)",
        ChoiceState::Correct => " [correct]",
        ChoiceState::Incorrect => " [wrong]",
    }
}

fn print_hud(hud: &Hud) {
    println!(
        "Round {}/{} | Score {} | Streak {} | Attempts {} | Revealed {}%",
        hud.round,
        hud.total_rounds,
        hud.score,
        hud.streak,
        hud.attempts_remaining,
        hud.reveal_progress_percent
    );
}
