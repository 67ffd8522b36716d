use glimpse_core::Catalog;
use glimpse_core::model::{GameSettings, Label, RoundOutcome};
use glimpse_core::scoring::{Polarity, Tier};
use glimpse_core::time::fixed_clock;
use services::{PortEvent, RecordingPort, RoundController, TicketKind};

fn new_game(seed: u64) -> RoundController<RecordingPort> {
    let mut ctrl = RoundController::new(
        Catalog::builtin().unwrap(),
        GameSettings::default(),
        RecordingPort::new(),
    )
    .with_clock(fixed_clock())
    .with_seed(seed);
    ctrl.start().unwrap();
    ctrl
}

fn correct_label(ctrl: &RoundController<RecordingPort>) -> Label {
    ctrl.round().unwrap().question().correct().clone()
}

fn wrong_label(ctrl: &RoundController<RecordingPort>) -> Label {
    let question = ctrl.round().unwrap().question();
    question
        .candidates()
        .iter()
        .find(|label| !question.is_correct(label))
        .cloned()
        .unwrap()
}

fn show_picture(ctrl: &mut RoundController<RecordingPort>) {
    let ticket = ctrl.port().last_image_ticket().unwrap();
    assert!(ctrl.image_ready(ticket));
}

fn fire_game_over(ctrl: &mut RoundController<RecordingPort>) {
    let ticket = ctrl.port().last_timer(TicketKind::GameOver).unwrap();
    assert!(ctrl.timer_fired(ticket));
}

#[test]
fn perfect_game_scores_full_marks() {
    let mut ctrl = new_game(1);

    for round in 1..=5 {
        assert_eq!(ctrl.session().round_index(), round);
        assert_eq!(ctrl.round().unwrap().quarters_revealed(), 0);
        show_picture(&mut ctrl);
        assert_eq!(ctrl.round().unwrap().quarters_revealed(), 1);

        let result = ctrl.submit_choice(&correct_label(&ctrl)).unwrap();
        assert_eq!(result.points, 20);
        assert_eq!(ctrl.session().streak(), round);

        if round < 5 {
            ctrl.advance_round().unwrap();
        }
    }

    assert!(!ctrl.session().is_ended());
    fire_game_over(&mut ctrl);

    let summary = ctrl.summary().unwrap();
    assert_eq!(summary.grade.score, 100);
    assert_eq!(summary.grade.percentage, 100);
    assert_eq!(summary.grade.tier, Tier::Excellent);
    assert_eq!(summary.correct_rounds, 5);
    assert_eq!(summary.best_streak, 5);

    let feedback = ctrl.port().last_feedback().unwrap();
    assert_eq!(feedback.polarity, Polarity::Positive);
    assert!(feedback.message.contains("100/100 (100%)"));
    assert!(ctrl.port().events().ends_with(&[
        PortEvent::ShowRestartControl,
        PortEvent::UpdateHud(ctrl.port().last_hud().unwrap()),
    ]));
}

#[test]
fn every_round_exhausted_scores_nothing() {
    let mut ctrl = new_game(2);

    for round in 1..=5 {
        show_picture(&mut ctrl);

        for attempt in 1..=4_u8 {
            let result = ctrl.submit_choice(&wrong_label(&ctrl)).unwrap();
            assert!(!result.is_correct);
            assert_eq!(result.attempts_remaining, 4 - attempt);
            assert_eq!(ctrl.session().streak(), 0);

            if attempt < 4 {
                let cooldown = ctrl.port().last_timer(TicketKind::RetryCooldown).unwrap();
                assert!(ctrl.timer_fired(cooldown));
            } else {
                assert!(result.round_resolved);
                let correct = correct_label(&ctrl);
                assert_eq!(
                    result.feedback.message,
                    format!("No more attempts! The answer was \"{correct}\"")
                );
            }
        }

        let state = ctrl.round().unwrap();
        assert_eq!(state.attempts_remaining(), 0);
        assert_eq!(state.quarters_revealed(), 4);
        assert_eq!(state.outcome(), Some(RoundOutcome::Disclosed));

        if round < 5 {
            ctrl.advance_round().unwrap();
            assert_eq!(ctrl.round().unwrap().quarters_revealed(), 0);
            assert_eq!(ctrl.round().unwrap().attempts_remaining(), 4);
        }
    }

    fire_game_over(&mut ctrl);
    let summary = ctrl.summary().unwrap();
    assert_eq!(summary.grade.score, 0);
    assert_eq!(summary.grade.percentage, 0);
    assert_eq!(summary.grade.tier, Tier::KeepPracticing);
    assert_eq!(
        ctrl.port().last_feedback().unwrap().polarity,
        Polarity::Negative
    );
}

#[test]
fn quarters_revealed_never_shrinks_within_a_round() {
    let mut ctrl = new_game(3);
    let mut seen = vec![ctrl.round().unwrap().quarters_revealed()];

    show_picture(&mut ctrl);
    seen.push(ctrl.round().unwrap().quarters_revealed());

    for _ in 0..2 {
        ctrl.submit_choice(&wrong_label(&ctrl)).unwrap();
        seen.push(ctrl.round().unwrap().quarters_revealed());
        let cooldown = ctrl.port().last_timer(TicketKind::RetryCooldown).unwrap();
        ctrl.timer_fired(cooldown);
    }
    ctrl.submit_choice(&correct_label(&ctrl)).unwrap();
    seen.push(ctrl.round().unwrap().quarters_revealed());

    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    assert_eq!(ctrl.session().score(), 10);
}

#[test]
fn last_round_only_schedules_game_over_once() {
    let settings = GameSettings::default().with_total_rounds(1).unwrap();
    let mut ctrl = RoundController::new(Catalog::builtin().unwrap(), settings, RecordingPort::new())
        .with_clock(fixed_clock())
        .with_seed(4);
    ctrl.start().unwrap();

    show_picture(&mut ctrl);
    ctrl.submit_choice(&correct_label(&ctrl)).unwrap();
    ctrl.advance_round().unwrap();

    let scheduled = ctrl
        .port()
        .events()
        .iter()
        .filter(|e| {
            matches!(e, PortEvent::Schedule { ticket, .. } if ticket.kind() == TicketKind::GameOver)
        })
        .count();
    assert_eq!(scheduled, 1);
    assert!(!ctrl.port().events().contains(&PortEvent::ShowNextControl));

    fire_game_over(&mut ctrl);
    assert!(ctrl.session().is_ended());
    assert!(ctrl.submit_choice(&correct_label(&ctrl)).is_err());
    assert!(ctrl.advance_round().is_err());
}

#[test]
fn restart_after_game_over_resets_everything() {
    let mut ctrl = new_game(5);
    for round in 1..=5 {
        show_picture(&mut ctrl);
        ctrl.submit_choice(&correct_label(&ctrl)).unwrap();
        if round < 5 {
            ctrl.advance_round().unwrap();
        }
    }
    let game_over = ctrl.port().last_timer(TicketKind::GameOver).unwrap();
    assert!(ctrl.timer_fired(game_over));
    assert!(ctrl.session().is_ended());

    let previous_draw = ctrl.questions().to_vec();
    ctrl.port_mut().drain();
    ctrl.restart().unwrap();

    let session = ctrl.session();
    assert_eq!(session.round_index(), 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.streak(), 0);
    assert!(!session.is_ended());
    assert!(ctrl.summary().is_none());
    assert_eq!(ctrl.questions().len(), 5);
    assert_ne!(ctrl.questions(), previous_draw.as_slice());
    assert!(ctrl.port().last_image_ticket().is_some());

    assert!(!ctrl.timer_fired(game_over));
    assert!(!ctrl.session().is_ended());
}

#[test]
fn snapshot_serializes_for_front_ends() {
    let mut ctrl = new_game(6);
    show_picture(&mut ctrl);

    let snapshot = ctrl.snapshot();
    assert_eq!(snapshot.round, 1);
    assert_eq!(snapshot.progress_percent, 25);
    assert_eq!(snapshot.choices.len(), 4);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["attempts_remaining"], 4);
    assert_eq!(json["phase"]["phase"], "guessing");
    assert_eq!(json["image"], "ready");
    assert_eq!(json["ended"], false);
}
