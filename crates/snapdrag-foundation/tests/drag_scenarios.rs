use snapdrag_foundation::gesture_constants::SLOW_FACTOR;
use snapdrag_foundation::input::PointerEvent;
use snapdrag_foundation::swipe::FlingResolver;
use snapdrag_foundation::{DragConfig, DragDirection, DragPhase, StepSequence};
use snapdrag_testing::prelude::*;

fn two_steps(rule: &DragTestRule) -> RecordedAction {
    rule.add_action(DragConfig::new(vec![0.0, 100.0]))
        .expect("valid config")
}

#[test]
fn still_release_short_of_threshold_returns_to_start() {
    let mut rule = DragTestRule::new();
    let panel = two_steps(&rule);

    rule.perform_and_settle(
        &GestureScript::press(0.0, 0.0)
            .glide_to(0.0, 40.0, 80)
            .rest()
            .release(),
    );

    assert_eq!(panel.listener.start_count(), 1);
    assert_eq!(panel.listener.end_positions(), vec![0.0]);
    assert_eq!(panel.action.step(), 0);
    assert_eq!(panel.action.position(), 0.0);
    assert_eq!(panel.action.phase(), DragPhase::Idle);

    let request = panel.animator.last_request().expect("settle started");
    assert_eq!(request.start_value, 40.0);
    assert_eq!((request.min_value, request.max_value), (0.0, 40.0));
}

#[test]
fn still_release_past_threshold_advances() {
    let mut rule = DragTestRule::new();
    let panel = two_steps(&rule);

    rule.perform_and_settle(
        &GestureScript::press(0.0, 0.0)
            .glide_to(0.0, 60.0, 80)
            .rest()
            .release(),
    );

    assert_eq!(panel.listener.last_end(), Some(100.0));
    assert_eq!(panel.action.step(), 1);
    assert!(panel.action.is_extended());

    let settle: Vec<f32> = panel
        .listener
        .drag_positions()
        .into_iter()
        .skip_while(|position| *position <= 60.0)
        .collect();
    assert_monotonic(&settle, "settle toward the next step");
    assert_eq!(settle.last(), Some(&100.0));
}

#[test]
fn fast_flick_commits_a_short_drag() {
    let mut rule = DragTestRule::new();
    let panel = two_steps(&rule);

    // about 1000 units/s, released at 20% of the way
    rule.perform_and_settle(
        &GestureScript::press(0.0, 0.0)
            .glide_to(0.0, 20.0, 20)
            .release(),
    );

    let request = panel.animator.last_request().expect("settle started");
    assert_approx_eq(request.start_velocity, 1000.0, 50.0, "release velocity");
    assert_eq!(panel.action.step(), 1);
    assert!(panel
        .listener
        .drag_positions()
        .iter()
        .all(|position| (0.0..=100.0).contains(position)));
}

#[test]
fn middle_step_accepts_moves_between_its_neighbours() {
    let mut rule = DragTestRule::new();
    let panel = rule
        .add_action(DragConfig::new(vec![0.0, 30.0, 100.0]))
        .unwrap();
    assert!(panel.action.push_to_step(1));
    rule.pump_until_idle();
    assert_eq!(panel.action.step(), 1);
    assert_eq!(panel.action.position(), 30.0);
    panel.listener.clear();

    rule.dispatch(PointerEvent::down(0.0, 200.0, 0));
    rule.dispatch(PointerEvent::moved(0.0, 190.0, 16));
    assert_eq!(panel.action.position(), 20.0);
    assert_eq!(panel.listener.drag_positions(), vec![20.0]);

    rule.dispatch(PointerEvent::moved(0.0, 165.0, 32));
    assert_eq!(panel.action.position(), 20.0);
    assert_eq!(panel.listener.drag_positions(), vec![20.0]);

    rule.dispatch(PointerEvent::moved(0.0, 270.0, 48));
    rule.dispatch(PointerEvent::moved(0.0, 271.0, 64));
    assert_eq!(panel.action.position(), 100.0);
    assert_eq!(panel.listener.drag_positions(), vec![20.0, 100.0]);
}

#[test]
fn every_position_inside_the_window_is_reported_once() {
    let rule = DragTestRule::new();
    let panel = rule
        .add_action(DragConfig::new(vec![0.0, 25.0, 60.0, 100.0]))
        .unwrap();
    rule.dispatch(PointerEvent::down(0.0, 0.0, 0));

    let mut time = 0;
    for offset in [-10.0, 5.0, 24.0, 25.0, 26.0, 12.5, -0.5, 0.0] {
        time += 10;
        let before = panel.listener.len();
        rule.dispatch(PointerEvent::moved(0.0, offset, time));
        let inside = (0.0..=25.0).contains(&offset);
        assert_eq!(panel.listener.len() - before, usize::from(inside), "offset {offset}");
        if inside {
            assert_eq!(panel.action.position(), offset);
        }
    }
}

#[test]
fn threshold_law_holds_for_either_velocity_sign() {
    let steps = StepSequence::new(vec![0.0, 100.0], DragDirection::Down).unwrap();
    for threshold in [0.2, 0.5, 0.8] {
        let resolver = FlingResolver::new(&steps, 0, threshold);
        let limit = threshold * 100.0;
        let mut last = 0.0;
        while last < limit {
            for velocity in [-300.0, -100.0, -10.0, 0.0, 10.0, 100.0, 300.0] {
                let projected = last + velocity / SLOW_FACTOR;
                if projected >= limit {
                    continue;
                }
                let plan = resolver.plan_release(last, velocity);
                assert_eq!(
                    plan.target.index, 0,
                    "threshold {threshold}, released at {last} with {velocity}/s"
                );
            }
            last += 5.0;
        }
    }
}

#[test]
fn press_during_settle_resumes_from_live_position() {
    let mut rule = DragTestRule::new();
    let panel = two_steps(&rule);

    rule.perform(
        &GestureScript::press(0.0, 0.0)
            .glide_to(0.0, 60.0, 80)
            .rest()
            .release(),
    );
    rule.advance_frames(3);
    let live = panel.action.position();
    assert!(live > 60.0 && live < 100.0, "live position {live}");
    assert_eq!(panel.action.phase(), DragPhase::Settling);
    panel.listener.clear();

    rule.perform(
        &GestureScript::press_at(0.0, 500.0, 1_000)
            .move_to(0.0, 470.0, 16)
            .rest()
            .release(),
    );
    assert!(panel.listener.end_positions().is_empty());
    assert_eq!(panel.listener.start_count(), 0);
    assert_eq!(panel.action.step(), 0);

    let requests = panel.animator.requests();
    assert_eq!(requests.len(), 2);
    let resumed = requests[1];
    assert_approx_eq(resumed.start_value, live - 30.0, 1e-3, "resumed start");
    assert_eq!(resumed.min_value, 0.0);
    assert_approx_eq(resumed.max_value, live - 30.0, 1e-3, "resumed bound");

    rule.pump_until_idle();
    assert_eq!(panel.listener.end_positions(), vec![0.0]);
}

#[test]
fn collapse_when_collapsed_still_reports_end() {
    let mut rule = DragTestRule::new();
    let panel = two_steps(&rule);

    assert!(panel.action.collapse());
    let request = panel.animator.last_request().expect("settle started");
    assert_eq!(request.start_velocity, 0.0);

    rule.pump_until_idle();
    assert_eq!(
        panel.listener.records(),
        vec![
            DragRecord::Drag {
                position: 0.0,
                friction: 0.0
            },
            DragRecord::End {
                position: 0.0,
                friction: 1.0
            },
        ]
    );
}

#[test]
fn expand_then_collapse_round_trip() {
    let mut rule = DragTestRule::new();
    let panel = rule
        .add_action(DragConfig::new(vec![0.0, -120.0, -480.0]).with_direction(DragDirection::Left))
        .unwrap();

    assert!(panel.action.expand());
    rule.pump_until_idle();
    assert_eq!(panel.action.step(), 2);
    assert_eq!(panel.action.position(), -480.0);

    assert!(panel.action.collapse());
    rule.pump_until_idle();
    assert_eq!(panel.action.step(), 0);
    assert_eq!(panel.listener.end_positions(), vec![-480.0, 0.0]);
    assert_eq!(panel.listener.start_count(), 0);
}

#[test]
fn cancel_event_settles_like_release() {
    let mut rule = DragTestRule::new();
    let panel = two_steps(&rule);
    rule.perform_and_settle(
        &GestureScript::press(0.0, 0.0)
            .glide_to(0.0, 70.0, 80)
            .rest()
            .cancel(),
    );
    assert_eq!(panel.action.step(), 1);
}
