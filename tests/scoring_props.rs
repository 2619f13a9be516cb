//! Property tests for the rim scoring state machine

use ar_hoops::sim::{
    AnchorId, BallPhase, BodyId, ContactPair, GameState, HitResult, on_contact_begin, place_hoop,
    spawn_ball,
};
use ar_hoops::world::{AssetCatalog, SimWorld};
use ar_hoops::{ScoreChannel, ScoreLabel, Settings};
use glam::{Mat4, Vec3};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Throw,
    /// Top sensor contact for ball index (mod thrown), body order flipped if true
    Top(usize, bool),
    Bottom(usize, bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Throw),
        2 => (0..16usize, any::<bool>()).prop_map(|(i, flip)| Op::Top(i, flip)),
        2 => (0..16usize, any::<bool>()).prop_map(|(i, flip)| Op::Bottom(i, flip)),
    ]
}

/// Reference model: a ball scores iff it touched top before its first bottom
#[derive(Debug, Default, Clone, Copy)]
struct ModelBall {
    topped: bool,
    settled: bool,
    scored: bool,
}

struct Setup {
    state: GameState,
    world: SimWorld,
    channel: ScoreChannel,
    label: ScoreLabel,
    settings: Settings,
    top: BodyId,
    bottom: BodyId,
}

fn setup() -> Setup {
    let mut state = GameState::new();
    let mut world = SimWorld::new(AssetCatalog::standard());
    let settings = Settings::default();
    let (channel, label) = ScoreChannel::new();

    let hit = HitResult {
        anchor: AnchorId(1),
        world_transform: Mat4::from_cols(
            Vec3::X.extend(0.0),
            Vec3::Z.extend(0.0),
            Vec3::NEG_Y.extend(0.0),
            Vec3::new(0.0, 1.6, -2.0).extend(1.0),
        ),
        distance: 2.0,
    };
    place_hoop(&mut state, &mut world, &settings, &hit).expect("standard hoop places");
    world.set_camera(Some(Mat4::from_translation(Vec3::new(0.0, 1.6, 0.0))));

    let hoop = state.hoop.as_ref().expect("hoop placed");
    let (top, bottom) = (hoop.top_sensor, hoop.bottom_sensor);
    Setup {
        state,
        world,
        channel,
        label,
        settings,
        top,
        bottom,
    }
}

fn pair(sensor: BodyId, ball: BodyId, flip: bool) -> ContactPair {
    if flip {
        ContactPair {
            first: ball,
            second: sensor,
        }
    } else {
        ContactPair {
            first: sensor,
            second: ball,
        }
    }
}

/// Apply ops to both the session and the model
fn run(ops: &[Op]) -> (Setup, Vec<ModelBall>) {
    let mut s = setup();
    let mut model: Vec<ModelBall> = Vec::new();

    for op in ops {
        match *op {
            Op::Throw => {
                spawn_ball(&mut s.state, &mut s.world, &s.channel, &s.settings)
                    .expect("camera available");
                model.push(ModelBall::default());
            }
            Op::Top(i, flip) | Op::Bottom(i, flip) => {
                if model.is_empty() {
                    continue;
                }
                let idx = i % model.len();
                // Ball ids are handed out from 1 in throw order
                let body = s.state.balls[&(idx as u32 + 1)].body;
                let is_top = matches!(op, Op::Top(..));
                let sensor = if is_top { s.top } else { s.bottom };
                on_contact_begin(&mut s.state, &s.channel, &pair(sensor, body, flip));

                let m = &mut model[idx];
                if !m.settled {
                    if is_top {
                        m.topped = true;
                    } else {
                        m.settled = true;
                        m.scored = m.topped;
                    }
                }
            }
        }
    }
    (s, model)
}

proptest! {
    #[test]
    fn points_never_exceed_thrown(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let (s, _) = run(&ops);
        prop_assert!(s.state.score.points <= s.state.score.thrown);
    }

    #[test]
    fn score_matches_reference_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let (s, model) = run(&ops);
        let expected = model.iter().filter(|m| m.scored).count() as u32;
        prop_assert_eq!(s.state.score.points, expected);
        prop_assert_eq!(s.state.score.thrown, model.len() as u32);

        for (ball, m) in s.state.balls.values().zip(&model) {
            let phase = match (m.settled, m.scored, m.topped) {
                (true, true, _) => BallPhase::Scored,
                (true, false, _) => BallPhase::Unscored,
                (false, _, true) => BallPhase::ToppedOut,
                (false, _, false) => BallPhase::Spawned,
            };
            prop_assert_eq!(ball.phase, phase);
        }
    }

    #[test]
    fn bottom_first_never_scores(extra in prop::collection::vec((any::<bool>(), any::<bool>()), 0..16)) {
        let mut s = setup();
        spawn_ball(&mut s.state, &mut s.world, &s.channel, &s.settings).expect("camera available");
        let body = s.state.balls[&1].body;

        on_contact_begin(&mut s.state, &s.channel, &pair(s.bottom, body, false));
        for (is_top, flip) in extra {
            let sensor = if is_top { s.top } else { s.bottom };
            on_contact_begin(&mut s.state, &s.channel, &pair(sensor, body, flip));
        }
        prop_assert_eq!(s.state.score.points, 0);
        prop_assert_eq!(s.state.balls[&1].phase, BallPhase::Unscored);
    }

    #[test]
    fn repeated_top_counts_once(tops in 1usize..8, bottoms in 1usize..8) {
        let mut s = setup();
        spawn_ball(&mut s.state, &mut s.world, &s.channel, &s.settings).expect("camera available");
        let body = s.state.balls[&1].body;

        for _ in 0..tops {
            on_contact_begin(&mut s.state, &s.channel, &pair(s.top, body, false));
        }
        for _ in 0..bottoms {
            on_contact_begin(&mut s.state, &s.channel, &pair(s.bottom, body, false));
        }
        prop_assert_eq!(s.state.score.points, 1);
        s.label.refresh();
        prop_assert_eq!(s.label.text(), "1 / 1");
    }
}
