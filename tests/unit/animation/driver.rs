use super::*;
use crate::{
    assets::source::SourceImage,
    foundation::core::Canvas,
    sampling::{
        point::FieldPoint,
        sampler::{SampleOpts, sample_points},
    },
    viewport::scaler::ScaleState,
};

const DT: f64 = 0.25;

fn cfg() -> EffectConfig {
    EffectConfig {
        grid: 10,
        initial_delay: 1.0,
        initial_duration: 2.0,
        shuffle_delay: 5.0,
        shuffle_duration: 1.0,
        seed: 17,
        ..EffectConfig::default()
    }
}

fn setup() -> (AnimationDriver, FieldState, ViewportScaler) {
    setup_with(cfg())
}

fn setup_with(cfg: EffectConfig) -> (AnimationDriver, FieldState, ViewportScaler) {
    let img = SourceImage::from_rgba_image(image::RgbaImage::from_pixel(
        40,
        40,
        image::Rgba([0, 0, 0, 255]),
    ))
    .unwrap();
    let mut rng = Rng64::new(cfg.seed);
    let opts = SampleOpts {
        grid: cfg.grid,
        point_radius: cfg.point_radius,
        orbit_radius: cfg.orbit_radius,
    };
    let points = sample_points(&img, &opts, &mut rng);
    let scaler = ViewportScaler::new(Canvas::new(20, 20), img.size(), cfg.initial_scale);
    let mut state = FieldState::new(points, ScaleState::default());
    state.scale.scale = scaler.cover_scale();

    let mut driver = AnimationDriver::new(&cfg, rng.fork());
    driver.start(&state);
    (driver, state, scaler)
}

fn run(
    driver: &mut AnimationDriver,
    state: &mut FieldState,
    scaler: &ViewportScaler,
    secs: f64,
    mut check: impl FnMut(&FieldState),
) {
    let steps = (secs / DT).round() as usize;
    for _ in 0..steps {
        driver.tick(DT, state, scaler);
        check(state);
    }
}

fn sorted_positions(points: &[FieldPoint], f: impl Fn(&FieldPoint) -> Point) -> Vec<(u64, u64)> {
    let mut v: Vec<(u64, u64)> = points
        .iter()
        .map(|p| {
            let q = f(p);
            (q.x.to_bits(), q.y.to_bits())
        })
        .collect();
    v.sort_unstable();
    v
}

#[test]
fn entrance_waits_for_initial_delay_then_zooms_to_contain() {
    let (mut d, mut s, sc) = setup();
    assert_eq!(s.scale.scale, 1.0);

    run(&mut d, &mut s, &sc, 0.75, |_| {});
    assert!(!s.scale.initiated());
    assert_eq!(s.scale.scale, 1.0);

    run(&mut d, &mut s, &sc, 0.25, |_| {});
    assert!(s.scale.initiated());
    assert!(d.scale_in_flight());

    run(&mut d, &mut s, &sc, 1.0, |_| {});
    assert!(s.scale.scale < 1.0 && s.scale.scale > 0.5);

    run(&mut d, &mut s, &sc, 1.0, |_| {});
    assert!((s.scale.scale - 0.5).abs() < 1e-12);
    assert!(d.settled());
    assert!(!d.scale_in_flight());

    run(&mut d, &mut s, &sc, 20.0, |st| assert!(st.scale.initiated()));
}

#[test]
fn points_converge_on_their_homes_after_entrance() {
    let (mut d, mut s, sc) = setup();
    assert!(s.points.iter().any(|p| p.current != p.home()));
    run(&mut d, &mut s, &sc, 3.0, |_| {});
    for p in &s.points {
        assert!((p.current - p.home()).hypot() < 1e-9);
    }
}

#[test]
fn first_shuffle_follows_entrance_then_repeats_on_period() {
    let (mut d, mut s, sc) = setup();
    run(&mut d, &mut s, &sc, 7.75, |_| {});
    assert_eq!(d.shuffles(), 0);
    run(&mut d, &mut s, &sc, 0.25, |_| {});
    assert_eq!(d.shuffles(), 1);
    run(&mut d, &mut s, &sc, 5.75, |_| {});
    assert_eq!(d.shuffles(), 1);
    run(&mut d, &mut s, &sc, 0.25, |_| {});
    assert_eq!(d.shuffles(), 2);
}

#[test]
fn shuffle_permutes_targets_and_never_touches_homes() {
    let (mut d, mut s, sc) = setup();
    let homes_before: Vec<Point> = s.points.iter().map(|p| p.home()).collect();
    let home_set = sorted_positions(&s.points, |p| p.home());

    run(&mut d, &mut s, &sc, 8.0, |_| {});
    assert_eq!(d.shuffles(), 1);
    assert_eq!(sorted_positions(&s.points, |p| p.target()), home_set);
    assert!(s.points.iter().any(|p| p.target() != p.home()));

    run(&mut d, &mut s, &sc, 1.0, |_| {});
    for p in &s.points {
        assert!((p.current - p.target()).hypot() < 1e-9);
    }

    run(&mut d, &mut s, &sc, 30.0, |_| {});
    assert!(d.shuffles() >= 5);
    assert_eq!(sorted_positions(&s.points, |p| p.target()), home_set);
    let homes_after: Vec<Point> = s.points.iter().map(|p| p.home()).collect();
    assert_eq!(homes_before, homes_after);
}

#[test]
fn orbit_stays_within_one_turn_and_drift_within_offset() {
    let (mut d, mut s, sc) = setup();
    let max = cfg().drift_offset.max;
    let mut saw_nonzero_angle = false;
    run(&mut d, &mut s, &sc, 12.0, |st| {
        for p in &st.points {
            assert!((0.0..TAU).contains(&p.orbit_angle));
            assert!(p.drift.x.abs() <= max && p.drift.y.abs() <= max);
            saw_nonzero_angle |= p.orbit_angle > 0.0;
        }
    });
    assert!(saw_nonzero_angle);
}

#[test]
fn orbit_phases_are_not_synchronized() {
    let (mut d, mut s, sc) = setup();
    run(&mut d, &mut s, &sc, 0.25, |_| {});
    let first = s.points[0].orbit_angle;
    assert!(s.points.iter().any(|p| (p.orbit_angle - first).abs() > 1e-6));
}

#[test]
fn per_point_programs_never_go_idle() {
    let (mut d, mut s, sc) = setup();
    let n = s.points.len();
    run(&mut d, &mut s, &sc, 25.0, |_| {});
    // One orbit and one drift leg per point, plus whatever global program is pending.
    assert!(d.scheduled() >= 2 * n + 1);
}

#[test]
fn cancel_scale_is_idempotent_and_spares_point_motion() {
    let (mut d, mut s, sc) = setup();
    assert!(!d.cancel_scale());

    run(&mut d, &mut s, &sc, 2.0, |_| {});
    let before = d.scheduled();
    assert!(d.cancel_scale());
    assert!(!d.cancel_scale());
    assert_eq!(d.scheduled(), before - 1);

    let frozen = s.scale.scale;
    let angles: Vec<f64> = s.points.iter().map(|p| p.orbit_angle).collect();
    run(&mut d, &mut s, &sc, 0.5, |_| {});
    assert_eq!(s.scale.scale, frozen);
    let moved = s
        .points
        .iter()
        .zip(&angles)
        .any(|(p, a)| p.orbit_angle != *a);
    assert!(moved);
}

#[test]
fn empty_field_still_runs_global_choreography() {
    let cfg = cfg();
    let scaler = ViewportScaler::new(Canvas::new(20, 20), Canvas::new(40, 40), 2.0);
    let mut state = FieldState::new(Vec::new(), ScaleState::default());
    state.scale.scale = scaler.cover_scale();
    let mut d = AnimationDriver::new(&cfg, Rng64::new(1));
    d.start(&state);

    run(&mut d, &mut state, &scaler, 14.0, |_| {});
    assert!(state.scale.initiated());
    assert_eq!(d.shuffles(), 2);
}

#[test]
fn orbit_period_is_redrawn_every_turn() {
    let (mut d, mut s, sc) = setup_with(EffectConfig {
        orbit_duration: Range::new(1.0, 3.0),
        ..cfg()
    });
    let dt = 0.05;
    let mut prev = s.points[0].orbit_angle;
    let mut wraps = Vec::new();
    for step in 1..=800 {
        d.tick(dt, &mut s, &sc);
        let angle = s.points[0].orbit_angle;
        if angle < prev {
            wraps.push(step as f64 * dt);
        }
        prev = angle;
    }

    let turns: Vec<f64> = wraps.windows(2).map(|w| w[1] - w[0]).collect();
    assert!(turns.len() >= 10, "turns: {turns:?}");
    for t in &turns {
        assert!((1.0 - 2.0 * dt..=3.0 + 2.0 * dt).contains(t), "turn {t}");
    }
    let longest = turns.iter().copied().fold(f64::MIN, f64::max);
    let shortest = turns.iter().copied().fold(f64::MAX, f64::min);
    assert!(longest - shortest > 0.3, "turns: {turns:?}");
}

#[test]
fn lateness_carried_into_a_leg_never_exceeds_its_duration() {
    assert_eq!(carry(5.0, 0.5), 0.5);
    assert_eq!(carry(0.2, 0.5), 0.2);
    assert_eq!(carry(3.0, 0.0), 0.0);
    assert_eq!(carry(-1.0, 0.5), 0.0);
}

#[test]
fn legs_shorter_than_a_tick_keep_one_program_per_point() {
    let (mut d, mut s, sc) = setup_with(EffectConfig {
        drift_duration: Range::new(0.0, 0.01),
        orbit_duration: Range::new(0.01, 0.02),
        ..cfg()
    });
    let n = s.points.len();
    let max = cfg().drift_offset.max;
    run(&mut d, &mut s, &sc, 30.0, |st| {
        for p in &st.points {
            assert!(p.drift.x.abs() <= max && p.drift.y.abs() <= max);
            assert!((0.0..TAU).contains(&p.orbit_angle));
        }
    });
    assert!(d.scheduled() >= 2 * n + 1);
    assert!(d.scheduled() <= 2 * n + 3);
    assert_eq!(d.shuffles(), 4);
}
