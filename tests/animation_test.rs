use std::f32::consts::{FRAC_PI_2, PI};

use flow_scenes::animation::{BounceOscillator, Clock, Flipper, Heading, orbit, ramp, spin, wave};

use crate::common::test_utils::assert_close;

mod common;

#[test]
fn wave_scales_sine_by_amplitude() {
    assert_close(wave(0.0, 0.5, 2.0), 0.0);
    assert_close(wave(PI, 0.5, 2.0), 2.0);
    assert_close(wave(3.0 * PI, 0.5, 2.0), -2.0);
}

#[test]
fn orbit_starts_on_positive_z() {
    let (x, z) = orbit(0.0, 0.2, 16.0);
    assert_close(x, 0.0);
    assert_close(z, 16.0);

    let (x, z) = orbit(FRAC_PI_2 / 0.2, 0.2, 16.0);
    assert_close(x, 16.0);
    assert_close(z, 0.0);
}

#[test]
fn spin_grows_monotonically_with_elapsed_time() {
    let mut last = spin(0.0, 0.2);
    for frame in 1..600 {
        let angle = spin(frame as f32 / 60.0, 0.2);
        assert!(angle > last);
        last = angle;
    }
    assert_close(spin(10.0, 0.2), 2.0);
}

#[test]
fn clock_never_runs_backwards() {
    let mut clock = Clock::start();
    let first = clock.tick();
    let second = clock.tick();
    assert!(second.elapsed >= first.elapsed);
    assert!(second.delta >= 0.0);
}

#[test]
fn bounce_turns_around_past_each_bound() {
    let mut bounce = BounceOscillator::new(0.0, 0.25, -1.0, 1.0);
    let values: Vec<f32> = (0..6).map(|_| bounce.advance()).collect();
    assert_eq!(values, vec![-0.25, -0.5, -0.75, -1.0, -1.25, -1.0]);
    assert_eq!(bounce.heading, Heading::Ascending);
}

#[test]
fn bounce_is_periodic() {
    let mut bounce = BounceOscillator::new(0.0, 0.25, -1.0, 1.0);
    // 5 frames down past -1, 10 up past 1, 5 back down to 0
    for _ in 0..20 {
        bounce.advance();
    }
    assert_close(bounce.value, 0.0);
    assert_eq!(bounce.heading, Heading::Descending);

    let first_cycle: Vec<f32> = (0..20).map(|_| bounce.advance()).collect();
    let second_cycle: Vec<f32> = (0..20).map(|_| bounce.advance()).collect();
    for (a, b) in first_cycle.iter().zip(&second_cycle) {
        assert_close(*a, *b);
    }
}

#[test]
fn bounce_overshoots_by_less_than_a_step() {
    let mut bounce = BounceOscillator::new(3.0, 0.02, -3.0, 3.0);
    let (lower, upper) = bounce.bounds();
    for _ in 0..2000 {
        let value = bounce.advance();
        assert!(value >= lower - bounce.step() - 1e-4);
        assert!(value <= upper + bounce.step() + 1e-4);
    }
}

#[test]
fn flipper_turns_only_near_the_ends() {
    let mut flip = Flipper::new(PI, 0.1, -2.0, 2.0);
    assert_close(flip.follow(-1.0, Heading::Descending), PI);
    assert_close(flip.follow(-2.5, Heading::Descending), PI - 0.1);
    // ascending through the low end does not turn back
    assert_close(flip.follow(-2.5, Heading::Ascending), PI - 0.1);
    assert_close(flip.follow(2.5, Heading::Ascending), PI);
    assert_close(flip.follow(0.0, Heading::Ascending), PI);
}

#[test]
fn ramp_stops_after_passing_the_limit() {
    let mut value = 0.0;
    for _ in 0..200 {
        value = ramp(value, 0.02, FRAC_PI_2);
    }
    assert!(value > FRAC_PI_2);
    assert!(value <= FRAC_PI_2 + 0.02 + 1e-4);

    assert_close(ramp(1.0, -0.5, 0.0), 0.5);
    assert_close(ramp(-0.1, -0.5, 0.0), -0.1);
}
