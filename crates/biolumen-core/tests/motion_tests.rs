// Host-side tests for the frame-differencing sensor and tension smoothing.

use biolumen_core::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn noise_frame(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

#[test]
fn first_frame_after_start_reads_zero() {
    let mut sensor = MotionSensor::default();
    let mut rng = StdRng::seed_from_u64(1);
    let frame = noise_frame(&mut rng, sensor.frame_len());
    assert_eq!(sensor.process(&frame), Ok(0.0));
    assert_eq!(sensor.status(), SensorStatus::Active);
}

#[test]
fn first_frame_after_reset_reads_zero() {
    let mut sensor = MotionSensor::default();
    let mut rng = StdRng::seed_from_u64(2);
    let a = noise_frame(&mut rng, sensor.frame_len());
    let b = noise_frame(&mut rng, sensor.frame_len());
    sensor.process(&a).expect("frame a");
    assert!(sensor.process(&b).expect("frame b") > 0.0);
    sensor.reset();
    assert_eq!(sensor.process(&a), Ok(0.0));
}

#[test]
fn identical_frames_read_zero() {
    let mut sensor = MotionSensor::default();
    let mut rng = StdRng::seed_from_u64(3);
    let frame = noise_frame(&mut rng, sensor.frame_len());
    sensor.process(&frame).expect("first");
    assert_eq!(sensor.process(&frame), Ok(0.0));
}

#[test]
fn maximally_different_frames_saturate() {
    let mut sensor = MotionSensor::default();
    let black: Vec<u8> = (0..sensor.frame_len())
        .map(|i| if i % 4 == 3 { 255 } else { 0 })
        .collect();
    let white = vec![255u8; sensor.frame_len()];
    sensor.process(&black).expect("black");
    assert_eq!(sensor.process(&white), Ok(1.0));
}

#[test]
fn small_uniform_change_scales_with_divisor() {
    // Every pixel moves by 5 on each of R, G and B: 15 / 25 = 0.6
    let mut sensor = MotionSensor::default();
    let a = vec![100u8; sensor.frame_len()];
    let b: Vec<u8> = a
        .iter()
        .enumerate()
        .map(|(i, v)| if i % 4 == 3 { *v } else { v + 5 })
        .collect();
    sensor.process(&a).expect("a");
    let activity = sensor.process(&b).expect("b");
    assert!((activity - 0.6).abs() < 1e-5, "activity {activity}");
}

#[test]
fn activity_always_within_unit_range() {
    let mut sensor = MotionSensor::default();
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..50 {
        let frame = noise_frame(&mut rng, sensor.frame_len());
        let a = sensor.process(&frame).expect("frame");
        assert!((0.0..=1.0).contains(&a));
    }
}

#[test]
fn smoothed_tension_stays_in_unit_range() {
    let mut rng = StdRng::seed_from_u64(5);
    for alpha in [SENSOR_SMOOTHING_ALPHA, RENDER_SMOOTHING_ALPHA, 1.0] {
        let mut s = Smoother::new(alpha);
        for _ in 0..5000 {
            let raw: f32 = if rng.gen_bool(0.2) {
                if rng.gen_bool(0.5) { 0.0 } else { 1.0 }
            } else {
                rng.gen()
            };
            let v = s.update(raw);
            assert!((0.0..=1.0).contains(&v), "alpha {alpha} produced {v}");
        }
    }
}

#[test]
fn double_smoothing_lags_behind_single_stage() {
    let mut sensor_stage = Smoother::new(SENSOR_SMOOTHING_ALPHA);
    let mut driver = AnimationDriver::new();
    let config = initial_configuration();
    let signal = TensionSignal::new();
    for _ in 0..10 {
        signal.set(sensor_stage.update(1.0));
        driver.advance(1.0 / 60.0, signal.get(), &config);
    }
    assert!(driver.tension() < signal.get());
    assert!(driver.tension() > 0.0);
}

#[test]
fn unavailable_sensor_freezes_tension() {
    let mut sensor = MotionSensor::default();
    let signal = TensionSignal::new();
    signal.set(0.35);
    sensor.mark_unavailable(SensorStatus::Denied);
    let frame = vec![0u8; sensor.frame_len()];
    if let Ok(a) = sensor.process(&frame) {
        signal.set(a);
    }
    assert_eq!(signal.get(), 0.35);
}
