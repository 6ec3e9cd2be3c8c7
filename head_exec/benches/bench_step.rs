//! # Stepping Scheduler Benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use eqpt_if::sim::SimServoBoard;
use eqpt_if::ServoDriver;
use head_lib::eye_ctrl::{EyeConfig, Eyeballs, Params as EyeParams};
use head_lib::servo_ctrl::{Params as ServoParams, PulseRange, ServoCtrl, ServoFamily};

fn bench_servo_ctrl() -> ServoCtrl {
    let boards: Vec<Box<dyn ServoDriver>> = vec![Box::new(SimServoBoard::new())];

    ServoCtrl::new(
        ServoParams {
            turnigy: PulseRange {
                min_count: 100,
                max_count: 600,
            },
            towerpro: PulseRange {
                min_count: 250,
                max_count: 450,
            },
            datan: PulseRange {
                min_count: 90,
                max_count: 500,
            },
        },
        boards,
    )
}

fn bench_eye_params() -> EyeParams {
    EyeParams {
        family: ServoFamily::Turnigy,
        step_interval_ms: 5,
        glance_pause_ms: 500,
        time_between_glance_ms: 2000,
        time_between_look_ms: 3000,
        roll_increment_deg: 1.0,
        left: EyeConfig {
            vert_channel: 5,
            hor_channel: 4,
            neutral_vert_deg: 79.0,
            neutral_hor_deg: 92.0,
            up_vert_deg: 100.0,
            down_vert_deg: 55.0,
            left_hor_deg: 65.0,
            right_hor_deg: 124.0,
        },
        right: EyeConfig {
            vert_channel: 7,
            hor_channel: 6,
            neutral_vert_deg: 50.0,
            neutral_hor_deg: 32.0,
            up_vert_deg: 30.0,
            down_vert_deg: 75.0,
            left_hor_deg: 14.0,
            right_hor_deg: 53.0,
        },
    }
}

fn step_benchmark(c: &mut Criterion) {
    // One tick of the paired vertical stepping cycle, the hottest path of
    // the behaviour loop
    c.bench_function("eyes step up and down tick", |b| {
        let mut servo = bench_servo_ctrl();
        let mut eyes = Eyeballs::new(bench_eye_params());
        let mut now = 0u64;

        b.iter(|| {
            now += 10;
            eyes.step_eyes_up_and_down(3.0, 3.0, now, &mut servo);
        });
    });

    // The degree to pulse map on its own
    c.bench_function("deg to pulse", |b| {
        let params = ServoParams {
            turnigy: PulseRange {
                min_count: 100,
                max_count: 600,
            },
            towerpro: PulseRange {
                min_count: 250,
                max_count: 450,
            },
            datan: PulseRange {
                min_count: 90,
                max_count: 500,
            },
        };

        let mut deg = 0.0f64;
        b.iter(|| {
            deg = (deg + 1.0) % 180.0;
            params.to_pulse(deg, ServoFamily::Turnigy)
        });
    });
}

criterion_group!(benches, step_benchmark);
criterion_main!(benches);
