//! # Car Control Benchmark

use chrono::Utc;
use criterion::{criterion_group, criterion_main, Criterion};

use car_lib::car_ctrl::{interpret, quantize, CarCtrl, Params};
use comms_if::tc::car_ctrl::Twist;

fn car_ctrl_benchmark(c: &mut Criterion) {
    // ---- Build a command sequence covering every manouvre ----

    let mut cmds = Vec::new();
    for &x in [-1.0, 0.0, 1.0].iter() {
        for &z in [-1.0, 0.0, 1.0].iter() {
            cmds.push(Twist::planar(x, z));
        }
    }

    let params = Params::default();

    c.bench_function("car_ctrl::interpret", |b| {
        b.iter(|| {
            for cmd in cmds.iter() {
                criterion::black_box(interpret(cmd, &params));
            }
        })
    });

    c.bench_function("car_ctrl::quantize", |b| {
        b.iter(|| quantize(criterion::black_box(2.5), params.cardinal_tolerance_rad))
    });

    let mut car_ctrl = CarCtrl::new(params.clone(), Utc::now());
    let stamp = Utc::now();

    c.bench_function("CarCtrl::apply", |b| {
        b.iter(|| {
            for cmd in cmds.iter() {
                criterion::black_box(car_ctrl.apply(cmd, stamp));
            }
        })
    });
}

criterion_group!(benches, car_ctrl_benchmark);
criterion_main!(benches);
