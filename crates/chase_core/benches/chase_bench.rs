use chase_core::engine::actors::PlayerInput;
use chase_core::engine::config::ZoneConfig;
use chase_core::{predict, ChaseSim, EngineConfig, HistoryBuffer, ZoneBias};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn bench_tick_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("chase_tick");
    let bias = ZoneBias::from_positions(
        (0..500).map(|i| [(i * 7 % 3200) as f32, 600.0]),
        &ZoneConfig::default(),
        3200.0,
    );

    for level in [1u32, 2] {
        group.bench_function(format!("level{}_600_ticks", level), |b| {
            b.iter_batched(
                || {
                    ChaseSim::for_level(level, EngineConfig::default(), bias.clone())
                        .expect("campus level")
                },
                |mut sim| {
                    for t in 0..600u32 {
                        let input = PlayerInput { right: true, jump: t % 45 == 0, left: false };
                        if sim.tick(input).is_terminal() {
                            break;
                        }
                    }
                    black_box(sim.session().threat_history.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let mut history = HistoryBuffer::default();
    for i in 0..60 {
        let vx = if i % 3 == 0 { 4.0 } else { 5.0 };
        history.observe(i as f32 * 5.0, 600.0, vx, 0.0);
    }
    c.bench_function("predict_full_history", |b| b.iter(|| predict(black_box(&history), 20)));
}

criterion_group!(benches, bench_tick_loop, bench_predict);
criterion_main!(benches);
