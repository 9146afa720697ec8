use criterion::{Criterion, criterion_group, criterion_main};
use presto_chart::{Chart, DifficultyProfile, HitObject};
use presto_play::{PlaybackSession, PlayerConfig, SessionConfig};

fn dense_chart(objects: usize) -> Chart {
    let mut chart = Chart::new();
    for i in 0..objects {
        let start = 1000.0 + i as f64 * 120.0;
        if i % 4 == 3 {
            chart.add_object(HitObject::slider(start, start + 360.0));
        } else {
            chart.add_object(HitObject::circle(start));
        }
    }
    chart
        .timings
        .add_point(0.0, 60_000.0 / 180.0, 0, 1, 1.0, 4, false, false, false);
    chart.diff = DifficultyProfile::new(9.0, 8.0);
    chart.finalize_load();
    chart
}

fn bench_natural_playback(c: &mut Criterion) {
    let chart = dense_chart(2000);
    let config = SessionConfig {
        players: vec![PlayerConfig::natural("auto")],
        ..Default::default()
    };

    c.bench_function("session_natural_playback", |b| {
        b.iter(|| {
            let mut session = PlaybackSession::new(chart.clone(), &config);
            let end_time = session
                .chart()
                .hit_objects()
                .last()
                .map(|o| o.end_time + 2_000.0)
                .unwrap_or(0.0);

            // Simulate time progression through the chart at ~60fps
            let mut time = 0.0;
            while time <= end_time {
                session.update(time, &[None]);
                time += 16.666;
            }
        });
    });
}

criterion_group!(benches, bench_natural_playback);
criterion_main!(benches);
