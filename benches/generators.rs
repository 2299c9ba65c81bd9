use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ddos_shield_dashboard::core::generators::{
    generate_geo, generate_server_loads, generate_traffic, generate_waf_requests,
};
use ddos_shield_dashboard::core::{Dashboard, RandomTelemetry};
use ddos_shield_dashboard::models::DashboardConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn generators_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("generate_traffic_20", |b| {
        b.iter(|| generate_traffic(&mut rng, black_box(20)))
    });
    c.bench_function("generate_geo", |b| b.iter(|| generate_geo(&mut rng)));
    c.bench_function("generate_server_loads", |b| {
        b.iter(|| generate_server_loads(&mut rng))
    });
    c.bench_function("generate_waf_requests", |b| {
        b.iter(|| generate_waf_requests(&mut rng))
    });
}

fn refresh_benchmark(c: &mut Criterion) {
    let config = DashboardConfig::default();
    let mut dashboard = Dashboard::new(Box::new(RandomTelemetry::seeded(7)), &config);

    c.bench_function("dashboard_refresh", |b| {
        b.iter(|| {
            dashboard.refresh();
            // keep the emitter open so every tick takes the same path
            dashboard.dismiss_alert();
        })
    });
}

criterion_group!(benches, generators_benchmark, refresh_benchmark);
criterion_main!(benches);
