use common::Result;
use cplb::{KeepalivedSpec, LoadBalancingSpec, VirtualServer, VrrpInstance};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn eth0() -> Result<String> {
    Ok("eth0".to_string())
}

fn build_spec(size: usize) -> LoadBalancingSpec {
    let vrrp_instances = (0..size)
        .map(|i| VrrpInstance {
            virtual_ips: vec![format!("10.{}.{}.1/24", i / 256, i % 256)],
            auth_pass: "secret".to_string(),
            ..Default::default()
        })
        .collect();

    let virtual_servers = (0..size)
        .map(|i| VirtualServer {
            ip_address: format!("10.{}.{}.1", i / 256, i % 256),
            ..Default::default()
        })
        .collect();

    LoadBalancingSpec {
        enabled: true,
        lb_type: None,
        keepalived: Some(KeepalivedSpec {
            vrrp_instances,
            virtual_servers,
        }),
    }
}

fn validate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for size in [1, 16, 200] {
        let spec = build_spec(size);

        // Fresh spec every iteration: measures defaulting plus checks
        group.bench_with_input(BenchmarkId::new("fresh", size), &spec, |b, spec| {
            b.iter(|| {
                let mut spec = spec.clone();
                black_box(spec.validate_with("", &eth0))
            })
        });

        // Already defaulted spec: measures checks only
        let mut defaulted = spec.clone();
        defaulted.validate_with("", &eth0);
        group.bench_with_input(BenchmarkId::new("defaulted", size), &defaulted, |b, spec| {
            b.iter(|| {
                let mut spec = spec.clone();
                black_box(spec.validate_with("", &eth0))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, validate_benchmark);
criterion_main!(benches);
