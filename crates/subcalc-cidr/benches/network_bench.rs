use criterion::{black_box, criterion_group, criterion_main, Criterion};
use subcalc_cidr::{Address, Network};

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("address_parse", |b| {
        b.iter(|| Address::parse(black_box("192.168.1.141")))
    });

    c.bench_function("network_parse", |b| {
        b.iter(|| Network::parse(black_box("192.168.1.141/26")))
    });
}

fn benchmark_derive(c: &mut Criterion) {
    let net = match Network::parse("192.168.1.141/26") {
        Ok(net) => net,
        Err(e) => {
            eprintln!("Skipping benchmark: {}", e);
            return;
        }
    };

    c.bench_function("network_summary", |b| b.iter(|| black_box(net).summary()));

    c.bench_function("subnet_walk_1k", |b| {
        b.iter(|| black_box(net).subnets().take(1000).count())
    });
}

criterion_group!(benches, benchmark_parse, benchmark_derive);
criterion_main!(benches);
