use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nbsim::{
    lattice_cluster, BodyRecord, Cluster, CubeFormConfig, Engine, FlatCluster, Integrate, IntegratorConfig,
    LayoutConfig, Parameters, Simulation,
};

const N: usize = 500;

fn bench_one<S: Integrate>(c: &mut Criterion, bodies: &[BodyRecord], layout: LayoutConfig) {
    let mut group = c.benchmark_group("leapfrog_step");
    group.sample_size(20);
    group.throughput(Throughput::Elements((N * (N - 1) / 2) as u64));

    for cube_form in [CubeFormConfig::SqrtMultiply, CubeFormConfig::Power] {
        let engine = Engine {
            integrator: IntegratorConfig::Leapfrog,
            layout,
            cube_form,
        };
        let mut sim = Simulation::<S>::new(bodies, engine, Parameters::default()).expect("valid cluster");
        // Warmup
        sim.step().expect("finite step");

        group.bench_function(BenchmarkId::new(layout.to_string(), cube_form), |b| {
            b.iter(|| sim.step());
        });
    }
    group.finish();
}

fn bench_layouts(c: &mut Criterion) {
    let bodies = lattice_cluster(N);
    bench_one::<Cluster>(c, &bodies, LayoutConfig::Encapsulated);
    bench_one::<FlatCluster>(c, &bodies, LayoutConfig::Flat);
}

criterion_group!(benches, bench_layouts);
criterion_main!(benches);
