use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use musyc::{DoseLattice, Parameters, Result, SurfaceKind, Surfaces};
use std::time::Duration;

// effect, bliss and loewe surfaces over a square lattice
fn all_surfaces(lattice: &DoseLattice, params: &Parameters) -> Result<Surfaces> {
    Surfaces::compute(
        lattice.d1(),
        lattice.d2(),
        params,
        &[SurfaceKind::Effect, SurfaceKind::Bliss, SurfaceKind::Loewe],
    )
}

fn benchmark_surfaces(c: &mut Criterion) {
    let params = Parameters::default()
        .with_beta(0.5)
        .with_alpha(10., 0.1)
        .with_gamma(2., 0.5);
    let mut group = c.benchmark_group("MuSyC Surfaces");
    group.sample_size(20).warm_up_time(Duration::from_secs(1));
    for n in (30..151).step_by(40) {
        let lattice = DoseLattice::new(n, -3., 3.).expect("valid lattice");
        group.bench_with_input(BenchmarkId::new("Lattice size", n), &lattice, |b, l| {
            b.iter(|| all_surfaces(l, &params));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_surfaces);
criterion_main!(benches);
