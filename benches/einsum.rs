use criterion::*;
use einsumr::prelude::*;

fn ij_jk(c: &mut Criterion) {
    let mut group = c.benchmark_group("einsum");
    for &n in &[4usize, 8, 16, 32, 64] {
        group.bench_with_input(BenchmarkId::new("ij_jk", n), &n, |bench, &n| {
            let a = Array::filled(&[n, n], 1.0f64);
            let b = Array::filled(&[n, n], 1.0f64);
            bench.iter(|| {
                let mut out = Array::<f64>::zeros(&[n, n]);
                let mut bound = Output::view(out.view_mut(), [0, 1]).unwrap();
                einsum(
                    &[
                        Operand::view(a.view(), [0, 2]).unwrap(),
                        Operand::view(b.view(), [2, 1]).unwrap(),
                    ],
                    &mut bound,
                )
                .unwrap();
                drop(bound);
                out
            })
        });
    }
    group.finish();
}

criterion_group!(benches, ij_jk);
criterion_main!(benches);
