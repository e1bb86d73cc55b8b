// Use codspeed-criterion-compat when running on CodSpeed (CI), real criterion otherwise
#[cfg(codspeed)]
use codspeed_criterion_compat::{Bencher, Criterion, black_box, criterion_group, criterion_main};
#[cfg(not(codspeed))]
use criterion::{Bencher, Criterion, black_box, criterion_group, criterion_main};
use fnarity::{ArgValues, DispatchOptions, Dispatcher, Object, ResolvedRecord, VariadicScan};

/// Handler that touches every readable field so binding work cannot be skipped.
fn count_fields(_: &(), args: ResolvedRecord) -> usize {
    args.len()
}

/// Resolves `args` against `dispatcher` in a loop, checking the field count once up front.
fn run_resolve<H>(bench: &mut Bencher, dispatcher: &Dispatcher<H>, args: &ArgValues, expected: usize)
where
    H: Fn(&(), ResolvedRecord) -> usize,
{
    assert_eq!(dispatcher.call(&(), args.clone()).unwrap(), expected);

    bench.iter(|| {
        let fields = dispatcher.call(&(), black_box(args.clone())).unwrap();
        black_box(fields);
    });
}

/// Three fixed arities sharing cascading default bags.
fn fixed_dispatcher() -> Dispatcher<fn(&(), ResolvedRecord) -> usize> {
    Dispatcher::builder()
        .params(["a"])
        .defaults([("b", 8), ("c", 9)])
        .params(["a", "b"])
        .defaults([("b", 18), ("c", 19)])
        .params(["a", "b", "c"])
        .handler(count_fields as fn(&(), ResolvedRecord) -> usize)
        .build()
        .unwrap()
}

/// A head, a collected window and a two-name tail.
fn variadic_dispatcher() -> Dispatcher<fn(&(), ResolvedRecord) -> usize> {
    Dispatcher::builder()
        .params(["a"])
        .params(["a", "rest...", "y", "z"])
        .options(DispatchOptions::new().variadic_scan(VariadicScan::Anywhere))
        .handler(count_fields as fn(&(), ResolvedRecord) -> usize)
        .build()
        .unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let fixed = fixed_dispatcher();
    let one = ArgValues::from([1]);
    c.bench_function("fixed_arity_with_defaults", |b| run_resolve(b, &fixed, &one, 3));
    let three = ArgValues::from([1, 2, 3]);
    c.bench_function("fixed_arity_exact", |b| run_resolve(b, &fixed, &three, 3));

    let variadic = variadic_dispatcher();
    let wide: ArgValues = (0..64).map(Object::from).collect();
    c.bench_function("variadic_window_64", |b| run_resolve(b, &variadic, &wide, 4));

    c.bench_function("unsupported_arity", |b| {
        let args = ArgValues::from([1, 2, 3, 4]);
        b.iter(|| black_box(fixed.call(&(), args.clone()).map(|_| ()).unwrap_err()));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
