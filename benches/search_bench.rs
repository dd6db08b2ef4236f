use criterion::{criterion_group, criterion_main, Criterion, black_box};
use elobot::Position;
use elobot::search::{SearchParams, Searcher};

fn bench_search(c: &mut Criterion) {
    c.bench_function("search_depth_3_startpos", |ben| {
        ben.iter(|| {
            let mut p = Position::startpos();
            let mut s = Searcher::default();
            let params = SearchParams { depth: 3, ..SearchParams::default() };
            let r = s.search_with_params(black_box(&mut p), params).expect("search");
            black_box(r.nodes)
        })
    });
    c.bench_function("search_depth_3_unpruned_startpos", |ben| {
        ben.iter(|| {
            let mut p = Position::startpos();
            let mut s = Searcher::default();
            let params = SearchParams { depth: 3, prune: false, order_moves: false };
            let r = s.search_with_params(black_box(&mut p), params).expect("search");
            black_box(r.nodes)
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
