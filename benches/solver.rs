use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dancing_links::sudoku::SudokuSolver;
use dancing_links::DancingLinks;

const PUZZLE: &str = "\
    53__7____
    6__195___
    _98____6_
    8___6___3
    4__8_3__1
    7___2___6
    _6____28_
    ___419__5
    ____8__79";

fn sudoku_benchmark(c: &mut Criterion) {
    c.bench_function("solve 9x9 sudoku", |b| {
        b.iter(|| {
            let mut solver = SudokuSolver::parse(black_box(PUZZLE)).unwrap();
            solver.solve()
        });
    });
}

fn links_benchmark(c: &mut Criterion) {
    let mut links = DancingLinks::<()>::new();
    let header = links.new_header();
    let nodes: Vec<_> = (0..64).map(|_| links.new_node(header)).collect();
    links.make_row(&nodes);

    c.bench_function("remove and reinsert 64 nodes", |b| {
        b.iter(|| {
            for &node in &nodes {
                links.remove_vertical(black_box(node));
                links.remove_horizontal(node);
            }
            for &node in nodes.iter().rev() {
                links.reinsert_horizontal(node);
                links.reinsert_vertical(node);
            }
        });
    });
}

criterion_group!(benches, sudoku_benchmark, links_benchmark);
criterion_main!(benches);
