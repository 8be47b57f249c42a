use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use eduverse_core::model::Question;
use eduverse_core::session::{create_session, create_session_with_rng};

fn make_questions(n: usize, options: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            id: format!("q{i}").into(),
            question_text: format!("Question {i}"),
            options: (0..options).map(|o| format!("option {o}")).collect(),
            correct_answer: "option 0".into(),
        })
        .collect()
}

fn bench_create_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_session");

    for (n, options) in [(5usize, 4usize), (100, 4), (100, 10)] {
        let questions = make_questions(n, options);
        group.bench_function(format!("questions={n},options={options}"), |b| {
            b.iter(|| create_session("bench", black_box(questions.clone())))
        });
    }

    group.bench_function("seeded,questions=100", |b| {
        let questions = make_questions(100, 4);
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| create_session_with_rng("bench", black_box(questions.clone()), &mut rng))
    });

    group.finish();
}

criterion_group!(benches, bench_create_session);
criterion_main!(benches);
