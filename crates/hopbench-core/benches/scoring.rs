use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hopbench_core::model::{OptionLetter, Participant, Question};
use hopbench_core::pool::QuestionPool;
use hopbench_core::scoring::{percent_difference, score};
use hopbench_core::session::QuizSession;

fn make_question(id: i64, k_hops: i64) -> Question {
    Question {
        id,
        k_hops,
        question_text: format!("Question {id}"),
        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_answer: OptionLetter::from_index(id as usize % 4).unwrap_or(OptionLetter::C),
        model_explanation: String::new(),
        model_correct: id % 2 == 0,
        raw_response: String::new(),
    }
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    let questions: Vec<Question> = (0..10).map(|i| make_question(i, 3)).collect();
    let answers: HashMap<i64, OptionLetter> =
        (0..10).map(|i| (i, OptionLetter::A)).collect();

    group.bench_function("ten_questions", |b| {
        b.iter(|| score(black_box(&questions), black_box(&answers)))
    });

    group.bench_function("percent_difference", |b| {
        b.iter(|| percent_difference(black_box(7), black_box(9)))
    });

    group.finish();
}

fn bench_session_start(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_start");

    let pool = QuestionPool::new((0..5000).map(|i| make_question(i, i % 5 + 1)).collect());
    let participant = Participant::new("Bench", "Runner");

    group.bench_function("5000_question_pool", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let mut session = QuizSession::new();
            session.start(
                black_box(participant.clone()),
                black_box(3),
                black_box(&pool),
                &mut rng,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_score, bench_session_start);
criterion_main!(benches);
