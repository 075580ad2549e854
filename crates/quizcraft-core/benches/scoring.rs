use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizcraft_core::model::{Attempt, Question, Quiz, OPTION_COUNT, QUESTION_COUNT};
use quizcraft_core::scoring::score;
use quizcraft_core::stats::HistorySummary;

fn make_quiz() -> Quiz {
    let questions = (0..QUESTION_COUNT)
        .map(|i| Question {
            text: format!("Question {i}?"),
            options: (0..OPTION_COUNT).map(|o| format!("Option {i}.{o}")).collect(),
            correct_index: i % OPTION_COUNT,
            explanation: format!("Explanation {i}."),
        })
        .collect();
    Quiz::new(questions).unwrap()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let quiz = make_quiz();

    let all_correct: Vec<Option<usize>> =
        (0..QUESTION_COUNT).map(|i| Some(i % OPTION_COUNT)).collect();
    group.bench_function("all_correct", |b| {
        b.iter(|| score(black_box(&quiz), black_box(&all_correct)))
    });

    let all_wrong: Vec<Option<usize>> = (0..QUESTION_COUNT)
        .map(|i| Some((i + 1) % OPTION_COUNT))
        .collect();
    group.bench_function("all_wrong", |b| {
        b.iter(|| score(black_box(&quiz), black_box(&all_wrong)))
    });

    group.finish();
}

fn bench_history_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_summary");

    let history: Vec<Attempt> = (0..1000)
        .map(|i| Attempt::new("bench", (i % 11) as u32, 10))
        .collect();

    group.bench_function("n=1000", |b| {
        b.iter(|| HistorySummary::compute(black_box(&history)))
    });

    group.finish();
}

criterion_group!(benches, bench_score, bench_history_summary);
criterion_main!(benches);
