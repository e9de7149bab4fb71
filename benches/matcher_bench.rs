use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jarvis::capability::Capabilities;
use jarvis::command::calculator::evaluate;
use jarvis::command::{normalize, Dispatcher, IntentMatcher};
use jarvis::core::config::JarvisConfig;

const COMMANDS: &[&str] = &[
    "go to github",
    "play despacito on youtube",
    "restart the system",
    "kill 4821",
    "what is (12 + 30) * 2",
    "rename draft.txt to final.txt",
    "asdkjaslkdj",
];

fn bench_match_intent(c: &mut Criterion) {
    let matcher = IntentMatcher::default();
    let normalized: Vec<String> = COMMANDS.iter().map(|c| normalize(c)).collect();

    c.bench_function("match_intent", |b| {
        b.iter(|| {
            for text in &normalized {
                black_box(matcher.match_intent(black_box(text)));
            }
        });
    });
}

fn bench_evaluate(c: &mut Criterion) {
    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box("(1 + 2) * 3 - 4 / (5 - 6) * -7")));
    });
}

fn bench_process_command(c: &mut Criterion) {
    let mut dispatcher =
        Dispatcher::new(Capabilities::unsupported(), JarvisConfig::default()).unwrap();

    c.bench_function("process_command", |b| {
        b.iter(|| {
            for raw in COMMANDS {
                black_box(dispatcher.process_command(black_box(raw)));
            }
        });
    });
}

criterion_group!(benches, bench_match_intent, bench_evaluate, bench_process_command);
criterion_main!(benches);
