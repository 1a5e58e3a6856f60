//! # SignFlow Component Benchmarks
//!
//! Hot paths that run on every keystroke or every signature:
//!
//! | Component | Operation | Target |
//! |-----------|-----------|--------|
//! | SF-03 Field Validation | email with typo lookup | < 10µs |
//! | SF-03 Field Validation | engine result swap | < 1µs |
//! | SF-02 Autosave | edit + tick decision | < 1µs |
//! | SF-01 Document Lifecycle | send + sign N recipients | < 10µs for N=10 |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sf_01_document_lifecycle::DocumentLifecycleTracker;
use sf_02_autosave::PumpState;
use sf_03_field_validation::{rules, ValidationEngine};

// ============================================================================
// SF-03: Field Validation
// ============================================================================

fn bench_field_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("sf-03-field-validation");

    for input in ["jane.doe@example.com", "jane@gmial.com", "jane@hotmailcom"] {
        group.bench_with_input(BenchmarkId::new("email", input), input, |b, input| {
            b.iter(|| black_box(rules::email(black_box(input))))
        });
    }

    group.bench_function("signer_name", |b| {
        b.iter(|| black_box(rules::signer_name(black_box("  Mary-Jane   O'Neil "))))
    });

    let engine = ValidationEngine::new(rules::email);
    group.bench_function("engine_validate_and_read", |b| {
        b.iter(|| {
            engine.validate(black_box("jane@yaho.com"));
            black_box(engine.current())
        })
    });

    group.finish();
}

// ============================================================================
// SF-02: Autosave
// ============================================================================

fn bench_pump_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("sf-02-autosave");

    group.bench_function("update_then_tick", |b| {
        let mut state = PumpState::new();
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            state.update(format!("body {n}"));
            let decision = state.begin_save(true);
            state.fail_save();
            black_box(decision.outcome())
        })
    });

    group.bench_function("tick_while_in_flight", |b| {
        let mut state = PumpState::new();
        state.update("body".to_string());
        let _ = state.begin_save(true);
        b.iter(|| black_box(state.begin_save(true).outcome()))
    });

    group.finish();
}

// ============================================================================
// SF-01: Document Lifecycle
// ============================================================================

fn bench_signature_accounting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sf-01-document-lifecycle");

    for recipients in [1u32, 10, 100] {
        group.throughput(Throughput::Elements(u64::from(recipients)));
        group.bench_with_input(
            BenchmarkId::new("send_and_sign_all", recipients),
            &recipients,
            |b, &recipients| {
                b.iter(|| {
                    let mut tracker = DocumentLifecycleTracker::draft("Bench");
                    tracker.record_send(recipients).ok();
                    for _ in 0..recipients {
                        tracker.record_signature().ok();
                    }
                    black_box(tracker.take_events().len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_field_rules,
    bench_pump_state,
    bench_signature_accounting
);
criterion_main!(benches);
