use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use planfuzz::{
    matched_atoms, Action, Atom, Condition, Domain, Effect, MutationConfig, Mutator, Parameter,
    Predicate, Transformer,
};

/// A synthetic domain with `actions` actions over `predicates` binary
/// predicates, every slot typed `block` so candidate pools stay dense.
fn make_domain(predicates: usize, actions: usize) -> Domain {
    let mut domain = Domain::new("bench");
    for i in 0..predicates {
        domain.predicates.push(Predicate::new(
            format!("rel{i}"),
            vec![Parameter::new("?a", "block"), Parameter::new("?b", "block")],
        ));
    }
    for i in 0..actions {
        let mut action = Action::new(
            format!("act{i}"),
            vec![
                Parameter::new("?x", "block"),
                Parameter::new("?y", "block"),
                Parameter::new("?z", "block"),
            ],
            Condition::And(vec![
                Atom::positive("rel0", vec!["?x".to_string(), "?y".to_string()]),
                Atom::positive("rel0", vec!["?y".to_string(), "?z".to_string()]),
            ]),
        );
        action.effects = vec![
            Effect::unconditional(Atom::positive("rel0", vec!["?x".to_string(), "?z".to_string()])),
            Effect::unconditional(Atom::negated("rel0", vec!["?x".to_string(), "?y".to_string()])),
        ];
        domain.actions.push(action);
    }
    domain
}

fn bench_matched_atoms(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation/matched_atoms");
    for predicates in [4usize, 16, 64] {
        let domain = make_domain(predicates, 1);
        // 3 parameters over 2 slots: 9 groundings per predicate.
        group.throughput(Throughput::Elements((predicates * 9) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(predicates),
            &domain,
            |b, domain| {
                b.iter(|| matched_atoms(domain, &domain.actions[0]));
            },
        );
    }
    group.finish();
}

fn bench_harden_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation/harden");
    for actions in [8usize, 64] {
        group.throughput(Throughput::Elements(actions as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(actions),
            &make_domain(16, actions),
            |b, domain| {
                b.iter(|| {
                    // Fresh domain and mutator per iteration so edits do not
                    // accumulate between samples.
                    let mut domain = domain.clone();
                    let mut mutator = Mutator::new(MutationConfig {
                        rate: 1.0,
                        seed: Some(1),
                        ..MutationConfig::default()
                    });
                    mutator.harden(&mut domain).unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation/transform");
    for actions in [8usize, 64] {
        group.throughput(Throughput::Elements(actions as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(actions),
            &make_domain(16, actions),
            |b, domain| {
                b.iter(|| {
                    Transformer::new(domain.clone(), domain).unwrap().into_domain()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_matched_atoms, bench_harden_pass, bench_transform);
criterion_main!(benches);
