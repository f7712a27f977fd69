//! End-to-end mutation runs over parsed domains.

use planfuzz::{
    domain_to_pddl, parse_domain, validate, Condition, MutationConfig, Mutator,
    NegativePreconditionPolicy,
};

const TOGGLE: &str = r"
    (define (domain toggle)
      (:predicates (p))
      (:action a
        :parameters ()
        :precondition (p)
        :effect (not (p))))";

const TRANSPORT: &str = r"
    (define (domain transport)
      (:requirements :strips :typing)
      (:types location vehicle package - object)
      (:predicates
        (at ?v - vehicle ?l - location)
        (in ?p - package ?v - vehicle)
        (stored ?p - package ?l - location)
        (road ?l1 - location ?l2 - location))
      (:action drive
        :parameters (?v - vehicle ?from - location ?to - location)
        :precondition (and (at ?v ?from) (road ?from ?to))
        :effect (and (not (at ?v ?from)) (at ?v ?to)))
      (:action load
        :parameters (?p - package ?v - vehicle ?l - location)
        :precondition (and (at ?v ?l) (stored ?p ?l))
        :effect (and (in ?p ?v) (not (stored ?p ?l))))
      (:action unload
        :parameters (?p - package ?v - vehicle ?l - location)
        :precondition (and (at ?v ?l) (in ?p ?v))
        :effect (and (stored ?p ?l) (not (in ?p ?v)))))";

fn seeded_config(rate: f64, seed: u64) -> MutationConfig {
    MutationConfig {
        rate,
        seed: Some(seed),
        ..MutationConfig::default()
    }
}

/// A single harden edit on a parameterless action can only insert nullary
/// atoms, and the audit log records exactly that one edit.
#[test]
fn single_action_harden_inserts_nullary_precondition() {
    let mut domain = parse_domain(TOGGLE).unwrap();
    validate(&mut domain, NegativePreconditionPolicy::Reject).unwrap();

    let mut mutator = Mutator::new(MutationConfig {
        rate: 1.0,
        // Force the insert-precondition operator from the basic catalogue.
        basic_weights: vec![1.0, 0.0, 0.0],
        seed: Some(17),
        ..MutationConfig::default()
    });
    let applied = mutator.harden(&mut domain).unwrap();
    assert_eq!(applied, 1);

    let log = mutator.audit_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log.render(), "a,p,precPos,1\n");

    // Original (p) plus one inserted literal grounded over zero parameters.
    let action = domain.action("a").unwrap();
    assert_eq!(action.precondition.len(), 2);
    assert!(matches!(action.precondition, Condition::And(_)));
    for atom in action.precondition.conjuncts() {
        assert_eq!(atom.predicate, "p");
        assert!(atom.args.is_empty());
    }
}

/// Every audit line names an action of the domain and a declared predicate,
/// in the stable comma-joined format.
#[test]
fn harden_audit_lines_are_mechanically_diffable() {
    let mut domain = parse_domain(TRANSPORT).unwrap();
    validate(&mut domain, NegativePreconditionPolicy::Reject).unwrap();
    let baseline = domain.clone();

    let mut mutator = Mutator::new(seeded_config(1.0, 23));
    let applied = mutator.harden(&mut domain).unwrap();
    assert!(applied > 0);
    assert_ne!(domain, baseline);

    for line in mutator.audit_log().render().lines() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 4, "bad audit line: {line}");
        assert!(baseline.action(fields[0]).is_some());
        assert!(baseline.predicate(fields[1]).is_some());
        assert!(["precPos", "precNeg", "effPos", "effNeg"].contains(&fields[2]));
        assert!(["1", "-1"].contains(&fields[3]));
    }
}

/// Inserted atoms only ever bind the target action's own parameters.
#[test]
fn harden_respects_argument_binding() {
    let mut domain = parse_domain(TRANSPORT).unwrap();
    validate(&mut domain, NegativePreconditionPolicy::Reject).unwrap();

    let mut mutator = Mutator::new(seeded_config(1.0, 31));
    mutator.harden(&mut domain).unwrap();

    for action in &domain.actions {
        let names = action.parameter_names();
        for atom in action.precondition.conjuncts() {
            assert!(atom.args.iter().all(|a| names.contains(a.as_str())));
        }
        for effect in &action.effects {
            assert!(effect.literal.args.iter().all(|a| names.contains(a.as_str())));
        }
    }
}

/// Relax only ever removes literals that were actually present.
#[test]
fn relax_shrinks_preconditions_and_logs_deletions() {
    let mut domain = parse_domain(TRANSPORT).unwrap();
    validate(&mut domain, NegativePreconditionPolicy::Reject).unwrap();
    let baseline = domain.clone();

    let mut mutator = Mutator::new(seeded_config(1.0, 7));
    let applied = mutator.relax(&mut domain).unwrap();
    assert_eq!(applied, 3);

    for record in mutator.audit_log().records() {
        assert_eq!(record.direction(), -1);
        let original = baseline.action(record.action()).unwrap();
        assert!(original.precondition.contains(record.atom()));
        let mutated = domain.action(record.action()).unwrap();
        assert_eq!(mutated.precondition.len(), original.precondition.len() - 1);
    }
}

/// The mutated domain still serializes and reparses cleanly.
#[test]
fn mutated_domain_survives_serialization() {
    let mut domain = parse_domain(TRANSPORT).unwrap();
    validate(&mut domain, NegativePreconditionPolicy::Reject).unwrap();

    let mut mutator = Mutator::new(seeded_config(0.5, 99));
    mutator.harden(&mut domain).unwrap();
    mutator.relax(&mut domain).unwrap();

    let text = domain_to_pddl(&domain);
    let reparsed = parse_domain(&text).unwrap();
    assert_eq!(domain, reparsed);
}
