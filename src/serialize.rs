//! Rendering the specification model back to PDDL text.
//!
//! This is the boundary handed to external plan validators/solvers: the
//! emitted text uses the same domain grammar the parser reads, with no other
//! framing. Round-tripping an unmutated domain through parse and render
//! yields a structurally equal model.

use std::fmt;
use std::fmt::Write as _;

use crate::model::{Action, Domain, Parameter, Predicate, Task, TypeDef, TypedObject};

// PDDL text forms of the declaration nodes live here with the rest of the
// rendering; atoms and conditions print themselves (they appear in error
// messages too).

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.type_name)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.name)?;
        for arg in &self.arguments {
            write!(f, " {arg}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{} - {parent}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Display for TypedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.type_name)
    }
}

fn render_action(action: &Action) -> String {
    let mut out = String::new();
    let _ = write!(out, "(:action {}\n :parameters (", action.name);
    for (i, param) in action.parameters.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{param}");
    }
    let _ = write!(out, ")\n :precondition {}", action.precondition);
    out.push_str("\n :effect (and");
    for effect in &action.effects {
        let _ = write!(out, " {}", effect.literal);
    }
    if let Some(cost) = &action.cost {
        let _ = write!(out, " {cost}");
    }
    out.push_str("))");
    out
}

/// Renders a domain to PDDL text.
#[must_use]
pub fn domain_to_pddl(domain: &Domain) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "(define (domain {})", domain.name);
    if !domain.requirements.is_empty() {
        let _ = writeln!(out, "(:requirements {})", domain.requirements.0.join(" "));
    }
    if !domain.types.is_empty() {
        let types: Vec<String> = domain.types.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "(:types\n\t{})", types.join("\n\t"));
    }
    if !domain.constants.is_empty() {
        let constants: Vec<String> = domain.constants.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "(:constants {})", constants.join(" "));
    }
    let predicates: Vec<String> = domain.predicates.iter().map(ToString::to_string).collect();
    let _ = writeln!(out, "(:predicates\n\t{})", predicates.join("\n\t"));
    if !domain.functions.is_empty() {
        let functions: Vec<String> = domain.functions.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "(:functions {})", functions.join(" "));
    }
    for axiom in &domain.axioms {
        let _ = writeln!(out, "{axiom}");
    }
    let actions: Vec<String> = domain.actions.iter().map(|a| render_action(a)).collect();
    let _ = write!(out, "{} )", actions.join("\n\n"));
    out
}

/// Renders a task to PDDL text.
#[must_use]
pub fn task_to_pddl(task: &Task) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "(define (problem {})", task.name);
    let _ = writeln!(out, "(:domain {})", task.domain_name);
    if !task.requirements.is_empty() {
        let _ = writeln!(out, "(:requirements {})", task.requirements.0.join(" "));
    }
    if !task.objects.is_empty() {
        let objects: Vec<String> = task.objects.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "(:objects {})", objects.join(" "));
    }
    let mut init: Vec<String> = task.init.iter().map(ToString::to_string).collect();
    init.extend(task.numeric_init.iter().cloned());
    let _ = writeln!(out, "(:init\n\t{})", init.join("\n\t"));
    let _ = writeln!(out, "(:goal {})", task.goal);
    if task.use_metric {
        let _ = writeln!(out, "(:metric minimize (total-cost))");
    }
    let _ = write!(out, ")");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, Condition, Effect, Requirements};
    use crate::parse::{parse_domain, parse_task};

    fn sample_domain() -> Domain {
        let mut domain = Domain::new("transport");
        domain.requirements =
            Requirements(vec![":strips".to_string(), ":typing".to_string()]);
        domain.types = vec![
            TypeDef::new("location", Some("object".to_string())),
            TypeDef::new("vehicle", Some("object".to_string())),
        ];
        domain.constants = vec![TypedObject::new("depot", "location")];
        domain.predicates = vec![
            Predicate::new(
                "at",
                vec![
                    Parameter::new("?v", "vehicle"),
                    Parameter::new("?l", "location"),
                ],
            ),
            Predicate::new(
                "road",
                vec![
                    Parameter::new("?l1", "location"),
                    Parameter::new("?l2", "location"),
                ],
            ),
        ];
        domain.functions = vec![Predicate::new("total-cost", Vec::new())];
        let mut drive = Action::new(
            "drive",
            vec![
                Parameter::new("?v", "vehicle"),
                Parameter::new("?from", "location"),
                Parameter::new("?to", "location"),
            ],
            Condition::And(vec![
                Atom::positive("at", vec!["?v".to_string(), "?from".to_string()]),
                Atom::positive("road", vec!["?from".to_string(), "?to".to_string()]),
            ]),
        );
        drive.effects = vec![
            Effect::unconditional(Atom::negated("at", vec!["?v".to_string(), "?from".to_string()])),
            Effect::unconditional(Atom::positive("at", vec!["?v".to_string(), "?to".to_string()])),
        ];
        drive.cost = Some("(increase (total-cost) 1)".to_string());
        domain.actions.push(drive);
        domain
    }

    fn sample_task() -> Task {
        let mut task = Task::new(
            "transport-01",
            "transport",
            Condition::And(vec![Atom::positive(
                "at",
                vec!["truck".to_string(), "city".to_string()],
            )]),
        );
        task.objects = vec![
            TypedObject::new("truck", "vehicle"),
            TypedObject::new("city", "location"),
        ];
        task.init = vec![
            Atom::positive("at", vec!["truck".to_string(), "depot".to_string()]),
            Atom::positive("road", vec!["depot".to_string(), "city".to_string()]),
        ];
        task.numeric_init = vec!["(= (total-cost) 0)".to_string()];
        task.use_metric = true;
        task
    }

    #[test]
    fn test_domain_roundtrip_is_structural_identity() {
        let domain = sample_domain();
        let text = domain_to_pddl(&domain);
        let reparsed = parse_domain(&text).unwrap();
        assert_eq!(domain, reparsed);
    }

    #[test]
    fn test_task_roundtrip_is_structural_identity() {
        let task = sample_task();
        let text = task_to_pddl(&task);
        let reparsed = parse_task(&text).unwrap();
        assert_eq!(task, reparsed);
    }

    #[test]
    fn test_domain_text_framing() {
        let text = domain_to_pddl(&sample_domain());
        assert!(text.starts_with("(define (domain transport)"));
        assert!(text.contains("(:requirements :strips :typing)"));
        assert!(text.contains("(:constants depot - location)"));
        assert!(text.contains("(:action drive"));
        assert!(text.contains(":effect (and (not (at ?v ?from)) (at ?v ?to) (increase (total-cost) 1))"));
        assert!(text.ends_with(')'));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut domain = Domain::new("bare");
        domain
            .predicates
            .push(Predicate::new("p", Vec::new()));
        domain.actions.push({
            let mut a = Action::new(
                "a",
                Vec::new(),
                Condition::Atom(Atom::positive("p", Vec::new())),
            );
            a.effects = vec![Effect::unconditional(Atom::negated("p", Vec::new()))];
            a
        });
        let text = domain_to_pddl(&domain);
        assert!(!text.contains(":requirements"));
        assert!(!text.contains(":types"));
        assert!(!text.contains(":constants"));
        assert!(!text.contains(":functions"));
        assert_eq!(parse_domain(&text).unwrap(), domain);
    }

    #[test]
    fn test_axioms_pass_through() {
        let mut domain = sample_domain();
        domain.axioms.push("(:derived (reachable ?l1 ?l2) (road ?l1 ?l2))".to_string());
        let text = domain_to_pddl(&domain);
        let reparsed = parse_domain(&text).unwrap();
        assert_eq!(domain.axioms, reparsed.axioms);
    }
}
