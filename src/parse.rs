//! PDDL reader for the supported language subset.
//!
//! Produces the specification model from domain and task text. The reader
//! accepts STRIPS-style constructs only: preconditions and goals must be a
//! literal or a flat conjunction of literals, and effects must be
//! unconditional. Unsupported connectives (`or`, `exists`, `forall`,
//! `imply`, `when`) are rejected here, so the shapes the feature validator
//! excludes can never enter the model. Cost terms, axiom blocks, and
//! numeric initializers are carried as opaque text.

use std::fmt;

use crate::error::ParseError;
use crate::model::{
    Action, Atom, Condition, Domain, Effect, Parameter, Predicate, Requirements, Task, TypeDef,
    TypedObject,
};

/// Default PDDL object type for untyped names.
const DEFAULT_TYPE: &str = "object";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Sexp {
    Sym(String),
    List(Vec<Sexp>),
}

impl Sexp {
    fn sym(&self) -> Option<&str> {
        match self {
            Self::Sym(s) => Some(s),
            Self::List(_) => None,
        }
    }

    fn list(&self) -> Option<&[Sexp]> {
        match self {
            Self::Sym(_) => None,
            Self::List(items) => Some(items),
        }
    }

    fn head(&self) -> Option<&str> {
        self.list().and_then(|items| items.first()).and_then(Sexp::sym)
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sym(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// PDDL is case-insensitive; names are folded to lowercase on read.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            ';' => {
                for nc in chars.by_ref() {
                    if nc == '\n' {
                        break;
                    }
                }
            }
            '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.extend(c.to_lowercase()),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn read_sexp(tokens: &[String], pos: &mut usize) -> Result<Sexp, ParseError> {
    let token = tokens.get(*pos).ok_or(ParseError::UnexpectedEnd)?;
    *pos += 1;
    match token.as_str() {
        "(" => {
            let mut items = Vec::new();
            loop {
                match tokens.get(*pos).map(String::as_str) {
                    Some(")") => {
                        *pos += 1;
                        return Ok(Sexp::List(items));
                    }
                    Some(_) => items.push(read_sexp(tokens, pos)?),
                    None => return Err(ParseError::UnexpectedEnd),
                }
            }
        }
        ")" => Err(ParseError::UnexpectedToken {
            token: ")".to_string(),
        }),
        _ => Ok(Sexp::Sym(token.clone())),
    }
}

fn read_single(text: &str) -> Result<Sexp, ParseError> {
    let tokens = tokenize(text);
    let mut pos = 0;
    let sexp = read_sexp(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(ParseError::UnexpectedToken {
            token: tokens[pos].clone(),
        });
    }
    Ok(sexp)
}

/// Reads a PDDL typed list (`?x ?y - t ?z`); untyped names default to
/// `object`.
fn parse_typed_names(items: &[Sexp]) -> Result<Vec<(String, String)>, ParseError> {
    let mut out = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut iter = items.iter();
    while let Some(item) = iter.next() {
        let sym = item.sym().ok_or_else(|| ParseError::Expected {
            expected: "a name in a typed list",
            found: item.to_string(),
        })?;
        if sym == "-" {
            let ty = iter.next().ok_or(ParseError::UnexpectedEnd)?;
            if ty.head().is_some() {
                return Err(ParseError::Unsupported {
                    construct: format!("compound type {ty}"),
                });
            }
            let ty = ty.sym().ok_or_else(|| ParseError::Expected {
                expected: "a type name",
                found: ty.to_string(),
            })?;
            for name in pending.drain(..) {
                out.push((name, ty.to_string()));
            }
        } else {
            pending.push(sym.to_string());
        }
    }
    for name in pending {
        out.push((name, DEFAULT_TYPE.to_string()));
    }
    Ok(out)
}

fn parse_parameters(items: &[Sexp]) -> Result<Vec<Parameter>, ParseError> {
    Ok(parse_typed_names(items)?
        .into_iter()
        .map(|(name, ty)| Parameter::new(name, ty))
        .collect())
}

fn parse_types(items: &[Sexp]) -> Result<Vec<TypeDef>, ParseError> {
    let mut out = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut iter = items.iter();
    while let Some(item) = iter.next() {
        let sym = item.sym().ok_or_else(|| ParseError::Expected {
            expected: "a type name",
            found: item.to_string(),
        })?;
        if sym == "-" {
            let parent = iter
                .next()
                .and_then(Sexp::sym)
                .ok_or(ParseError::UnexpectedEnd)?;
            for name in pending.drain(..) {
                out.push(TypeDef::new(name, Some(parent.to_string())));
            }
        } else {
            pending.push(sym.to_string());
        }
    }
    for name in pending {
        out.push(TypeDef::new(name, None));
    }
    Ok(out)
}

fn parse_declaration(sexp: &Sexp) -> Result<Predicate, ParseError> {
    let items = sexp.list().ok_or_else(|| ParseError::Expected {
        expected: "a predicate declaration",
        found: sexp.to_string(),
    })?;
    let (name, rest) = items.split_first().ok_or(ParseError::Malformed {
        section: "predicates",
        detail: "empty declaration".to_string(),
    })?;
    let name = name.sym().ok_or_else(|| ParseError::Expected {
        expected: "a predicate name",
        found: name.to_string(),
    })?;
    Ok(Predicate::new(name, parse_parameters(rest)?))
}

fn parse_simple_atom(sexp: &Sexp) -> Result<Atom, ParseError> {
    let items = sexp.list().ok_or_else(|| ParseError::Expected {
        expected: "an atom",
        found: sexp.to_string(),
    })?;
    let (name, rest) = items.split_first().ok_or(ParseError::Malformed {
        section: "atom",
        detail: "empty application".to_string(),
    })?;
    let name = name.sym().ok_or_else(|| ParseError::Expected {
        expected: "a predicate name",
        found: name.to_string(),
    })?;
    let mut args = Vec::with_capacity(rest.len());
    for arg in rest {
        let arg = arg.sym().ok_or_else(|| ParseError::Expected {
            expected: "an argument name",
            found: arg.to_string(),
        })?;
        args.push(arg.to_string());
    }
    Ok(Atom::positive(name, args))
}

fn parse_literal(sexp: &Sexp) -> Result<Atom, ParseError> {
    match sexp.head() {
        Some("not") => {
            let items = sexp.list().unwrap_or_default();
            if items.len() != 2 {
                return Err(ParseError::Malformed {
                    section: "literal",
                    detail: format!("negation of {} operands", items.len().saturating_sub(1)),
                });
            }
            Ok(parse_simple_atom(&items[1])?.negate())
        }
        Some(head @ ("or" | "exists" | "forall" | "imply" | "when" | "and")) => {
            Err(ParseError::Unsupported {
                construct: format!("nested ({head} ...)"),
            })
        }
        _ => parse_simple_atom(sexp),
    }
}

fn parse_condition(sexp: &Sexp) -> Result<Condition, ParseError> {
    match sexp.head() {
        Some("and") => {
            let items = sexp.list().unwrap_or_default();
            let mut parts = Vec::with_capacity(items.len().saturating_sub(1));
            for item in &items[1..] {
                parts.push(parse_literal(item)?);
            }
            Ok(Condition::And(parts))
        }
        Some(head @ ("or" | "exists" | "forall" | "imply")) => Err(ParseError::Unsupported {
            construct: format!("({head} ...) condition"),
        }),
        _ => Ok(Condition::Atom(parse_literal(sexp)?)),
    }
}

fn parse_effects(sexp: &Sexp) -> Result<(Vec<Effect>, Option<String>), ParseError> {
    let items: Vec<&Sexp> = match sexp.head() {
        Some("and") => sexp.list().unwrap_or_default()[1..].iter().collect(),
        _ => vec![sexp],
    };
    let mut effects = Vec::new();
    let mut cost = None;
    for item in items {
        match item.head() {
            Some("increase") => cost = Some(item.to_string()),
            Some(head @ ("when" | "forall" | "and")) => {
                return Err(ParseError::Unsupported {
                    construct: format!("({head} ...) effect"),
                });
            }
            _ => effects.push(Effect::unconditional(parse_literal(item)?)),
        }
    }
    Ok((effects, cost))
}

fn parse_action(items: &[Sexp]) -> Result<Action, ParseError> {
    let (name, rest) = items.split_first().ok_or(ParseError::Malformed {
        section: "action",
        detail: "missing name".to_string(),
    })?;
    let name = name.sym().ok_or_else(|| ParseError::Expected {
        expected: "an action name",
        found: name.to_string(),
    })?;

    let mut action = Action::new(name, Vec::new(), Condition::truth());
    let mut iter = rest.iter();
    while let Some(key) = iter.next() {
        let key = key.sym().ok_or_else(|| ParseError::Expected {
            expected: "an action keyword",
            found: key.to_string(),
        })?;
        let value = iter.next().ok_or(ParseError::UnexpectedEnd)?;
        match key {
            ":parameters" => {
                let items = value.list().ok_or_else(|| ParseError::Expected {
                    expected: "a parameter list",
                    found: value.to_string(),
                })?;
                action.parameters = parse_parameters(items)?;
            }
            ":precondition" => action.precondition = parse_condition(value)?,
            ":effect" => {
                let (effects, cost) = parse_effects(value)?;
                action.effects = effects;
                action.cost = cost;
            }
            other => {
                return Err(ParseError::Unsupported {
                    construct: format!("action keyword {other}"),
                });
            }
        }
    }
    Ok(action)
}

fn expect_define<'a>(sexp: &'a Sexp, kind: &'static str) -> Result<(String, &'a [Sexp]), ParseError> {
    let items = sexp.list().ok_or_else(|| ParseError::Expected {
        expected: "a define form",
        found: sexp.to_string(),
    })?;
    match items.split_first() {
        Some((head, rest)) if head.sym() == Some("define") => {
            let (header, body) = rest.split_first().ok_or(ParseError::Malformed {
                section: "define",
                detail: format!("missing ({kind} <name>)"),
            })?;
            let header_items = header.list().unwrap_or_default();
            match (header_items.first().and_then(Sexp::sym), header_items.get(1)) {
                (Some(k), Some(name)) if k == kind => {
                    let name = name.sym().ok_or_else(|| ParseError::Expected {
                        expected: "a name",
                        found: name.to_string(),
                    })?;
                    Ok((name.to_string(), body))
                }
                _ => Err(ParseError::Expected {
                    expected: "a define header",
                    found: header.to_string(),
                }),
            }
        }
        _ => Err(ParseError::Expected {
            expected: "a define form",
            found: sexp.to_string(),
        }),
    }
}

/// Parses PDDL domain text into a [`Domain`].
///
/// # Errors
///
/// Returns a [`ParseError`] on malformed input or on constructs outside the
/// supported subset.
pub fn parse_domain(text: &str) -> Result<Domain, ParseError> {
    let sexp = read_single(text)?;
    let (name, body) = expect_define(&sexp, "domain")?;
    let mut domain = Domain::new(name);

    for section in body {
        match section.head() {
            Some(":requirements") => {
                let items = section.list().unwrap_or_default();
                domain.requirements = Requirements(
                    items[1..]
                        .iter()
                        .filter_map(Sexp::sym)
                        .map(str::to_string)
                        .collect(),
                );
            }
            Some(":types") => {
                domain.types = parse_types(&section.list().unwrap_or_default()[1..])?;
            }
            Some(":constants") => {
                domain.constants = parse_typed_names(&section.list().unwrap_or_default()[1..])?
                    .into_iter()
                    .map(|(n, t)| TypedObject::new(n, t))
                    .collect();
            }
            Some(":predicates") => {
                for decl in &section.list().unwrap_or_default()[1..] {
                    domain.predicates.push(parse_declaration(decl)?);
                }
            }
            Some(":functions") => {
                // Function declarations may carry `- number` annotations at
                // this level; the annotation is dropped, the shape kept.
                let items = &section.list().unwrap_or_default()[1..];
                let mut iter = items.iter();
                while let Some(item) = iter.next() {
                    if item.sym() == Some("-") {
                        iter.next();
                        continue;
                    }
                    domain.functions.push(parse_declaration(item)?);
                }
            }
            Some(":action") => {
                domain
                    .actions
                    .push(parse_action(&section.list().unwrap_or_default()[1..])?);
            }
            Some(":derived" | ":axiom") => domain.axioms.push(section.to_string()),
            Some(other) => {
                return Err(ParseError::Unsupported {
                    construct: format!("domain section {other}"),
                });
            }
            None => {
                return Err(ParseError::Expected {
                    expected: "a domain section",
                    found: section.to_string(),
                });
            }
        }
    }
    Ok(domain)
}

/// Parses PDDL problem text into a [`Task`].
///
/// # Errors
///
/// Returns a [`ParseError`] on malformed input or on constructs outside the
/// supported subset.
pub fn parse_task(text: &str) -> Result<Task, ParseError> {
    let sexp = read_single(text)?;
    let (name, body) = expect_define(&sexp, "problem")?;
    let mut task = Task::new(name, String::new(), Condition::truth());

    for section in body {
        match section.head() {
            Some(":domain") => {
                let items = section.list().unwrap_or_default();
                task.domain_name = items
                    .get(1)
                    .and_then(Sexp::sym)
                    .ok_or(ParseError::Malformed {
                        section: "problem",
                        detail: "missing domain name".to_string(),
                    })?
                    .to_string();
            }
            Some(":requirements") => {
                let items = section.list().unwrap_or_default();
                task.requirements = Requirements(
                    items[1..]
                        .iter()
                        .filter_map(Sexp::sym)
                        .map(str::to_string)
                        .collect(),
                );
            }
            Some(":objects") => {
                task.objects = parse_typed_names(&section.list().unwrap_or_default()[1..])?
                    .into_iter()
                    .map(|(n, t)| TypedObject::new(n, t))
                    .collect();
            }
            Some(":init") => {
                for item in &section.list().unwrap_or_default()[1..] {
                    if item.head() == Some("=") {
                        task.numeric_init.push(item.to_string());
                    } else {
                        task.init.push(parse_literal(item)?);
                    }
                }
            }
            Some(":goal") => {
                let items = section.list().unwrap_or_default();
                let inner = items.get(1).ok_or(ParseError::Malformed {
                    section: "goal",
                    detail: "empty goal".to_string(),
                })?;
                task.goal = parse_condition(inner)?;
            }
            Some(":metric") => task.use_metric = true,
            Some(other) => {
                return Err(ParseError::Unsupported {
                    construct: format!("problem section {other}"),
                });
            }
            None => {
                return Err(ParseError::Expected {
                    expected: "a problem section",
                    found: section.to_string(),
                });
            }
        }
    }
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = r"
        (define (domain transport)
          (:requirements :strips :typing :action-costs)
          (:types location vehicle - object)
          (:constants depot - location)
          (:predicates
            (at ?v - vehicle ?l - location)
            (road ?l1 - location ?l2 - location))
          (:functions (total-cost) - number)
          (:action drive
            :parameters (?v - vehicle ?from - location ?to - location)
            :precondition (and (at ?v ?from) (road ?from ?to))
            :effect (and (not (at ?v ?from)) (at ?v ?to)
                         (increase (total-cost) 1))))";

    const TASK: &str = r"
        (define (problem transport-01)
          (:domain transport)
          (:objects truck - vehicle city - location)
          (:init (at truck depot) (road depot city) (= (total-cost) 0))
          (:goal (and (at truck city)))
          (:metric minimize (total-cost)))";

    #[test]
    fn test_parse_domain_shape() {
        let domain = parse_domain(DOMAIN).unwrap();
        assert_eq!(domain.name, "transport");
        assert!(domain.requirements.contains(":typing"));
        assert_eq!(domain.types.len(), 2);
        assert_eq!(domain.types[0].parent.as_deref(), Some("object"));
        assert_eq!(domain.constants, vec![TypedObject::new("depot", "location")]);
        assert_eq!(domain.predicates.len(), 2);
        assert_eq!(domain.functions.len(), 1);
        assert_eq!(domain.actions.len(), 1);

        let drive = &domain.actions[0];
        assert_eq!(drive.parameters.len(), 3);
        assert_eq!(drive.precondition.len(), 2);
        assert_eq!(drive.effects.len(), 2);
        assert!(drive.effects[0].literal.negated);
        assert_eq!(drive.cost.as_deref(), Some("(increase (total-cost) 1)"));
    }

    #[test]
    fn test_parse_task_shape() {
        let task = parse_task(TASK).unwrap();
        assert_eq!(task.name, "transport-01");
        assert_eq!(task.domain_name, "transport");
        assert_eq!(task.objects.len(), 2);
        assert_eq!(task.init.len(), 2);
        assert_eq!(task.numeric_init, vec!["(= (total-cost) 0)".to_string()]);
        assert!(task.use_metric);
        assert_eq!(
            task.goal.conjuncts(),
            &[Atom::positive("at", vec!["truck".to_string(), "city".to_string()])]
        );
    }

    #[test]
    fn test_untyped_parameters_default_to_object() {
        let text = "(define (domain d) (:predicates (p ?x)) (:action a :parameters (?x) :precondition (p ?x) :effect (p ?x)))";
        let domain = parse_domain(text).unwrap();
        assert_eq!(domain.predicates[0].arguments[0].type_name, "object");
        assert_eq!(domain.actions[0].parameters[0].type_name, "object");
    }

    #[test]
    fn test_disjunctive_precondition_rejected() {
        let text = "(define (domain d) (:predicates (p) (q)) (:action a :parameters () :precondition (or (p) (q)) :effect (p)))";
        let err = parse_domain(text).unwrap_err();
        assert!(matches!(err, ParseError::Unsupported { .. }));
    }

    #[test]
    fn test_conditional_effect_rejected() {
        let text = "(define (domain d) (:predicates (p) (q)) (:action a :parameters () :precondition (p) :effect (when (p) (q))))";
        let err = parse_domain(text).unwrap_err();
        assert!(matches!(err, ParseError::Unsupported { .. }));
    }

    #[test]
    fn test_derived_block_kept_as_opaque_axiom() {
        let text = "(define (domain d) (:predicates (p) (q)) (:derived (q) (p)) (:action a :parameters () :precondition (p) :effect (q)))";
        let domain = parse_domain(text).unwrap();
        assert_eq!(domain.axioms, vec!["(:derived (q) (p))".to_string()]);
    }

    #[test]
    fn test_case_folding() {
        let text = "(define (domain D) (:predicates (P ?X)) (:action A :parameters (?X) :precondition (P ?X) :effect (P ?X)))";
        let domain = parse_domain(text).unwrap();
        assert_eq!(domain.name, "d");
        assert_eq!(domain.predicates[0].name, "p");
        assert_eq!(domain.actions[0].parameters[0].name, "?x");
    }

    #[test]
    fn test_unbalanced_input_rejected() {
        assert!(matches!(
            parse_domain("(define (domain d)"),
            Err(ParseError::UnexpectedEnd)
        ));
        assert!(parse_domain("(define (domain d)))").is_err());
    }
}
