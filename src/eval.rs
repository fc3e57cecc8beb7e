//! The evaluator (§4.1): a node-kind dispatcher over `Expr`. Self-evaluating
//! data returns itself; every special form is handled directly by its own
//! match arm (they arrive already elaborated by `parser::analyze`, never as
//! plain s-expressions to be re-interpreted); applications resolve the
//! operator to a closure or primitive and dispatch through `apply`.

use crate::env::Env;
use crate::error::{EvalError, EvalResult};
use crate::expr::{intern, CondClause, Expr};
use crate::list::List;
use crate::proc::{Closure, LambdaNode};
use std::rc::Rc;

pub fn eval(node: &Expr, env: &Rc<Env>) -> EvalResult {
    match node {
        // self-evaluating data
        Expr::Num(_)
        | Expr::Str(_)
        | Expr::Bool(_)
        | Expr::Char(_)
        | Expr::List(_)
        | Expr::Vector(_)
        | Expr::Closure(_)
        | Expr::Primitive(_)
        | Expr::Sym(_)
        | Expr::QuasiSym(_) => Ok(node.clone()),

        Expr::Var(name) => env
            .lookup(name)
            .ok_or_else(|| EvalError::unbound_identifier(name)),

        Expr::Root(children) | Expr::Sequence(children) => eval_sequence(children, env),

        Expr::Declaration(name, value) => {
            let value = eval(value, env)?;
            env.bind(name, value);
            Ok(intern(name.clone()))
        }

        Expr::Cond(clauses) => eval_cond(clauses, env),

        Expr::And(exprs) => {
            let mut last = Expr::Bool(true);
            for e in exprs {
                last = eval(e, env)?;
                if !last.is_truthy() {
                    return Ok(last);
                }
            }
            Ok(last)
        }

        Expr::Or(exprs) => {
            for e in exprs {
                let value = eval(e, env)?;
                if value.is_truthy() {
                    return Ok(value);
                }
            }
            Ok(Expr::Bool(false))
        }

        Expr::Lambda(node) => Ok(Expr::Closure(Rc::new(Closure {
            node: node.clone(),
            env: env.clone(),
        }))),

        Expr::Letrec(bindings, body) => eval_letrec(bindings, body, env),

        Expr::Set(name, value) => {
            let value = eval(value, env)?;
            env.assign(name, value)?;
            Ok(intern(name.clone()))
        }

        Expr::SetCar(pair, value) => {
            let pair = eval(pair, env)?;
            let value = eval(value, env)?;
            match pair {
                Expr::List(List::Cons(cell)) => {
                    cell.borrow_mut().car = value;
                    Ok(Expr::Bool(true))
                }
                other => Err(EvalError::type_mismatch("set-car!", 1, "a pair", other.type_name())),
            }
        }

        Expr::SetCdr(pair, value) => {
            let pair = eval(pair, env)?;
            let value = eval(value, env)?;
            match pair {
                Expr::List(List::Cons(cell)) => {
                    cell.borrow_mut().cdr = value;
                    Ok(Expr::Bool(true))
                }
                other => Err(EvalError::type_mismatch("set-cdr!", 1, "a pair", other.type_name())),
            }
        }

        Expr::SetVector(vector, index, value) => {
            let vector = eval(vector, env)?;
            let index = eval(index, env)?;
            let value = eval(value, env)?;
            match vector {
                Expr::Vector(cells) => {
                    let i = as_index(&index).ok_or_else(|| {
                        EvalError::type_mismatch(
                            "vector-set!",
                            2,
                            "a non-negative integer index",
                            index.type_name(),
                        )
                    })?;
                    let mut cells = cells.borrow_mut();
                    if i >= cells.len() {
                        return Err(EvalError::domain(format!(
                            "vector-set!: index {i} out of range for a vector of length {}",
                            cells.len()
                        )));
                    }
                    cells[i] = value;
                    Ok(Expr::Bool(true))
                }
                other => Err(EvalError::type_mismatch("vector-set!", 1, "a vector", other.type_name())),
            }
        }

        Expr::Do(bindings, test, result, commands) => eval_do(bindings, test, result, commands, env),

        Expr::Application(op, args) => {
            let callee = eval(op, env)?;
            let mut values = Vec::with_capacity(args.len());
            for a in args {
                values.push(eval(a, env)?);
            }
            apply(&callee, values)
        }

        Expr::Apply(op, args) => {
            let callee = eval(op, env)?;
            let args = eval(args, env)?;
            let values = match args {
                Expr::List(list) => list.iter().collect(),
                other => return Err(EvalError::type_mismatch("apply", 2, "a list", other.type_name())),
            };
            apply(&callee, values)
        }

        Expr::Eval(expr) => {
            let datum = eval(expr, env)?;
            let analyzed = crate::parser::analyze(datum)
                .map_err(|e| EvalError::semantic(format!("eval: {e}")))?;
            eval(&analyzed, &Env::root(env))
        }
    }
}

fn eval_sequence(children: &[Expr], env: &Rc<Env>) -> EvalResult {
    let mut last = Expr::List(List::Nil);
    for child in children {
        last = eval(child, env)?;
    }
    Ok(last)
}

fn eval_cond(clauses: &[CondClause], env: &Rc<Env>) -> EvalResult {
    for clause in clauses {
        match &clause.pred {
            Some(pred) => {
                if eval(pred, env)?.is_truthy() {
                    return eval(&clause.conseq, env);
                }
            }
            None => return eval(&clause.conseq, env),
        }
    }
    Ok(Expr::Bool(false))
}

/// `letrec` (§4.1), not `letrec*`: every init is evaluated against the
/// still-unspecified scope, *then* all results overwrite their bindings at
/// once. `(letrec ((a 1) (b a)) b)` must see `a` still unspecified while
/// evaluating `b`'s init, not the `1` a left-to-right pass would have
/// already written — so the evaluate and bind passes can't interleave.
fn eval_letrec(bindings: &[(String, Expr)], body: &[Expr], env: &Rc<Env>) -> EvalResult {
    let scope = Env::new_child(env);
    for (name, _) in bindings {
        scope.bind(name, Expr::Bool(false));
    }
    let mut values = Vec::with_capacity(bindings.len());
    for (_, init) in bindings {
        values.push(eval(init, &scope)?);
    }
    for ((name, _), value) in bindings.iter().zip(values) {
        scope.bind(name, value);
    }
    eval_sequence(body, &scope)
}

/// `do` (§4.1) runs as an explicit host loop rather than recursive
/// re-evaluation, so its stack depth doesn't grow with iteration count.
fn eval_do(
    bindings: &[crate::expr::DoBinding],
    test: &Expr,
    result: &[Expr],
    commands: &[Expr],
    env: &Rc<Env>,
) -> EvalResult {
    let mut scope = Env::new_child(env);
    for binding in bindings {
        let value = eval(&binding.init, &scope)?;
        scope.bind(&binding.name, value);
    }
    loop {
        if eval(test, &scope)?.is_truthy() {
            return eval_sequence(result, &scope);
        }
        for command in commands {
            eval(command, &scope)?;
        }
        let mut stepped = Vec::with_capacity(bindings.len());
        for binding in bindings {
            stepped.push(eval(&binding.step, &scope)?);
        }
        let next = Env::new_child(env);
        for (binding, value) in bindings.iter().zip(stepped) {
            next.bind(&binding.name, value);
        }
        scope = next;
    }
}

fn as_index(value: &Expr) -> Option<usize> {
    match value {
        Expr::Num(n) => n.to_i64().and_then(|i| usize::try_from(i).ok()),
        _ => None,
    }
}

/// Applies a closure or primitive to already-evaluated arguments (§4.1).
pub fn apply(callee: &Expr, args: Vec<Expr>) -> EvalResult {
    match callee {
        Expr::Closure(closure) => apply_closure(closure, args),
        Expr::Primitive(name) => crate::builtin::dispatch(name, &args),
        other => Err(EvalError::semantic(format!(
            "{} is not applicable",
            other
        ))),
    }
}

fn apply_closure(closure: &Rc<Closure>, args: Vec<Expr>) -> EvalResult {
    let arity = closure.arity();
    if args.len() != arity {
        let name = closure.node.name.as_deref().unwrap_or("#<lambda>");
        return Err(EvalError::arity_mismatch(name, arity, args.len()));
    }
    let frame = Env::extend(&closure.env, &closure.node.params, args);
    eval_sequence(&closure.node.body, &frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Env;

    fn run(node: Expr) -> Expr {
        let env = Env::new_root();
        eval(&node, &env).expect("eval should succeed")
    }

    #[test]
    fn test_self_evaluating() {
        assert_eq!(run(Expr::from(42)), Expr::from(42));
        assert_eq!(run(Expr::Bool(true)), Expr::Bool(true));
    }

    #[test]
    fn test_declaration_and_lookup() {
        let env = Env::new_root();
        eval(&Expr::Declaration("x".into(), Box::new(Expr::from(10))), &env).unwrap();
        assert_eq!(eval(&Expr::Var("x".into()), &env).unwrap(), Expr::from(10));
    }

    #[test]
    fn test_cond_falls_through_to_else() {
        let clauses = vec![
            CondClause {
                pred: Some(Expr::Bool(false)),
                conseq: Expr::from(1),
            },
            CondClause {
                pred: None,
                conseq: Expr::from(2),
            },
        ];
        assert_eq!(run(Expr::Cond(clauses)), Expr::from(2));
    }

    #[test]
    fn test_and_or_short_circuit() {
        assert_eq!(run(Expr::And(vec![Expr::Bool(false), Expr::from(1)])), Expr::Bool(false));
        assert_eq!(run(Expr::Or(vec![Expr::from(5), Expr::from(1)])), Expr::from(5));
    }

    #[test]
    fn test_lambda_application() {
        let node = Rc::new(LambdaNode {
            name: Some("add1".into()),
            params: vec!["x".into()],
            body: vec![Expr::Application(
                Box::new(Expr::Var("+".into())),
                vec![Expr::Var("x".into()), Expr::from(1)],
            )],
        });
        let env = Env::new_root();
        let closure = eval(&Expr::Lambda(node), &env).unwrap();
        let result = apply(&closure, vec![Expr::from(4)]).unwrap();
        assert_eq!(result, Expr::from(5));
    }

    #[test]
    fn test_eval_of_quoted_code_runs_it() {
        let env = Env::new_root();
        let Expr::Root(forms) = crate::parser::parse("(eval '(+ 1 2))").unwrap() else {
            panic!("expected Root");
        };
        assert_eq!(eval(&forms[0], &env).unwrap(), Expr::from(3));
    }

    #[test]
    fn test_letrec_inits_all_see_unspecified_placeholders() {
        let env = Env::new_root();
        let Expr::Root(forms) = crate::parser::parse("(letrec ((a 1) (b a)) b)").unwrap() else {
            panic!("expected Root");
        };
        assert_eq!(eval(&forms[0], &env).unwrap(), Expr::Bool(false));
    }

    #[test]
    fn test_arity_mismatch() {
        let node = Rc::new(LambdaNode {
            name: Some("f".into()),
            params: vec!["x".into()],
            body: vec![Expr::Var("x".into())],
        });
        let env = Env::new_root();
        let closure = eval(&Expr::Lambda(node), &env).unwrap();
        assert!(apply(&closure, vec![]).is_err());
    }
}
