//! Special-form coverage (§4.1): if/cond/let/let*/letrec/do/set!/lambda/
//! quote/and/or/apply/eval.

mod common;

use common::{eval_str, eval_str_env};
use microscheme::Env;

#[test]
fn test_if() {
    assert_eq!(eval_str("(if #t 1 2)"), "1");
    assert_eq!(eval_str("(if #f 1 2)"), "2");
    assert_eq!(eval_str("(if (> 1 0) 'yes 'no)"), "yes");
}

#[test]
fn test_cond() {
    assert_eq!(eval_str("(cond (#f 1) (#f 2) (else 3))"), "3");
    assert_eq!(eval_str("(cond ((= 1 2) 'a) ((= 1 1) 'b) (else 'c))"), "b");
    assert_eq!(eval_str("(cond (#f 1))"), "#f");
}

#[test]
fn test_quote() {
    assert_eq!(eval_str("'(1 2 3)"), "(1 2 3)");
    assert_eq!(eval_str("(quote a)"), "a");
    assert_eq!(eval_str("'()"), "()");
}

#[test]
fn test_lambda_and_define() {
    assert_eq!(eval_str("((lambda (x y) (+ x y)) 3 4)"), "7");
    let env = Env::new_root();
    eval_str_env("(define (square x) (* x x))", &env);
    assert_eq!(eval_str_env("(square 5)", &env), "25");
}

#[test]
fn test_let() {
    assert_eq!(eval_str("(let ((x 1) (y 2)) (+ x y))"), "3");
    assert_eq!(eval_str("(let ((x 5)) (let ((y 10)) (+ x y)))"), "15");
}

#[test]
fn test_let_star_sees_earlier_bindings() {
    assert_eq!(eval_str("(let* ((x 2) (y (* x 3))) (+ x y))"), "8");
}

#[test]
fn test_letrec_inits_see_unspecified_placeholders_not_earlier_results() {
    assert_eq!(eval_str("(letrec ((a 1) (b a)) b)"), "#f");
}

#[test]
fn test_letrec_supports_mutual_recursion() {
    let src = "(letrec ((even? (lambda (n) (if (= n 0) #t (odd? (- n 1)))))
                        (odd? (lambda (n) (if (= n 0) #f (even? (- n 1))))))
                 (even? 10))";
    assert_eq!(eval_str(src), "#t");
}

#[test]
fn test_set_bang_mutates_enclosing_binding() {
    let src = "(define x 1) (set! x (+ x 1)) x";
    assert_eq!(eval_str(src), "2");
}

#[test]
fn test_set_bang_on_unbound_is_an_error() {
    assert!(eval_str("(set! nope 1)").starts_with("Err:"));
}

#[test]
fn test_set_car_and_set_cdr() {
    let src = "(define l (list 1 2 3)) (set-car! l 99) (set-cdr! (cdr l) '()) l";
    assert_eq!(eval_str(src), "(99 2)");
}

#[test]
fn test_vector_set() {
    let src = "(define v (vector 1 2 3)) (vector-set! v 1 99) v";
    assert_eq!(eval_str(src), "#(1 99 3)");
}

#[test]
fn test_do_loop_sums() {
    let src = "(do ((i 0 (+ i 1)) (s 0 (+ s i))) ((= i 5) s))";
    assert_eq!(eval_str(src), "10");
}

#[test]
fn test_and_or() {
    assert_eq!(eval_str("(and 1 2 3)"), "3");
    assert_eq!(eval_str("(and 1 #f 3)"), "#f");
    assert_eq!(eval_str("(or #f #f 5)"), "5");
    assert_eq!(eval_str("(or #f #f)"), "#f");
}

#[test]
fn test_apply() {
    assert_eq!(eval_str("(apply + '(1 2 3))"), "6");
    assert_eq!(eval_str("(apply + '())"), "0");
}

#[test]
fn test_eval_runs_quoted_code_in_global_env() {
    assert_eq!(eval_str("(eval '(+ 1 2))"), "3");
    let src = "(define x 10) (eval (list '+ 'x 1))";
    assert_eq!(eval_str(src), "11");
}

#[test]
fn test_closures_capture_their_defining_environment() {
    let src = "(define (make-adder n) (lambda (x) (+ x n)))
               (define add5 (make-adder 5))
               (add5 10)";
    assert_eq!(eval_str(src), "15");
}

#[test]
fn test_closure_over_mutable_state() {
    let src = "(define counter (let ((n 0)) (lambda () (set! n (+ n 1)) n)))
               (counter) (counter) (counter)";
    assert_eq!(eval_str(src), "3");
}
