//! End-to-end scenarios (§8), checked through their value-producing
//! sub-expressions rather than captured stdout, since `display` writes
//! straight to the process's stdout.

mod common;

use common::eval_str;

#[test]
fn test_scenario_sum_of_three() {
    assert_eq!(eval_str("(+ 1 2 3)"), "6");
}

#[test]
fn test_scenario_factorial() {
    let src = "(define (fact n) (if (= n 0) 1 (* n (fact (- n 1)))))
               (fact 6)";
    assert_eq!(eval_str(src), "720");
}

#[test]
fn test_scenario_closure_counter() {
    let src = "(define c (let ((x 0)) (lambda () (set! x (+ x 1)) x)))
               (c) (c) (c)";
    assert_eq!(eval_str(src), "3");
}

#[test]
fn test_scenario_set_car_mutates_shared_list() {
    let src = "(define l (list 1 2 3)) (set-car! (cdr l) 99) l";
    assert_eq!(eval_str(src), "(1 99 3)");
}

#[test]
fn test_scenario_do_loop_summation() {
    let src = "(do ((i 0 (+ i 1)) (s 0 (+ s i))) ((= i 5) s))";
    assert_eq!(eval_str(src), "10");
}

#[test]
fn test_scenario_user_defined_map() {
    let src = "(define (map-like f xs)
                 (if (null? xs)
                     '()
                     (cons (f (car xs)) (map-like f (cdr xs)))))
               (map-like (lambda (x) (* x x)) '(1 2 3))";
    assert_eq!(eval_str(src), "(1 4 9)");
}
