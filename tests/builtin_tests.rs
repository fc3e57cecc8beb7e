//! Primitive procedure coverage (§4.3).

mod common;

use common::eval_str;

#[test]
fn test_arithmetic() {
    assert_eq!(eval_str("(+ 1 2 3)"), "6");
    assert_eq!(eval_str("(- 10 1 2)"), "7");
    assert_eq!(eval_str("(- 5)"), "-5");
    assert_eq!(eval_str("(* 2 3 4)"), "24");
    assert_eq!(eval_str("(/ 10 2)"), "5");
    assert_eq!(eval_str("(/ 1 0)"), "Err: division by zero");
}

#[test]
fn test_modulo_and_remainder_sign_conventions() {
    assert_eq!(eval_str("(modulo -7 3)"), "2");
    assert_eq!(eval_str("(remainder -7 3)"), "-1");
    assert_eq!(eval_str("(modulo 7 -3)"), "-2");
    assert_eq!(eval_str("(remainder 7 -3)"), "1");
}

#[test]
fn test_rounding() {
    assert_eq!(eval_str("(floor 1.7)"), "1");
    assert_eq!(eval_str("(ceiling 1.2)"), "2");
    assert_eq!(eval_str("(round 1.5)"), "2");
    assert_eq!(eval_str("(truncate -1.7)"), "-1");
}

#[test]
fn test_comparisons() {
    assert_eq!(eval_str("(< 1 2 3)"), "#t");
    assert_eq!(eval_str("(< 1 3 2)"), "#f");
    assert_eq!(eval_str("(= 1 1.0)"), "#t");
    assert_eq!(eval_str("(>= 3 3 2)"), "#t");
}

#[test]
fn test_complex_parts() {
    assert_eq!(eval_str("(real-part 3)"), "3");
    assert_eq!(eval_str("(imag-part 3)"), "0");
}

#[test]
fn test_logic() {
    assert_eq!(eval_str("(not 0)"), "#f");
    assert_eq!(eval_str("(not '())"), "#f");
    assert_eq!(eval_str("(not #f)"), "#t");
    assert_eq!(eval_str("(equal? '(1 2) '(1 2))"), "#t");
    assert_eq!(eval_str("(eq? '(1 2) '(1 2))"), "#f");
    assert_eq!(eval_str("(eq? 'a 'a)"), "#t");
}

#[test]
fn test_pairs_and_lists() {
    assert_eq!(eval_str("(car '(1 2))"), "1");
    assert_eq!(eval_str("(cdr '(1 2))"), "(2)");
    assert_eq!(eval_str("(car '())"), "Err: car: the empty list has no car");
    assert_eq!(eval_str("(cons 1 2)"), "(1 . 2)");
    assert_eq!(eval_str("(null? '())"), "#t");
    assert_eq!(eval_str("(pair? (cons 1 2))"), "#t");
    assert_eq!(eval_str("(list? (cons 1 2))"), "#f");
    assert_eq!(eval_str("(list? (list 1 2 3))"), "#t");
}

#[test]
fn test_vectors() {
    assert_eq!(eval_str("(vector-length (vector 1 2 3))"), "3");
    assert_eq!(eval_str("(vector-ref (vector 10 20 30) 1)"), "20");
    assert_eq!(eval_str("(vector? (vector 1))"), "#t");
    assert!(eval_str("(vector-ref (vector 1 2) 5)").starts_with("Err:"));
}

#[test]
fn test_predicates() {
    assert_eq!(eval_str("(number? 1)"), "#t");
    assert_eq!(eval_str("(string? \"x\")"), "#t");
    assert_eq!(eval_str("(symbol? 'x)"), "#t");
    assert_eq!(eval_str("(procedure? car)"), "#t");
    assert_eq!(eval_str("(procedure? (lambda (x) x))"), "#t");
}

#[test]
fn test_strings() {
    assert_eq!(eval_str("(string-append \"foo\" \"bar\")"), "foobar");
    assert_eq!(eval_str("(string-length \"hello\")"), "5");
    assert_eq!(eval_str("(substring \"hello\" 1 3)"), "el");
    assert!(eval_str("(substring \"hi\" 0 5)").starts_with("Err:"));
    assert_eq!(eval_str("(string<? \"abc\" \"abd\")"), "#t");
}

#[test]
fn test_characters() {
    assert_eq!(eval_str("(char<? #\\a #\\b)"), "#t");
    assert_eq!(eval_str("(char>=? #\\b #\\b)"), "#t");
}

#[test]
fn test_numeric_literals_keep_full_precision() {
    assert_eq!(
        eval_str("(= 100000000000000000001 (string->number \"100000000000000000001\"))"),
        "#t"
    );
}

#[test]
fn test_conversions() {
    assert_eq!(eval_str("(number->string 42)"), "42");
    assert_eq!(eval_str("(string->number \"42\")"), "42");
    assert_eq!(eval_str("(string->number \"not-a-number\")"), "#f");
    assert_eq!(eval_str("(list->string (string->list \"hi\"))"), "hi");
}

#[test]
fn test_random_bounds() {
    assert_eq!(eval_str("(< (random 10) 10)"), "#t");
    assert_eq!(eval_str("(>= (random-integer 5 5) 5)"), "#t");
}
