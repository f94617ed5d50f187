//! Integration tests for the error taxonomy and propagation policy.

use stencil::{EvalError, TemplateError, compile, context, render, standard_library, tokenize};

// =============================================================================
// Execution Errors
// =============================================================================

#[test]
fn unknown_identifier_fails_the_run() {
    let err = render("[=`undefinedVar`]", &context! {}).unwrap_err();
    match err {
        TemplateError::Execution(EvalError::UnknownIdentifier { name, .. }) => {
            assert_eq!(name, "undefinedVar");
        }
        other => panic!("expected unknown identifier, got {other:?}"),
    }
}

#[test]
fn no_partial_output_on_failure() {
    // The literal prefix must not leak out alongside the error.
    let result = render("prefix [=`missing`] suffix", &context! {});
    assert!(result.is_err());
}

#[test]
fn near_miss_identifiers_are_suggested() {
    let err = render("[=`nmae`]", &context! { "name" => "Ana" }).unwrap_err();
    assert!(err.to_string().contains("did you mean: name"), "{err}");
}

#[test]
fn assignment_to_undeclared_name_fails() {
    let err = render("[`count = 1`]", &context! {}).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Execution(EvalError::AssignUndeclared { .. })
    ));
}

#[test]
fn division_by_zero_fails() {
    let err = render("[=`1 / 0`]", &context! {}).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Execution(EvalError::DivisionByZero)
    ));
}

#[test]
fn remainder_by_zero_fails() {
    let err = render("[=`1 % 0`]", &context! {}).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Execution(EvalError::DivisionByZero)
    ));
}

#[test]
fn remainder_overflow_is_reported_as_overflow() {
    // i64::MIN % -1 is the one non-zero divisor checked_rem rejects.
    let ctx = context! { "n" => i64::MIN };
    let err = render("[=`n % -1`]", &ctx).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Execution(EvalError::Overflow { op: "%" })
    ));
}

#[test]
fn calling_a_non_function_fails() {
    let err = render("[=`name('x')`]", &context! { "name" => "Ana" }).unwrap_err();
    match err {
        TemplateError::Execution(EvalError::NotCallable { name, actual }) => {
            assert_eq!(name, "name");
            assert_eq!(actual, "string");
        }
        other => panic!("expected not-callable, got {other:?}"),
    }
}

#[test]
fn wrong_argument_count_fails() {
    let err = render("[=`plural(1)`]", &standard_library()).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Execution(EvalError::ArgumentCount { .. })
    ));
}

#[test]
fn operator_type_mismatch_fails() {
    let err = render("[=`true + 1`]", &context! {}).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::Execution(EvalError::TypeMismatch { .. })
    ));
}

#[test]
fn logical_operators_require_booleans() {
    let err = render("[=`1 && true`]", &context! {}).unwrap_err();
    assert!(matches!(err, TemplateError::Execution(_)));
}

// =============================================================================
// Host Failures Carry Their Cause
// =============================================================================

#[test]
fn host_failure_propagates_with_cause() {
    use std::error::Error;

    let mut ctx = context! {};
    ctx.insert(
        "boom".to_string(),
        stencil::Value::host_fn("boom", |_| Err("the disk is on fire".into())),
    );
    let err = render("[=`boom()`]", &ctx).unwrap_err();
    match &err {
        TemplateError::Execution(eval @ EvalError::Host { name, .. }) => {
            assert_eq!(name, "boom");
            let cause = eval.source().expect("host error keeps its cause");
            assert_eq!(cause.to_string(), "the disk is on fire");
        }
        other => panic!("expected host failure, got {other:?}"),
    }
}

// =============================================================================
// Deferred Syntax Errors
// =============================================================================

#[test]
fn syntax_errors_surface_at_run_time() {
    // Compilation is textual and never inspects embedded sources.
    let program = compile(tokenize("[=`1 +`]"));

    let engine = stencil::Engine::default();
    let err = engine.run(&program, &context! {}).unwrap_err();
    assert!(matches!(err, TemplateError::Syntax(_)));
}

#[test]
fn statement_syntax_errors_also_surface_at_run_time() {
    let err = render("[`let = 1`]", &context! {}).unwrap_err();
    assert!(matches!(err, TemplateError::Syntax(_)));
}

#[test]
fn failing_template_is_not_retried_or_altered() {
    // Identical failure on every run of the same program.
    let program = compile(tokenize("[=`missing`]"));
    let engine = stencil::Engine::default();
    let first = engine.run(&program, &context! {}).unwrap_err();
    let second = engine.run(&program, &context! {}).unwrap_err();
    assert_eq!(first.to_string(), second.to_string());
}
