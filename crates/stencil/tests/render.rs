//! Integration tests for end-to-end rendering.

use stencil::{Value, context, render};

// =============================================================================
// Literal Emission
// =============================================================================

#[test]
fn plain_text_renders_unchanged() {
    let out = render("plain text", &context! {}).unwrap();
    assert_eq!(out, "plain text");
}

#[test]
fn empty_source_renders_empty() {
    assert_eq!(render("", &context! {}).unwrap(), "");
}

#[test]
fn literal_with_backticks_and_braces_is_reproduced_exactly() {
    let source = "a ` b { c } d \" e";
    assert_eq!(render(source, &context! {}).unwrap(), source);
}

// =============================================================================
// Write Markers
// =============================================================================

#[test]
fn write_evaluates_arithmetic() {
    let out = render("[=`1+1`]", &context! {}).unwrap();
    assert_eq!(out, "2");
}

#[test]
fn write_reads_the_context() {
    let out = render("[=`name`]", &context! { "name" => "Ana" }).unwrap();
    assert_eq!(out, "Ana");
}

#[test]
fn write_coerces_primitives_to_text() {
    assert_eq!(render("[=`1 == 1`]", &context! {}).unwrap(), "true");
    assert_eq!(render("[=`1 / 2`]", &context! {}).unwrap(), "0.5");
    assert_eq!(render("[=`null`]", &context! {}).unwrap(), "null");
    assert_eq!(render("[=`'a' + 1`]", &context! {}).unwrap(), "a1");
}

#[test]
fn empty_write_marker_emits_nothing() {
    assert_eq!(render("a[=``]b", &context! {}).unwrap(), "ab");
}

// =============================================================================
// Statement Markers
// =============================================================================

#[test]
fn statement_binding_is_visible_to_later_writes() {
    let out = render("[`let x = 1`][=`x`]", &context! {}).unwrap();
    assert_eq!(out, "1");
}

#[test]
fn statement_has_no_direct_emission() {
    assert_eq!(render("[`let x = 1`]", &context! {}).unwrap(), "");
}

#[test]
fn empty_statement_marker_is_a_no_op() {
    assert_eq!(render("a[``]b", &context! {}).unwrap(), "ab");
}

#[test]
fn multiple_statements_in_one_marker() {
    let out = render("[`let x = 1; x = x + 1`][=`x`]", &context! {}).unwrap();
    assert_eq!(out, "2");
}

#[test]
fn statement_marker_may_span_lines() {
    let out = render("[`let x = 1;\nx = x * 10`][=`x`]", &context! {}).unwrap();
    assert_eq!(out, "10");
}

#[test]
fn statements_can_rebind_context_values() {
    let ctx = context! { "name" => "Ana" };
    let out = render("[`name = 'Bo'`][=`name`]", &ctx).unwrap();
    assert_eq!(out, "Bo");
    // The supplied context itself is untouched.
    assert_eq!(ctx["name"].as_string(), Some("Ana"));
}

// =============================================================================
// Escaping
// =============================================================================

#[test]
fn escaped_marker_is_emitted_literally() {
    let out = render("\\[`code`]", &context! {}).unwrap();
    assert_eq!(out, "\\[`code`]");
}

#[test]
fn escaped_and_live_markers_mix() {
    let out = render("\\[`a`] and [=`1+1`]", &context! {}).unwrap();
    assert_eq!(out, "\\[`a`] and 2");
}

// =============================================================================
// Ordering and Determinism
// =============================================================================

#[test]
fn markers_evaluate_in_strict_document_order() {
    let source = "[`let count = 0`]start [`count = count + 1`][=`count`] mid \
                  [`count = count + 1`][=`count`] end";
    let out = render(source, &context! {}).unwrap();
    assert_eq!(out, "start 1 mid 2 end");
}

#[test]
fn rendering_is_deterministic() {
    let source = "[`let x = 2`][=`x * 21`] and [=`name`]";
    let ctx = context! { "name" => "Ana" };
    let first = render(source, &ctx).unwrap();
    let second = render(source, &ctx).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "42 and Ana");
}

// =============================================================================
// Host Functions
// =============================================================================

#[test]
fn host_functions_are_callable_from_writes() {
    let mut ctx = context! {};
    ctx.insert(
        "shout".to_string(),
        Value::host_fn("shout", |args| {
            let text = args[0].to_string();
            Ok(Value::String(text.to_uppercase()))
        }),
    );
    let out = render("[=`shout('hi')`]", &ctx).unwrap();
    assert_eq!(out, "HI");
}

#[test]
fn host_functions_see_evaluated_arguments() {
    let mut ctx = context! { "n" => 20 };
    ctx.insert(
        "double".to_string(),
        Value::host_fn("double", |args| {
            let n = args[0].as_number().unwrap_or(0);
            Ok(Value::Number(n * 2))
        }),
    );
    let out = render("[=`double(n + 1)`]", &ctx).unwrap();
    assert_eq!(out, "42");
}
