//! Integration tests for the standard library bindings.

use stencil::{context, render, standard_library};

#[test]
fn plural_picks_the_singular_for_one() {
    let mut ctx = standard_library();
    ctx.extend(context! { "n" => 1 });
    let out = render("[=`n`] [=`plural(n, 'card')`]", &ctx).unwrap();
    assert_eq!(out, "1 card");
}

#[test]
fn plural_defaults_to_s_suffix() {
    let mut ctx = standard_library();
    ctx.extend(context! { "n" => 3 });
    let out = render("[=`plural(n, 'card')`]", &ctx).unwrap();
    assert_eq!(out, "cards");
}

#[test]
fn plural_accepts_an_explicit_plural_form() {
    let mut ctx = standard_library();
    ctx.extend(context! { "n" => 2 });
    let out = render("[=`plural(n, 'die', 'dice')`]", &ctx).unwrap();
    assert_eq!(out, "dice");
}

#[test]
fn plural_of_zero_is_plural() {
    let mut ctx = standard_library();
    ctx.extend(context! { "n" => 0 });
    let out = render("[=`plural(n, 'card')`]", &ctx).unwrap();
    assert_eq!(out, "cards");
}

#[test]
fn plural_with_too_few_arguments_reports_the_lower_bound() {
    let err = render("[=`plural(1)`]", &standard_library()).unwrap_err();
    assert!(
        err.to_string().contains("expects 2 arguments, got 1"),
        "{err}"
    );
}

#[test]
fn plural_with_too_many_arguments_reports_the_upper_bound() {
    let err = render("[=`plural(1, 'a', 'b', 'c')`]", &standard_library()).unwrap_err();
    assert!(
        err.to_string().contains("expects 3 arguments, got 4"),
        "{err}"
    );
}

#[test]
fn helpers_are_explicitly_merged_not_implicit() {
    // Without the standard library in the context, the helper name
    // resolves like any other missing identifier.
    assert!(render("[=`plural(1, 'card')`]", &context! {}).is_err());
}
