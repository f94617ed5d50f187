//! Integration tests for the partial loader.

use std::fs;

use stencil::{TemplateError, context, partial_loader, render};

// =============================================================================
// Basic Loading
// =============================================================================

#[test]
fn partial_renders_with_the_base_context() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("greeting.html"), "Hello, [=`name`]!").unwrap();

    let base = context! { "name" => "Ana" };
    let mut ctx = base.clone();
    ctx.insert("partial".to_string(), partial_loader(dir.path(), base));

    let out = render("<< [=`partial('greeting')`] >>", &ctx).unwrap();
    assert_eq!(out, "<< Hello, Ana! >>");
}

#[test]
fn html_suffix_on_the_name_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("footer.html"), "bye").unwrap();

    let mut ctx = context! {};
    ctx.insert("partial".to_string(), partial_loader(dir.path(), context! {}));

    let out = render("[=`partial('footer.html')`]", &ctx).unwrap();
    assert_eq!(out, "bye");
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn partials_can_include_further_partials() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("outer.html"), "o([=`partial('inner')`])").unwrap();
    fs::write(dir.path().join("inner.html"), "i:[=`name`]").unwrap();

    let base = context! { "name" => "Ana" };
    let mut ctx = base.clone();
    ctx.insert("partial".to_string(), partial_loader(dir.path(), base));

    let out = render("[=`partial('outer')`]", &ctx).unwrap();
    assert_eq!(out, "o(i:Ana)");
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn missing_partial_fails_the_calling_template() {
    let dir = tempfile::tempdir().unwrap();

    let mut ctx = context! {};
    ctx.insert("partial".to_string(), partial_loader(dir.path(), context! {}));

    let err = render("[=`partial('ghost')`]", &ctx).unwrap_err();
    assert!(matches!(err, TemplateError::Execution(_)));
    assert!(err.to_string().contains("ghost"), "{err}");
}

#[test]
fn failing_nested_render_carries_its_cause() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.html"), "[=`missing`]").unwrap();

    let mut ctx = context! {};
    ctx.insert("partial".to_string(), partial_loader(dir.path(), context! {}));

    let err = render("[=`partial('broken')`]", &ctx).unwrap_err();
    assert!(err.to_string().contains("partial"), "{err}");
}
