//! Scoping Pass Spec
//!
//! Alias substitution, message bus interplay and `composes` harvesting
//! through the full `compile` facade.

use css_modules::{
    compile_with_bus, Message, MessageBus, MessageKind, Options, ScopeMode, ENGINE_ORIGIN,
};

mod utils;
use utils::{compiled, export_lines, from_options};

#[test]
fn should_replace_local_selectors_with_aliases() {
    let output = compiled(".foo {}", "/test.css");
    assert_eq!(output.css, ":export {\n  foo: _test__foo;\n}\n._test__foo {}");
    assert_eq!(export_lines(&output), vec!["foo=_test__foo"]);
    assert!(output.warnings.is_empty());
}

#[test]
fn should_derive_aliases_from_the_file_path() {
    let output = compiled(".foobar {}", "/foo/bar/test.css");
    assert_eq!(export_lines(&output), vec!["foobar=_foo_bar_test__foobar"]);
}

#[test]
fn should_reuse_one_alias_per_identifier() {
    let output = compiled(".foo {}\n.foo:hover {}", "/test.css");
    assert_eq!(
        output.css,
        ":export {\n  foo: _test__foo;\n}\n._test__foo {}\n._test__foo:hover {}"
    );
    assert_eq!(export_lines(&output), vec!["foo=_test__foo"]);
}

#[test]
fn should_scope_ids_and_classes_alike() {
    let output = compiled("#a {}\n.b {}", "/test.css");
    assert_eq!(
        output.css,
        ":export {\n  a: _test__a;\n  b: _test__b;\n}\n#_test__a {}\n._test__b {}"
    );
    assert_eq!(export_lines(&output), vec!["a=_test__a", "b=_test__b"]);
}

#[test]
fn should_leave_global_content_unrenamed() {
    let output = compiled(".foo :global(.bar) {}", "/test.css");
    assert_eq!(
        output.css,
        ":export {\n  foo: _test__foo;\n}\n._test__foo .bar {}"
    );
    assert_eq!(export_lines(&output), vec!["foo=_test__foo"]);
}

#[test]
fn should_rename_inside_ordinary_functional_pseudos() {
    let output = compiled(".foo:not(.bar) {}", "/test.css");
    assert_eq!(
        output.css,
        ":export {\n  foo: _test__foo;\n  bar: _test__bar;\n}\n._test__foo:not(._test__bar) {}"
    );
    assert_eq!(export_lines(&output), vec!["foo=_test__foo", "bar=_test__bar"]);
}

#[test]
fn should_not_rename_names_with_a_value_binding() {
    let mut bus = MessageBus::new();
    bus.append(Message::new(
        MessageKind::ValueBinding,
        "foo",
        "imported",
        "resolver",
    ));
    let output = compile_with_bus(".foo {}", &from_options("/test.css"), &mut bus).unwrap();
    assert_eq!(output.css, ":export {\n  foo: foo;\n}\n.foo {}");
    assert!(output.warnings.is_empty());
}

#[test]
fn should_warn_when_renaming_an_already_scoped_name() {
    let mut bus = MessageBus::new();
    bus.append(Message::new(
        MessageKind::ScopedBinding,
        "foo",
        "_other__foo",
        "earlier-pass",
    ));
    let output = compile_with_bus(".foo {}", &from_options("/test.css"), &mut bus).unwrap();
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].message, "'foo' already declared");
    // The rename still happens.
    assert!(output.css.contains("._test__foo"));
}

#[test]
fn should_publish_scoped_bindings_for_later_stages() {
    let mut bus = MessageBus::new();
    compile_with_bus(".foo {}\n.bar {}", &from_options("/test.css"), &mut bus).unwrap();
    let foo = bus.scoped_binding("foo").unwrap();
    assert_eq!(foo.value, "_test__foo");
    assert_eq!(foo.origin, ENGINE_ORIGIN);
    assert!(bus.scoped_binding("bar").is_some());
}

#[test]
fn should_collect_composition_edges_and_drop_the_declaration() {
    let output = compiled(
        ".foo { color: green; }\n.bar { composes: foo; background: red; }",
        "/test.css",
    );
    assert_eq!(
        output.css,
        ":export {\n  foo: _test__foo;\n  bar: _test__bar _test__foo;\n}\n._test__foo { color: green; }\n._test__bar { background: red; }"
    );
}

#[test]
fn should_accept_the_compose_with_alias() {
    let output = compiled(".foo {}\n.bar { compose-with: foo; }", "/test.css");
    assert_eq!(
        export_lines(&output),
        vec!["foo=_test__foo", "bar=_test__bar _test__foo"]
    );
    assert!(!output.css.contains("compose-with"));
}

#[test]
fn should_allow_composing_classes_declared_later() {
    let output = compiled(".bar { composes: foo; }\n.foo {}", "/test.css");
    assert_eq!(
        export_lines(&output),
        vec!["bar=_test__bar _test__foo", "foo=_test__foo"]
    );
}

#[test]
fn should_export_unknown_composed_tokens_verbatim() {
    let output = compiled(".foo { composes: i__imported; }", "/test.css");
    assert_eq!(export_lines(&output), vec!["foo=_test__foo i__imported"]);
}

#[test]
fn should_leave_from_qualified_composes_to_the_import_resolver() {
    let output = compiled(".foo { composes: bar from \"./other.css\"; }", "/test.css");
    assert!(output.css.contains("composes: bar from \"./other.css\""));
    assert_eq!(export_lines(&output), vec!["foo=_test__foo"]);
}

#[test]
fn should_reject_composes_outside_a_single_local_class() {
    let error = css_modules::compile(".a .b { composes: x; }", &from_options("/test.css"))
        .unwrap_err();
    assert!(
        error.to_string().contains("Composition is only allowed"),
        "got: {}",
        error
    );
    let error = css_modules::compile("#a { composes: x; }", &from_options("/test.css"))
        .unwrap_err();
    assert!(error.to_string().contains("Composition is only allowed"));
    let error = css_modules::compile(
        ":global(.a) { composes: x; }",
        &from_options("/test.css"),
    )
    .unwrap_err();
    assert!(error.to_string().contains("Composition is only allowed"));
}

#[test]
fn should_scope_global_mode_sheets_only_where_marked() {
    let output = css_modules::compile(
        ".plain {}\n:local(.scoped) {}",
        &Options {
            mode: ScopeMode::Global,
            from: Some("/test.css".to_string()),
            ..Options::default()
        },
    )
    .unwrap();
    assert_eq!(
        output.css,
        ":export {\n  scoped: _test__scoped;\n}\n.plain {}\n._test__scoped {}"
    );
    assert_eq!(export_lines(&output), vec!["scoped=_test__scoped"]);
}
