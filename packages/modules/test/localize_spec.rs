//! Localization Pass Spec
//!
//! Selector rewriting through the `localize` facade: wrapping, marker
//! consumption, idempotence and the per-rule checks.

use css_modules::ScopeMode;

mod utils;
use utils::{localize_error, localized, localized_in};

#[test]
fn should_scope_class_selectors() {
    assert_eq!(localized(".foobar {}"), ":local(.foobar) {}");
}

#[test]
fn should_scope_id_selectors() {
    assert_eq!(localized("#foobar {}"), ":local(#foobar) {}");
}

#[test]
fn should_scope_every_alternative() {
    assert_eq!(localized(".foo, .baz {}"), ":local(.foo), :local(.baz) {}");
}

#[test]
fn should_scope_around_sibling_combinators() {
    assert_eq!(
        localized(".foo ~ .baz {}"),
        ":local(.foo) ~ :local(.baz) {}"
    );
    assert_eq!(
        localized(".foo + .bar {}"),
        ":local(.foo) + :local(.bar) {}"
    );
}

#[test]
fn should_keep_pseudo_suffixes_outside_the_wrap() {
    assert_eq!(localized(".foo:after {}"), ":local(.foo):after {}");
}

#[test]
fn should_scope_inside_media_queries() {
    assert_eq!(
        localized("@media only screen { .foo {} }"),
        "@media only screen { :local(.foo) {} }"
    );
}

#[test]
fn should_unwrap_narrow_global_selectors() {
    assert_eq!(localized(":global(.foo .bar) {}"), ".foo .bar {}");
}

#[test]
fn should_allow_operators_before_broad_global() {
    assert_eq!(localized(".foo > :global .bar {}"), ":local(.foo) > .bar {}");
}

#[test]
fn should_rewrap_narrow_local_selectors() {
    assert_eq!(
        localized(":local(.foo .bar) {}"),
        ":local(.foo) :local(.bar) {}"
    );
}

#[test]
fn should_apply_broad_global_to_the_rest_of_the_selector() {
    assert_eq!(localized(":global .foo .bar {}"), ".foo .bar {}");
}

#[test]
fn should_apply_broad_local_to_the_rest_of_the_selector() {
    assert_eq!(
        localized(":local .foo .bar {}"),
        ":local(.foo) :local(.bar) {}"
    );
}

#[test]
fn should_unwrap_narrow_global_in_each_alternative() {
    assert_eq!(localized(":global(.foo), :global(.bar) {}"), ".foo, .bar {}");
}

#[test]
fn should_consume_broad_global_in_each_alternative() {
    assert_eq!(localized(":global .foo, :global .bar {}"), ".foo, .bar {}");
}

#[test]
fn should_consume_broad_local_in_each_alternative() {
    assert_eq!(
        localized(":local .foo, :local .bar {}"),
        ":local(.foo), :local(.bar) {}"
    );
}

#[test]
fn should_keep_narrow_global_content_nested_in_local_styles() {
    assert_eq!(
        localized(".foo :global(.foo .bar) {}"),
        ":local(.foo) .foo .bar {}"
    );
}

#[test]
fn should_keep_broad_global_content_nested_in_local_styles() {
    assert_eq!(
        localized(".foo :global .foo .bar {}"),
        ":local(.foo) .foo .bar {}"
    );
}

#[test]
fn should_keep_parentheses_inside_narrow_global_selectors() {
    assert_eq!(
        localized(".foo :global(.foo:not(.bar)) {}"),
        ":local(.foo) .foo:not(.bar) {}"
    );
}

#[test]
fn should_wrap_parentheses_inside_narrow_local_selectors() {
    assert_eq!(
        localized(".foo :local(.foo:not(.bar)) {}"),
        ":local(.foo) :local(.foo):not(:local(.bar)) {}"
    );
}

#[test]
fn should_splice_narrow_global_appended_to_local_styles() {
    assert_eq!(
        localized(".foo:global(.foo.bar) {}"),
        ":local(.foo).foo.bar {}"
    );
}

#[test]
fn should_leave_already_localized_selectors_alone() {
    for fixture in [
        ":local(.foobar) {}",
        ":local(.foo) :local(.bar) {}",
        ":local(.foo), :local(.bar) {}",
        ":local(.foo) ~ :local(.bar) {}",
        ":local(.foo):after {}",
    ] {
        assert_eq!(localized(fixture), fixture);
    }
}

#[test]
fn should_limit_broad_global_to_its_own_alternative() {
    assert_eq!(
        localized(":global .foo, .bar :global, .foobar :global {}"),
        ".foo, :local(.bar), :local(.foobar) {}"
    );
}

#[test]
fn should_limit_broad_global_to_the_nested_selector() {
    assert_eq!(
        localized(".foo:not(:global .bar).foobar {}"),
        ":local(.foo):not(.bar):local(.foobar) {}"
    );
}

#[test]
fn should_allow_switching_modes_mid_selector() {
    assert_eq!(
        localized(".foo :global .bar :local .foobar :local .barfoo {}"),
        ":local(.foo) .bar :local(.foobar) :local(.barfoo) {}"
    );
}

#[test]
fn should_default_to_global_scope_in_global_mode() {
    assert_eq!(localized_in(".foo {}", ScopeMode::Global), ".foo {}");
}

#[test]
fn should_default_to_local_scope_in_local_mode() {
    assert_eq!(localized_in(".foo {}", ScopeMode::Local), ":local(.foo) {}");
}

#[test]
fn should_normalize_marker_spacing() {
    let fixture = "\n.a :local .b {}\n.a:local(.b) {}\n.a:local( .b ) {}\n.a :local(.b) {}\n.a :local( .b ) {}\n:local(.a).b {}\n:local( .a ).b {}\n:local(.a) .b {}\n:local( .a ) .b {}\n";
    let expected = "\n.a :local(.b) {}\n.a:local(.b) {}\n.a:local(.b) {}\n.a :local(.b) {}\n.a :local(.b) {}\n:local(.a).b {}\n:local(.a).b {}\n:local(.a) .b {}\n:local(.a) .b {}\n";
    assert_eq!(localized_in(fixture, ScopeMode::Global), expected);
}

#[test]
fn should_ignore_export_rules() {
    assert_eq!(
        localized(":export { foo: __foo; }"),
        ":export { foo: __foo; }"
    );
}

#[test]
fn should_ignore_import_rules() {
    assert_eq!(
        localized(":import(\"~/lol.css\") { foo: __foo; }"),
        ":import(\"~/lol.css\") { foo: __foo; }"
    );
}

#[test]
fn should_localize_in_pure_mode() {
    assert_eq!(
        localized_in(
            ":global(.foo).bar, [type=\"radio\"] ~ .label, :not(.foo), #bar {}",
            ScopeMode::Pure
        ),
        ".foo:local(.bar), [type=\"radio\"] ~ :local(.label), :not(:local(.foo)), :local(#bar) {}"
    );
}

#[test]
fn should_reject_rules_without_local_identifiers_in_pure_mode() {
    let error = localize_error("input {}", ScopeMode::Pure);
    assert!(error.contains("is not pure"), "got: {}", error);
    let error = localize_error(":global(.foo) {}", ScopeMode::Pure);
    assert!(error.contains("is not pure"), "got: {}", error);
}

#[test]
fn should_unwrap_explicit_global_elements() {
    assert_eq!(localized(":global(input) {}"), "input {}");
}

#[test]
fn should_unwrap_explicit_global_attributes() {
    assert_eq!(
        localized(":global([type=\"radio\"]), :not(:global [type=\"radio\"]) {}"),
        "[type=\"radio\"], :not([type=\"radio\"]) {}"
    );
}

#[test]
fn should_reject_alternatives_ending_in_different_scopes() {
    let error = localize_error(":global .foo, .bar {}", ScopeMode::Local);
    assert!(error.contains("Inconsistent"), "got: {}", error);
}

#[test]
fn should_accept_alternatives_ending_in_the_same_scope() {
    // Mixed content is fine as long as every alternative ends global.
    assert_eq!(
        localized(":global .foo, .bar :global, .foobar :global {}"),
        ".foo, :local(.bar), :local(.foobar) {}"
    );
}

#[test]
fn should_reject_nested_markers() {
    for fixture in [
        ":local(:local(.foo)) {}",
        ":global(:global(.foo)) {}",
        ":local(:global(.foo)) {}",
        ":global(:local .foo) {}",
    ] {
        let error = localize_error(fixture, ScopeMode::Local);
        assert!(error.contains("is not allowed inside"), "got: {}", error);
    }
}

#[test]
fn should_reject_broad_markers_touching_neighbor_tokens() {
    let error = localize_error(".foo :global.bar {}", ScopeMode::Local);
    assert!(
        error.contains("Missing whitespace after :global"),
        "got: {}",
        error
    );
    let error = localize_error(".foo:local .bar {}", ScopeMode::Local);
    assert!(
        error.contains("Missing whitespace before :local"),
        "got: {}",
        error
    );
}

#[test]
fn should_pass_through_plain_elements_and_attributes() {
    assert_eq!(localized("input {}"), "input {}");
    assert_eq!(localized(".foo input {}"), ":local(.foo) input {}");
    assert_eq!(localized("[type=\"radio\"] {}"), "[type=\"radio\"] {}");
}

#[test]
fn should_pass_through_bodiless_at_rules() {
    assert_eq!(localized("@charset \"utf-8\";"), "@charset \"utf-8\";");
}

#[test]
fn should_visit_nested_rules() {
    assert_eq!(
        localized(".a { .b {} }"),
        ":local(.a) { :local(.b) {} }"
    );
}

#[test]
fn should_not_touch_keyframes_bodies() {
    assert_eq!(
        localized("@keyframes foo { from {} to {} }"),
        "@keyframes foo { from {} to {} }"
    );
    assert_eq!(
        localized("@-webkit-keyframes foo { from {} to {} }"),
        "@-webkit-keyframes foo { from {} to {} }"
    );
    // Rules around the animation still localize.
    assert_eq!(
        localized(".a {}\n@keyframes foo { from {} }\n.b {}"),
        ":local(.a) {}\n@keyframes foo { from {} }\n:local(.b) {}"
    );
}

#[test]
fn should_report_the_position_of_the_offending_rule() {
    let error = css_modules::localize(
        ".fine {}\n.foo:local .bar {}",
        &utils::from_options("app.css"),
    )
    .unwrap_err();
    assert_eq!(error.position.line, 2);
    assert_eq!(error.position.column, 1);
    assert_eq!(
        error.to_string(),
        "Missing whitespace before :local: app.css@2:1"
    );
}
