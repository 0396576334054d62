//! Tests for pattern compilation.

mod common;
use common::*;

use std::collections::HashMap;
use std::thread;

use trellis_router::{
    MAX_VARIABLE_NAME_LENGTH, NoConstraints, PatternCompiler, PatternSyntaxError,
};

fn defaults(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn empty_pattern_matches_anything() {
    let compiled = compile("");
    assert_eq!(compiled.as_str(), "^.*$");
    assert!(compiled.defaults().is_empty());
    assert!(compiled.variables().is_empty());
    assert!(compiled.is_match(""));
    assert!(compiled.is_match("example.com"));
}

#[test]
fn distinct_variables() {
    let compiled = compile(":id/:name");
    assert_eq!(compiled.defaults(), &defaults(&[("id", ""), ("name", "")]));
    assert_eq!(compiled.variables(), ["id", "name"]);
}

#[test]
fn duplicate_variable() {
    assert_eq!(
        syntax_err(":id/:id"),
        PatternSyntaxError::DuplicateVariable {
            pattern: ":id/:id".to_string(),
            name: "id".to_string(),
        }
    );
}

#[test]
fn duplicate_variable_inside_brackets() {
    assert!(matches!(
        syntax_err("/:id[/:id]"),
        PatternSyntaxError::DuplicateVariable { name, .. } if name == "id"
    ));
}

#[test]
fn default_value() {
    let compiled = compile(":page=1");
    assert_eq!(compiled.defaults(), &defaults(&[("page", "1")]));
    assert!(compiled.as_str().contains("(?P<page>[^/:]+)"));
}

#[test]
fn default_value_stops_at_slash() {
    let compiled = compile("/:lang=en/docs");
    assert_eq!(compiled.default_value("lang"), Some("en"));
    assert!(compiled.is_match("/fr/docs"));
}

#[test]
fn custom_constraint() {
    let compiled = compile_with(":id", &[("id", r"\d+")]);
    assert!(compiled.as_str().contains(r"(?P<id>\d+)"));
    assert_eq!(compiled.default_value("id"), Some(""));
}

#[test]
fn constraint_for_other_variable_is_ignored() {
    let compiled = compile_with("/:slug", &[("id", r"\d+")]);
    assert_eq!(compiled.as_str(), r"^\/(?P<slug>[^/:]+)$");
}

#[test]
fn optional_segment() {
    let compiled = compile("/foo[/:bar]");
    assert_eq!(compiled.as_str(), r"^\/foo(?:\/(?P<bar>[^/:]+))?$");

    assert!(compiled.is_match("/foo"));
    assert!(!compiled.is_match("/foo/"));

    let caps = compiled.regex().captures("/foo/42").unwrap();
    assert_eq!(&caps["bar"], "42");
}

#[test]
fn nested_optional_segments() {
    assert_eq!(compile("[a[b]c]").as_str(), "^(?:a(?:b)?c)?$");

    let compiled = compile("/archive[/:year[/:month[/:day]]]");
    assert!(compiled.is_match("/archive"));
    assert!(compiled.is_match("/archive/2024"));
    assert!(compiled.is_match("/archive/2024/05"));
    assert!(compiled.is_match("/archive/2024/05/17"));
    assert!(!compiled.is_match("/archive//05"));
}

#[test]
fn deeply_nested_brackets_balance() {
    let raw = format!("{}x{}", "[".repeat(50), "]".repeat(50));
    assert!(compile(&raw).is_match("x"));
}

#[test]
fn unclosed_brackets() {
    assert!(matches!(
        syntax_err("/foo[/:bar"),
        PatternSyntaxError::UnclosedBrackets { .. }
    ));
    assert!(matches!(
        syntax_err("[[a]"),
        PatternSyntaxError::UnclosedBrackets { .. }
    ));
}

#[test]
fn unopened_brackets() {
    assert!(matches!(
        syntax_err("/foo/:bar]"),
        PatternSyntaxError::UnopenedBrackets { .. }
    ));
    assert!(matches!(
        syntax_err("[a]]"),
        PatternSyntaxError::UnopenedBrackets { .. }
    ));
}

#[test]
fn closing_bracket_before_opening_bracket() {
    assert!(matches!(
        syntax_err("/foo]x["),
        PatternSyntaxError::UnopenedBrackets { .. }
    ));
}

#[test]
fn name_starting_with_digit() {
    assert!(matches!(
        syntax_err(":1abc"),
        PatternSyntaxError::InvalidVariable { position: 0, .. }
    ));
}

#[test]
fn empty_variable_name() {
    assert!(matches!(
        syntax_err("/users/:/edit"),
        PatternSyntaxError::InvalidVariable { position: 7, .. }
    ));
    assert!(matches!(
        syntax_err("/users/:"),
        PatternSyntaxError::InvalidVariable { .. }
    ));
}

#[test]
fn name_too_long() {
    let raw = format!(":{}", "a".repeat(40));
    assert!(matches!(
        syntax_err(&raw),
        PatternSyntaxError::VariableNameTooLong { max: 32, .. }
    ));

    let raw = format!(":{}", "a".repeat(MAX_VARIABLE_NAME_LENGTH));
    assert_eq!(compile(&raw).variables().len(), 1);
}

#[test]
fn error_messages_name_the_culprit() {
    let message = syntax_err("/:id/:id").to_string();
    assert!(message.contains("\"id\""));
    assert!(message.contains("/:id/:id"));

    let message = syntax_err("/foo[").to_string();
    assert!(message.contains("unclosed"));

    let message = syntax_err("/foo]").to_string();
    assert!(message.contains("unopened"));
}

#[test]
fn host_pattern() {
    let compiled = compile(":subdomain.example.com");
    assert_eq!(
        compiled.as_str(),
        r"^(?P<subdomain>[^/:]+)\.example\.com$"
    );
    assert!(compiled.is_match("api.example.com"));
    assert!(!compiled.is_match("api.exampleXcom"));
}

#[test]
fn multibyte_literals() {
    let compiled = compile("/café/:item");
    assert!(compiled.is_match("/café/crème"));
    assert!(!compiled.is_match("/cafe/creme"));
}

#[test]
fn regex_metacharacters_are_literal() {
    let compiled = compile("/a+b/(c)/$d");
    assert!(compiled.is_match("/a+b/(c)/$d"));
    assert!(!compiled.is_match("/aab/c/d"));
}

#[test]
fn concurrent_compiles_share_one_compiler() {
    let compiler = PatternCompiler::new();

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let compiler = &compiler;
                s.spawn(move || {
                    let raw = format!("/t{i}/:id[/:page=1]");
                    compiler.compile(&raw, &NoConstraints).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let compiled = handle.join().unwrap();
            assert!(compiled.is_match(&format!("/t{i}/7/2")));
            assert_eq!(compiled.default_value("page"), Some("1"));
        }
    });
}
