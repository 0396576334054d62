#![allow(dead_code)]

use trellis_router::{
    CompiledPattern, NoConstraints, PatternCompiler, PatternSyntaxError, RouterError,
    UrlGenerator, UrlValues,
};

pub fn compile(raw: &str) -> CompiledPattern {
    PatternCompiler::new()
        .compile(raw, &NoConstraints)
        .unwrap_or_else(|e| panic!("Failed to compile: {raw}\nError: {e:?}"))
}

pub fn compile_with(raw: &str, constraints: &[(&str, &str)]) -> CompiledPattern {
    PatternCompiler::new()
        .compile(raw, constraints)
        .unwrap_or_else(|e| panic!("Failed to compile: {raw}\nError: {e:?}"))
}

pub fn syntax_err(raw: &str) -> PatternSyntaxError {
    match PatternCompiler::new().compile(raw, &NoConstraints) {
        Err(RouterError::Pattern(e)) => e,
        Err(other) => panic!("Expected syntax error for: {raw}, got {other:?}"),
        Ok(compiled) => panic!(
            "Expected syntax error for: {raw}, compiled to {}",
            compiled.as_str()
        ),
    }
}

pub fn generate(compiled: &CompiledPattern, values: &[&str]) -> Result<String, RouterError> {
    let mut values = UrlValues::positional(values.iter().copied());
    UrlGenerator::new().generate(compiled.raw(), compiled.regex(), "test", &mut values)
}
