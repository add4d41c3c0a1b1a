use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#).expect("must be valid regex")
});

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    #[error("environment variable not found: `{0}`")]
    MissingVariable(String),
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

/// Expand `{{ env.VAR }}` placeholders in raw TOML text before parsing
///
/// Comment lines are copied through untouched so commented-out secrets do
/// not have to exist in the environment.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            expand_line(line, &mut output)?;
        }
    }

    Ok(output)
}

fn expand_line(line: &str, output: &mut String) -> Result<(), ExpandError> {
    let mut last_end = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        output.push_str(&line[last_end..whole.start()]);
        output.push_str(&resolve(&captures)?);
        last_end = whole.end();
    }

    output.push_str(&line[last_end..]);
    Ok(())
}

fn resolve(captures: &Captures<'_>) -> Result<String, ExpandError> {
    let key = captures.get(1).map_or("", |m| m.as_str());

    let var_name = match key.split_once('.') {
        Some(("env", name)) if !name.is_empty() && !name.contains('.') => name,
        _ => return Err(ExpandError::UnsupportedScope(key.to_string())),
    };

    match (std::env::var(var_name), captures.get(2)) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_string()),
        (Err(_), None) => Err(ExpandError::MissingVariable(var_name.to_string())),
    }
}
