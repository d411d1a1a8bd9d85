//! `${ENV_VAR}` placeholder expansion for raw config text.
//!
//! Secrets such as `app_secret` are usually kept out of the config file:
//!
//! ```toml
//! [channels.feishu]
//! app_id = "cli_a1b2c3"
//! app_secret = "${FEISHU_APP_SECRET}"
//! ```
//!
//! `${NAME:-fallback}` expands to `fallback` when `NAME` is unset.

/// Expand placeholders from the process environment.
///
/// Unresolvable variables are left as-is so the resolver later sees a
/// non-empty (but obviously wrong) value instead of silently losing a field.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Expand placeholders using a custom lookup function.
pub fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated, emit the remainder verbatim.
            out.push_str(&rest[start..]);
            return out;
        };

        let expr = &after[..end];
        let (name, fallback) = match expr.split_once(":-") {
            Some((name, fallback)) => (name, Some(fallback)),
            None => (expr, None),
        };

        match (name.is_empty(), lookup(name), fallback) {
            (false, Some(value), _) => out.push_str(&value),
            (false, None, Some(fallback)) => out.push_str(fallback),
            _ => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
