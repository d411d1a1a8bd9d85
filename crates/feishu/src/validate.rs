//! Diagnostics for `channels.feishu`.
//!
//! Resolution silently treats incomplete credentials as "not configured";
//! these checks explain to an operator why an account will not come up.

use {
    larkwire_channels::DEFAULT_ACCOUNT_ID,
    larkwire_config::{Diagnostic, LarkwireConfig, Severity},
    secrecy::ExposeSecret,
};

use crate::config::{CredentialFields, FeishuConfig, FeishuDomain};

const SECTION: &str = "channels.feishu";

/// Check the Feishu section of `config`. Returns no diagnostics when the
/// section is absent.
pub fn validate_feishu(config: &LarkwireConfig) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let channel = match FeishuConfig::from_config(config) {
        Ok(Some(channel)) => channel,
        Ok(None) => return out,
        Err(e) => {
            out.push(Diagnostic::new(
                Severity::Error,
                "type-error",
                SECTION,
                e.to_string(),
            ));
            return out;
        },
    };

    if let Some(raw) = config.channels.feishu.as_ref().and_then(|v| v.get("domain"))
        && !raw.is_null()
        && raw.as_str().and_then(FeishuDomain::parse).is_none()
    {
        out.push(Diagnostic::new(
            Severity::Warning,
            "domain",
            format!("{SECTION}.domain"),
            format!(
                "unrecognized domain {raw}; expected \"feishu\" or \"lark\", using \"{}\"",
                FeishuDomain::default()
            ),
        ));
    }

    let legacy = completeness(channel.legacy_credentials());
    if legacy == Completeness::Partial {
        out.push(partial_credentials(SECTION));
    }

    if let Some(accounts) = &channel.accounts {
        if accounts.is_empty() {
            out.push(Diagnostic::new(
                Severity::Warning,
                "accounts",
                format!("{SECTION}.accounts"),
                format!("accounts map is empty; only the \"{DEFAULT_ACCOUNT_ID}\" account is used"),
            ));
        }

        for (id, account) in accounts.iter() {
            let path = format!("{SECTION}.accounts.{id}");
            let state = completeness(account.credentials());
            let backed_by_legacy = id == DEFAULT_ACCOUNT_ID && legacy == Completeness::Complete;
            match state {
                Completeness::Complete => {},
                _ if backed_by_legacy => out.push(Diagnostic::new(
                    Severity::Info,
                    "credentials",
                    path.as_str(),
                    format!("incomplete; the \"{DEFAULT_ACCOUNT_ID}\" account resolves from the top-level {SECTION} credentials"),
                )),
                Completeness::Partial => out.push(partial_credentials(&path)),
                Completeness::Empty => out.push(Diagnostic::new(
                    Severity::Warning,
                    "credentials",
                    path.as_str(),
                    "account has no app_id or app_secret and will never be configured",
                )),
            }

            if account.domain.is_some() {
                out.push(Diagnostic::new(
                    Severity::Info,
                    "ignored-field",
                    format!("{path}.domain"),
                    format!("per-account domain is ignored; set {SECTION}.domain instead"),
                ));
            }
        }

        if !accounts.is_empty()
            && !accounts.contains(DEFAULT_ACCOUNT_ID)
            && legacy != Completeness::Empty
        {
            out.push(Diagnostic::new(
                Severity::Warning,
                "accounts",
                SECTION,
                format!(
                    "top-level app_id/app_secret are not listed while named accounts exist; move them to {SECTION}.accounts.{DEFAULT_ACCOUNT_ID}"
                ),
            ));
        }
    }

    if !channel.is_enabled() {
        out.push(Diagnostic::new(
            Severity::Info,
            "accounts",
            format!("{SECTION}.enabled"),
            "channel is disabled; no accounts will start",
        ));
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completeness {
    Empty,
    Partial,
    Complete,
}

fn completeness(fields: CredentialFields<'_>) -> Completeness {
    let has_id = fields.app_id.is_some_and(|s| !s.trim().is_empty());
    let has_secret = fields
        .app_secret
        .is_some_and(|s| !s.expose_secret().trim().is_empty());
    match (has_id, has_secret) {
        (true, true) => Completeness::Complete,
        (false, false) => Completeness::Empty,
        _ => Completeness::Partial,
    }
}

fn partial_credentials(path: &str) -> Diagnostic {
    Diagnostic::new(
        Severity::Warning,
        "credentials",
        path,
        "both app_id and app_secret are required; this account will not be configured",
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {super::*, serde_json::json};

    fn check(feishu: serde_json::Value) -> Vec<Diagnostic> {
        let config =
            LarkwireConfig::from_json(json!({ "channels": { "feishu": feishu } })).unwrap();
        validate_feishu(&config)
    }

    fn paths(diags: &[Diagnostic]) -> Vec<(&str, Severity)> {
        diags.iter().map(|d| (d.path.as_str(), d.severity)).collect()
    }

    #[test]
    fn absent_section_is_clean() {
        assert!(validate_feishu(&LarkwireConfig::default()).is_empty());
    }

    #[test]
    fn complete_configs_are_clean() {
        assert!(check(json!({ "app_id": "A", "app_secret": "S" })).is_empty());
        assert!(check(json!({ "accounts": { "ops": { "appId": "A", "appSecret": "S" } } })).is_empty());
    }

    #[test]
    fn type_errors_are_errors() {
        let diags = check(json!({ "accounts": ["not", "a", "map"] }));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].category, "type-error");
    }

    #[test]
    fn unrecognized_domain_warns() {
        let diags = check(json!({ "domain": "mars", "app_id": "A", "app_secret": "S" }));
        assert_eq!(paths(&diags), [("channels.feishu.domain", Severity::Warning)]);
        assert!(diags[0].message.contains("\"mars\""));

        assert!(check(json!({ "domain": "Lark", "app_id": "A", "app_secret": "S" })).is_empty());
    }

    #[test]
    fn partial_credentials_warn() {
        let diags = check(json!({
            "app_id": "A",
            "accounts": { "ops": { "app_secret": "S" }, "empty": {} },
        }));
        assert_eq!(paths(&diags), [
            ("channels.feishu", Severity::Warning),
            ("channels.feishu.accounts.ops", Severity::Warning),
            ("channels.feishu.accounts.empty", Severity::Warning),
            ("channels.feishu", Severity::Warning),
        ]);
    }

    #[test]
    fn unlisted_legacy_credentials_warn() {
        let diags = check(json!({
            "app_id": "LEGACY",
            "app_secret": "LS",
            "accounts": { "ops": { "app_id": "A", "app_secret": "S" } },
        }));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].category, "accounts");
        assert!(diags[0].message.contains("accounts.default"));
    }

    #[test]
    fn incomplete_default_entry_notes_legacy_fallback() {
        let diags = check(json!({
            "app_id": "LEGACY",
            "app_secret": "LS",
            "accounts": { "default": { "app_id": "A" } },
        }));
        assert_eq!(paths(&diags), [(
            "channels.feishu.accounts.default",
            Severity::Info
        )]);
        assert!(diags[0].message.contains("top-level"));
    }

    #[test]
    fn per_account_domain_is_flagged() {
        let diags = check(json!({
            "accounts": { "ops": { "app_id": "A", "app_secret": "S", "domain": "lark" } },
        }));
        assert_eq!(paths(&diags), [(
            "channels.feishu.accounts.ops.domain",
            Severity::Info
        )]);
    }

    #[test]
    fn empty_accounts_map_warns() {
        let diags = check(json!({ "accounts": {} }));
        assert_eq!(paths(&diags), [("channels.feishu.accounts", Severity::Warning)]);
    }

    #[test]
    fn disabled_channel_is_noted() {
        let diags = check(json!({ "enabled": false, "app_id": "A", "app_secret": "S" }));
        assert_eq!(paths(&diags), [("channels.feishu.enabled", Severity::Info)]);
    }
}
