use ccm_config::CcmConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &CcmConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &CcmConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.output.is_configured() && has_single_underscore_key(&env_keys, "CCM_OUTPUT") {
        warnings.push(
            "Output bucket is unset while CCM_OUTPUT_* env vars exist. Use double underscores (example: CCM_OUTPUT__BUCKET)."
                .to_string(),
        );
    }

    if !config.database.is_remote() && has_single_underscore_key(&env_keys, "CCM_DATABASE") {
        warnings.push(
            "Remote database is unset while CCM_DATABASE_* env vars exist. Use double underscores (example: CCM_DATABASE__URL)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    let single = format!("{section}_");
    let double = format!("{section}__");
    keys.iter()
        .any(|key| key.starts_with(&single) && !key.starts_with(&double))
}
