use anyhow::Context;
use ccm_config::CcmConfig;
use ccm_core::conversion::ConversionTable;

/// Load `.env` and the layered configuration.
pub fn load_config() -> anyhow::Result<CcmConfig> {
    CcmConfig::load_with_dotenv().context("failed to load ccm configuration")
}

/// Load the conversion table named by the configuration.
pub fn load_table(config: &CcmConfig) -> anyhow::Result<ConversionTable> {
    ConversionTable::load(&config.conversion.table_path)
        .with_context(|| format!("failed to load conversion table '{}'", config.conversion.table_path))
}
