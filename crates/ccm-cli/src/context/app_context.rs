use std::sync::Arc;

use anyhow::Context;
use ccm_config::CcmConfig;
use ccm_core::conversion::{ConversionTable, FactorResolver};
use ccm_db::service::CcmService;
use ccm_ingest::FileProcessor;
use ccm_publish::Publisher;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: CcmService,
    pub config: CcmConfig,
    pub table: Arc<ConversionTable>,
    pub publisher: Publisher,
}

impl AppContext {
    /// Open the store, load the conversion table, and open the output bucket.
    pub async fn init(config: CcmConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid ccm configuration")?;

        let service = if config.database.is_remote() {
            CcmService::new_remote(&config.database.url, &config.database.auth_token)
                .await
                .context("failed to open remote ccm database")?
        } else {
            CcmService::new_local(&config.database.path)
                .await
                .with_context(|| format!("failed to open ccm database '{}'", config.database.path))?
        };

        let table = Arc::new(crate::bootstrap::load_table(&config)?);
        let publisher = Publisher::from_config(&config.storage, &config.output)
            .with_context(|| format!("failed to open output bucket '{}'", config.output.bucket))?;

        Ok(Self {
            service,
            config,
            table,
            publisher,
        })
    }

    pub fn processor(&self) -> FileProcessor<'_> {
        FileProcessor::new(
            &self.service,
            FactorResolver::new(Arc::clone(&self.table)),
            &self.publisher,
        )
    }
}
