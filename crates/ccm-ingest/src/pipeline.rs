//! Per-file processing.
//!
//! One file moves through `Received → EntityResolved → MeasurementProcessed*
//! → Published → Done`; any failure moves it to `Failed`. Measurements are
//! committed one at a time, so a failure keeps what was already written and
//! only skips publication. Summaries are published after every batch in the
//! file has been persisted.

use std::fmt;

use ccm_core::conversion::FactorResolver;
use ccm_core::entities::ReportingEntity;
use ccm_db::service::CcmService;
use ccm_publish::Publisher;
use object_store::ObjectStore;
use serde::Serialize;

use crate::IngestError;
use crate::batch::ParsedFile;
use crate::format::{DetectedFormat, InputFormat, detect_format};
use crate::registry::EntityRegistry;
use crate::source::fetch_object;
use crate::structured::parse_structured;
use crate::tabular::parse_tabular;

/// Processing state of one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    EntityResolved,
    MeasurementProcessed,
    Published,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::EntityResolved => "entity_resolved",
            Self::MeasurementProcessed => "measurement_processed",
            Self::Published => "published",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a successfully decoded file changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    /// Entities with at least one batch in the file, in file order.
    pub entities: Vec<String>,
    /// Entities first seen in this file.
    pub created: Vec<String>,
    pub measurements: usize,
    /// Measurements for which a conversion rule matched.
    pub converted: usize,
    pub skipped: usize,
}

/// Result of handling one input object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Processed(ProcessReport),
    /// The key has an extension no decoder handles. Nothing was fetched or written.
    Unrecognized { extension: String },
    /// The key has no extension. Nothing was fetched or written.
    MissingExtension,
}

impl FileOutcome {
    /// `false` only for an unrecognized format.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }
}

/// Drives one file from decoding to publication.
pub struct FileProcessor<'a> {
    svc: &'a CcmService,
    resolver: FactorResolver,
    publisher: &'a Publisher,
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::debug!(from = %stage, to = %next, "stage transition");
    *stage = next;
}

impl<'a> FileProcessor<'a> {
    pub const fn new(svc: &'a CcmService, resolver: FactorResolver, publisher: &'a Publisher) -> Self {
        Self {
            svc,
            resolver,
            publisher,
        }
    }

    /// Process the object `key` of `bucket`, read through `store`.
    ///
    /// The format is decided from the key before anything is fetched.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::NotFound`/`AccessDenied` if the object cannot be
    /// read, and any decoding, store or publication error unmodified.
    pub async fn process_object(
        &self,
        store: &dyn ObjectStore,
        bucket: &str,
        key: &str,
    ) -> Result<FileOutcome, IngestError> {
        let format = match detect_format(key) {
            DetectedFormat::Known(format) => format,
            DetectedFormat::Unrecognized(extension) => {
                tracing::warn!(bucket, key, %extension, "unrecognized file format");
                return Ok(FileOutcome::Unrecognized { extension });
            }
            DetectedFormat::MissingExtension => {
                tracing::info!(bucket, key, "no extension on file, nothing to do");
                return Ok(FileOutcome::MissingExtension);
            }
        };

        let bytes = fetch_object(store, bucket, key).await.inspect_err(|e| {
            tracing::error!(bucket, key, stage = %Stage::Received, error = %e, "fetch failed");
        })?;
        let outcome = self.process_bytes(format, &bytes).await?;
        tracing::info!(bucket, key, %format, "processed file");
        Ok(outcome)
    }

    /// Process an already-fetched body of a known format.
    ///
    /// # Errors
    ///
    /// Returns the first decoding, store or publication error.
    pub async fn process_bytes(
        &self,
        format: InputFormat,
        bytes: &[u8],
    ) -> Result<FileOutcome, IngestError> {
        let mut stage = Stage::Received;
        match self.run(format, bytes, &mut stage).await {
            Ok(report) => {
                advance(&mut stage, Stage::Done);
                Ok(FileOutcome::Processed(report))
            }
            Err(e) => {
                tracing::error!(stage = %stage, error = %e, "file processing failed");
                advance(&mut stage, Stage::Failed);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        format: InputFormat,
        bytes: &[u8],
        stage: &mut Stage,
    ) -> Result<ProcessReport, IngestError> {
        let parsed: ParsedFile = match format {
            InputFormat::Structured => parse_structured(bytes)?,
            InputFormat::Tabular => parse_tabular(bytes)?,
        };

        let mut report = ProcessReport {
            skipped: parsed.skipped,
            ..ProcessReport::default()
        };
        let registry = EntityRegistry::new(self.svc, self.publisher);
        let mut touched: Vec<ReportingEntity> = Vec::with_capacity(parsed.batches.len());

        for batch in &parsed.batches {
            let ensured = registry.ensure_entity(&batch.entity_id).await?;
            advance(stage, Stage::EntityResolved);
            if ensured.created {
                report.created.push(batch.entity_id.clone());
            }

            for measurement in &batch.measurements {
                let conversion = self.resolver.resolve_measurement(measurement);
                self.svc
                    .record_measurement(&batch.entity_id, measurement, conversion.as_ref())
                    .await?;
                report.measurements += 1;
                if conversion.is_some() {
                    report.converted += 1;
                }
                advance(stage, Stage::MeasurementProcessed);
            }

            report.entities.push(batch.entity_id.clone());
            touched.push(ensured.entity);
        }

        for entity in &touched {
            self.publisher.publish_entity_summary(self.svc, entity).await?;
        }
        if !touched.is_empty() {
            advance(stage, Stage::Published);
        }

        Ok(report)
    }
}
