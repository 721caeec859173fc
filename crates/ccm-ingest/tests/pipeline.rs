//! End-to-end processing of uploaded objects against in-memory buckets and
//! an in-memory store.

use std::sync::Arc;

use ccm_core::conversion::{ConversionTable, FactorResolver};
use ccm_core::entities::EntitySummary;
use ccm_db::service::CcmService;
use ccm_ingest::{FileOutcome, FileProcessor, IngestError, InputFormat, ProcessReport};
use ccm_publish::Publisher;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use pretty_assertions::assert_eq;

const TABLE: &str = r#"{"co2eConversion":[
    {"id":"grid-2023","measure":"electricity","unit":"kWh","periodStart":"2023-01-01","periodEnd":"2023-12-31","factor":0.233},
    {"id":"gas-2023","measure":"gas","unit":"kWh","periodStart":"2023-01-01","periodEnd":"2023-12-31","factor":0.183}
]}"#;

struct Harness {
    svc: CcmService,
    publisher: Publisher,
    uploads: InMemory,
    resolver: FactorResolver,
}

impl Harness {
    async fn new() -> Self {
        let table = ConversionTable::from_json_str(TABLE).unwrap();
        Self {
            svc: CcmService::new_local(":memory:").await.unwrap(),
            publisher: Publisher::new(Arc::new(InMemory::new()), "reporting_entities"),
            uploads: InMemory::new(),
            resolver: FactorResolver::new(Arc::new(table)),
        }
    }

    fn processor(&self) -> FileProcessor<'_> {
        FileProcessor::new(&self.svc, self.resolver.clone(), &self.publisher)
    }

    async fn upload(&self, key: &str, body: &str) {
        self.uploads
            .put(&Path::parse(key).unwrap(), PutPayload::from(body.as_bytes().to_vec()))
            .await
            .unwrap();
    }

    async fn process(&self, key: &str) -> Result<FileOutcome, IngestError> {
        self.processor()
            .process_object(&self.uploads, "ccm-uploads", key)
            .await
    }

    async fn published(&self, path: &Path) -> Option<Vec<u8>> {
        match self.publisher.store().get(path).await {
            Ok(result) => Some(result.bytes().await.unwrap().to_vec()),
            Err(object_store::Error::NotFound { .. }) => None,
            Err(e) => panic!("unexpected store error: {e}"),
        }
    }

    async fn summary(&self, id: &str) -> Option<EntitySummary> {
        self.published(&self.publisher.summary_path(id).unwrap())
            .await
            .map(|body| serde_json::from_slice(&body).unwrap())
    }

    async fn index(&self) -> Option<Vec<String>> {
        self.published(&self.publisher.index_path())
            .await
            .map(|body| serde_json::from_slice(&body).unwrap())
    }
}

const SITE_42: &str = r#"{"id":"site-42","emissions":[
    {"periodStart":"2023-03-01","periodEnd":"2023-03-31","measure":"electricity","unit":"kWh","value":1000}
]}"#;

#[tokio::test]
async fn electricity_upload_is_converted_and_published() {
    let h = Harness::new().await;
    h.upload("uploads/site-42.json", SITE_42).await;

    let outcome = h.process("uploads/site-42.json").await.unwrap();
    assert_eq!(
        outcome,
        FileOutcome::Processed(ProcessReport {
            entities: vec!["site-42".into()],
            created: vec!["site-42".into()],
            measurements: 1,
            converted: 1,
            skipped: 0,
        })
    );

    let summary = h.summary("site-42").await.expect("summary published");
    assert_eq!(summary.entity.id, "site-42");
    assert_eq!(summary.emissions.len(), 1);
    let emission = &summary.emissions[0];
    assert!((emission.kg_co2e.unwrap() - 233.0).abs() < 1e-9);
    assert_eq!(emission.co2e_calculation.as_deref(), Some("grid-2023"));

    assert_eq!(h.index().await, Some(vec!["site-42".to_string()]));
}

#[tokio::test]
async fn record_without_emissions_is_a_successful_no_op() {
    let h = Harness::new().await;
    h.upload("site-42.json", r#"{"id":"site-42"}"#).await;

    let outcome = h.process("site-42.json").await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(
        outcome,
        FileOutcome::Processed(ProcessReport {
            skipped: 1,
            ..ProcessReport::default()
        })
    );
    assert!(h.svc.list_reporting_entity_ids().await.unwrap().is_empty());
    assert_eq!(h.summary("site-42").await, None);
    assert_eq!(h.index().await, None);
}

#[tokio::test]
async fn unrecognized_extension_is_a_soft_failure_without_fetch() {
    let h = Harness::new().await;

    // Never uploaded: the format is rejected before any fetch is attempted.
    let outcome = h.process("site-42.xml").await.unwrap();
    assert_eq!(
        outcome,
        FileOutcome::Unrecognized {
            extension: ".xml".into()
        }
    );
    assert!(!outcome.is_success());
    assert!(h.svc.list_reporting_entity_ids().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_extension_is_a_no_op() {
    let h = Harness::new().await;
    let outcome = h.process("uploads/README").await.unwrap();
    assert_eq!(outcome, FileOutcome::MissingExtension);
    assert!(outcome.is_success());
}

#[tokio::test]
async fn missing_object_surfaces_not_found() {
    let h = Harness::new().await;
    let err = h.process("uploads/ghost.json").await.unwrap_err();
    assert!(matches!(err, IngestError::NotFound { key, .. } if key == "uploads/ghost.json"));
}

#[tokio::test]
async fn reprocessing_does_not_republish_index() {
    let h = Harness::new().await;
    h.upload("site-42.json", SITE_42).await;
    h.process("site-42.json").await.unwrap();

    h.publisher.store().delete(&h.publisher.index_path()).await.unwrap();
    let outcome = h.process("site-42.json").await.unwrap();

    let FileOutcome::Processed(report) = outcome else {
        panic!("expected processed outcome");
    };
    assert!(report.created.is_empty());
    assert_eq!(h.index().await, None);
    assert_eq!(h.svc.list_emissions_for_entity("site-42").await.unwrap().len(), 1);
}

#[tokio::test]
async fn reprocessing_yields_identical_summary() {
    let h = Harness::new().await;
    h.upload("site-42.json", SITE_42).await;
    let path = h.publisher.summary_path("site-42").unwrap();

    h.process("site-42.json").await.unwrap();
    let first = h.published(&path).await.unwrap();
    h.process("site-42.json").await.unwrap();
    let second = h.published(&path).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn tabular_upload_publishes_each_entity() {
    let h = Harness::new().await;
    h.upload(
        "2023/q1 readings.csv",
        "id,periodStart,periodEnd,measure,unit,value
depot,2023-01-01,2023-01-31,gas,kWh,100
site-42,2023-01-01,2023-01-31,electricity,kWh,500
depot,2023-02-01,2023-02-28,water,m3,4
",
    )
    .await;

    let outcome = h.process("2023/q1 readings.csv").await.unwrap();
    let FileOutcome::Processed(report) = outcome else {
        panic!("expected processed outcome");
    };
    assert_eq!(report.entities, vec!["depot", "site-42"]);
    assert_eq!(report.measurements, 3);
    assert_eq!(report.converted, 2);

    let depot = h.summary("depot").await.unwrap();
    assert_eq!(depot.emissions.len(), 2);
    assert_eq!(depot.emissions[1].kg_co2e, None, "water has no conversion rule");
    assert!(h.summary("site-42").await.is_some());
    assert_eq!(
        h.index().await,
        Some(vec!["depot".to_string(), "site-42".to_string()])
    );
}

#[tokio::test]
async fn store_failure_mid_file_keeps_earlier_writes_and_skips_publication() {
    let h = Harness::new().await;
    h.svc
        .db()
        .conn()
        .execute_batch(
            "CREATE TRIGGER reject_fuel BEFORE INSERT ON emissions
             WHEN NEW.measure = 'fuel'
             BEGIN SELECT RAISE(ABORT, 'fuel rejected'); END;",
        )
        .await
        .unwrap();

    let body = r#"{"id":"site-42","emissions":[
        {"periodStart":"2023-03-01","periodEnd":"2023-03-31","measure":"electricity","unit":"kWh","value":1000},
        {"periodStart":"2023-03-01","periodEnd":"2023-03-31","measure":"fuel","unit":"l","value":20},
        {"periodStart":"2023-03-01","periodEnd":"2023-03-31","measure":"gas","unit":"kWh","value":50}
    ]}"#;
    let err = h
        .processor()
        .process_bytes(InputFormat::Structured, body.as_bytes())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Database(_)));

    let readings = h.svc.list_readings_for_entity("site-42").await.unwrap();
    let measures: Vec<&str> = readings.iter().map(|r| r.measure.as_str()).collect();
    assert_eq!(measures, vec!["electricity"]);
    assert_eq!(h.summary("site-42").await, None);
}

#[tokio::test]
async fn malformed_measurement_writes_nothing() {
    let h = Harness::new().await;
    let body = r#"{"id":"site-42","emissions":[{"periodStart":"2023-03-01","measure":"gas","unit":"kWh","value":1}]}"#;
    let err = h
        .processor()
        .process_bytes(InputFormat::Structured, body.as_bytes())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Parse(_)));
    assert!(h.svc.list_reporting_entity_ids().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_emission_list_creates_entity_and_empty_summary() {
    let h = Harness::new().await;
    h.processor()
        .process_bytes(InputFormat::Structured, br#"{"id":"site-42","emissions":[]}"#)
        .await
        .unwrap();
    let summary = h.summary("site-42").await.unwrap();
    assert!(summary.emissions.is_empty());
    assert_eq!(h.index().await, Some(vec!["site-42".to_string()]));
}

#[tokio::test]
async fn slash_in_entity_id_publishes_nested_key() {
    let h = Harness::new().await;
    h.processor()
        .process_bytes(InputFormat::Structured, br#"{"id":"way/123","emissions":[]}"#)
        .await
        .unwrap();

    let nested = Path::parse("reporting_entities/way/123.json").unwrap();
    let body = h.published(&nested).await.expect("summary at nested key");
    let summary: EntitySummary = serde_json::from_slice(&body).unwrap();
    assert_eq!(summary.entity.id, "way/123");
    assert_eq!(h.index().await, Some(vec!["way/123".to_string()]));
}

#[tokio::test]
async fn non_finite_tabular_value_writes_nothing() {
    let h = Harness::new().await;
    let err = h
        .processor()
        .process_bytes(
            InputFormat::Tabular,
            b"id,periodStart,periodEnd,measure,unit,value
site-42,2023-03-01,2023-03-31,electricity,kWh,inf
",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Parse(_)));
    assert!(h.svc.list_reporting_entity_ids().await.unwrap().is_empty());
    assert_eq!(h.summary("site-42").await, None);
}
