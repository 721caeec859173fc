//! Store-level behaviour across many writers sharing one database file.

use ccm_core::conversion::Conversion;
use ccm_core::entities::Measurement;
use ccm_core::timestamp::parse_timestamp;
use ccm_db::service::CcmService;
use pretty_assertions::assert_eq;

fn measurement(measure: &str, value: f64) -> Measurement {
    Measurement {
        period_start: parse_timestamp("2023-03-01").unwrap(),
        period_end: parse_timestamp("2023-03-31").unwrap(),
        measure: measure.into(),
        unit: "kWh".into(),
        value,
    }
}

#[tokio::test]
async fn concurrent_entity_creation_reports_exactly_one_winner() {
    let svc = CcmService::new_local(":memory:").await.unwrap();

    let (a, b, c, d) = tokio::join!(
        svc.insert_reporting_entity("site-42"),
        svc.insert_reporting_entity("site-42"),
        svc.insert_reporting_entity("site-42"),
        svc.insert_reporting_entity("site-42"),
    );
    let created = [a.unwrap(), b.unwrap(), c.unwrap(), d.unwrap()]
        .into_iter()
        .filter(|created| *created)
        .count();
    assert_eq!(created, 1);
    assert_eq!(svc.list_reporting_entity_ids().await.unwrap(), vec!["site-42"]);
}

#[tokio::test]
async fn readings_and_emissions_stay_paired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ccm.db");
    let svc = CcmService::new_local(&path.to_string_lossy()).await.unwrap();
    svc.insert_reporting_entity("site-42").await.unwrap();

    let conversion = Conversion {
        kg_co2e: 0.183 * 20.0,
        calculation_id: "gas-2023".into(),
    };
    svc.record_measurement("site-42", &measurement("gas", 20.0), Some(&conversion))
        .await
        .unwrap();
    svc.record_measurement("site-42", &measurement("water", 3.0), None)
        .await
        .unwrap();
    svc.record_measurement("site-42", &measurement("gas", 40.0), None)
        .await
        .unwrap();

    let readings = svc.list_readings_for_entity("site-42").await.unwrap();
    let emissions = svc.list_emissions_for_entity("site-42").await.unwrap();
    assert_eq!(readings.len(), emissions.len());
    for (reading, emission) in readings.iter().zip(&emissions) {
        assert_eq!(reading.key(), emission.key());
        assert_eq!(reading.unit, emission.unit);
        assert!((reading.value - emission.value).abs() < f64::EPSILON);
    }

    let gas = emissions.iter().find(|e| e.measure == "gas").unwrap();
    assert!((gas.value - 40.0).abs() < f64::EPSILON);
    assert_eq!(gas.kg_co2e, None, "last write wins for the whole emission row");
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ccm.db");
    let path = path.to_string_lossy().to_string();

    {
        let svc = CcmService::new_local(&path).await.unwrap();
        svc.insert_reporting_entity("site-42").await.unwrap();
        svc.record_measurement("site-42", &measurement("electricity", 1000.0), None)
            .await
            .unwrap();
    }

    let svc = CcmService::new_local(&path).await.unwrap();
    assert!(!svc.insert_reporting_entity("site-42").await.unwrap());
    assert_eq!(svc.list_emissions_for_entity("site-42").await.unwrap().len(), 1);
}
