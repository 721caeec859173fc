use std::sync::Arc;

use anyhow::Context;
use ccm_config::CcmConfig;
use ccm_core::conversion::FactorResolver;
use ccm_core::timestamp::parse_timestamp;
use serde::Serialize;

use crate::bootstrap::load_table;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::commands::CommandStatus;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveResponse {
    measure: String,
    unit: String,
    value: f64,
    #[serde(rename = "kgco2e")]
    kg_co2e: Option<f64>,
    co2e_calculation: Option<String>,
}

/// Handle `ccm resolve`. Needs only the conversion table.
pub fn handle(
    args: &ResolveArgs,
    config: &CcmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<CommandStatus> {
    let start = parse_timestamp(&args.start).context("invalid --start")?;
    let end = parse_timestamp(&args.end).context("invalid --end")?;
    let resolver = FactorResolver::new(Arc::new(load_table(config)?));

    let conversion = resolver.resolve(&args.measure, &args.unit, &start, &end, args.value);
    let (kg_co2e, co2e_calculation) = match conversion {
        Some(c) => (Some(c.kg_co2e), Some(c.calculation_id)),
        None => (None, None),
    };
    output(
        &ResolveResponse {
            measure: args.measure.clone(),
            unit: args.unit.clone(),
            value: args.value,
            kg_co2e,
            co2e_calculation,
        },
        flags.format,
    )?;
    Ok(CommandStatus::Success)
}
