#![allow(clippy::too_many_arguments)]

pub mod core;
pub mod corpus;
pub mod errors;
pub mod input;
pub mod output;
pub mod simulation_time;


pub use crate::corpus::RunResults;
use crate::corpus::{Corpus, EnergyTotals, ZoneResults};
pub use crate::errors::{RcSimError, SimulationError};
use crate::input::ingest_for_processing;
use crate::output::Output;
use csv::WriterBuilder;
use std::io::Read;
use tracing::{debug, info};

pub fn run_project(input: impl Read, output: impl Output) -> Result<RunResults, RcSimError> {
    let input = ingest_for_processing(input)?;
    let corpus = Corpus::from_inputs(input).map_err(RcSimError::from_anyhow)?;
    let results = corpus.run().map_err(RcSimError::from_anyhow)?;

    if !output.is_noop() {
        write_output_files(&output, &results).map_err(RcSimError::ErrorInOutput)?;
    }

    Ok(results)
}

/// Columns of the per-zone timestep file, as (heading, units)
const ZONE_OUTPUT_COLUMNS: [(&str, &str); 23] = [
    ("Timestep", "[hour]"),
    ("Demand state", "[-]"),
    ("Internal air temp", "[deg C]"),
    ("Surface temp", "[deg C]"),
    ("Mass temp", "[deg C]"),
    ("Operative temp", "[deg C]"),
    ("Energy demand unrestricted", "[Wh]"),
    ("Energy demand", "[Wh]"),
    ("Heating demand", "[Wh]"),
    ("Cooling demand", "[Wh]"),
    ("Lighting demand", "[Wh]"),
    ("Heating system electricity", "[Wh]"),
    ("Heating system fossils", "[Wh]"),
    ("Cooling system electricity", "[Wh]"),
    ("Cooling system fossils", "[Wh]"),
    ("Electricity out", "[Wh]"),
    ("Heating energy", "[Wh]"),
    ("Cooling energy", "[Wh]"),
    ("COP", "[ratio]"),
    ("Heating supply temp", "[deg C]"),
    ("Heating return temp", "[deg C]"),
    ("Cooling supply temp", "[deg C]"),
    ("Cooling return temp", "[deg C]"),
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn write_output_files(output: &impl Output, results: &RunResults) -> anyhow::Result<()> {
    for (zone_name, zone_results) in &results.zones {
        write_zone_output_file(output, zone_name, &results.timesteps, zone_results)?;
    }
    write_summary_output_file(output, results)?;
    write_monthly_output_file(output, results)?;

    Ok(())
}

fn write_zone_output_file(
    output: &impl Output,
    zone_name: &str,
    timesteps: &[f64],
    zone_results: &ZoneResults,
) -> anyhow::Result<()> {
    debug!("writing out results for zone {zone_name}");
    let writer = output.writer_for_location_key(zone_name, "csv")?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(ZONE_OUTPUT_COLUMNS.map(|(heading, _)| heading))?;
    writer.write_record(ZONE_OUTPUT_COLUMNS.map(|(_, units)| units))?;

    for (timestep, step_result) in timesteps.iter().zip(zone_results.steps.iter()) {
        writer.write_record([
            timestep.to_string(),
            step_result.demand_state.to_string(),
            step_result.temp_air.to_string(),
            step_result.temp_surface.to_string(),
            step_result.temp_mass.to_string(),
            step_result.temp_operative.to_string(),
            step_result.energy_demand_unrestricted.to_string(),
            step_result.energy_demand.to_string(),
            step_result.heating_demand.to_string(),
            step_result.cooling_demand.to_string(),
            step_result.lighting_demand.to_string(),
            step_result.heating_sys_electricity.to_string(),
            step_result.heating_sys_fossils.to_string(),
            step_result.cooling_sys_electricity.to_string(),
            step_result.cooling_sys_fossils.to_string(),
            step_result.electricity_out.to_string(),
            step_result.heating_energy().to_string(),
            step_result.cooling_energy().to_string(),
            step_result.cop.unwrap_or(f64::NAN).to_string(),
            step_result.heating_supply_temperature.to_string(),
            step_result.heating_return_temperature.to_string(),
            step_result.cooling_supply_temperature.to_string(),
            step_result.cooling_return_temperature.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

fn totals_headings() -> Vec<String> {
    EnergyTotals::default()
        .fields()
        .iter()
        .map(|(heading, _)| heading.to_string())
        .collect()
}

fn totals_record(totals: &EnergyTotals) -> impl Iterator<Item = String> {
    totals.fields().into_iter().map(|(_, value)| value.to_string())
}

/// Annual totals per zone, normalised by floor area
fn write_summary_output_file(output: &impl Output, results: &RunResults) -> anyhow::Result<()> {
    let writer = output.writer_for_location_key("summary", "csv")?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    let headings = totals_headings();
    writer.write_record(
        ["Zone".to_string(), "Floor area".to_string()]
            .into_iter()
            .chain(headings.iter().cloned()),
    )?;
    writer.write_record(
        ["[-]", "[m2]"]
            .into_iter()
            .chain(headings.iter().map(|_| "[kWh/m2]")),
    )?;

    for (zone_name, zone_results) in &results.zones {
        let normalised = zone_results.annual.per_floor_area(zone_results.floor_area);
        info!(
            zone = zone_name.as_str(),
            heating_demand = normalised.heating_demand,
            cooling_demand = normalised.cooling_demand,
            lighting_demand = normalised.lighting_demand,
            "Annual demand [kWh/m2]"
        );
        writer.write_record(
            [zone_name.clone(), zone_results.floor_area.to_string()]
                .into_iter()
                .chain(totals_record(&normalised)),
        )?;
    }

    writer.flush()?;

    Ok(())
}

/// Monthly totals per zone, in Wh
fn write_monthly_output_file(output: &impl Output, results: &RunResults) -> anyhow::Result<()> {
    let writer = output.writer_for_location_key("monthly", "csv")?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    let headings = totals_headings();
    writer.write_record(
        ["Zone".to_string(), "Month".to_string()]
            .into_iter()
            .chain(headings.iter().cloned()),
    )?;
    writer.write_record(
        ["[-]", "[-]"]
            .into_iter()
            .chain(headings.iter().map(|_| "[Wh]")),
    )?;

    for (zone_name, zone_results) in &results.zones {
        for (month_name, totals) in MONTH_NAMES.iter().zip(zone_results.monthly.iter()) {
            writer.write_record(
                [zone_name.clone(), month_name.to_string()]
                    .into_iter()
                    .chain(totals_record(totals)),
            )?;
        }
    }

    writer.flush()?;

    Ok(())
}
