//! CSV export of the 24-hour risk profile.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::catalog::plans::{PlanLevel, active_plan};
use crate::error::{Error, Result};
use crate::sim::metrics::{Metrics, derive_metrics};
use crate::sim::temperature::{HOURS_PER_DAY, compute_current_temp};
use crate::sim::types::SimulationState;

/// Column header for the day-profile export.
const HEADER: &str = "hour,temperature_c,uptime_pct,cooling_load_pct,\
                      grid_stability_pct,energy_demand_pct,heat_risk_pct,active_plan";

/// The state re-evaluated at one hour of the day.
#[derive(Debug, Clone, PartialEq)]
pub struct HourProfile {
    pub hour: u32,
    pub temperature: i32,
    pub metrics: Metrics,
    pub active_plan: Option<PlanLevel>,
}

/// Re-evaluates `state` at every hour of the day, holding everything but the hour fixed.
pub fn day_profile(state: &SimulationState) -> Vec<HourProfile> {
    let profile = state.location.profile();
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let temperature = compute_current_temp(
                profile,
                hour,
                state.heatwave_active,
                state.heatwave_intensity,
            );
            let at_hour = SimulationState {
                current_temp: temperature,
                ..state.clone()
            };
            HourProfile {
                hour,
                temperature,
                metrics: derive_metrics(&at_hour, profile),
                active_plan: active_plan(temperature, profile),
            }
        })
        .collect()
}

/// Exports the day profile to a CSV file at the given path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created and [`Error::Csv`]
/// if writing fails.
pub fn export_csv(rows: &[HourProfile], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(rows, io::BufWriter::new(file))
}

/// Writes the day profile as CSV to any writer.
///
/// Produces deterministic output for identical inputs. An hour with no
/// triggered plan has an empty `active_plan` cell.
///
/// # Errors
///
/// Returns [`Error::Csv`] if writing fails.
pub fn write_csv(rows: &[HourProfile], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in rows {
        let m = &r.metrics;
        wtr.write_record(&[
            r.hour.to_string(),
            r.temperature.to_string(),
            format!("{:.2}", m.uptime),
            format!("{:.2}", m.cooling_load),
            format!("{:.2}", m.grid_stability),
            format!("{:.2}", m.energy_demand),
            format!("{:.2}", m.heat_risk),
            r.active_plan.map(|p| p.to_string()).unwrap_or_default(),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::HeatwaveIntensity;

    fn render(state: &SimulationState) -> String {
        let mut buf = Vec::new();
        write_csv(&day_profile(state), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_matches_schema() {
        let output = render(&SimulationState::default());
        assert_eq!(
            output.lines().next(),
            Some(
                "hour,temperature_c,uptime_pct,cooling_load_pct,\
                 grid_stability_pct,energy_demand_pct,heat_risk_pct,active_plan"
            )
        );
    }

    #[test]
    fn one_row_per_hour() {
        let output = render(&SimulationState::default());
        // 1 header + 24 data rows
        assert_eq!(output.lines().count(), 25);
    }

    #[test]
    fn deterministic_output() {
        let state = SimulationState {
            heatwave_active: true,
            heatwave_intensity: HeatwaveIntensity::Severe,
            ..SimulationState::default()
        };
        assert_eq!(render(&state), render(&state));
    }

    #[test]
    fn afternoon_rows_carry_the_active_plan() {
        let state = SimulationState {
            heatwave_active: true,
            heatwave_intensity: HeatwaveIntensity::Extreme,
            ..SimulationState::default()
        };
        let rows = day_profile(&state);
        // LA: 28 - 2 + 22 = 48 at night, 28 + 8 + 22 = 58 in the afternoon
        assert_eq!(rows[2].temperature, 48);
        assert_eq!(rows[2].active_plan, Some(PlanLevel::Severe));
        assert_eq!(rows[14].temperature, 58);
        assert_eq!(rows[14].active_plan, Some(PlanLevel::Extreme));
    }

    #[test]
    fn parseable_with_empty_plan_cells() {
        let output = render(&SimulationState::default());
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 24);
        for rec in &records {
            assert_eq!(rec.len(), 8);
            for i in 1..7 {
                assert!(rec[i].parse::<f64>().is_ok(), "column {i} should be numeric");
            }
        }
        // calm afternoons sit exactly on the moderate trigger
        assert_eq!(&records[3][7], "");
        assert_eq!(&records[14][7], "moderate");
    }
}
