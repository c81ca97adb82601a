//! Integration tests for sessions built from the bundled presets.

mod common;

use heatwave_sim::catalog::actions::{Priority, recommended_actions, summarize};
use heatwave_sim::catalog::equipment::{EquipmentStatus, facility_equipment};
use heatwave_sim::catalog::network::{data_centers, network_summary};
use heatwave_sim::catalog::plans::{PlanLevel, all_plans};
use heatwave_sim::io::export::{day_profile, write_csv};
use heatwave_sim::sim::energy_mix::energy_mix;
use heatwave_sim::sim::session::Input;
use heatwave_sim::sim::types::{ClimateEvent, HeatwaveIntensity, Location, OperationMode};

#[test]
fn baseline_afternoon_matches_reference_reading() {
    let session = common::preset_session("baseline");
    let snap = session.snapshot();
    assert_eq!(snap.location_name, "Los Angeles");
    assert_eq!(snap.state.current_temp, 36);
    assert_eq!(snap.active_plan, Some(PlanLevel::Moderate));
    assert_eq!(snap.climate_event, ClimateEvent::None);
    assert!(snap.metrics.uptime <= 99.99);
}

#[test]
fn extreme_preset_escalates_everything() {
    let session = common::preset_session("extreme_heatwave");
    let baseline = common::preset_session("baseline");

    assert_eq!(session.state().current_temp, 65);
    assert_eq!(session.active_plan(), Some(PlanLevel::Extreme));
    assert!(session.metrics().heat_risk > baseline.metrics().heat_risk);
    assert!(session.metrics().cooling_load > baseline.metrics().cooling_load);

    let actions = recommended_actions(session.state());
    assert_eq!(actions.len(), 8);
    assert_eq!(actions[0].priority, Priority::Critical);
    let summary = summarize(&actions);
    assert_eq!(summary.critical, 2);
    assert_eq!(summary.total_cost, 1_350_000);
}

#[test]
fn islanded_preset_uses_storm_override() {
    let session = common::preset_session("islanded");
    assert_eq!(session.state().location, Location::Sacramento);
    assert_eq!(session.state().operation_mode, OperationMode::Islanded);
    assert_eq!(session.climate_event(), ClimateEvent::Storm);

    let mix = energy_mix(session.state());
    assert_eq!(mix.grid, 0.0);

    let equipment = facility_equipment(session.state(), session.climate_event());
    assert!(
        equipment
            .servers
            .iter()
            .chain(&equipment.cooling)
            .chain(&equipment.power)
            .any(|e| e.status != EquipmentStatus::Operational),
        "storm should degrade some equipment"
    );
}

#[test]
fn inputs_drive_a_full_escalation() {
    let mut session = common::preset_session("baseline");
    session.apply(Input::SelectLocation(Location::Fresno));
    session.apply(Input::SetHeatwaveIntensity(HeatwaveIntensity::Severe));
    session.apply(Input::SetHeatwaveActive(true));
    session.apply(Input::SetOperationMode(OperationMode::Islanded));

    let snap = session.snapshot();
    assert_eq!(snap.state.current_temp, 58);
    assert_eq!(snap.active_plan, Some(PlanLevel::Extreme));
    assert_eq!(snap.climate_event, ClimateEvent::Heatwave);

    let plans = all_plans(session.state(), session.profile());
    assert_eq!(plans.len(), 3);
    for plan in &plans {
        assert!(plan.unresolved_dependencies().is_empty(), "{}", plan.name);
    }
}

#[test]
fn network_always_lists_six_sites() {
    for preset in ["baseline", "extreme_heatwave", "islanded"] {
        let session = common::preset_session(preset);
        let sites = data_centers(session.state(), &session.metrics());
        let summary = network_summary(&sites);
        assert_eq!(sites.len(), 6, "{preset}");
        assert_eq!(summary.total, 6, "{preset}");
    }
}

#[test]
fn day_profile_csv_is_deterministic() {
    let session = common::preset_session("moderate_heatwave");
    let rows = day_profile(session.state());
    assert_eq!(rows.len(), 24);

    let mut first = Vec::new();
    let mut second = Vec::new();
    write_csv(&rows, &mut first).expect("csv write");
    write_csv(&day_profile(session.state()), &mut second).expect("csv write");
    assert_eq!(first, second);

    let peak = rows.iter().map(|r| r.temperature).max();
    assert_eq!(peak, Some(rows[14].temperature));
    assert_eq!(rows[14].temperature, session.state().current_temp);
}
