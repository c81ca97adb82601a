//! Automated heatwave response plans.
//!
//! Plans are literal tables whose step statuses are derived from the
//! simulation state. Step dependencies are descriptive only: nothing is
//! scheduled from them, but [`HeatwavePlan::unresolved_dependencies`] audits
//! that each one names an earlier step.

use std::fmt;

use serde::Serialize;

use crate::climate::LocationProfile;
use crate::sim::types::{HeatwaveIntensity, OperationMode, SimulationState};

/// Response tier, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanLevel {
    Moderate,
    Severe,
    Extreme,
}

impl PlanLevel {
    pub const ALL: [PlanLevel; 3] = [PlanLevel::Moderate, PlanLevel::Severe, PlanLevel::Extreme];

    /// Degrees above the site's average summer temperature that trigger this plan.
    pub fn trigger_offset_c(self) -> f64 {
        match self {
            PlanLevel::Moderate => 8.0,
            PlanLevel::Severe => 15.0,
            PlanLevel::Extreme => 22.0,
        }
    }

    /// Trigger temperature at `profile` (°C).
    pub fn trigger_temp(self, profile: &LocationProfile) -> f64 {
        profile.avg_summer_temp + self.trigger_offset_c()
    }

    fn intensity(self) -> HeatwaveIntensity {
        match self {
            PlanLevel::Moderate => HeatwaveIntensity::Moderate,
            PlanLevel::Severe => HeatwaveIntensity::Severe,
            PlanLevel::Extreme => HeatwaveIntensity::Extreme,
        }
    }
}

impl fmt::Display for PlanLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanLevel::Moderate => f.write_str("moderate"),
            PlanLevel::Severe => f.write_str("severe"),
            PlanLevel::Extreme => f.write_str("extreme"),
        }
    }
}

/// Highest plan whose trigger temperature `current_temp` has reached.
pub fn active_plan(current_temp: i32, profile: &LocationProfile) -> Option<PlanLevel> {
    let temp = f64::from(current_temp);
    PlanLevel::ALL
        .into_iter()
        .rev()
        .find(|level| temp >= level.trigger_temp(profile))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Ready,
    Executing,
    Completed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Pending => "Pending",
            StepStatus::Ready => "Ready",
            StepStatus::Executing => "Executing",
            StepStatus::Completed => "Completed",
        };
        f.write_str(s)
    }
}

/// Expected effect of a step (%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepImpact {
    pub cooling_reduction: i32,
    pub power_saving: i32,
    pub risk_mitigation: i32,
}

const fn impact(cooling_reduction: i32, power_saving: i32, risk_mitigation: i32) -> StepImpact {
    StepImpact {
        cooling_reduction,
        power_saving,
        risk_mitigation,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub trigger_condition: String,
    /// Minutes after the plan triggers.
    pub execution_time_min: u32,
    pub duration_min: u32,
    pub status: StepStatus,
    pub success_probability: u32,
    pub impact: StepImpact,
    pub dependencies: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalPerformance {
    pub times_executed: u32,
    pub success_rate: f64,
    pub avg_duration_min: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatwavePlan {
    pub level: PlanLevel,
    pub name: &'static str,
    pub description: &'static str,
    pub trigger_temp: f64,
    pub overall_success_probability: u32,
    pub historical: HistoricalPerformance,
    pub steps: Vec<PlanStep>,
}

/// One point of the cumulative success timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// 1-based step number.
    pub step: usize,
    pub name: &'static str,
    pub probability: u32,
    /// Probability (%) that every step up to and including this one succeeds.
    pub cumulative_probability: f64,
}

impl HeatwavePlan {
    /// Running product of step success probabilities, in step order.
    pub fn success_timeline(&self) -> Vec<TimelinePoint> {
        let mut acc = 1.0;
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                acc *= f64::from(step.success_probability) / 100.0;
                TimelinePoint {
                    step: i + 1,
                    name: step.title,
                    probability: step.success_probability,
                    cumulative_probability: acc * 100.0,
                }
            })
            .collect()
    }

    /// Returns `(step id, dependency id)` pairs whose dependency is not an earlier step.
    pub fn unresolved_dependencies(&self) -> Vec<(&'static str, &'static str)> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.steps.len());
        let mut unresolved = Vec::new();
        for step in &self.steps {
            for &dep in step.dependencies {
                if !seen.contains(&dep) {
                    unresolved.push((step.id, dep));
                }
            }
            seen.push(step.id);
        }
        unresolved
    }
}

fn executing_if(cond: bool) -> StepStatus {
    if cond {
        StepStatus::Executing
    } else {
        StepStatus::Ready
    }
}

fn completed_if(cond: bool) -> StepStatus {
    if cond {
        StepStatus::Completed
    } else {
        StepStatus::Ready
    }
}

/// Builds the plan for `level` at `profile` with statuses for `state`.
pub fn plan(level: PlanLevel, state: &SimulationState, profile: &LocationProfile) -> HeatwavePlan {
    let trigger_temp = level.trigger_temp(profile);
    let at_level = state.heatwave_active && state.heatwave_intensity == level.intensity();
    let temp_trigger = format!("Temperature > {trigger_temp:.0}°C");

    match level {
        PlanLevel::Moderate => HeatwavePlan {
            level,
            name: "Moderate Heatwave Response",
            description: "Automated response for temperatures 8-15°C above normal",
            trigger_temp,
            overall_success_probability: 92,
            historical: HistoricalPerformance {
                times_executed: 12,
                success_rate: 91.7,
                avg_duration_min: 180,
            },
            steps: vec![
                PlanStep {
                    id: "temp-monitor",
                    title: "Enhanced Temperature Monitoring",
                    description: "Increase sensor polling frequency and activate predictive algorithms",
                    trigger_condition: temp_trigger,
                    execution_time_min: 0,
                    duration_min: 30,
                    status: executing_if(at_level),
                    success_probability: 99,
                    impact: impact(0, 0, 15),
                    dependencies: &[],
                },
                PlanStep {
                    id: "precool",
                    title: "Facility Pre-cooling",
                    description: "Lower setpoints by 2°C to build thermal mass",
                    trigger_condition: "Forecast shows sustained high temperatures".into(),
                    execution_time_min: 15,
                    duration_min: 120,
                    status: executing_if(at_level),
                    success_probability: 88,
                    impact: impact(15, -10, 35),
                    dependencies: &["temp-monitor"],
                },
                PlanStep {
                    id: "load-balance",
                    title: "Intelligent Load Balancing",
                    description: "Redistribute workloads to cooler zones and defer non-critical tasks",
                    trigger_condition: "Server temperatures > 35°C".into(),
                    execution_time_min: 30,
                    duration_min: 60,
                    status: executing_if(at_level),
                    success_probability: 94,
                    impact: impact(20, 12, 40),
                    dependencies: &["temp-monitor"],
                },
                PlanStep {
                    id: "renewable-opt",
                    title: "Renewable Energy Optimization",
                    description: "Maximize solar generation and optimize battery charging cycles",
                    trigger_condition: "Grid demand > 85%".into(),
                    execution_time_min: 45,
                    duration_min: 180,
                    status: completed_if(state.renewable_penetration > 60.0),
                    success_probability: 85,
                    impact: impact(0, 25, 30),
                    dependencies: &["load-balance"],
                },
            ],
        },
        PlanLevel::Severe => HeatwavePlan {
            level,
            name: "Severe Heatwave Response",
            description: "Comprehensive response for temperatures 15-22°C above normal",
            trigger_temp,
            overall_success_probability: 87,
            historical: HistoricalPerformance {
                times_executed: 8,
                success_rate: 87.5,
                avg_duration_min: 240,
            },
            steps: vec![
                PlanStep {
                    id: "emergency-cooling",
                    title: "Emergency Cooling Activation",
                    description: "Activate backup chillers and maximize cooling capacity",
                    trigger_condition: temp_trigger,
                    execution_time_min: 0,
                    duration_min: 45,
                    status: executing_if(at_level),
                    success_probability: 95,
                    impact: impact(40, -25, 70),
                    dependencies: &[],
                },
                PlanStep {
                    id: "grid-disconnect",
                    title: "Planned Grid Disconnection",
                    description: "Switch to islanded mode to avoid grid instability",
                    trigger_condition: "Grid stability < 80%".into(),
                    execution_time_min: 20,
                    duration_min: 300,
                    status: completed_if(state.operation_mode == OperationMode::Islanded),
                    success_probability: 82,
                    impact: impact(0, 0, 60),
                    dependencies: &["emergency-cooling"],
                },
                PlanStep {
                    id: "critical-load-shed",
                    title: "Critical Load Shedding",
                    description: "Shut down non-essential systems and migrate critical workloads",
                    trigger_condition: "Cooling capacity < demand".into(),
                    execution_time_min: 35,
                    duration_min: 90,
                    status: completed_if(state.load_shifting),
                    success_probability: 90,
                    impact: impact(35, 40, 80),
                    dependencies: &["emergency-cooling", "grid-disconnect"],
                },
                PlanStep {
                    id: "backup-power",
                    title: "Backup Generator Activation",
                    description: "Start diesel generators for critical cooling systems",
                    trigger_condition: "Battery capacity < 30%".into(),
                    execution_time_min: 60,
                    duration_min: 480,
                    status: if state.backup_generators {
                        StepStatus::Ready
                    } else {
                        StepStatus::Pending
                    },
                    success_probability: 88,
                    impact: impact(0, -15, 85),
                    dependencies: &["grid-disconnect"],
                },
            ],
        },
        PlanLevel::Extreme => HeatwavePlan {
            level,
            name: "Extreme Heatwave Emergency",
            description: "Emergency protocols for temperatures >22°C above normal",
            trigger_temp,
            overall_success_probability: 78,
            historical: HistoricalPerformance {
                times_executed: 3,
                success_rate: 66.7,
                avg_duration_min: 360,
            },
            steps: vec![
                PlanStep {
                    id: "emergency-shutdown",
                    title: "Partial Emergency Shutdown",
                    description: "Shut down 50% of non-critical systems immediately",
                    trigger_condition: temp_trigger,
                    execution_time_min: 0,
                    duration_min: 15,
                    status: executing_if(at_level),
                    success_probability: 98,
                    impact: impact(50, 45, 60),
                    dependencies: &[],
                },
                PlanStep {
                    id: "max-cooling",
                    title: "Maximum Cooling Deployment",
                    description: "Deploy all available cooling resources including mobile units",
                    trigger_condition: "Emergency shutdown completed".into(),
                    execution_time_min: 10,
                    duration_min: 60,
                    status: executing_if(at_level),
                    success_probability: 85,
                    impact: impact(60, -40, 85),
                    dependencies: &["emergency-shutdown"],
                },
                PlanStep {
                    id: "workload-migration",
                    title: "Emergency Workload Migration",
                    description: "Migrate all critical workloads to remote facilities",
                    trigger_condition: "Local cooling insufficient".into(),
                    execution_time_min: 30,
                    duration_min: 120,
                    status: StepStatus::Ready,
                    success_probability: 75,
                    impact: impact(70, 60, 95),
                    dependencies: &["emergency-shutdown", "max-cooling"],
                },
                PlanStep {
                    id: "facility-evacuation",
                    title: "Controlled Facility Shutdown",
                    description: "Graceful shutdown of remaining systems if cooling fails",
                    trigger_condition: "Temperature > critical threshold".into(),
                    execution_time_min: 180,
                    duration_min: 60,
                    status: StepStatus::Pending,
                    success_probability: 95,
                    impact: impact(100, 90, 100),
                    dependencies: &["workload-migration"],
                },
            ],
        },
    }
}

/// All three plans, mildest first.
pub fn all_plans(state: &SimulationState, profile: &LocationProfile) -> Vec<HeatwavePlan> {
    PlanLevel::ALL
        .into_iter()
        .map(|level| plan(level, state, profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::Location;

    fn la() -> &'static LocationProfile {
        Location::LosAngeles.profile()
    }

    #[test]
    fn active_plan_thresholds() {
        // LA average is 28
        assert_eq!(active_plan(35, la()), None);
        assert_eq!(active_plan(36, la()), Some(PlanLevel::Moderate));
        assert_eq!(active_plan(42, la()), Some(PlanLevel::Moderate));
        assert_eq!(active_plan(43, la()), Some(PlanLevel::Severe));
        assert_eq!(active_plan(50, la()), Some(PlanLevel::Extreme));
        assert_eq!(active_plan(70, la()), Some(PlanLevel::Extreme));
    }

    #[test]
    fn trigger_temps_follow_site_average() {
        let fresno = Location::Fresno.profile();
        assert_eq!(PlanLevel::Moderate.trigger_temp(fresno), 43.0);
        assert_eq!(PlanLevel::Severe.trigger_temp(fresno), 50.0);
        assert_eq!(PlanLevel::Extreme.trigger_temp(fresno), 57.0);
        let p = plan(PlanLevel::Severe, &SimulationState::default(), fresno);
        assert_eq!(p.steps[0].trigger_condition, "Temperature > 50°C");
    }

    #[test]
    fn calm_statuses() {
        let state = SimulationState::default();
        let moderate = plan(PlanLevel::Moderate, &state, la());
        assert!(moderate.steps[..3].iter().all(|s| s.status == StepStatus::Ready));
        // renewable 45 is below 60
        assert_eq!(moderate.steps[3].status, StepStatus::Ready);

        let severe = plan(PlanLevel::Severe, &state, la());
        let statuses: Vec<_> = severe.steps.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            [
                StepStatus::Ready,
                StepStatus::Ready,
                StepStatus::Ready,
                StepStatus::Ready
            ]
        );

        let extreme = plan(PlanLevel::Extreme, &state, la());
        assert_eq!(extreme.steps[3].status, StepStatus::Pending);
    }

    #[test]
    fn matching_heatwave_executes_steps() {
        let state = SimulationState {
            heatwave_active: true,
            heatwave_intensity: HeatwaveIntensity::Extreme,
            ..SimulationState::default()
        };
        let extreme = plan(PlanLevel::Extreme, &state, la());
        assert_eq!(extreme.steps[0].status, StepStatus::Executing);
        assert_eq!(extreme.steps[1].status, StepStatus::Executing);
        let severe = plan(PlanLevel::Severe, &state, la());
        assert_eq!(severe.steps[0].status, StepStatus::Ready);
    }

    #[test]
    fn state_driven_statuses() {
        let state = SimulationState {
            renewable_penetration: 75.0,
            operation_mode: OperationMode::Islanded,
            load_shifting: true,
            backup_generators: false,
            ..SimulationState::default()
        };
        let moderate = plan(PlanLevel::Moderate, &state, la());
        assert_eq!(moderate.steps[3].status, StepStatus::Completed);
        let severe = plan(PlanLevel::Severe, &state, la());
        assert_eq!(severe.steps[1].status, StepStatus::Completed);
        assert_eq!(severe.steps[2].status, StepStatus::Completed);
        assert_eq!(severe.steps[3].status, StepStatus::Pending);
    }

    #[test]
    fn cumulative_success_timeline() {
        let p = plan(PlanLevel::Moderate, &SimulationState::default(), la());
        let timeline = p.success_timeline();
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline[0].step, 1);
        assert!((timeline[0].cumulative_probability - 99.0).abs() < 1e-9);
        // 0.99 * 0.88 * 0.94 * 0.85
        let expected = 0.99 * 0.88 * 0.94 * 0.85 * 100.0;
        assert!((timeline[3].cumulative_probability - expected).abs() < 1e-9);
        assert!(
            timeline
                .windows(2)
                .all(|w| w[1].cumulative_probability <= w[0].cumulative_probability)
        );
    }

    #[test]
    fn dependencies_name_earlier_steps() {
        for p in all_plans(&SimulationState::default(), la()) {
            assert!(p.unresolved_dependencies().is_empty(), "{}", p.name);
        }
    }

    #[test]
    fn audit_flags_forward_references() {
        let mut p = plan(PlanLevel::Severe, &SimulationState::default(), la());
        p.steps.swap(0, 1);
        assert_eq!(
            p.unresolved_dependencies(),
            [("grid-disconnect", "emergency-cooling")]
        );
    }

    #[test]
    fn plan_metadata() {
        let plans = all_plans(&SimulationState::default(), la());
        let success: Vec<_> = plans.iter().map(|p| p.overall_success_probability).collect();
        assert_eq!(success, [92, 87, 78]);
        assert_eq!(plans[2].historical.times_executed, 3);
    }
}
