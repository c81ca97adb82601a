//! Recommended mitigation actions for the current heatwave state.

use std::fmt;

use serde::Serialize;

use crate::sim::types::{HeatwaveIntensity, SimulationState};

/// Action urgency. Ordered so that `Critical` sorts highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cooling,
    Power,
    Load,
    Infrastructure,
}

/// One recommended action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
    pub category: Category,
    /// Free-text estimate; entries starting with `Revenue` earn rather than cost.
    pub cost_estimate: &'static str,
    pub time_to_implement: &'static str,
    /// Energy impact (%); negative means the action consumes more.
    pub energy_savings: i32,
    pub risk_reduction: u32,
    pub effectiveness: u32,
    pub prerequisites: &'static [&'static str],
}

const EMERGENCY_COOLING: Action = Action {
    id: "emergency-cooling",
    title: "Emergency Cooling Activation",
    description: "Activate all available cooling systems and emergency chillers to maintain critical temperatures",
    priority: Priority::Critical,
    category: Category::Cooling,
    cost_estimate: "$50,000/day",
    time_to_implement: "Immediate",
    energy_savings: -30,
    risk_reduction: 85,
    effectiveness: 95,
    prerequisites: &["Backup power available", "Emergency chillers operational"],
};

const LOAD_SHEDDING: Action = Action {
    id: "load-shedding",
    title: "Critical Load Shedding",
    description: "Shut down non-essential systems and migrate critical workloads to cooler facilities",
    priority: Priority::Critical,
    category: Category::Load,
    cost_estimate: "$25,000/hour",
    time_to_implement: "15 minutes",
    energy_savings: 40,
    risk_reduction: 70,
    effectiveness: 90,
    prerequisites: &["Workload migration capability", "Remote facility capacity"],
};

const GRID_DISCONNECT: Action = Action {
    id: "grid-disconnect",
    title: "Planned Grid Disconnection",
    description: "Switch to islanded mode to avoid grid instability during peak demand periods",
    priority: Priority::High,
    category: Category::Power,
    cost_estimate: "$15,000/day",
    time_to_implement: "30 minutes",
    energy_savings: 0,
    risk_reduction: 60,
    effectiveness: 85,
    prerequisites: &["Battery capacity >70%", "Renewable generation available"],
};

const PRECOOLING: Action = Action {
    id: "precooling",
    title: "Facility Pre-cooling",
    description: "Lower facility temperature during off-peak hours to build thermal mass",
    priority: Priority::High,
    category: Category::Cooling,
    cost_estimate: "$8,000/day",
    time_to_implement: "2 hours",
    energy_savings: 15,
    risk_reduction: 45,
    effectiveness: 80,
    prerequisites: &["Off-peak electricity rates", "Thermal storage capacity"],
};

const RENEWABLE_MAX: Action = Action {
    id: "renewable-max",
    title: "Maximize Renewable Generation",
    description: "Optimize solar panel angles and wind turbine operation for peak efficiency",
    priority: Priority::Medium,
    category: Category::Power,
    cost_estimate: "$2,000/day",
    time_to_implement: "1 hour",
    energy_savings: 25,
    risk_reduction: 30,
    effectiveness: 75,
    prerequisites: &["Solar tracking system", "Wind turbine control"],
};

const DEMAND_RESPONSE: Action = Action {
    id: "demand-response",
    title: "Demand Response Participation",
    description: "Participate in utility demand response programs to reduce grid stress",
    priority: Priority::Medium,
    category: Category::Load,
    cost_estimate: "Revenue: $5,000/day",
    time_to_implement: "Immediate",
    energy_savings: 20,
    risk_reduction: 25,
    effectiveness: 70,
    prerequisites: &["Utility program enrollment", "Load flexibility"],
};

const COOLING_UPGRADE: Action = Action {
    id: "cooling-upgrade",
    title: "Advanced Cooling System Upgrade",
    description: "Install liquid cooling systems and improve airflow management for better heat dissipation",
    priority: Priority::Medium,
    category: Category::Infrastructure,
    cost_estimate: "$500,000",
    time_to_implement: "3 months",
    energy_savings: 35,
    risk_reduction: 80,
    effectiveness: 90,
    prerequisites: &["Capital budget approval", "Facility downtime window"],
};

const BATTERY_EXPANSION: Action = Action {
    id: "battery-expansion",
    title: "Battery Storage Expansion",
    description: "Add 50% more battery capacity to improve islanded operation duration",
    priority: Priority::Low,
    category: Category::Infrastructure,
    cost_estimate: "$750,000",
    time_to_implement: "6 months",
    energy_savings: 10,
    risk_reduction: 65,
    effectiveness: 85,
    prerequisites: &["Space availability", "Grid interconnection approval"],
};

/// Builds the action list for `state`, most urgent first.
///
/// Actions of equal priority keep their insertion order.
pub fn recommended_actions(state: &SimulationState) -> Vec<Action> {
    let mut actions = Vec::with_capacity(8);
    let intensity = state.heatwave_intensity;

    if state.heatwave_active && intensity == HeatwaveIntensity::Extreme {
        actions.extend([EMERGENCY_COOLING, LOAD_SHEDDING]);
    }
    if state.heatwave_active && intensity >= HeatwaveIntensity::Severe {
        actions.extend([GRID_DISCONNECT, PRECOOLING]);
    }
    if state.heatwave_active {
        actions.extend([RENEWABLE_MAX, DEMAND_RESPONSE]);
    }
    actions.extend([COOLING_UPGRADE, BATTERY_EXPANSION]);

    actions.sort_by(|a, b| b.priority.cmp(&a.priority));
    actions
}

/// Aggregates over an action list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Sum of the digits of every non-revenue cost estimate, in dollars.
    pub total_cost: u64,
    /// Sum of energy impacts (%).
    pub total_energy_savings: i32,
    /// Mean risk reduction, rounded (%).
    pub avg_risk_reduction: u32,
}

/// Extracts the digits of a cost string as a number, `0` when there are none.
fn cost_digits(estimate: &str) -> u64 {
    let digits: String = estimate.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

pub fn summarize(actions: &[Action]) -> ActionSummary {
    let count = |p: Priority| actions.iter().filter(|a| a.priority == p).count();
    let total_cost = actions
        .iter()
        .filter(|a| !a.cost_estimate.contains("Revenue"))
        .map(|a| cost_digits(a.cost_estimate))
        .sum();
    let avg_risk_reduction = if actions.is_empty() {
        0
    } else {
        let total: u32 = actions.iter().map(|a| a.risk_reduction).sum();
        (f64::from(total) / actions.len() as f64).round() as u32
    };
    ActionSummary {
        critical: count(Priority::Critical),
        high: count(Priority::High),
        medium: count(Priority::Medium),
        low: count(Priority::Low),
        total_cost,
        total_energy_savings: actions.iter().map(|a| a.energy_savings).sum(),
        avg_risk_reduction,
    }
}
