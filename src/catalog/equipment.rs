//! Facility equipment status tables keyed by climate event and power state.

use serde::Serialize;

use crate::sim::types::{ClimateEvent, OperationMode, SimulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Operational,
    Warning,
    Critical,
    Offline,
}

/// Status record for one piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equipment {
    pub id: &'static str,
    pub name: String,
    pub status: EquipmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<u32>,
    pub efficiency: u32,
}

/// Every piece of equipment in the facility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityEquipment {
    pub servers: Vec<Equipment>,
    pub cooling: Vec<Equipment>,
    pub power: Vec<Equipment>,
    pub battery: Equipment,
}

const RACKS: [&str; 6] = ["R01", "R02", "R03", "R04", "R05", "R06"];
const COOLING_UNITS: [&str; 4] = ["AC01", "AC02", "AC03", "AC04"];
const PDUS: [&str; 3] = ["PDU01", "PDU02", "PDU03"];

fn server_rack(id: &'static str, event: ClimateEvent) -> Equipment {
    let (status, temperature, load) = match event {
        ClimateEvent::Heatwave if matches!(id, "R01" | "R02") => (EquipmentStatus::Warning, 42, 75),
        ClimateEvent::Heatwave => (EquipmentStatus::Operational, 42, 75),
        ClimateEvent::Flood if matches!(id, "R01" | "R02" | "R03") => {
            (EquipmentStatus::Critical, 24, 75)
        }
        ClimateEvent::Storm if id == "R04" => (EquipmentStatus::Warning, 24, 45),
        ClimateEvent::Storm => (EquipmentStatus::Operational, 24, 45),
        ClimateEvent::None | ClimateEvent::Flood | ClimateEvent::Wildfire => {
            (EquipmentStatus::Operational, 24, 75)
        }
    };
    let efficiency = match status {
        EquipmentStatus::Operational => 92,
        EquipmentStatus::Warning => 78,
        EquipmentStatus::Critical | EquipmentStatus::Offline => 45,
    };
    Equipment {
        id,
        name: format!("Server Rack {id}"),
        status,
        temperature: Some(temperature),
        load: Some(load),
        efficiency,
    }
}

fn cooling_unit(id: &'static str, event: ClimateEvent) -> Equipment {
    let (status, temperature, load) = match event {
        ClimateEvent::Heatwave if id == "AC01" => (EquipmentStatus::Critical, 28, 95),
        ClimateEvent::Heatwave => (EquipmentStatus::Operational, 28, 95),
        _ => (EquipmentStatus::Operational, 18, 60),
    };
    Equipment {
        id,
        name: format!("Cooling Unit {id}"),
        status,
        temperature: Some(temperature),
        load: Some(load),
        efficiency: if status == EquipmentStatus::Operational { 88 } else { 65 },
    }
}

fn power_unit(id: &'static str, event: ClimateEvent, mode: OperationMode) -> Equipment {
    let (status, load) = if mode == OperationMode::Islanded && id == "PDU01" {
        (EquipmentStatus::Offline, 0)
    } else if event == ClimateEvent::Storm {
        (EquipmentStatus::Warning, 85)
    } else {
        (EquipmentStatus::Operational, 70)
    };
    let efficiency = match status {
        EquipmentStatus::Operational => 94,
        EquipmentStatus::Warning => 82,
        EquipmentStatus::Critical | EquipmentStatus::Offline => 0,
    };
    Equipment {
        id,
        name: format!("Power Distribution Unit {id}"),
        status,
        temperature: None,
        load: Some(load),
        efficiency,
    }
}

/// Equipment table for `event` with the power state taken from `state`.
pub fn facility_equipment(state: &SimulationState, event: ClimateEvent) -> FacilityEquipment {
    FacilityEquipment {
        servers: RACKS.iter().map(|&id| server_rack(id, event)).collect(),
        cooling: COOLING_UNITS
            .iter()
            .map(|&id| cooling_unit(id, event))
            .collect(),
        power: PDUS
            .iter()
            .map(|&id| power_unit(id, event, state.operation_mode))
            .collect(),
        battery: Equipment {
            id: "BAT01",
            name: "Battery Storage System".to_string(),
            status: if state.battery_capacity > 30.0 {
                EquipmentStatus::Operational
            } else {
                EquipmentStatus::Warning
            },
            temperature: None,
            load: None,
            efficiency: 91,
        },
    }
}

/// One summary card: a headline value and a caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
}

/// The four facility summary cards.
pub fn facility_summary(state: &SimulationState) -> [SummaryCard; 4] {
    let hw = state.heatwave_active;
    let islanded = state.operation_mode == OperationMode::Islanded;
    let emergency = state.is_extreme_heatwave();
    [
        SummaryCard {
            title: "Server Racks",
            value: if hw { "22/24" } else { "24/24" },
            detail: if hw { "2 thermal throttling" } else { "All operational" },
        },
        SummaryCard {
            title: "Cooling Systems",
            value: if hw { "6/8" } else { "4/8" },
            detail: if hw { "Max cooling active" } else { "Normal operation" },
        },
        SummaryCard {
            title: "Power Systems",
            value: if islanded { "2/3" } else { "3/3" },
            detail: if islanded { "Grid disconnected" } else { "Grid connected" },
        },
        SummaryCard {
            title: "Emergency Status",
            value: if emergency { "ACTIVE" } else { "READY" },
            detail: if emergency { "Emergency protocols" } else { "Standby mode" },
        },
    ]
}
