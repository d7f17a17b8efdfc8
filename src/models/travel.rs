use serde::{Deserialize, Serialize};

pub type LocationId = usize;

/// One directed connection between two cities under a single transport mode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub cost: f64,
    pub time: f64,
}

/// N x N table of connections for one mode. `None` means no direct connection.
pub type ModeTable = Vec<Vec<Option<Leg>>>;

/**
 * Read-only cost/time lookup for every (mode, origin, destination) triple.
 *
 * Built once by the caller before a run starts and borrowed by the
 * evaluation operators. Shape and value checks happen here so that the
 * evolution loop can assume a fully-formed model.
 */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TravelModel {
    locations: Vec<String>,
    modes: Vec<String>,
    tables: Vec<ModeTable>,
}

impl TravelModel {
    pub fn new(locations: Vec<String>, modes: Vec<String>, tables: Vec<ModeTable>) -> TravelModel {
        if locations.len() < 2 {
            panic!("A travel model needs at least two locations");
        }

        if modes.is_empty() {
            panic!("A travel model needs at least one transport mode");
        }

        if tables.len() != modes.len() {
            panic!(
                "Expected one table per mode, found {} tables for {} modes",
                tables.len(),
                modes.len()
            );
        }

        for (m, table) in tables.iter().enumerate() {
            if table.len() != locations.len() {
                panic!(
                    "Table for mode '{}' has {} rows, expected {}",
                    modes[m],
                    table.len(),
                    locations.len()
                );
            }

            for row in table {
                if row.len() != locations.len() {
                    panic!(
                        "Table for mode '{}' has a row of {} entries, expected {}",
                        modes[m],
                        row.len(),
                        locations.len()
                    );
                }

                for leg in row.iter().flatten() {
                    if leg.cost < 0.0 || leg.time < 0.0 {
                        panic!("Costs and times must be non-negative");
                    }
                }
            }
        }

        TravelModel {
            locations,
            modes,
            tables,
        }
    }

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn num_modes(&self) -> usize {
        self.modes.len()
    }

    pub fn location_name(&self, id: LocationId) -> &str {
        &self.locations[id]
    }

    pub fn mode_name(&self, mode: usize) -> &str {
        &self.modes[mode]
    }

    pub fn mode_id(&self, name: &str) -> Option<usize> {
        self.modes.iter().position(|mode| mode == name)
    }

    pub fn leg(&self, mode: usize, from: LocationId, to: LocationId) -> Option<Leg> {
        self.tables[mode][from][to]
    }

    pub fn set_leg(&mut self, mode: usize, from: LocationId, to: LocationId, leg: Option<Leg>) {
        self.tables[mode][from][to] = leg;
    }
}
