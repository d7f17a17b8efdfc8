/// Which breeding-pool selection the run uses. Fixed at configuration time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectionStrategy {
    Tournament,
    Ranked,
}

impl SelectionStrategy {
    pub fn from_name(name: &str) -> SelectionStrategy {
        match name {
            "tournament" => SelectionStrategy::Tournament,
            "ranked" => SelectionStrategy::Ranked,
            _ => panic!("Unknown selection strategy '{}'", name),
        }
    }
}

/// How offspring are spliced back into the population each generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Replacement {
    /// The population is entirely replaced by the offspring
    Wholesale,
    /// The offspring overwrite the population tail, keeping the head
    TrailingSlice,
}

impl Replacement {
    pub fn from_name(name: &str) -> Replacement {
        match name {
            "wholesale" => Replacement::Wholesale,
            "trailing" => Replacement::TrailingSlice,
            _ => panic!("Unknown replacement policy '{}'", name),
        }
    }
}

/**
 * Everything a run needs to know, validated up front so a malformed
 * configuration never starts the loop. Threaded explicitly through the
 * evolution loops; there is no ambient state.
 */
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub pop_size: usize,
    pub max_evaluations: usize,
    pub cxpb: f64,
    pub order_mutpb: f64,
    pub order_indpb: f64,
    pub mode_mutpb: f64,
    pub mode_indpb: f64,
    pub tournsize: usize,
    pub selection: SelectionStrategy,
    pub replacement: Replacement,
    pub breeding_fraction: f64,
    pub num_cities: usize,
    pub num_modes: usize,
}

impl RunConfig {
    pub fn validate(&self) {
        if self.pop_size == 0 {
            panic!("Population size must be 1 or greater");
        }

        if self.max_evaluations == 0 {
            panic!("Evaluation budget must be 1 or greater");
        }

        for &probability in &[
            self.cxpb,
            self.order_mutpb,
            self.order_indpb,
            self.mode_mutpb,
            self.mode_indpb,
        ] {
            if probability < 0.0 || probability > 1.0 {
                panic!("Probabilities must be between 0 and 1");
            }
        }

        // With no variation at all no fitness is ever recomputed and the
        // evaluation budget cannot be exhausted
        if self.cxpb == 0.0 && self.order_mutpb == 0.0 && self.mode_mutpb == 0.0 {
            panic!("At least one variation probability must be positive");
        }

        if self.selection == SelectionStrategy::Tournament && self.tournsize == 0 {
            panic!("Tournament size must be 1 or greater");
        }

        if self.breeding_fraction <= 0.0 || self.breeding_fraction > 1.0 {
            panic!("Breeding fraction must be in (0, 1]");
        }

        if self.num_cities < 2 {
            panic!("At least two cities are required");
        }

        if self.num_modes == 0 {
            panic!("At least one transport mode is required");
        }
    }

    pub fn breeding_size(&self) -> usize {
        let size = (self.pop_size as f64 * self.breeding_fraction) as usize;

        size.max(2)
    }
}
