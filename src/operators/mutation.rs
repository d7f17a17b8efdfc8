use rand::prelude::*;

use crate::operators::solution::{Fitness, Itinerary};

pub trait Mutation {
    fn apply(&self, ind: &Itinerary) -> Itinerary;
}

/*** Shuffle-indexes mutation on the visiting order ***/
#[derive(Clone)]
pub struct ShuffleIndexesMutation {
    pm: f64,
    indpb: f64, // Per-position swap rate
}

impl ShuffleIndexesMutation {
    pub fn new(pm: f64, indpb: f64) -> ShuffleIndexesMutation {
        if pm < 0.0 || pm > 1.0 || indpb < 0.0 || indpb > 1.0 {
            panic!("Mutation probabilities must be between 0 and 1");
        }

        ShuffleIndexesMutation { pm, indpb }
    }
}

impl Mutation for ShuffleIndexesMutation {
    fn apply(&self, ind: &Itinerary) -> Itinerary {
        let mut ind = ind.clone();

        let mut rng = thread_rng();
        if rng.gen::<f64>() > self.pm {
            return ind;
        }

        let length = ind.order.len();
        if length < 2 {
            return ind;
        }

        for i in 0..length {
            if rng.gen::<f64>() > self.indpb {
                continue;
            }

            // Swap with another position, never with itself
            let mut swap = rng.gen_range(0, length - 1);
            if swap >= i {
                swap = swap + 1;
            }

            ind.order.swap(i, swap);
        }

        ind.fitness = Fitness::Invalid;

        ind
    }
}

/*** Uniform resampling of the mode choices ***/
#[derive(Clone)]
pub struct ModeResampleMutation {
    pm: f64,
    indpb: f64, // Per-leg resample rate
    num_modes: usize,
}

impl ModeResampleMutation {
    pub fn new(pm: f64, indpb: f64, num_modes: usize) -> ModeResampleMutation {
        if pm < 0.0 || pm > 1.0 || indpb < 0.0 || indpb > 1.0 {
            panic!("Mutation probabilities must be between 0 and 1");
        }

        if num_modes == 0 {
            panic!("At least one transport mode is required");
        }

        ModeResampleMutation {
            pm,
            indpb,
            num_modes,
        }
    }
}

impl Mutation for ModeResampleMutation {
    fn apply(&self, ind: &Itinerary) -> Itinerary {
        let mut ind = ind.clone();

        let mut rng = thread_rng();
        if rng.gen::<f64>() > self.pm {
            return ind;
        }

        for i in 0..ind.modes.len() {
            if rng.gen::<f64>() > self.indpb {
                continue;
            }

            ind.modes[i] = rng.gen_range(0, self.num_modes);
        }

        ind.fitness = Fitness::Invalid;

        ind
    }
}
