use rand::prelude::*;

use crate::operators::solution::Itinerary;

pub trait InitPop {
    fn apply(&self, pop_size: usize) -> Vec<Itinerary>;
}

/*** Random tours over a single fixed mode ***/
pub struct RandomTourInit {
    num_locations: usize,
}

impl RandomTourInit {
    pub fn new(num_locations: usize) -> RandomTourInit {
        if num_locations < 2 {
            panic!("At least two locations are required");
        }

        RandomTourInit { num_locations }
    }
}

impl InitPop for RandomTourInit {
    fn apply(&self, pop_size: usize) -> Vec<Itinerary> {
        let mut rng = thread_rng();
        let mut population = Vec::with_capacity(pop_size);

        for _ in 0..pop_size {
            let mut order: Vec<usize> = (0..self.num_locations).collect();
            order.shuffle(&mut rng);

            population.push(Itinerary::new(order, Vec::new()));
        }

        population
    }
}

/*** Random tours with a random mode per leg ***/
pub struct RandomItineraryInit {
    num_locations: usize,
    num_modes: usize,
}

impl RandomItineraryInit {
    pub fn new(num_locations: usize, num_modes: usize) -> RandomItineraryInit {
        if num_locations < 2 {
            panic!("At least two locations are required");
        }

        if num_modes == 0 {
            panic!("At least one transport mode is required");
        }

        RandomItineraryInit {
            num_locations,
            num_modes,
        }
    }
}

impl InitPop for RandomItineraryInit {
    fn apply(&self, pop_size: usize) -> Vec<Itinerary> {
        let mut rng = thread_rng();
        let mut population = Vec::with_capacity(pop_size);

        for _ in 0..pop_size {
            let mut order: Vec<usize> = (0..self.num_locations).collect();
            order.shuffle(&mut rng);

            let modes = (0..self.num_locations)
                .map(|_| rng.gen_range(0, self.num_modes))
                .collect();

            population.push(Itinerary::new(order, modes));
        }

        population
    }
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;

    pub fn assert_permutation(order: &[usize], n: usize) {
        assert_eq!(order.len(), n);

        let mut counts = vec![0; n];
        for &city in order {
            counts[city] = counts[city] + 1;
        }

        for count in counts {
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_random_tour_init() {
        let num_locations = 25;
        let pop_size = 40;

        let init = RandomTourInit::new(num_locations);
        let population = init.apply(pop_size);

        assert_eq!(population.len(), pop_size);

        for ind in &population {
            assert_permutation(&ind.order, num_locations);
            assert!(ind.modes.is_empty());
            assert!(!ind.fitness.is_valid());
        }

        // Shuffling actually happened somewhere
        let identity: Vec<usize> = (0..num_locations).collect();
        assert!(population.iter().any(|ind| ind.order != identity));
    }

    #[test]
    fn test_random_itinerary_init() {
        let num_locations = 25;
        let num_modes = 3;
        let pop_size = 40;

        let init = RandomItineraryInit::new(num_locations, num_modes);
        let population = init.apply(pop_size);

        assert_eq!(population.len(), pop_size);

        for ind in &population {
            assert_permutation(&ind.order, num_locations);
            assert_eq!(ind.modes.len(), num_locations);

            for &mode in &ind.modes {
                assert!(mode < num_modes);
            }
        }

        // All modes show up across the population
        for mode in 0..num_modes {
            assert!(population
                .iter()
                .any(|ind| ind.modes.contains(&mode)));
        }
    }

    #[test]
    #[should_panic(expected = "At least two locations")]
    fn test_too_few_locations() {
        RandomTourInit::new(1);
    }

    #[test]
    #[should_panic(expected = "At least one transport mode")]
    fn test_no_modes() {
        RandomItineraryInit::new(10, 0);
    }
}
