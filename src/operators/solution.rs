/**
 * A candidate itinerary: the order the cities are visited in plus, for the
 * mode-aware search, the transport mode taken on each leg.
 *
 * The tour is implicitly cyclic. Leg i runs from order[i - 1] to order[i]
 * and leg 0 closes the loop from the last city back to the first. The mode
 * sequence is empty when the search runs over a single fixed mode.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Itinerary {
    pub order: Vec<usize>,
    pub modes: Vec<usize>,
    pub fitness: Fitness,
}

impl Itinerary {
    pub fn new(order: Vec<usize>, modes: Vec<usize>) -> Itinerary {
        Itinerary {
            order,
            modes,
            fitness: Fitness::Invalid,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    // Domination: equal to or better than in all objectives and strictly
    // better than in one. Minimisation on every objective.
    pub fn dominates(&self, other: &Itinerary) -> bool {
        let self_obj = self.fitness.values();
        let other_obj = other.fitness.values();

        let num_obj = self_obj.len();

        let mut num_better = 0;
        let mut num_worse = 0;

        for i in 0..num_obj {
            if self_obj[i] < other_obj[i] {
                num_better = num_better + 1;
            } else if self_obj[i] > other_obj[i] {
                num_worse = num_worse + 1;
            }
        }

        num_better > 0 && num_worse == 0
    }
}

/**
 * Objective values of an itinerary. `Invalid` marks a genome whose content
 * changed since it was last evaluated; every variation operator that touches
 * a genome resets its fitness to `Invalid` and the loop re-evaluates only
 * those. An unreachable leg does not make a fitness `Invalid`: evaluation
 * yields positive infinity in every objective instead, so infeasible
 * itineraries stay comparable and are dominated by any feasible one.
 */
#[derive(Clone, Debug, PartialEq)]
pub enum Fitness {
    Valued(Vec<f64>),
    Invalid,
}

impl Fitness {
    pub fn is_valid(&self) -> bool {
        match self {
            Fitness::Valued(_) => true,
            Fitness::Invalid => false,
        }
    }

    pub fn values(&self) -> &[f64] {
        match self {
            Fitness::Valued(values) => values,
            Fitness::Invalid => panic!("Undefined fitness values"),
        }
    }
}
