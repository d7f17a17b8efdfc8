use rand::prelude::*;

use crate::operators::solution::Itinerary;

pub trait Crossover {
    fn apply(&self, parent_one: &Itinerary, parent_two: &Itinerary) -> Vec<Itinerary>;
}

/**
 * Partially matched crossover.
 *
 * Swaps a random segment of the two parent orders and repairs the
 * duplicates the swap introduces by following the position mapping of the
 * exchanged cities, so both children are valid permutations for any segment
 * boundaries, including empty and full-length segments. The mode sequences
 * are recombined independently of the orders with a per-position uniform
 * exchange between the two parents.
 */
pub struct PartiallyMatchedCrossover {
    pc: f64,
}

impl PartiallyMatchedCrossover {
    pub fn new(pc: f64) -> PartiallyMatchedCrossover {
        if pc < 0.0 || pc > 1.0 {
            panic!("Crossover probability must be between 0 and 1");
        }

        PartiallyMatchedCrossover { pc }
    }
}

impl Crossover for PartiallyMatchedCrossover {
    fn apply(&self, parent_one: &Itinerary, parent_two: &Itinerary) -> Vec<Itinerary> {
        let mut rng = thread_rng();

        if rng.gen::<f64>() > self.pc {
            return vec![parent_one.clone(), parent_two.clone()];
        }

        let length = parent_one.len();

        let mut order_a = parent_one.order.clone();
        let mut order_b = parent_two.order.clone();

        // Where each city currently sits in either order
        let mut pos_a = vec![0; length];
        let mut pos_b = vec![0; length];

        for i in 0..length {
            pos_a[order_a[i]] = i;
            pos_b[order_b[i]] = i;
        }

        let mut cut_one = rng.gen_range(0, length + 1);
        let mut cut_two = rng.gen_range(0, length + 1);

        if cut_one > cut_two {
            std::mem::swap(&mut cut_one, &mut cut_two);
        }

        for i in cut_one..cut_two {
            let city_a = order_a[i];
            let city_b = order_b[i];

            order_a.swap(i, pos_a[city_b]);
            order_b.swap(i, pos_b[city_a]);

            pos_a.swap(city_a, city_b);
            pos_b.swap(city_a, city_b);
        }

        // Fixed-position exchange of the mode choices
        let mut modes_a = parent_one.modes.clone();
        let mut modes_b = parent_two.modes.clone();

        for i in 0..modes_a.len().min(modes_b.len()) {
            if rng.gen::<bool>() {
                let temp = modes_a[i];
                modes_a[i] = modes_b[i];
                modes_b[i] = temp;
            }
        }

        let child_a = Itinerary::new(order_a, modes_a);
        let child_b = Itinerary::new(order_b, modes_b);

        vec![child_a, child_b]
    }
}
