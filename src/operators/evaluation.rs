use rayon::prelude::*;

use crate::models::travel::TravelModel;
use crate::operators::solution::{Fitness, Itinerary};

pub trait Evaluation {
    fn num_objectives(&self) -> usize;
    fn evaluate_ind(&self, ind: &Itinerary) -> Vec<f64>;
}

/**
 * Evaluates every member whose fitness is marked `Invalid`, in parallel, and
 * returns how many evaluations were spent. The caller adds the count to the
 * evaluation budget after the barrier.
 */
pub fn evaluate_invalid<E: Evaluation + Sync>(pop: &mut Vec<Itinerary>, evaluate: &E) -> usize {
    pop.par_iter_mut()
        .map(|ind| {
            if ind.fitness.is_valid() {
                0
            } else {
                let objectives = evaluate.evaluate_ind(ind);
                ind.fitness = Fitness::Valued(objectives);
                1
            }
        })
        .sum()
}

/*** Total cost over a single fixed mode ***/
pub struct CostEvaluation<'a> {
    model: &'a TravelModel,
    mode: usize,
}

impl<'a> CostEvaluation<'a> {
    pub fn new(model: &'a TravelModel, mode: usize) -> CostEvaluation<'a> {
        if mode >= model.num_modes() {
            panic!("Unknown transport mode {}", mode);
        }

        CostEvaluation { model, mode }
    }
}

impl Evaluation for CostEvaluation<'_> {
    fn num_objectives(&self) -> usize {
        1
    }

    fn evaluate_ind(&self, ind: &Itinerary) -> Vec<f64> {
        let order = &ind.order;
        let mut sum_cost = 0.0;

        for i in 0..order.len() {
            let from = if i == 0 {
                order[order.len() - 1]
            } else {
                order[i - 1]
            };

            match self.model.leg(self.mode, from, order[i]) {
                Some(leg) => sum_cost = sum_cost + leg.cost,
                None => return vec![std::f64::INFINITY],
            }
        }

        vec![sum_cost]
    }
}

/*** Cost and time with a mode choice per leg ***/
pub struct CostTimeEvaluation<'a> {
    model: &'a TravelModel,
}

impl<'a> CostTimeEvaluation<'a> {
    pub fn new(model: &'a TravelModel) -> CostTimeEvaluation<'a> {
        CostTimeEvaluation { model }
    }
}

impl Evaluation for CostTimeEvaluation<'_> {
    fn num_objectives(&self) -> usize {
        2
    }

    fn evaluate_ind(&self, ind: &Itinerary) -> Vec<f64> {
        let order = &ind.order;

        if ind.modes.len() != order.len() {
            panic!("Itinerary carries no mode choice for some legs");
        }

        let mut sum_cost = 0.0;
        let mut sum_time = 0.0;

        for i in 0..order.len() {
            let from = if i == 0 {
                order[order.len() - 1]
            } else {
                order[i - 1]
            };

            match self.model.leg(ind.modes[i], from, order[i]) {
                Some(leg) => {
                    sum_cost = sum_cost + leg.cost;
                    sum_time = sum_time + leg.time;
                }
                None => return vec![std::f64::INFINITY, std::f64::INFINITY],
            }
        }

        vec![sum_cost, sum_time]
    }
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::travel::{Leg, TravelModel};

    fn small_model() -> TravelModel {
        // Asymmetric so the direction of a leg matters
        let costs = [
            [0.0, 10.0, 15.0],
            [12.0, 0.0, 35.0],
            [18.0, 30.0, 0.0],
        ];

        let mut slow = vec![vec![None; 3]; 3];
        let mut fast = vec![vec![None; 3]; 3];

        for from in 0..3 {
            for to in 0..3 {
                if from == to {
                    continue;
                }

                slow[from][to] = Some(Leg {
                    cost: costs[from][to],
                    time: costs[from][to] * 10.0,
                });
                fast[from][to] = Some(Leg {
                    cost: costs[from][to] * 3.0,
                    time: costs[from][to] * 2.0,
                });
            }
        }

        // The fast mode is missing one connection
        fast[2][0] = None;

        TravelModel::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec!["slow".to_string(), "fast".to_string()],
            vec![slow, fast],
        )
    }

    #[test]
    fn test_cost_evaluation() {
        let model = small_model();
        let evaluate = CostEvaluation::new(&model, 0);

        let ind = Itinerary::new(vec![0, 1, 2], Vec::new());

        // Legs: 2 -> 0, 0 -> 1, 1 -> 2
        assert_eq!(evaluate.num_objectives(), 1);
        assert_eq!(evaluate.evaluate_ind(&ind), vec![18.0 + 10.0 + 35.0]);
    }

    #[test]
    fn test_cost_time_evaluation() {
        let model = small_model();
        let evaluate = CostTimeEvaluation::new(&model);

        // Leg 0 (2 -> 0) by slow, leg 1 (0 -> 1) by fast, leg 2 (1 -> 2) by slow
        let ind = Itinerary::new(vec![0, 1, 2], vec![0, 1, 0]);

        let expected_cost = 18.0 + 10.0 * 3.0 + 35.0;
        let expected_time = 18.0 * 10.0 + 10.0 * 2.0 + 35.0 * 10.0;

        assert_eq!(evaluate.num_objectives(), 2);
        assert_eq!(evaluate.evaluate_ind(&ind), vec![expected_cost, expected_time]);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let model = small_model();
        let evaluate = CostTimeEvaluation::new(&model);

        let ind = Itinerary::new(vec![2, 0, 1], vec![1, 0, 1]);

        let first = evaluate.evaluate_ind(&ind);
        for _ in 0..10 {
            assert_eq!(evaluate.evaluate_ind(&ind), first);
        }
    }

    #[test]
    fn test_unreachable_leg() {
        let model = small_model();
        let evaluate = CostTimeEvaluation::new(&model);

        // Leg 0 (2 -> 0) by fast has no connection
        let ind = Itinerary::new(vec![0, 1, 2], vec![1, 0, 0]);

        let objectives = evaluate.evaluate_ind(&ind);
        assert_eq!(objectives.len(), 2);
        assert!(objectives.iter().all(|value| value.is_infinite()));
    }

    #[test]
    fn test_evaluate_invalid_skips_valued() {
        let model = small_model();
        let evaluate = CostEvaluation::new(&model, 0);

        let mut pop = vec![
            Itinerary::new(vec![0, 1, 2], Vec::new()),
            Itinerary::new(vec![2, 1, 0], Vec::new()),
        ];
        pop[1].fitness = Fitness::Valued(vec![999.0]);

        let evaluated = evaluate_invalid(&mut pop, &evaluate);

        assert_eq!(evaluated, 1);
        assert!(pop.iter().all(|ind| ind.fitness.is_valid()));

        // The valued member was left alone
        assert_eq!(pop[1].fitness.values(), &[999.0]);
    }

    #[test]
    #[should_panic(expected = "Unknown transport mode")]
    fn test_unknown_mode() {
        let model = small_model();
        CostEvaluation::new(&model, 7);
    }
}
