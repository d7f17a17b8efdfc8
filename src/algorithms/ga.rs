use crate::configuration::{Replacement, RunConfig};
use crate::operators::{
    crossover::Crossover,
    evaluation::{evaluate_invalid, Evaluation},
    initialisation::InitPop,
    mutation::Mutation,
    selection::Selection,
    solution::Itinerary,
};

/**
 * Single-objective evolutionary loop.
 *
 * Each generation re-selects the population, breeds a pool of offspring and
 * splices them back in. Only genomes whose fitness was invalidated by a
 * variation operator are re-evaluated; the evaluation counter grows once
 * per actual fitness computation and the loop stops when it reaches the
 * budget. Returns the best itinerary of the final population.
 */
pub fn run<Init, Eval, Sel, Cross, Mut>(
    init_pop: &Init,
    evaluate: &Eval,
    selection: &Sel,
    crossover: &Cross,
    mutation: &Mut,
    config: &RunConfig,
    mut generation_observer: impl FnMut(usize, &[Itinerary]),
) -> Itinerary
where
    Init: InitPop,
    Eval: Evaluation + Sync,
    Sel: Selection,
    Cross: Crossover,
    Mut: Mutation,
{
    config.validate();

    let mut pop = init_pop.apply(config.pop_size);
    let mut evaluations = evaluate_invalid(&mut pop, evaluate);

    generation_observer(evaluations, &pop);

    while evaluations < config.max_evaluations {
        pop = selection.select(&pop, config.pop_size);

        let mut offspring = breed(
            &pop,
            selection,
            crossover,
            mutation,
            config.breeding_size(),
        );

        evaluations = evaluations + evaluate_invalid(&mut offspring, evaluate);

        splice(&mut pop, offspring, config.replacement);

        generation_observer(evaluations, &pop);
    }

    best_of(&pop).clone()
}

fn breed<Sel, Cross, Mut>(
    pop: &[Itinerary],
    selection: &Sel,
    crossover: &Cross,
    mutation: &Mut,
    breeding_size: usize,
) -> Vec<Itinerary>
where
    Sel: Selection,
    Cross: Crossover,
    Mut: Mutation,
{
    let pool = selection.select(pop, breeding_size);

    let mut offspring = Vec::with_capacity(pool.len());

    // Cross adjacent pairs, an odd tail passes through untouched
    for pair in pool.chunks(2) {
        if pair.len() == 2 {
            offspring.append(&mut crossover.apply(&pair[0], &pair[1]));
        } else {
            offspring.push(pair[0].clone());
        }
    }

    for ind in offspring.iter_mut() {
        *ind = mutation.apply(ind);
    }

    offspring
}

pub fn splice(pop: &mut Vec<Itinerary>, offspring: Vec<Itinerary>, replacement: Replacement) {
    match replacement {
        Replacement::Wholesale => {
            *pop = offspring;
        }
        Replacement::TrailingSlice => {
            let keep = pop.len().saturating_sub(offspring.len());
            pop.truncate(keep);
            pop.extend(offspring);
        }
    }
}

fn best_of(pop: &[Itinerary]) -> &Itinerary {
    let mut best = &pop[0];

    for ind in pop {
        if ind.fitness.values()[0] < best.fitness.values()[0] {
            best = ind;
        }
    }

    best
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::SelectionStrategy;
    use crate::models::travel::{Leg, TravelModel};
    use crate::operators::crossover::PartiallyMatchedCrossover;
    use crate::operators::evaluation::CostEvaluation;
    use crate::operators::initialisation::RandomTourInit;
    use crate::operators::mutation::ShuffleIndexesMutation;
    use crate::operators::selection::TournamentSelection;
    use crate::operators::solution::Fitness;

    fn four_city_model() -> TravelModel {
        // Complete, symmetric, integer costs
        let costs = [
            [0.0, 10.0, 15.0, 20.0],
            [10.0, 0.0, 35.0, 25.0],
            [15.0, 35.0, 0.0, 30.0],
            [20.0, 25.0, 30.0, 0.0],
        ];

        let mut table = vec![vec![None; 4]; 4];
        for from in 0..4 {
            for to in 0..4 {
                if from != to {
                    table[from][to] = Some(Leg {
                        cost: costs[from][to],
                        time: costs[from][to],
                    });
                }
            }
        }

        let locations = (0..4).map(|i| format!("City{}", i)).collect();

        TravelModel::new(locations, vec!["train".to_string()], vec![table])
    }

    fn test_config() -> RunConfig {
        RunConfig {
            pop_size: 20,
            max_evaluations: 2_000,
            cxpb: 0.6,
            order_mutpb: 0.4,
            order_indpb: 0.05,
            mode_mutpb: 0.0,
            mode_indpb: 0.0,
            tournsize: 4,
            selection: SelectionStrategy::Tournament,
            replacement: Replacement::TrailingSlice,
            breeding_fraction: 2.0 / 3.0,
            num_cities: 4,
            num_modes: 1,
        }
    }

    #[test]
    fn test_never_worse_than_first_random_tour() {
        let model = four_city_model();
        let config = test_config();

        let init_pop = RandomTourInit::new(config.num_cities);
        let evaluate = CostEvaluation::new(&model, 0);
        let selection = TournamentSelection::new(config.tournsize);
        let crossover = PartiallyMatchedCrossover::new(config.cxpb);
        let mutation = ShuffleIndexesMutation::new(config.order_mutpb, config.order_indpb);

        let mut first_cost = None;

        let best = run(
            &init_pop,
            &evaluate,
            &selection,
            &crossover,
            &mutation,
            &config,
            |_, pop| {
                if first_cost.is_none() {
                    first_cost = Some(pop[0].fitness.values()[0]);
                }
            },
        );

        assert!(best.fitness.values()[0] <= first_cost.unwrap());
    }

    #[test]
    fn test_budget_is_exhausted() {
        let model = four_city_model();
        let config = test_config();

        let init_pop = RandomTourInit::new(config.num_cities);
        let evaluate = CostEvaluation::new(&model, 0);
        let selection = TournamentSelection::new(config.tournsize);
        let crossover = PartiallyMatchedCrossover::new(config.cxpb);
        let mutation = ShuffleIndexesMutation::new(config.order_mutpb, config.order_indpb);

        let mut last_evaluations = 0;
        let mut last_pop_size = 0;

        run(
            &init_pop,
            &evaluate,
            &selection,
            &crossover,
            &mutation,
            &config,
            |evaluations, pop| {
                // The counter only grows
                assert!(evaluations >= last_evaluations);

                last_evaluations = evaluations;
                last_pop_size = pop.len();
            },
        );

        assert!(last_evaluations >= config.max_evaluations);
        assert_eq!(last_pop_size, config.pop_size);
    }

    #[test]
    fn test_splice() {
        let ind = |id: usize| {
            let mut ind = Itinerary::new(vec![id], Vec::new());
            ind.fitness = Fitness::Valued(vec![id as f64]);
            ind
        };

        let mut pop: Vec<Itinerary> = (0..6).map(ind).collect();
        splice(&mut pop, vec![ind(10), ind(11)], Replacement::TrailingSlice);

        assert_eq!(pop.len(), 6);
        assert_eq!(pop[3].order, vec![3]);
        assert_eq!(pop[4].order, vec![10]);
        assert_eq!(pop[5].order, vec![11]);

        let mut pop: Vec<Itinerary> = (0..6).map(ind).collect();
        splice(&mut pop, vec![ind(10), ind(11)], Replacement::Wholesale);

        assert_eq!(pop.len(), 2);
        assert_eq!(pop[0].order, vec![10]);
    }
}
