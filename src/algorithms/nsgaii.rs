use crate::configuration::RunConfig;
use crate::operators::{
    crossover::Crossover,
    evaluation::{evaluate_invalid, Evaluation},
    initialisation::InitPop,
    mutation::Mutation,
    selection::Selection,
    solution::Itinerary,
};
use crate::utilities::nds::ParetoArchive;

use super::ga::splice;

/**
 * Multi-objective evolutionary loop.
 *
 * Each generation draws a breeding pool with the configured selection
 * (rank and crowding based for NSGA-II behaviour), breeds offspring with
 * order crossover plus the two mutations, re-evaluates invalidated genomes
 * and splices the offspring back in. The archive of all-time non-dominated
 * itineraries is updated from every generation's population and returned
 * when the evaluation budget runs out.
 */
pub fn run<Init, Eval, Sel, Cross, MutO, MutM>(
    init_pop: &Init,
    evaluate: &Eval,
    selection: &Sel,
    crossover: &Cross,
    order_mutation: &MutO,
    mode_mutation: &MutM,
    config: &RunConfig,
    mut generation_observer: impl FnMut(usize, &[Itinerary], &ParetoArchive),
) -> ParetoArchive
where
    Init: InitPop,
    Eval: Evaluation + Sync,
    Sel: Selection,
    Cross: Crossover,
    MutO: Mutation,
    MutM: Mutation,
{
    config.validate();

    let mut pop = init_pop.apply(config.pop_size);
    let mut evaluations = evaluate_invalid(&mut pop, evaluate);

    let mut archive = ParetoArchive::new(false);
    archive.update(&pop);

    generation_observer(evaluations, &pop, &archive);

    while evaluations < config.max_evaluations {
        let mut offspring = breed(
            &pop,
            selection,
            crossover,
            order_mutation,
            mode_mutation,
            config.breeding_size(),
        );

        evaluations = evaluations + evaluate_invalid(&mut offspring, evaluate);

        splice(&mut pop, offspring, config.replacement);

        archive.update(&pop);

        generation_observer(evaluations, &pop, &archive);
    }

    archive
}

fn breed<Sel, Cross, MutO, MutM>(
    pop: &[Itinerary],
    selection: &Sel,
    crossover: &Cross,
    order_mutation: &MutO,
    mode_mutation: &MutM,
    breeding_size: usize,
) -> Vec<Itinerary>
where
    Sel: Selection,
    Cross: Crossover,
    MutO: Mutation,
    MutM: Mutation,
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
        *ind = order_mutation.apply(ind);
        *ind = mode_mutation.apply(ind);
    }

    offspring
}
