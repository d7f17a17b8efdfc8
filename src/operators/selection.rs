use rand::prelude::*;
use std::cmp::Ordering;

use crate::operators::solution::Itinerary;

pub trait Selection {
    fn select(&self, pop: &[Itinerary], k: usize) -> Vec<Itinerary>;
}

/*** Tournament selection on a single objective ***/
pub struct TournamentSelection {
    tournsize: usize,
}

impl TournamentSelection {
    pub fn new(tournsize: usize) -> TournamentSelection {
        if tournsize == 0 {
            panic!("Tournament size must be 1 or greater");
        }

        TournamentSelection { tournsize }
    }

    // Contenders are drawn with replacement. Ties go to the earlier draw.
    fn tournament(&self, pop: &[Itinerary], rng: &mut ThreadRng) -> usize {
        let mut curr_best = rng.gen_range(0, pop.len());

        for _ in 0..self.tournsize - 1 {
            let contender = rng.gen_range(0, pop.len());

            if pop[contender].fitness.values()[0] < pop[curr_best].fitness.values()[0] {
                curr_best = contender;
            }
        }

        curr_best
    }
}

impl Selection for TournamentSelection {
    fn select(&self, pop: &[Itinerary], k: usize) -> Vec<Itinerary> {
        if pop.is_empty() {
            panic!("Cannot select from an empty population");
        }

        let mut rng = thread_rng();

        (0..k)
            .map(|_| pop[self.tournament(pop, &mut rng)].clone())
            .collect()
    }
}

/*** Non-domination rank and crowding based selection ***/
pub struct RankedSelection;

impl RankedSelection {
    pub fn new() -> RankedSelection {
        RankedSelection
    }
}

impl Selection for RankedSelection {
    fn select(&self, pop: &[Itinerary], k: usize) -> Vec<Itinerary> {
        if k > pop.len() {
            panic!("Cannot select more individuals than the population holds");
        }

        let mut fronts = fast_nondominated_sort(pop);

        let mut pool = Vec::with_capacity(k);

        for front in fronts.iter_mut() {
            crowding_distance_assignment(front);

            if pool.len() + front.len() <= k {
                pool.extend(front.iter().map(|ranked| ranked.ind.clone()));
            } else {
                // Fill the remainder from the partial rank, most isolated first
                front.sort_by(|x, y| crowding_comparison(x, y));

                for ranked in front.iter().take(k - pool.len()) {
                    pool.push(ranked.ind.clone());
                }
            }

            if pool.len() == k {
                break;
            }
        }

        pool
    }
}

// Wrapper around Itinerary with the bookkeeping used by ranked selection
#[derive(Clone, Debug)]
pub struct RankedItinerary {
    pub ind: Itinerary,
    pub rank: usize,
    pub crowding_dist: f64,
}

impl RankedItinerary {
    fn new(ind: Itinerary, rank: usize) -> RankedItinerary {
        RankedItinerary {
            ind,
            rank,
            crowding_dist: 0.0,
        }
    }
}

pub fn fast_nondominated_sort(pop: &[Itinerary]) -> Vec<Vec<RankedItinerary>> {
    let mut dominates = Vec::with_capacity(pop.len());
    let mut dom_counted = Vec::with_capacity(pop.len());

    let mut ranks = vec![Vec::new()];
    let mut output = vec![Vec::new()];

    for p in 0..pop.len() {
        let mut p_dominates = Vec::new();
        let mut dom_count = 0;

        for q in 0..pop.len() {
            if pop[p].dominates(&pop[q]) {
                p_dominates.push(q);
            } else if pop[q].dominates(&pop[p]) {
                dom_count = dom_count + 1;
            }
        }

        if dom_count == 0 {
            ranks[0].push(p);
            output[0].push(RankedItinerary::new(pop[p].clone(), 0));
        }

        dominates.push(p_dominates);
        dom_counted.push(dom_count);
    }

    let mut i = 0;
    while !ranks[i].is_empty() {
        let mut next_rank = Vec::new();
        let mut next_output = Vec::new();

        for p in &ranks[i] {
            for q in &dominates[*p] {
                dom_counted[*q] -= 1;

                if dom_counted[*q] == 0 {
                    next_rank.push(*q);
                    next_output.push(RankedItinerary::new(pop[*q].clone(), i + 1));
                }
            }
        }

        i = i + 1;
        ranks.push(next_rank);
        output.push(next_output);
    }

    output
}

pub fn crowding_distance_assignment(front: &mut [RankedItinerary]) {
    if front.is_empty() {
        return;
    }

    let num_obj = front[0].ind.fitness.values().len();

    for ind in front.iter_mut() {
        ind.crowding_dist = 0.0;
    }

    let mut idxs: Vec<usize> = (0..front.len()).collect();

    for m in 0..num_obj {
        idxs.sort_by(|&x, &y| {
            front[x].ind.fitness.values()[m]
                .partial_cmp(&front[y].ind.fitness.values()[m])
                .unwrap()
        });

        let l = front.len() - 1;

        let min_idx = idxs[0];
        let max_idx = idxs[l];

        front[min_idx].crowding_dist = std::f64::INFINITY;
        front[max_idx].crowding_dist = std::f64::INFINITY;

        let obj_min = front[min_idx].ind.fitness.values()[m];
        let obj_max = front[max_idx].ind.fitness.values()[m];

        let diff = if obj_min == obj_max {
            1.0
        } else {
            obj_max - obj_min
        };

        if l <= 1 {
            continue;
        }

        for i in 1..l {
            let curr = idxs[i];
            let next = idxs[i + 1];
            let pre = idxs[i - 1];

            let gap = (front[next].ind.fitness.values()[m] - front[pre].ind.fitness.values()[m])
                / diff;

            // Unreachable itineraries carry infinite objectives
            if gap.is_finite() {
                front[curr].crowding_dist += gap;
            }
        }
    }
}

pub fn crowding_comparison(ind_a: &RankedItinerary, ind_b: &RankedItinerary) -> Ordering {
    if ind_a.rank < ind_b.rank
        || (ind_a.rank == ind_b.rank && ind_a.crowding_dist > ind_b.crowding_dist)
    {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// The non-dominated members of the current population, for reporting.
pub fn first_front(pop: &[Itinerary]) -> Vec<Itinerary> {
    if pop.is_empty() {
        return Vec::new();
    }

    let mut fronts = fast_nondominated_sort(pop);

    fronts
        .swap_remove(0)
        .into_iter()
        .map(|ranked| ranked.ind)
        .collect()
}
