use crate::operators::solution::Itinerary;

/**
 * All-time archive of the non-dominated itineraries seen over a run.
 *
 * The archive is an antichain under the dominance order: inserting a
 * candidate removes every member it dominates, and a candidate dominated by
 * any member is rejected. With `accept_duplicates` off, a candidate whose
 * objective values match an existing member is also rejected, so the
 * archive keeps one representative per fitness point.
 */
pub struct ParetoArchive {
    accept_duplicates: bool,
    archive: Vec<Itinerary>,
}

impl ParetoArchive {
    pub fn new(accept_duplicates: bool) -> ParetoArchive {
        ParetoArchive {
            accept_duplicates,
            archive: Vec::new(),
        }
    }

    pub fn update(&mut self, pop: &[Itinerary]) {
        for ind in pop {
            self.try_push(ind.clone());
        }
    }

    pub fn try_push(&mut self, ind: Itinerary) -> bool {
        let mut is_dominated = false;
        let mut is_duplicate = false;

        for i in (0..self.archive.len()).rev() {
            let curr_ind = &self.archive[i];

            if curr_ind.dominates(&ind) {
                is_dominated = true;
            } else if ind.dominates(curr_ind) {
                self.archive.swap_remove(i);
            } else if !self.accept_duplicates && curr_ind.fitness == ind.fitness {
                is_duplicate = true;
            }

            if is_dominated {
                break;
            }
        }

        if is_dominated || is_duplicate {
            return false;
        }

        self.archive.push(ind);
        true
    }

    pub fn members(&self) -> &[Itinerary] {
        &self.archive
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}
