use crate::models::travel::{Leg, TravelModel};

/**
 * Fills the missing connections of one mode with the cheapest two-hop
 * alternative.
 *
 * For every ordered pair with no direct connection, every intermediate city
 * with both hops present is considered; the two-hop route with the lowest
 * total cost wins and the written entry carries that route's total time.
 * Pairs with a direct connection are never touched and pairs with no valid
 * intermediate stay absent. All candidates are taken from the original
 * tables, so filled-in entries never serve as hops themselves.
 *
 * Returns the number of connections added.
 */
pub fn augment_with_layovers(model: &mut TravelModel, mode: usize) -> usize {
    if mode >= model.num_modes() {
        panic!("Unknown transport mode {}", mode);
    }

    let n = model.num_locations();
    let mut added = Vec::new();

    for from in 0..n {
        for to in 0..n {
            if from == to || model.leg(mode, from, to).is_some() {
                continue;
            }

            let mut best: Option<Leg> = None;

            for via in 0..n {
                if via == from || via == to {
                    continue;
                }

                let hops = (model.leg(mode, from, via), model.leg(mode, via, to));

                if let (Some(first), Some(second)) = hops {
                    let candidate = Leg {
                        cost: first.cost + second.cost,
                        time: first.time + second.time,
                    };

                    let better = match &best {
                        Some(curr) => candidate.cost < curr.cost,
                        None => true,
                    };

                    if better {
                        best = Some(candidate);
                    }
                }
            }

            if let Some(leg) = best {
                added.push((from, to, leg));
            }
        }
    }

    let num_added = added.len();

    for (from, to, leg) in added {
        model.set_leg(mode, from, to, Some(leg));
    }

    num_added
}
