use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::models::travel::TravelModel;

const TIME_WEIGHT: f64 = 0.9;
const COST_WEIGHT: f64 = 0.1;

// Max-heap entry keyed on the weighted score, worst connection on top
struct Connection {
    destination: usize,
    score: f64,
}

impl PartialEq for Connection {
    fn eq(&self, other: &Connection) -> bool {
        self.score == other.score
    }
}

impl Eq for Connection {}

impl PartialOrd for Connection {
    fn partial_cmp(&self, other: &Connection) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Connection {
    fn cmp(&self, other: &Connection) -> Ordering {
        // Scores come from finite costs and times, never NaN
        self.score.partial_cmp(&other.score).unwrap()
    }
}

/**
 * The n destinations best connected to `origin` under one mode, ranked by a
 * weighted sum of travel time and cost. Destinations without a connection
 * are skipped. A fixed-capacity heap keeps the current best n, evicting the
 * worst in O(log n).
 *
 * Best connections are returned first.
 */
pub fn best_connections(model: &TravelModel, mode: usize, origin: usize, n: usize) -> Vec<usize> {
    if n == 0 {
        panic!("Requested number of connections must be 1 or greater");
    }

    let mut heap: BinaryHeap<Connection> = BinaryHeap::with_capacity(n);

    for destination in 0..model.num_locations() {
        if destination == origin {
            continue;
        }

        let leg = match model.leg(mode, origin, destination) {
            Some(leg) => leg,
            None => continue,
        };

        let score = TIME_WEIGHT * leg.time + COST_WEIGHT * leg.cost;

        if heap.len() < n {
            heap.push(Connection { destination, score });
        } else if score < heap.peek().unwrap().score {
            heap.pop();
            heap.push(Connection { destination, score });
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|connection| connection.destination)
        .collect()
}

/// How often each city appears among every other city's n best connections.
pub fn repeated_connections(model: &TravelModel, mode: usize, n: usize) -> Vec<usize> {
    let mut counts = vec![0; model.num_locations()];

    for origin in 0..model.num_locations() {
        for destination in best_connections(model, mode, origin, n) {
            counts[destination] = counts[destination] + 1;
        }
    }

    counts
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::travel::Leg;

    fn star_model() -> TravelModel {
        let n = 6;
        let mut table = vec![vec![None; n]; n];

        // From city 0: scores 0.9 * time + 0.1 * cost
        table[0][1] = Some(Leg { cost: 100.0, time: 10.0 });  // 19
        table[0][2] = Some(Leg { cost: 10.0, time: 100.0 });  // 91
        table[0][3] = Some(Leg { cost: 50.0, time: 50.0 });   // 50
        table[0][4] = Some(Leg { cost: 20.0, time: 5.0 });    // 6.5
        // No connection 0 -> 5

        // Everything reaches city 4 cheaply
        for from in 1..n {
            if from != 4 {
                table[from][4] = Some(Leg { cost: 1.0, time: 1.0 });
            }
        }

        let locations = (0..n).map(|i| format!("City{}", i)).collect();

        TravelModel::new(locations, vec!["plane".to_string()], vec![table])
    }

    #[test]
    fn test_best_connections() {
        let model = star_model();

        // Best first, absent destinations skipped
        assert_eq!(best_connections(&model, 0, 0, 2), vec![4, 1]);
        assert_eq!(best_connections(&model, 0, 0, 3), vec![4, 1, 3]);

        // Fewer reachable destinations than requested
        assert_eq!(best_connections(&model, 0, 0, 10), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_matches_exhaustive_ranking() {
        let model = star_model();

        // Brute force over every reachable destination from city 0
        let mut scored: Vec<(f64, usize)> = (1..model.num_locations())
            .filter_map(|destination| {
                model
                    .leg(0, 0, destination)
                    .map(|leg| (0.9 * leg.time + 0.1 * leg.cost, destination))
            })
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let expected: Vec<usize> = scored.into_iter().take(3).map(|(_, d)| d).collect();

        assert_eq!(best_connections(&model, 0, 0, 3), expected);
    }

    #[test]
    fn test_repeated_connections() {
        let model = star_model();
        let counts = repeated_connections(&model, 0, 2);

        // City 4 is in everyone's best list
        assert_eq!(counts[4], 5);

        // Nothing connects to city 5
        assert_eq!(counts[5], 0);

        // A city is never its own connection
        assert_eq!(counts[0], 0);
    }

    #[test]
    #[should_panic(expected = "1 or greater")]
    fn test_zero_connections() {
        let model = star_model();
        best_connections(&model, 0, 0, 0);
    }
}
