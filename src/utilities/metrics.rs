use crate::operators::solution::Itinerary;

pub fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

pub fn std_dev(x: &[f64]) -> f64 {
    let mean_x = mean(x);
    let sum2 = x.iter().map(|v| v * v).sum::<f64>();

    (sum2 / x.len() as f64 - mean_x * mean_x).abs().sqrt()
}

// Per-generation summary of one objective across the population
#[derive(Clone, Debug, PartialEq)]
pub struct PopulationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

pub fn population_stats(pop: &[Itinerary], objective: usize) -> PopulationStats {
    if pop.is_empty() {
        panic!("Cannot summarise an empty population");
    }

    let values: Vec<f64> = pop
        .iter()
        .map(|ind| ind.fitness.values()[objective])
        .collect();

    let mut min = values[0];
    let mut max = values[0];

    for &value in &values {
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }

    PopulationStats {
        min,
        max,
        mean: mean(&values),
        std_dev: std_dev(&values),
    }
}

// ----- Unit tests ---- //
#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::solution::Fitness;

    #[test]
    fn test_mean_and_std_dev() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

        assert_eq!(mean(&values), 5.0);
        assert_eq!(std_dev(&values), 2.0);
    }

    #[test]
    fn test_population_stats() {
        let pop: Vec<Itinerary> = [3.0, 1.0, 2.0]
            .iter()
            .map(|&value| {
                let mut ind = Itinerary::new(vec![0, 1], Vec::new());
                ind.fitness = Fitness::Valued(vec![value]);
                ind
            })
            .collect();

        let stats = population_stats(&pop, 0);

        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 2.0);
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn test_empty_population() {
        population_stats(&[], 0);
    }
}
