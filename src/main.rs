mod algorithms;
mod configuration;
mod models;
mod operators;
mod utilities;

use std::fs::{self, File, OpenOptions};
use std::io::{prelude::*, BufReader, BufWriter};
use std::path::PathBuf;

use chrono::Utc;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};

use crate::algorithms::{ga, nsgaii};
use crate::configuration::{Replacement, RunConfig, SelectionStrategy};
use crate::models::heuristic_model;
use crate::models::layovers::augment_with_layovers;
use crate::models::travel::{Leg, ModeTable, TravelModel};
use crate::operators::crossover::PartiallyMatchedCrossover;
use crate::operators::evaluation::{CostEvaluation, CostTimeEvaluation};
use crate::operators::initialisation::{RandomItineraryInit, RandomTourInit};
use crate::operators::mutation::{ModeResampleMutation, ShuffleIndexesMutation};
use crate::operators::selection::{first_front, RankedSelection, TournamentSelection};
use crate::operators::solution::Itinerary;
use crate::utilities::hypervolume::hypervolume;
use crate::utilities::metrics::population_stats;
use crate::utilities::nds::ParetoArchive;

fn main() {
    let mut settings = config::Config::default();
    settings
        .merge(config::File::with_name("Config"))
        .unwrap()
        .merge(config::Environment::with_prefix("APP"))
        .unwrap();

    // Get output folder
    let results_folder: String = settings
        .get("results_folder")
        .unwrap_or_else(|_| "results".to_string());
    let results_folder = PathBuf::new()
        .join(&results_folder)
        .join(Utc::now().format("%Y%m%d_%H%M%S").to_string());

    let num_cities: usize = settings.get("num_cities").unwrap_or(30);
    let mode_names: Vec<String> = settings.get("modes").unwrap_or_else(|_| {
        vec!["train".to_string(), "plane".to_string(), "bus".to_string()]
    });

    let dataset_folder = PathBuf::from(
        settings
            .get::<String>("dataset_folder")
            .unwrap_or_else(|_| "datasets".to_string()),
    );

    let mut model = if settings.get("synthetic").unwrap_or(false) {
        let connectivity = settings.get("connectivity").unwrap_or(0.9);
        synthetic_model(num_cities, &mode_names, connectivity)
    } else {
        load_model(&dataset_folder, &mode_names, num_cities)
    };

    if let Ok(layover_mode) = settings.get::<String>("layover_mode") {
        let mode = model
            .mode_id(&layover_mode)
            .unwrap_or_else(|| panic!("Unknown transport mode '{}'", layover_mode));

        model = with_layovers(model, mode, &dataset_folder);
    }

    if settings.get("best_connections").unwrap_or(false) {
        let mode_name: String = settings
            .get("best_connections_mode")
            .unwrap_or_else(|_| model.mode_name(0).to_string());
        let mode = model
            .mode_id(&mode_name)
            .unwrap_or_else(|| panic!("Unknown transport mode '{}'", mode_name));

        let num_connections = settings.get("num_connections").unwrap_or(10);

        print_best_connections(&results_folder, &model, mode, num_connections).unwrap();

        return;
    }

    let selection = SelectionStrategy::from_name(
        &settings
            .get::<String>("selection")
            .unwrap_or_else(|_| "ranked".to_string()),
    );

    let default_replacement = match selection {
        SelectionStrategy::Tournament => "trailing",
        SelectionStrategy::Ranked => "wholesale",
    };
    let default_breeding = match selection {
        SelectionStrategy::Tournament => 2.0 / 3.0,
        SelectionStrategy::Ranked => 1.0 / 3.0,
    };

    let run_config = RunConfig {
        pop_size: settings.get("pop_size").unwrap_or(100),
        max_evaluations: settings.get("max_evaluations").unwrap_or(10_000),
        cxpb: settings.get("cxpb").unwrap_or(0.7),
        order_mutpb: settings.get("order_mutpb").unwrap_or(0.2),
        order_indpb: settings.get("order_indpb").unwrap_or(0.05),
        mode_mutpb: settings.get("mode_mutpb").unwrap_or(0.2),
        mode_indpb: settings.get("mode_indpb").unwrap_or(0.05),
        tournsize: settings.get("tournsize").unwrap_or(4),
        selection,
        replacement: Replacement::from_name(
            &settings
                .get::<String>("replacement")
                .unwrap_or_else(|_| default_replacement.to_string()),
        ),
        breeding_fraction: settings.get("breeding_fraction").unwrap_or(default_breeding),
        num_cities: model.num_locations(),
        num_modes: model.num_modes(),
    };
    run_config.validate();

    match run_config.selection {
        SelectionStrategy::Tournament => {
            let mode_name: String = settings
                .get("fixed_mode")
                .unwrap_or_else(|_| model.mode_name(0).to_string());
            let mode = model
                .mode_id(&mode_name)
                .unwrap_or_else(|| panic!("Unknown transport mode '{}'", mode_name));

            run_single_objective(&model, &run_config, mode, &results_folder);
        }
        SelectionStrategy::Ranked => {
            let reference: Vec<f64> = settings
                .get("hv_reference")
                .unwrap_or_else(|_| vec![100_000.0, 100_000.0]);

            if reference.len() != 2 {
                panic!("The hypervolume reference point needs exactly two values");
            }

            run_multi_objective(&model, &run_config, (reference[0], reference[1]), &results_folder);
        }
    }
}

fn run_single_objective(
    model: &TravelModel,
    config: &RunConfig,
    mode: usize,
    results_folder: &PathBuf,
) {
    let init_pop = RandomTourInit::new(config.num_cities);
    let evaluate = CostEvaluation::new(model, mode);
    let selection = TournamentSelection::new(config.tournsize);
    let crossover = PartiallyMatchedCrossover::new(config.cxpb);
    let mutation = ShuffleIndexesMutation::new(config.order_mutpb, config.order_indpb);

    let mut stats_file = get_file(results_folder, "stats.out").unwrap();

    println!("Start of evolution");

    let best = ga::run(
        &init_pop,
        &evaluate,
        &selection,
        &crossover,
        &mutation,
        config,
        |evaluations, pop| {
            let stats = population_stats(pop, 0);

            writeln!(
                stats_file,
                "{},{},{},{},{}",
                evaluations, stats.min, stats.max, stats.mean, stats.std_dev
            )
            .unwrap();
        },
    );

    println!("-- End of (successful) evolution --");
    println!(
        "Best itinerary is {}, {:?}",
        format_itinerary(&best, model, Some(mode)),
        best.fitness.values()
    );
}

fn run_multi_objective(
    model: &TravelModel,
    config: &RunConfig,
    reference: (f64, f64),
    results_folder: &PathBuf,
) {
    let init_pop = RandomItineraryInit::new(config.num_cities, config.num_modes);
    let evaluate = CostTimeEvaluation::new(model);
    let selection = RankedSelection::new();
    let crossover = PartiallyMatchedCrossover::new(config.cxpb);
    let order_mutation = ShuffleIndexesMutation::new(config.order_mutpb, config.order_indpb);
    let mode_mutation =
        ModeResampleMutation::new(config.mode_mutpb, config.mode_indpb, config.num_modes);

    let mut hv_file = get_file(results_folder, "hypervolume.out").unwrap();
    let mut generation = 0;

    println!("Start of evolution");

    let archive = nsgaii::run(
        &init_pop,
        &evaluate,
        &selection,
        &crossover,
        &order_mutation,
        &mode_mutation,
        config,
        |evaluations, pop, archive| {
            println!("-- Generation {} --", generation);
            generation = generation + 1;

            let front = first_front(pop);
            print_population_objectives(
                results_folder,
                format!("front_{}.objs", evaluations),
                &front,
            )
            .unwrap();

            writeln!(
                hv_file,
                "{},{}",
                evaluations,
                hypervolume(&archive_points(archive), reference)
            )
            .unwrap();
        },
    );

    println!("-- End of (successful) evolution --");

    print_population_objectives(results_folder, "archive.objs".to_string(), archive.members())
        .unwrap();

    for ind in archive.members() {
        println!(
            "Best itinerary is {}, {:?}",
            format_itinerary(ind, model, None),
            ind.fitness.values()
        );
    }
}

fn archive_points(archive: &ParetoArchive) -> Vec<(f64, f64)> {
    archive
        .members()
        .iter()
        .map(|ind| {
            let values = ind.fitness.values();
            (values[0], values[1])
        })
        .collect()
}

fn format_itinerary(ind: &Itinerary, model: &TravelModel, fixed_mode: Option<usize>) -> String {
    let mut legs = Vec::with_capacity(ind.len());

    for (i, &city) in ind.order.iter().enumerate() {
        let mode = match fixed_mode {
            Some(mode) => mode,
            None => ind.modes[i],
        };

        legs.push(format!(
            "{}-{}",
            model.location_name(city),
            model.mode_name(mode)
        ));
    }

    legs.join(" ")
}

fn load_model(dataset_folder: &PathBuf, mode_names: &[String], num_cities: usize) -> TravelModel {
    let mut tables = Vec::with_capacity(mode_names.len());
    let mut locations = Vec::new();

    for mode in mode_names {
        let (names, costs) =
            read_matrix(&dataset_folder.join(format!("cost{}.csv", mode)), num_cities);
        let (_, times) =
            read_matrix(&dataset_folder.join(format!("time{}.csv", mode)), num_cities);

        if locations.is_empty() {
            locations = names;
        }

        tables.push(merge_tables(&costs, &times));
    }

    TravelModel::new(locations, mode_names.to_vec(), tables)
}

fn read_matrix(path: &PathBuf, num_cities: usize) -> (Vec<String>, Vec<Vec<Option<f64>>>) {
    let file = File::open(path).unwrap_or_else(|_| panic!("Missing matrix file {:?}", path));
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file);

    let mut records = reader.records();

    // First row holds the city names, first column repeats them
    let header = match records.next() {
        Some(record) => record.unwrap(),
        None => panic!("Matrix file {:?} is empty", path),
    };

    let names: Vec<String> = header
        .iter()
        .skip(1)
        .take(num_cities)
        .map(|name| name.to_string())
        .collect();

    let mut rows = Vec::with_capacity(num_cities);

    for record in records.take(num_cities) {
        let record = record.unwrap();

        let row = record
            .iter()
            .skip(1)
            .take(num_cities)
            .map(parse_entry)
            .collect();

        rows.push(row);
    }

    (names, rows)
}

fn parse_entry(field: &str) -> Option<f64> {
    match field.trim() {
        "-" | "" => None,
        value => Some(
            value
                .parse()
                .unwrap_or_else(|_| panic!("Malformed matrix entry '{}'", value)),
        ),
    }
}

fn merge_tables(costs: &[Vec<Option<f64>>], times: &[Vec<Option<f64>>]) -> ModeTable {
    // A leg is only usable when both its cost and its time are known
    let mut table = Vec::with_capacity(costs.len());

    for (cost_row, time_row) in costs.iter().zip(times) {
        let mut row = Vec::with_capacity(cost_row.len());

        for (cost, time) in cost_row.iter().zip(time_row) {
            row.push(match (cost, time) {
                (Some(cost), Some(time)) => Some(Leg {
                    cost: *cost,
                    time: *time,
                }),
                _ => None,
            });
        }

        table.push(row);
    }

    table
}

fn with_layovers(model: TravelModel, mode: usize, dataset_folder: &PathBuf) -> TravelModel {
    let cache_path = dataset_folder.join(format!("{}_layovers.dat", model.mode_name(mode)));

    if let Ok(file) = File::open(&cache_path) {
        let reader = BufReader::new(file);
        let cached: TravelModel = bincode::deserialize_from(reader).unwrap();

        if cached.num_locations() == model.num_locations() {
            return cached;
        }
    }

    let mut model = model;
    let num_added = augment_with_layovers(&mut model, mode);

    println!(
        "Added {} layover connections for {}",
        num_added,
        model.mode_name(mode)
    );

    if let Ok(file) = File::create(&cache_path) {
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &model).unwrap();
    }

    model
}

fn synthetic_model(num_cities: usize, mode_names: &[String], connectivity: f64) -> TravelModel {
    // Rough long-haul fares and minutes
    let cost_distr = Normal::new(120.0, 40.0).unwrap();
    let time_distr = Normal::new(300.0, 90.0).unwrap();

    let mut rng = thread_rng();
    let mut tables = Vec::with_capacity(mode_names.len());

    for _ in mode_names {
        let mut table = vec![vec![None; num_cities]; num_cities];

        for from in 0..num_cities {
            for to in 0..num_cities {
                if from == to || rng.gen::<f64>() > connectivity {
                    continue;
                }

                let cost: f64 = cost_distr.sample(&mut rng);
                let time: f64 = time_distr.sample(&mut rng);

                table[from][to] = Some(Leg {
                    cost: cost.max(1.0),
                    time: time.max(1.0),
                });
            }
        }

        tables.push(table);
    }

    let locations = (0..num_cities).map(|i| format!("City{}", i)).collect();

    TravelModel::new(locations, mode_names.to_vec(), tables)
}

fn print_best_connections(
    folder: &PathBuf,
    model: &TravelModel,
    mode: usize,
    n: usize,
) -> std::io::Result<()> {
    let mut file = get_file(folder, "best_connections.out")?;

    for origin in 0..model.num_locations() {
        let connections = heuristic_model::best_connections(model, mode, origin, n);
        let names: Vec<&str> = connections
            .iter()
            .map(|&destination| model.location_name(destination))
            .collect();

        writeln!(file, "{}: {}", model.location_name(origin), names.join(","))?;
    }

    writeln!(file)?;

    let counts = heuristic_model::repeated_connections(model, mode, n);
    for (city, count) in counts.iter().enumerate() {
        writeln!(file, "Repeated {}: {}", model.location_name(city), count)?;
    }

    Ok(())
}

fn print_population_objectives(
    folder: &PathBuf,
    file_name: String,
    pop: &[Itinerary],
) -> std::io::Result<()> {
    let mut file = get_file(folder, &file_name)?;

    for ind in pop {
        let objectives = ind.fitness.values();

        for (i, objective) in objectives.iter().enumerate() {
            write!(file, "{}", objective)?;

            if i < objectives.len() - 1 {
                write!(file, ",")?;
            }
        }

        writeln!(file)?;
    }

    Ok(())
}

fn get_file(folder: &PathBuf, file: &str) -> std::io::Result<BufWriter<File>> {
    fs::create_dir_all(folder)?;
    let path = folder.join(file);

    let file = OpenOptions::new().write(true).create(true).open(path)?;

    Ok(BufWriter::new(file))
}
