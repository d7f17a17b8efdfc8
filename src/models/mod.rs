pub mod heuristic_model;
pub mod layovers;
pub mod travel;
