pub mod solution;

pub mod crossover;
pub mod evaluation;
pub mod initialisation;
pub mod mutation;
pub mod selection;
