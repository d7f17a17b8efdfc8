pub mod hypervolume;
pub mod metrics;
pub mod nds;
