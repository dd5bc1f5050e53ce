pub mod aggregator;
pub mod engine;
pub mod history;
pub mod prober;
pub mod scheduler;
