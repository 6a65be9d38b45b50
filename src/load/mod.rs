//! Concurrent closed-loop request workers.
mod stop;
mod worker;


pub use stop::StopController;
pub use worker::LoadWorker;
