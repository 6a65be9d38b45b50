mod inputs;
mod runner;
pub(crate) mod summary;


pub(crate) use inputs::{resolve_params, resolve_target};
pub(crate) use runner::run_load;
#[cfg(test)]
pub(crate) use runner::run_with_transports;
