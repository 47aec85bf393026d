// Library root: re-exports all modules so integration tests and external
// consumers can access the front end's building blocks.

pub mod cli;
pub mod pipeline;
pub mod report;
