pub mod samples;
pub mod warn_stdout;
