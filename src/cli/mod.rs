pub mod args;
pub mod deploy;
