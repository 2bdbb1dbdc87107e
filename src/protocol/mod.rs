pub mod input;

pub use input::{DeployInput, InputError};
