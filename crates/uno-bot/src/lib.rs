pub mod agent;
pub mod policy;

pub use agent::ComputerAgent;
pub use policy::{Decision, Policy, TieredPolicy, majority_color};
pub use uno_core::model::player::Difficulty;
