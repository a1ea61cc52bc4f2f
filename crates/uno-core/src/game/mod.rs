pub mod agent;
pub mod event;
pub mod orchestrator;
pub mod rules;
pub mod state;
pub mod view;
