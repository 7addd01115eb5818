pub mod component;
pub mod nn;
pub mod rule_based;
