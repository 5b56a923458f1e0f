//! Brightgate - Theme Park Simulation Core

pub mod agent;
pub mod award;
pub mod command;
pub mod core;
pub mod hooks;
pub mod paint;
pub mod park;
pub mod registry;
pub mod ride;
pub mod simulation;
pub mod world;
