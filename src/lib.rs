//! Skirmish - Turn-Based Tactics Simulation Core

pub mod ai;
pub mod battle;
pub mod core;
pub mod journal;
pub mod llm;
