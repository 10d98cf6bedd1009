pub mod agent;
pub mod config;
pub mod decision;
pub mod error;
pub mod evaluation;
pub mod game_tree;
pub mod score;
pub mod search;
pub mod strategy;
