//! Background maintenance for WeightShare.
//!
//! This crate provides:
//! - The expired-share sweep job
//! - A cron scheduler that runs it periodically

pub mod jobs;
pub mod scheduler;

pub use jobs::ExpiredShareSweeper;
pub use scheduler::SweepScheduler;
