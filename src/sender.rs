//! Bus writer
//!
//! Turns a [`Command`](crate::command::Command) into RS/DB/EN transitions.
//! R/W is never driven by this crate, tie it to GND.

mod parallel_sender;

pub use parallel_sender::ParallelSender;
