//! `lurk-output` — simulation output writers for the lurk workspace.
//!
//! The CSV backend creates two files:
//!
//! | File                 | Contents                                      |
//! |----------------------|-----------------------------------------------|
//! | `agent_states.csv`   | per-enemy behavior state + position snapshots |
//! | `tick_summaries.csv` | sight events delivered per tick               |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `lurk_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lurk_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentStateRow, TickSummaryRow};
pub use writer::OutputWriter;
