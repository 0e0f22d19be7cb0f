//! `bn-output` — post-run CSV reports for the bottleneck simulator.
//!
//! Two files are created in the configured output directory:
//!
//! | File                | One row per                                   |
//! |---------------------|-----------------------------------------------|
//! | `vehicle_waits.csv` | completed vehicle (completion order)          |
//! | `run_summaries.csv` | simulation run                                |
//!
//! This is a report, not persistence: nothing is read back by the engine.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bn_output::CsvReporter;
//!
//! let mut reporter = CsvReporter::new(Path::new("./output"))?;
//! let (summary, records) = sim.run_detailed(&mut NoopObserver)?;
//! reporter.write_run(&config, &summary, &records)?;
//! reporter.finish()?;
//! ```

pub mod error;
pub mod report;
pub mod row;


pub use report::CsvReporter;
pub use error::{OutputError, OutputResult};
pub use row::{RunSummaryRow, VehicleWaitRow};
