//! Statistical workbench engine.
//!
//! Ingest delimited text (or a manually defined schema), infer which columns
//! are numeric, then summarise, correlate and run classical tests with
//! p-values computed from the incomplete beta function.
//!
//! ```
//! use rusty_workbench::{demo, Workbench, TestRequest};
//!
//! let mut bench = Workbench::default();
//! bench.load_text(demo::DEMO_CSV);
//! let report = bench
//!     .run_test(&TestRequest::Anova {
//!         group: "region".into(),
//!         outcome: "score".into(),
//!     })
//!     .unwrap();
//! println!("{report}");
//! ```

pub mod config;
pub mod data;
pub mod demo;
pub mod error;
pub mod state;
pub mod stats;

pub use config::WorkbenchConfig;
pub use data::model::{Column, ColumnKind, Row, Table, Value};
pub use data::parser::{parse, TableParser};
pub use error::{Result, WorkbenchError};
pub use state::{Finding, FindingKind, Interpretation, TestRequest, Workbench};
pub use stats::report::TestReport;
