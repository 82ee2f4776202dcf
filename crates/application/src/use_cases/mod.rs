//! Application use cases (business logic orchestration).

mod dashboard;

pub use dashboard::Dashboard;
