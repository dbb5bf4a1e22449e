pub mod constants;
pub mod report;

pub use report::ReportPage;
