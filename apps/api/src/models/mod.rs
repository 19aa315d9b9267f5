pub mod ats;
pub mod coding;
pub mod history;
pub mod interview;
pub mod report;
pub mod roadmap;
