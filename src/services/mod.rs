pub mod accounts;
pub mod assessments;
pub mod matcher;
pub mod providers;
