pub mod approval;
pub mod rules;
