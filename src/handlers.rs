pub mod alerts;
pub mod health;
pub mod insights;
pub mod ledger;
pub mod projections;
pub mod summary;
