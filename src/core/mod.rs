pub mod aggregate;
pub mod engine;
pub mod pagination;
pub mod report;
pub mod salary;

pub use crate::domain::model::{LanguageStatistic, SalaryFields, StatisticsReport};
pub use crate::domain::ports::{TownResolver, VacancySource};
pub use crate::utils::error::Result;
