pub mod models;
pub mod repository;

pub use models::{HistoryQuery, NewResult, PlayerModel, StoredResult};
pub use repository::{
    InMemoryResultRepository, PostgresResultRepository, ResultRepository, UpsertOutcome,
};
