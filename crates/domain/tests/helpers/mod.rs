pub mod builders;

pub use builders::{hickory_query, QueryBuilder};
