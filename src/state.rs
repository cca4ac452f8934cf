use crate::db::{DbPool, OrmConn};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    /// Number of physical tables in the room, for the table picker.
    pub table_count: i32,
}
