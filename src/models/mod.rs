/// Persisted records and their partial-update inputs
///
/// # Models
///
/// - `user`: registered accounts; mutated only through profile updates
/// - `task`: per-user tasks with free-form status editing
///
/// Each record type carries a `Create*`/`Register*` input struct for
/// construction and an `Update*` struct of `Option` fields for shallow
/// merges, mirroring how the services apply partial updates.
pub mod task;
pub mod user;
