/// Identity and task services
///
/// These two services are the entire API surface of the crate. Each
/// operation reads or mutates the durable store synchronously, then
/// delivers its outcome through the simulated network delay, so
/// presentation collaborators always await the same asynchronous
/// contract.
///
/// # Services
///
/// - `identity`: login, registration, logout, profile update, seeding
/// - `tasks`: per-user task CRUD
pub mod identity;
pub mod tasks;

pub use identity::IdentityService;
pub use tasks::TaskService;
