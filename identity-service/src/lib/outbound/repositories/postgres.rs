pub mod identity;
pub mod todo;

pub use identity::PostgresIdentityRepository;
pub use todo::PostgresTodoRepository;
