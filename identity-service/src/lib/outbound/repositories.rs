pub mod memory;
pub mod postgres;

pub use memory::InMemoryIdentityRepository;
pub use memory::InMemoryTodoRepository;
pub use postgres::PostgresIdentityRepository;
pub use postgres::PostgresTodoRepository;
