pub mod identity;
pub mod todo;

pub use identity::InMemoryIdentityRepository;
pub use todo::InMemoryTodoRepository;
