pub mod claims;
pub mod codec;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::TokenType;
pub use codec::TokenCodec;
pub use errors::JwtError;
pub use handler::JwtHandler;
