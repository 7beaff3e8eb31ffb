//! Command implementations.

pub mod ask;
pub mod extract;
pub mod tokens;

pub use self::ask::execute_ask;
pub use self::extract::execute_extract;
pub use self::tokens::execute_tokens;
