pub mod dispatcher;
pub mod parser;
pub mod resolver;
pub mod types;

pub use dispatcher::dispatch;
pub use parser::parse;
pub use resolver::resolve;
pub use types::{CommandReply, ParsedCommand};
