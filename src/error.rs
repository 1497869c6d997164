use derive_more::From;

use crate::node::ExpansionError;
use crate::selection::ParseError;

#[derive(From, thiserror::Error, Debug)]
pub enum Error {
    #[error("Parse Error: {}", _0)]
    Parse(ParseError),

    #[error("Expansion Error: {}", _0)]
    Expansion(ExpansionError),
}

pub type Result<A> = std::result::Result<A, Error>;
