pub mod account;
pub mod quote;
pub mod request;
pub mod tally;
