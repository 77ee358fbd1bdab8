//! API handlers module

pub mod chat;
pub mod health;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;
