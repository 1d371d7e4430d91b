pub mod auth;
pub mod catalogue;
pub mod favorites;
pub mod history;
