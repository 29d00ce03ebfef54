pub mod accounts;
pub mod admin;
pub mod catalog;
pub mod favorites;
pub mod language;
pub mod notifications;
pub mod pages;
pub mod search;
pub mod setup;
pub mod usage;
