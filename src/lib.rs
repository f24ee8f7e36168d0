pub mod app;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{Result, StoreError};
pub use models::{Note, NoteDraft};
pub use service::NoteStore;
