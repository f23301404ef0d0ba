//! API 핸들러 모듈.

pub mod health;
pub mod news;
pub mod session;
pub mod stream;
pub mod vitals;
