//! API Routes
//!
//! Route handlers organized by view.

pub mod card;
pub mod health;
pub mod map;
pub mod options;
pub mod report;
