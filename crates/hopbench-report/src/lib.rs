//! Report generation for hopbench sessions.

pub mod html;
