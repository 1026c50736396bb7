//! Everything that ends up on screen.

pub mod triangle;
