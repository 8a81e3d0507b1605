pub mod basic;
pub mod gui;
pub mod light;
pub mod lines;
