pub mod gui;
pub mod sys;
