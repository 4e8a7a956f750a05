mod display;

pub use display::DisplayLines;
