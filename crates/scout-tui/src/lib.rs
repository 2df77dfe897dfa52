// Terminal front end for the FFCV scout dashboard.

pub mod tui;
