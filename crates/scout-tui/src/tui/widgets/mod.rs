// TUI widget modules for each dashboard zone.

pub mod help_bar;
pub mod panels;
pub mod player_list;
pub mod quit_confirm;
pub mod roster;
pub mod status_bar;
pub mod team_grid;
