pub mod components;
pub mod icons;
pub mod status_board;
