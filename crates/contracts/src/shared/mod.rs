pub mod status_board;
