pub mod pagination_controls;
pub mod status_tiles;
pub mod table;
