pub mod p909_order_boards;
