//! Sea-ORM entities for the `orders` and `order_items` tables

pub mod order;
pub mod order_item;
