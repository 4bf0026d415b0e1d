pub mod discounts;
pub mod products;
