pub mod back_office;
pub mod cart;
pub mod orders;
