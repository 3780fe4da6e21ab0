//! Route components, one module per page.

pub mod checkout;
pub mod create_product;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod signup;
