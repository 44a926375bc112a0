pub mod companies;
pub mod customers;
pub mod routes;
