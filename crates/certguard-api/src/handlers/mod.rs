pub mod bulk_verify;
pub mod health;
pub mod verify;
