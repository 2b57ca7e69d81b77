pub mod employee;
pub mod notification;
pub mod policy;
pub mod request;
pub mod role;
pub mod schedule;
pub mod template;
