pub use super::license::Entity as License;
