//! Business logic layer.
//!
//! Services orchestrate repository calls and domain rules between the controllers and
//! the data layer. They accept and return domain models, never DTOs.

pub mod license;

#[cfg(test)]
mod test;
