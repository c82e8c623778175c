pub mod postgres;

#[cfg(test)]
pub mod memory;
