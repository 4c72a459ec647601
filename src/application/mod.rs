pub mod access;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub mod test_support;
