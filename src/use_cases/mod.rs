pub mod probe;

#[cfg(test)]
pub(crate) mod test_support;
