pub mod constants;
pub mod forms;
pub mod slug;
pub mod templates;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
