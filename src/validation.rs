/// The outcome of a structural check: valid when no errors were collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns a result with `message` appended
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    /// Appends `message` when `condition` does not hold
    pub fn check(self, condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition { self } else { self.with_error(message()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_errors() {
        let result = ValidationResult::new();
        assert!(result.is_valid());

        let result = result
            .check(true, || "never".into())
            .check(false, || "first".into())
            .with_error("second");
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["first", "second"]);
    }
}
