//! Pass configuration.

/// Configuration of [`DeferredInitLowering`](crate::DeferredInitLowering).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoweringOptions {
    /// Pass the name of the uninitialized declaration to the runtime throw
    /// function so the raised error can mention it.
    pub generate_property_name_in_assertion: bool,
}

impl LoweringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property_name_in_assertion(mut self, enabled: bool) -> Self {
        self.generate_property_name_in_assertion = enabled;
        self
    }
}
