use std::fmt;

/// Identifies a remote session counterpart as a (name, device-id) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AxolotlAddress {
    name: String,
    device_id: u32,
}

impl AxolotlAddress {
    pub fn new(name: String, device_id: u32) -> Self {
        Self { name, device_id }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_id(&self) -> u32 {
        self.device_id
    }
}

impl fmt::Display for AxolotlAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.device_id)
    }
}
