//! Host device implementation

/// Host device (there's only one: the host memory the kernels run over)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostDevice {
    id: usize,
}

impl HostDevice {
    /// Create a new host device
    pub fn new() -> Self {
        Self { id: 0 }
    }

    /// Device index
    pub fn id(&self) -> usize {
        self.id
    }

    /// Device name
    pub fn name(&self) -> String {
        "host".to_string()
    }
}
