/// Represents the physical location where tensor data is stored.
///
/// Only host memory is implemented. The value is still threaded through
/// user-defined functions so their `forward` can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum StorageDevice {
    /// Main system memory. This is the default device.
    #[default]
    CPU,
}
