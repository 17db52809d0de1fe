pub mod fortune;
pub mod luck;
pub mod sheets;
pub mod zodiac;

// Re-export commonly used types
pub use fortune::*;
pub use zodiac::*;
