//! Dense STFT Library
//!
//! Short-Time Fourier Transform analysis and synthesis computed with fixed
//! dense projection matrices instead of a radix FFT. Provides the forward
//! transform, the overlap-add inverse and a single-frame inverse that all
//! share one DC / Nyquist bin convention (see [`basis`]).

pub mod basis;
pub mod config;
pub mod error;
pub mod ifft;
pub mod istft;
pub mod spectrum;
pub mod stft;
pub mod window;

pub use config::TransformConfig;
pub use error::TransformError;
pub use ifft::{single_frame_inverse, SingleFrameInverse};
pub use istft::{make_inverse_transform, InverseTransform};
pub use spectrum::{FrameSpectra, Spectrum};
pub use stft::{make_forward_transform, ForwardTransform};
pub use window::WindowType;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
///
/// Sets up logging when the `env_logger` feature is enabled.
pub fn init() {
    #[cfg(feature = "env_logger")]
    {
        let _ = env_logger::try_init();
    }
}

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;
