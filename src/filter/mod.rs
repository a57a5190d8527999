//! FIR low-pass designers.
//!
//! - [`window`]: Boxcar / Hann / Hamming / Kaiser windows and Bessel I₀.
//! - [`design`]: windowed-sinc design, matching `scipy.signal.firwin`.
//! - [`kaiser`]: length and `beta` from an attenuation target
//!   (`scipy.signal.kaiserord`).
//! - [`remez`]: Parks-McClellan equiripple design.
//! - [`freq_sampling`]: frequency-sampling design, matching
//!   `scipy.signal.firwin2`.

pub mod design;
pub mod freq_sampling;
pub mod kaiser;
pub mod remez;
pub mod window;

pub use design::{design_hann_lowpass, firwin};
pub use freq_sampling::{design_freq_sampling_lowpass, firwin2, firwin2_with_grid};
pub use kaiser::{design_kaiser_lowpass, kaiser_beta, kaiserord, KaiserEstimate};
pub use remez::{design_remez_lowpass, remez, remez_weighted, RemezDesign, RemezOptions};
pub use window::{bessel_i0, Window};
