//! Model types and the physical impact model
//!
//! - `inputs` - the nine uncertain inputs and their fixed column order
//! - `matrix` - row-major sample matrix
//! - `impact` - impact point physics, single-row and batched
//! - `convert` - uniform-to-Normal parameter conversion
//! - `cloud` - point cloud of a direct simulation

mod cloud;
mod convert;
mod impact;
mod inputs;
mod matrix;

pub use cloud::ImpactCloud;
pub use convert::ParameterConverter;
pub use impact::{
    ImpactPoint, convective_velocity, evaluate_batch, evaluate_distances, impact_point,
};
pub use inputs::{InputParameter, InputSample, NUM_INPUTS};
pub use matrix::SampleMatrix;
