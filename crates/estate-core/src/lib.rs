pub mod drone_plan;
pub mod models;
pub mod rules;
pub mod stats;

pub use drone_plan::{compute_drone_distance, CRUISE_CLEARANCE, STEP_COST};
pub use models::{
    CreateEstateRequest, CreateTreeRequest, CreatedResponse, DroneDistance, Estate, EstateStats,
    Tree,
};
pub use rules::{EstateRules, ValidationError};
pub use stats::compute_statistics;
