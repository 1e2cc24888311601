mod constant_value;
mod flat_normal;
mod interpolated_normal;

pub use constant_value::*;
pub use flat_normal::*;
pub use interpolated_normal::*;
