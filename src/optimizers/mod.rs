mod optimizer;
mod trainer;

pub use optimizer::*;
pub use trainer::OnlineTrainer;
