mod calc;
mod tem;

pub use calc::build_calc_config;
pub use tem::build_tem_config;
