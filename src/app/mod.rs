pub mod build_use_case;
pub mod ports;
