pub mod aggregate;
pub mod cli;
pub mod ext;
pub mod filter;
pub mod identity;
pub mod metrics;
pub mod model;
pub mod period;
pub mod provider;
pub mod render;
pub mod run;
pub mod sort;
pub mod util;
