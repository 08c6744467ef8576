pub mod filter;
pub mod response;
pub mod sale;

pub use filter::*;
pub use response::*;
pub use sale::*;
