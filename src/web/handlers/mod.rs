//! Web 路由处理器

pub mod locales;
pub mod readiness;
pub mod translate;

pub use locales::*;
pub use readiness::*;
pub use translate::*;
