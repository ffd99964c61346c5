//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod resolve;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use resolve::ResolveArgs;
