#![forbid(unsafe_code)]

mod clock;
mod jsonrpc;
mod params;
mod runtime;
mod settings;

pub(crate) use clock::*;
pub(crate) use jsonrpc::*;
pub(crate) use params::*;
pub(crate) use runtime::*;
pub(crate) use settings::*;
